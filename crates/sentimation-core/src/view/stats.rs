use sentimation_shared::{
  TaskDto,
  TaskStatus
};

use super::RenderInstruction;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum StatField {
  Total,
  Pending,
  Running,
  Completed,
  Failed
}

/// Display target id for each counter.
pub const STAT_TARGETS: [(
  &str,
  StatField
); 5] = [
  ("total-tasks", StatField::Total),
  ("pending-tasks", StatField::Pending),
  (
    "completed-tasks",
    StatField::Completed
  ),
  ("failed-tasks", StatField::Failed),
  ("running-tasks", StatField::Running)
];

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct DashboardStats {
  pub total:     usize,
  pub pending:   usize,
  pub running:   usize,
  pub completed: usize,
  pub failed:    usize
}

impl DashboardStats {
  /// Counters for a loaded snapshot. Before the first successful load
  /// there is nothing to show and the page keeps what it has.
  #[must_use]
  pub fn from_snapshot(
    snapshot: Option<&[TaskDto]>
  ) -> Option<Self> {
    snapshot.map(Self::from_tasks)
  }

  #[must_use]
  pub fn from_tasks(
    tasks: &[TaskDto]
  ) -> Self {
    let mut stats = Self {
      total: tasks.len(),
      ..Self::default()
    };

    for task in tasks {
      match task.status {
        | TaskStatus::Pending => {
          stats.pending += 1
        }
        | TaskStatus::Running => {
          stats.running += 1
        }
        | TaskStatus::Completed => {
          stats.completed += 1
        }
        | TaskStatus::Failed => {
          stats.failed += 1
        }
        | TaskStatus::Cancelled
        | TaskStatus::Other(_) => {}
      }
    }

    stats
  }

  #[must_use]
  pub fn get(
    &self,
    field: StatField
  ) -> usize {
    match field {
      | StatField::Total => self.total,
      | StatField::Pending => self.pending,
      | StatField::Running => self.running,
      | StatField::Completed => {
        self.completed
      }
      | StatField::Failed => self.failed
    }
  }

  /// The running counter is only shown while something runs.
  #[must_use]
  pub fn running_visible(&self) -> bool {
    self.running > 0
  }

  #[must_use]
  pub fn instructions(
    &self
  ) -> Vec<RenderInstruction> {
    let mut out = Vec::with_capacity(
      STAT_TARGETS.len() + 1
    );
    for (target, field) in STAT_TARGETS {
      out.push(RenderInstruction::SetText {
        target,
        text: self.get(field).to_string()
      });
      if field == StatField::Running {
        out.push(
          RenderInstruction::SetVisible {
            target,
            visible: self.running_visible()
          }
        );
      }
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use sentimation_shared::{
    TaskDto,
    TaskStatus
  };

  use super::DashboardStats;
  use crate::view::{
    RenderInstruction,
    STAT_TARGETS
  };

  fn with_status(raw: &str) -> TaskDto {
    TaskDto {
      id:             raw.to_string(),
      generator_type: String::new(),
      prompt:         String::new(),
      scheduled_time: String::new(),
      status:         TaskStatus::parse(raw),
      result_path:    None,
      error_message:  None,
      created_at:     String::new(),
      is_recurring:   false,
      recurring_days: vec![],
      recurring_time: None
    }
  }

  #[test]
  fn counts_partition_by_status() {
    let tasks: Vec<TaskDto> = [
      "pending",
      "pending",
      "running",
      "completed",
      "failed"
    ]
    .into_iter()
    .map(with_status)
    .collect();

    assert_eq!(
      DashboardStats::from_tasks(&tasks),
      DashboardStats {
        total:     5,
        pending:   2,
        running:   1,
        completed: 1,
        failed:    1
      }
    );
  }

  #[test]
  fn cancelled_and_unknown_only_count_in_total()
  {
    let tasks = vec![
      with_status("cancelled"),
      with_status("queued")
    ];
    let stats =
      DashboardStats::from_tasks(&tasks);
    assert_eq!(stats.total, 2);
    assert_eq!(
      stats.pending
        + stats.running
        + stats.completed
        + stats.failed,
      0
    );
    assert!(!stats.running_visible());
  }

  #[test]
  fn nothing_is_written_before_first_load() {
    assert_eq!(
      DashboardStats::from_snapshot(None),
      None
    );

    let loaded: &[TaskDto] = &[];
    let empty = DashboardStats::from_snapshot(
      Some(loaded)
    )
    .expect("loaded snapshot");
    let instructions = empty.instructions();
    assert_eq!(
      instructions.len(),
      STAT_TARGETS.len() + 1
    );
    assert!(instructions.contains(
      &RenderInstruction::SetText {
        target: "total-tasks",
        text:   "0".to_string()
      }
    ));
  }
}
