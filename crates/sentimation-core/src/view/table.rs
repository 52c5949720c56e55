use chrono::{
  DateTime,
  Utc
};
use sentimation_shared::{
  TaskDto,
  TaskStatus
};

use crate::api::{
  generated_asset_url,
  result_file_name
};
use crate::badge::{
  StatusBadge,
  status_badge
};
use crate::timefmt::{
  absolute_label,
  relative_label
};

pub const PROMPT_PREVIEW_CHARS: usize =
  60;

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TimeCell {
  pub relative: String,
  pub absolute: String
}

impl TimeCell {
  fn new(
    raw: &str,
    now: DateTime<Utc>
  ) -> Self {
    Self {
      relative: relative_label(raw, now),
      absolute: absolute_label(raw)
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum RowAction {
  View,
  Cancel,
  RunNow,
  Download {
    href:      String,
    file_name: String
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskRow {
  pub task_id:        String,
  pub generator_type: String,
  pub prompt_preview: String,
  pub prompt_full:    String,
  pub scheduled:      TimeCell,
  pub status:         StatusBadge,
  pub created:        TimeCell,
  pub actions:        Vec<RowAction>
}

impl TaskRow {
  #[must_use]
  pub fn has_action(
    &self,
    wanted: &RowAction
  ) -> bool {
    self.actions.iter().any(|action| {
      std::mem::discriminant(action)
        == std::mem::discriminant(wanted)
    })
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskTable {
  pub rows:             Vec<TaskRow>,
  pub show_placeholder: bool
}

/// One row per task, in the order given.
#[must_use]
pub fn project_table(
  tasks: &[TaskDto],
  now: DateTime<Utc>
) -> TaskTable {
  TaskTable {
    rows:             tasks
      .iter()
      .map(|task| project_row(task, now))
      .collect(),
    show_placeholder: tasks.is_empty()
  }
}

fn project_row(
  task: &TaskDto,
  now: DateTime<Utc>
) -> TaskRow {
  TaskRow {
    task_id:        task.id.clone(),
    generator_type: task
      .generator_type
      .clone(),
    prompt_preview: preview_prompt(
      &task.prompt
    ),
    prompt_full:    task.prompt.clone(),
    scheduled:      TimeCell::new(
      &task.scheduled_time,
      now
    ),
    status:         status_badge(
      &task.status
    ),
    created:        TimeCell::new(
      &task.created_at,
      now
    ),
    actions:        row_actions(task)
  }
}

/// View is always offered. Cancel and run-now only make sense before a
/// task starts; download needs a finished result.
#[must_use]
pub fn row_actions(
  task: &TaskDto
) -> Vec<RowAction> {
  let mut actions = vec![RowAction::View];

  if task.status == TaskStatus::Pending {
    actions.push(RowAction::Cancel);
    actions.push(RowAction::RunNow);
  }

  if task.status == TaskStatus::Completed
    && let Some(path) = task
      .result_path
      .as_deref()
      .filter(|path| !path.is_empty())
  {
    actions.push(RowAction::Download {
      href:      generated_asset_url(path),
      file_name: result_file_name(path)
        .to_string()
    });
  }

  actions
}

/// Truncates on a char boundary and marks the cut with an ellipsis.
#[must_use]
pub fn preview_prompt(
  prompt: &str
) -> String {
  let trimmed = prompt.trim();
  match trimmed
    .char_indices()
    .nth(PROMPT_PREVIEW_CHARS)
  {
    | Some((cut, _)) => {
      format!("{}…", &trimmed[..cut])
    }
    | None => trimmed.to_string()
  }
}
