//! Pure projections from task snapshots to view models.
//!
//! Adapters (Yew components, the terminal table writer, or a
//! [`RenderSurface`] over an existing page) only copy these values out.

mod detail;
mod stats;
mod table;

pub use detail::{
  TaskDetail,
  VideoPreview,
  project_detail
};
pub use stats::{
  DashboardStats,
  STAT_TARGETS,
  StatField
};
pub use table::{
  PROMPT_PREVIEW_CHARS,
  RowAction,
  TaskRow,
  TaskTable,
  TimeCell,
  preview_prompt,
  project_table,
  row_actions
};

/// A single write against a page element addressed by id.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum RenderInstruction {
  SetText {
    target: &'static str,
    text:   String
  },
  SetVisible {
    target:  &'static str,
    visible: bool
  }
}

/// Something that owns addressable display targets, such as a document.
///
/// Both writes report whether the target existed. A missing target is not
/// an error; callers skip it and move on.
pub trait RenderSurface {
  fn set_text(
    &mut self,
    target: &str,
    text: &str
  ) -> bool;

  fn set_visible(
    &mut self,
    target: &str,
    visible: bool
  ) -> bool;
}

/// Applies every instruction whose target exists and returns how many
/// landed.
pub fn apply<S: RenderSurface + ?Sized>(
  surface: &mut S,
  instructions: &[RenderInstruction]
) -> usize {
  let mut applied = 0;
  for instruction in instructions {
    let landed = match instruction {
      | RenderInstruction::SetText {
        target,
        text
      } => surface.set_text(target, text),
      | RenderInstruction::SetVisible {
        target,
        visible
      } => {
        surface.set_visible(target, *visible)
      }
    };
    if landed {
      applied += 1;
    } else {
      tracing::trace!(
        ?instruction,
        "render target missing; skipped"
      );
    }
  }
  applied
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use sentimation_shared::{
    TaskDto,
    TaskStatus
  };

  use super::{
    DashboardStats,
    RenderSurface,
    apply
  };

  #[derive(Default)]
  struct FakePage {
    text:    BTreeMap<String, String>,
    visible: BTreeMap<String, bool>
  }

  impl FakePage {
    fn with_targets(ids: &[&str]) -> Self {
      let mut page = Self::default();
      for id in ids {
        page
          .text
          .insert((*id).to_string(), String::new());
        page
          .visible
          .insert((*id).to_string(), true);
      }
      page
    }
  }

  impl RenderSurface for FakePage {
    fn set_text(
      &mut self,
      target: &str,
      text: &str
    ) -> bool {
      match self.text.get_mut(target) {
        | Some(slot) => {
          *slot = text.to_string();
          true
        }
        | None => false
      }
    }

    fn set_visible(
      &mut self,
      target: &str,
      visible: bool
    ) -> bool {
      match self.visible.get_mut(target) {
        | Some(slot) => {
          *slot = visible;
          true
        }
        | None => false
      }
    }
  }

  fn task(status: &str) -> TaskDto {
    TaskDto {
      id:             format!("task_{status}"),
      generator_type: "rave".to_string(),
      prompt:         String::new(),
      scheduled_time: String::new(),
      status:         TaskStatus::parse(status),
      result_path:    None,
      error_message:  None,
      created_at:     String::new(),
      is_recurring:   false,
      recurring_days: vec![],
      recurring_time: None
    }
  }

  #[test]
  fn missing_targets_are_skipped() {
    let stats = DashboardStats::from_tasks(&[
      task("pending"),
      task("running")
    ]);
    let mut page = FakePage::with_targets(&[
      "total-tasks",
      "running-tasks"
    ]);

    let applied =
      apply(&mut page, &stats.instructions());

    assert_eq!(applied, 3);
    assert_eq!(page.text["total-tasks"], "2");
    assert_eq!(page.text["running-tasks"], "1");
    assert!(page.visible["running-tasks"]);
  }

  #[test]
  fn empty_page_applies_nothing() {
    let stats = DashboardStats::default();
    let mut page = FakePage::default();
    assert_eq!(
      apply(&mut page, &stats.instructions()),
      0
    );
  }
}
