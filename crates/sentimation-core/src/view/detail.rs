use sentimation_shared::TaskDto;

use crate::api::{
  generated_asset_url,
  result_file_name
};
use crate::badge::{
  StatusBadge,
  status_badge
};
use crate::timefmt::absolute_label;

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct VideoPreview {
  pub src:         String,
  pub file_name:   String,
  pub result_path: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskDetail {
  pub task_id:        String,
  pub generator_type: String,
  pub status:         StatusBadge,
  pub scheduled:      String,
  pub created:        String,
  pub prompt:         String,
  pub recurrence:     Option<String>,
  pub error:          Option<String>,
  pub video:          Option<VideoPreview>
}

#[must_use]
pub fn project_detail(
  task: &TaskDto
) -> TaskDetail {
  TaskDetail {
    task_id:        task.id.clone(),
    generator_type: task
      .generator_type
      .clone(),
    status:         status_badge(
      &task.status
    ),
    scheduled:      absolute_label(
      &task.scheduled_time
    ),
    created:        absolute_label(
      &task.created_at
    ),
    prompt:         task.prompt.clone(),
    recurrence:     recurrence_label(task),
    error:          task
      .error_message
      .clone()
      .filter(|message| !message.is_empty()),
    video:          task
      .result_path
      .as_deref()
      .filter(|path| !path.is_empty())
      .map(|path| VideoPreview {
        src:         generated_asset_url(path),
        file_name:   result_file_name(path)
          .to_string(),
        result_path: path.to_string()
      })
  }
}

fn recurrence_label(
  task: &TaskDto
) -> Option<String> {
  if !task.is_recurring {
    return None;
  }

  let days = if task.recurring_days.is_empty()
  {
    "every day".to_string()
  } else {
    format!(
      "every {}",
      task.recurring_days.join(", ")
    )
  };

  Some(match task.recurring_time.as_deref() {
    | Some(time) if !time.is_empty() => {
      format!("{days} at {time}")
    }
    | _ => days
  })
}
