use std::fmt;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
  Pending,
  Running,
  Completed,
  Failed,
  Cancelled,
  Other(String)
}

impl TaskStatus {
  #[must_use]
  pub fn parse(raw: &str) -> Self {
    match raw {
      | "pending" => Self::Pending,
      | "running" => Self::Running,
      | "completed" => Self::Completed,
      | "failed" => Self::Failed,
      | "cancelled" => Self::Cancelled,
      | other => {
        Self::Other(other.to_string())
      }
    }
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    match self {
      | Self::Pending => "pending",
      | Self::Running => "running",
      | Self::Completed => "completed",
      | Self::Failed => "failed",
      | Self::Cancelled => "cancelled",
      | Self::Other(raw) => raw.as_str()
    }
  }
}

impl From<String> for TaskStatus {
  fn from(raw: String) -> Self {
    match Self::parse(&raw) {
      | Self::Other(_) => Self::Other(raw),
      | known => known
    }
  }
}

impl From<TaskStatus> for String {
  fn from(status: TaskStatus) -> Self {
    match status {
      | TaskStatus::Other(raw) => raw,
      | known => {
        known.as_str().to_string()
      }
    }
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One task as reported by `GET /tasks` and `GET /task/{id}`.
///
/// Every field except `id` and `status` tolerates absence or `null` so a
/// partially filled record still renders.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:             String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub generator_type: String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub prompt:         String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub scheduled_time: String,
  pub status:         TaskStatus,
  #[serde(default)]
  pub result_path:    Option<String>,
  #[serde(default)]
  pub error_message:  Option<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub created_at:     String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub is_recurring:   bool,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub recurring_days: Vec<String>,
  #[serde(default)]
  pub recurring_time: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ScheduleRequest {
  pub generator_type: String,
  pub prompt:         String,
  pub scheduled_time: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ScheduleAck {
  pub task_id: String,
  #[serde(default)]
  pub message: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct MessageAck {
  #[serde(default)]
  pub message: String
}

/// Body the backend attaches to non-success responses.
#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ErrorBody {
  pub error: String
}

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(
  deserializer: D
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>
{
  Ok(
    Option::<T>::deserialize(
      deserializer
    )?
    .unwrap_or_default()
  )
}

#[cfg(test)]
mod tests {
  use super::{
    TaskDto,
    TaskStatus
  };

  #[test]
  fn decodes_backend_task_payload() {
    let raw = r#"{
      "id": "task_3",
      "generator_type": "dogshow",
      "prompt": "a corgi on stage",
      "scheduled_time": "2024-05-01T12:30:00",
      "status": "completed",
      "result_path": "output/final/dogshow_3.mp4",
      "error_message": null,
      "created_at": "2024-05-01T11:02:41.523113",
      "is_recurring": true,
      "recurring_days": ["monday", "friday"],
      "recurring_time": "09:00"
    }"#;

    let task: TaskDto =
      serde_json::from_str(raw)
        .expect("decode task");
    assert_eq!(
      task.status,
      TaskStatus::Completed
    );
    assert_eq!(
      task.result_path.as_deref(),
      Some("output/final/dogshow_3.mp4")
    );
    assert_eq!(
      task.recurring_days,
      vec!["monday", "friday"]
    );
  }

  #[test]
  fn tolerates_missing_and_null_fields() {
    let raw = r#"{
      "id": "task_9",
      "status": "pending",
      "recurring_days": null
    }"#;

    let task: TaskDto =
      serde_json::from_str(raw)
        .expect("decode sparse task");
    assert!(task.prompt.is_empty());
    assert!(task.recurring_days.is_empty());
    assert!(!task.is_recurring);
  }

  #[test]
  fn null_text_fields_do_not_sink_the_list() {
    let raw = r#"[
      {"id": "task_1", "status": "pending", "prompt": "ok"},
      {"id": "task_2", "status": "pending", "prompt": null,
       "generator_type": null, "scheduled_time": null,
       "created_at": null, "is_recurring": null}
    ]"#;

    let tasks: Vec<TaskDto> =
      serde_json::from_str(raw)
        .expect("decode task list");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].prompt, "ok");
    assert_eq!(tasks[1].id, "task_2");
    assert!(tasks[1].prompt.is_empty());
    assert!(tasks[1].generator_type.is_empty());
    assert!(tasks[1].created_at.is_empty());
    assert!(!tasks[1].is_recurring);
  }

  #[test]
  fn unknown_status_keeps_raw_text() {
    let status: TaskStatus =
      serde_json::from_str("\"queued\"")
        .expect("decode status");
    assert_eq!(
      status,
      TaskStatus::Other("queued".to_string())
    );
    assert_eq!(
      serde_json::to_string(&status)
        .expect("encode status"),
      "\"queued\""
    );
  }
}
