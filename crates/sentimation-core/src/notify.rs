use std::sync::atomic::{
  AtomicU64,
  Ordering
};

use tracing::error;

use crate::api::RequestError;

pub const AUTO_DISMISS_MS: u32 = 5_000;

static NEXT_NOTIFICATION_ID: AtomicU64 =
  AtomicU64::new(1);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Severity {
  Info,
  Success,
  Warning,
  Danger
}

impl Severity {
  #[must_use]
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Info => "info",
      | Self::Success => "success",
      | Self::Warning => "warning",
      | Self::Danger => "danger"
    }
  }

  #[must_use]
  pub fn alert_class(self) -> String {
    format!("alert alert-{}", self.as_key())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Notification {
  pub id:       u64,
  pub message:  String,
  pub severity: Severity
}

impl Notification {
  /// Ids are unique for the life of the process.
  pub fn new(
    message: impl Into<String>,
    severity: Severity
  ) -> Self {
    Self {
      id: NEXT_NOTIFICATION_ID
        .fetch_add(1, Ordering::Relaxed),
      message: message.into(),
      severity
    }
  }

  /// Logs the failure and turns it into the user-facing message for
  /// `operation`.
  pub fn request_failed(
    operation: Operation,
    err: &RequestError
  ) -> Self {
    error!(
      operation = operation.as_key(),
      path = err.path(),
      error = %err,
      detail = err.detail().unwrap_or(""),
      "task backend request failed"
    );
    Self::new(
      operation.failure_message(),
      Severity::Danger
    )
  }

  pub fn succeeded(
    operation: Operation
  ) -> Option<Self> {
    operation.success_message().map(
      |message| {
        Self::new(message, Severity::Success)
      }
    )
  }
}

/// User actions that end in a notification.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Operation {
  LoadTasks,
  LoadTask,
  Cancel,
  RunNow,
  Schedule,
  LoadGenerators,
  Download
}

impl Operation {
  #[must_use]
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::LoadTasks => "load_tasks",
      | Self::LoadTask => "load_task",
      | Self::Cancel => "cancel",
      | Self::RunNow => "run_now",
      | Self::Schedule => "schedule",
      | Self::LoadGenerators => {
        "load_generators"
      }
      | Self::Download => "download"
    }
  }

  #[must_use]
  pub fn failure_message(
    self
  ) -> &'static str {
    match self {
      | Self::LoadTasks => {
        "Failed to load tasks"
      }
      | Self::LoadTask => {
        "Failed to load task details"
      }
      | Self::Cancel => "Failed to cancel task",
      | Self::RunNow => "Failed to start task",
      | Self::Schedule => {
        "Failed to schedule task"
      }
      | Self::LoadGenerators => {
        "Failed to load generators"
      }
      | Self::Download => {
        "Failed to start download"
      }
    }
  }

  #[must_use]
  pub fn success_message(
    self
  ) -> Option<&'static str> {
    match self {
      | Self::Cancel => {
        Some("Task cancelled successfully")
      }
      | Self::RunNow => {
        Some("Task started successfully")
      }
      | Self::Schedule => {
        Some("Task scheduled successfully")
      }
      | Self::Download => {
        Some("Download started")
      }
      | Self::LoadTasks
      | Self::LoadTask
      | Self::LoadGenerators => None
    }
  }
}

/// Visible notifications, oldest first.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct NotificationCenter {
  visible: Vec<Notification>
}

impl NotificationCenter {
  pub fn push(
    &mut self,
    notification: Notification
  ) -> u64 {
    let id = notification.id;
    self.visible.push(notification);
    id
  }

  /// Removes a notification. Dismissing one that is already gone (closed
  /// by hand before its timer fired) does nothing and returns `false`.
  pub fn dismiss(&mut self, id: u64) -> bool {
    let before = self.visible.len();
    self
      .visible
      .retain(|notification| {
        notification.id != id
      });
    before != self.visible.len()
  }

  #[must_use]
  pub fn visible(&self) -> &[Notification] {
    &self.visible
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.visible.is_empty()
  }
}
