use chrono::{
  DateTime,
  Utc
};
use sentimation_shared::ScheduleRequest;

use crate::notify::{
  Notification,
  Severity
};
use crate::timefmt::parse_timestamp;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum ValidationError {
  #[error("Please fill in all required fields")]
  MissingFields,
  #[error(
    "Scheduled time must be in the future"
  )]
  NotInFuture
}

impl ValidationError {
  #[must_use]
  pub fn notification(self) -> Notification {
    Notification::new(
      self.to_string(),
      Severity::Warning
    )
  }
}

/// Raw values of the schedule form, as typed.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ScheduleForm {
  pub generator_type: String,
  pub prompt:         String,
  pub scheduled_time: String
}

impl ScheduleForm {
  /// Gate for a submit attempt. Runs fresh every time; `now` is the
  /// moment of the attempt.
  pub fn validate(
    &self,
    now: DateTime<Utc>
  ) -> Result<ScheduleRequest, ValidationError>
  {
    let generator_type =
      self.generator_type.trim();
    let prompt = self.prompt.trim();
    let scheduled_time =
      self.scheduled_time.trim();

    if generator_type.is_empty()
      || prompt.is_empty()
      || scheduled_time.is_empty()
    {
      return Err(
        ValidationError::MissingFields
      );
    }

    match parse_timestamp(scheduled_time) {
      | Some(at) if at > now => {}
      | _ => {
        return Err(
          ValidationError::NotInFuture
        );
      }
    }

    Ok(ScheduleRequest {
      generator_type: generator_type
        .to_string(),
      prompt:         prompt.to_string(),
      scheduled_time: scheduled_time
        .to_string()
    })
  }
}
