//! Platform-free logic for the SentiMation dashboard clients.
//!
//! Everything here runs the same in the browser build and the terminal
//! client: the API client is generic over a [`api::Transport`], the
//! refresh loop over a [`refresh::IntervalTimer`], and rendering stops at
//! plain view models that a thin adapter turns into DOM or text.

pub mod api;
pub mod badge;
pub mod form;
pub mod notify;
pub mod refresh;
pub mod timefmt;
pub mod view;

pub use sentimation_shared::{
  ErrorBody,
  MessageAck,
  ScheduleAck,
  ScheduleRequest,
  TaskDto,
  TaskStatus
};
