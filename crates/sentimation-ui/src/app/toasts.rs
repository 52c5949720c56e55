use std::ops::Deref;
use std::rc::Rc;

use sentimation_core::notify::{
  Notification,
  NotificationCenter
};
use yew::{
  Callback,
  Reducible
};

/// Shared through context; emitting shows a toast that dismisses itself.
pub type Notifier = Callback<Notification>;

#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
  Push(Notification),
  Dismiss(u64)
}

#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct ToastQueue(NotificationCenter);

impl Deref for ToastQueue {
  type Target = NotificationCenter;

  fn deref(&self) -> &NotificationCenter {
    &self.0
  }
}

impl Reducible for ToastQueue {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: ToastAction
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    match action {
      | ToastAction::Push(notification) => {
        next.0.push(notification);
      }
      | ToastAction::Dismiss(id) => {
        if !next.0.dismiss(id) {
          return self;
        }
      }
    }
    Rc::new(next)
  }
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use sentimation_core::notify::{
    Notification,
    Severity
  };
  use yew::Reducible;

  use super::{
    ToastAction,
    ToastQueue
  };

  #[test]
  fn second_dismiss_keeps_same_state() {
    let notice = Notification::new(
      "Task cancelled successfully",
      Severity::Success
    );
    let id = notice.id;

    let queue = Rc::new(ToastQueue::default())
      .reduce(ToastAction::Push(notice));
    assert_eq!(queue.visible().len(), 1);

    let queue =
      queue.reduce(ToastAction::Dismiss(id));
    assert!(queue.is_empty());

    let again = Rc::clone(&queue)
      .reduce(ToastAction::Dismiss(id));
    assert!(Rc::ptr_eq(&queue, &again));
  }
}
