use std::rc::Rc;

use tracing::{
  debug,
  info
};

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 =
  30_000;

/// A source of repeating callbacks.
///
/// Dropping the returned handle cancels the timer; this is how `gloo`
/// intervals behave in the browser.
pub trait IntervalTimer {
  type Handle;

  fn every(
    &self,
    period_ms: u32,
    tick: Box<dyn FnMut()>
  ) -> Self::Handle;
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum RefreshState {
  Idle,
  Refreshing
}

/// Owns the one poll timer of a page.
///
/// The handle never leaves the controller, so at most one timer exists per
/// controller at any time.
pub struct RefreshController<T: IntervalTimer>
{
  timer:   T,
  on_tick: Rc<dyn Fn()>,
  active:  Option<(u32, T::Handle)>
}

impl<T: IntervalTimer> RefreshController<T> {
  pub fn new(
    timer: T,
    on_tick: impl Fn() + 'static
  ) -> Self {
    Self {
      timer,
      on_tick: Rc::new(on_tick),
      active: None
    }
  }

  /// Starts polling every `interval_ms`, replacing a timer that is
  /// already running.
  pub fn start(&mut self, interval_ms: u32) {
    if self.active.take().is_some() {
      debug!(
        "replacing running refresh timer"
      );
    }

    let on_tick = Rc::clone(&self.on_tick);
    let handle = self.timer.every(
      interval_ms,
      Box::new(move || on_tick())
    );
    self.active = Some((interval_ms, handle));
    info!(interval_ms, "auto refresh started");
  }

  /// Cancels the timer. Safe to call when nothing is running.
  pub fn stop(&mut self) {
    if self.active.take().is_some() {
      info!("auto refresh stopped");
    }
  }

  #[must_use]
  pub fn is_running(&self) -> bool {
    self.active.is_some()
  }

  #[must_use]
  pub fn state(&self) -> RefreshState {
    if self.is_running() {
      RefreshState::Refreshing
    } else {
      RefreshState::Idle
    }
  }

  #[must_use]
  pub fn interval_ms(&self) -> Option<u32> {
    self
      .active
      .as_ref()
      .map(|(interval, _)| *interval)
  }
}

/// Whether a page path is the dashboard, the only view that polls.
#[must_use]
pub fn auto_refresh_applies(
  path: &str
) -> bool {
  path == "/"
}

#[cfg(test)]
mod tests {
  use std::cell::{
    Cell,
    RefCell
  };
  use std::rc::Rc;

  use super::{
    IntervalTimer,
    RefreshController,
    RefreshState,
    auto_refresh_applies
  };

  struct Scheduled {
    id:        u64,
    period:    u64,
    next_fire: u64,
    tick:      Box<dyn FnMut()>
  }

  #[derive(Default)]
  struct Clock {
    now:     u64,
    next_id: u64,
    timers:  Vec<Scheduled>
  }

  /// Timer whose time only moves when a test says so.
  #[derive(Clone, Default)]
  struct VirtualTimer {
    clock: Rc<RefCell<Clock>>
  }

  struct VirtualHandle {
    id:    u64,
    clock: Rc<RefCell<Clock>>
  }

  impl Drop for VirtualHandle {
    fn drop(&mut self) {
      self
        .clock
        .borrow_mut()
        .timers
        .retain(|timer| timer.id != self.id);
    }
  }

  impl IntervalTimer for VirtualTimer {
    type Handle = VirtualHandle;

    fn every(
      &self,
      period_ms: u32,
      tick: Box<dyn FnMut()>
    ) -> VirtualHandle {
      let mut clock = self.clock.borrow_mut();
      clock.next_id += 1;
      let id = clock.next_id;
      let period = u64::from(period_ms);
      let next_fire = clock.now + period;
      clock.timers.push(Scheduled {
        id,
        period,
        next_fire,
        tick
      });
      VirtualHandle {
        id,
        clock: Rc::clone(&self.clock)
      }
    }
  }

  impl VirtualTimer {
    fn active(&self) -> usize {
      self.clock.borrow().timers.len()
    }

    fn advance(&self, ms: u64) {
      let target = self.clock.borrow().now + ms;
      loop {
        let mut clock = self.clock.borrow_mut();
        let due = clock
          .timers
          .iter()
          .enumerate()
          .filter(|(_, timer)| {
            timer.next_fire <= target
          })
          .min_by_key(|(_, timer)| timer.next_fire)
          .map(|(idx, _)| idx);
        let Some(idx) = due else {
          clock.now = target;
          return;
        };

        let fire_at = clock.timers[idx].next_fire;
        clock.now = fire_at;
        let period = clock.timers[idx].period;
        clock.timers[idx].next_fire += period;
        clock.timers[idx].tick.as_mut()();
      }
    }
  }

  fn counting_controller() -> (
    VirtualTimer,
    Rc<Cell<u32>>,
    RefreshController<VirtualTimer>
  ) {
    let timer = VirtualTimer::default();
    let refreshes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&refreshes);
    let controller = RefreshController::new(
      timer.clone(),
      move || counter.set(counter.get() + 1)
    );
    (timer, refreshes, controller)
  }

  #[test]
  fn double_start_keeps_one_timer() {
    let (timer, refreshes, mut controller) =
      counting_controller();

    controller.start(30_000);
    controller.start(30_000);

    assert_eq!(timer.active(), 1);
    timer.advance(30_000);
    assert_eq!(refreshes.get(), 1);
  }

  #[test]
  fn restart_uses_new_interval() {
    let (timer, refreshes, mut controller) =
      counting_controller();

    controller.start(10_000);
    controller.start(30_000);
    assert_eq!(controller.interval_ms(), Some(30_000));

    timer.advance(29_999);
    assert_eq!(refreshes.get(), 0);
    timer.advance(1);
    assert_eq!(refreshes.get(), 1);
    timer.advance(60_000);
    assert_eq!(refreshes.get(), 3);
  }

  #[test]
  fn stop_cancels_and_is_idempotent() {
    let (timer, refreshes, mut controller) =
      counting_controller();

    assert_eq!(controller.state(), RefreshState::Idle);
    controller.stop();

    controller.start(1_000);
    assert_eq!(
      controller.state(),
      RefreshState::Refreshing
    );
    timer.advance(2_500);
    assert_eq!(refreshes.get(), 2);

    controller.stop();
    controller.stop();
    assert!(!controller.is_running());
    assert_eq!(timer.active(), 0);

    timer.advance(10_000);
    assert_eq!(refreshes.get(), 2);
  }

  #[test]
  fn dropping_controller_cancels_timer() {
    let (timer, _refreshes, mut controller) =
      counting_controller();
    controller.start(1_000);
    drop(controller);
    assert_eq!(timer.active(), 0);
  }

  #[test]
  fn only_dashboard_path_polls() {
    assert!(auto_refresh_applies("/"));
    assert!(!auto_refresh_applies("/schedule"));
    assert!(!auto_refresh_applies(""));
  }
}
