use gloo::timers::callback::Interval;
use sentimation_core::refresh::IntervalTimer;

/// Browser intervals; dropping the `Interval` clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl IntervalTimer for GlooTimer {
  type Handle = Interval;

  fn every(
    &self,
    period_ms: u32,
    mut tick: Box<dyn FnMut()>
  ) -> Interval {
    Interval::new(period_ms, move || tick())
  }
}
