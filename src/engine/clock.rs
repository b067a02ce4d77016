use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Where the [Engine](crate::engine::Engine) reads time from.
pub trait TimeSource {
	/// Time elapsed since an arbitrary, fixed origin. Never decreases.
	fn now(&self) -> Duration;

	/// Block the loop for `duration`.
	fn sleep(&self, duration: Duration);
}

/// Monotonic wall clock.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
	origin: Instant,
}

impl SystemClock {
	pub fn new() -> Self {
		Self { origin: Instant::now() }
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl TimeSource for SystemClock {
	#[inline]
	fn now(&self) -> Duration {
		self.origin.elapsed()
	}

	fn sleep(&self, duration: Duration) {
		std::thread::sleep(duration);
	}
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one and hand another to the engine.
/// Sleeping advances the clock instantly.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
	now: Arc<Mutex<Duration>>,
}

impl ManualClock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn advance(&self, duration: Duration) {
		*self.now.lock() += duration;
	}

	pub fn advance_secs(&self, seconds: f64) {
		self.advance(Duration::from_secs_f64(seconds));
	}
}

impl TimeSource for ManualClock {
	fn now(&self) -> Duration {
		*self.now.lock()
	}

	fn sleep(&self, duration: Duration) {
		self.advance(duration);
	}
}
