use crate::config::EngineConfig;
use crate::engine::{SystemClock, TimeSource};
use crate::error::{Error, Result};
use crate::world::{FrameReport, World};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Requests the [Engine] loop to stop. Can be cloned and sent to other threads or
/// moved into scripts.
#[derive(Clone, Debug, Default)]
pub struct ExitHandle(Arc<AtomicBool>);

impl ExitHandle {
	/// The loop finishes the frame in progress, then returns.
	pub fn request(&self) {
		self.0.store(true, Ordering::Release);
	}

	pub fn is_requested(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	fn reset(&self) {
		self.0.store(false, Ordering::Release);
	}
}

/// Result of a single [Engine::tick].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
	pub frame: FrameReport,
	/// Fixed-length steps that became due during this tick.
	pub fixed_steps: u32,
}

struct Surface {
	app_name: String,
	width: u32,
	height: u32,
}

/// Owns a [World] and drives it frame by frame from a [TimeSource].
pub struct Engine<C: TimeSource = SystemClock> {
	world: World,
	clock: C,
	exit: ExitHandle,
	surface: Option<Surface>,
	last_tick: Duration,
	delta_seconds: f64,
	total_time: f64,
	accumulator: f64,
	fixed_timestep: f64,
	target_frame_rate: u32,
	frame_count: u64,
}

impl Engine {
	pub fn new(config: EngineConfig) -> Self {
		Self::with_clock(config, SystemClock::new())
	}
}

impl<C: TimeSource> Engine<C> {
	pub fn with_clock(config: EngineConfig, clock: C) -> Self {
		Self {
			world: World::with_config(&config.world),
			clock,
			exit: ExitHandle::default(),
			surface: None,
			last_tick: Duration::ZERO,
			delta_seconds: 0.0,
			total_time: 0.0,
			accumulator: 0.0,
			fixed_timestep: config.fixed_timestep,
			target_frame_rate: config.target_frame_rate,
			frame_count: 0,
		}
	}

	/// Prepare the engine for [Engine::run].
	///
	/// Fails with [InvalidDimensions](Error::InvalidDimensions) if either dimension is zero,
	/// and with [AlreadyInitialized](Error::AlreadyInitialized) if called twice.
	/// A failed call leaves the engine uninitialized.
	pub fn initialize(&mut self, app_name: &str, width: u32, height: u32) -> Result<()> {
		if self.surface.is_some() {
			return Err(Error::AlreadyInitialized);
		}
		if width == 0 || height == 0 {
			return Err(Error::InvalidDimensions { width, height });
		}

		self.surface = Some(Surface {
			app_name: app_name.to_owned(),
			width,
			height,
		});
		self.last_tick = self.clock.now();

		info!(app_name, width, height, "engine initialized");
		Ok(())
	}

	pub fn is_initialized(&self) -> bool {
		self.surface.is_some()
	}

	/// Shut down the world's systems, destroy every entity and return to the uninitialized
	/// state. Commands recorded during the teardown are discarded.
	/// Does nothing if the engine is not initialized.
	pub fn shutdown(&mut self) {
		let Some(surface) = self.surface.take() else {
			return;
		};

		let entities = self.world.entity_count();
		self.world.shutdown();
		info!(app_name = %surface.app_name, frames = self.frame_count, entities, "engine shut down");
	}

	/// Tick until an exit is requested, pacing frames to the target frame rate.
	///
	/// The exit flag is only checked between frames. It is cleared when the loop returns.
	pub fn run(&mut self) -> Result<()> {
		if self.surface.is_none() {
			return Err(Error::NotInitialized);
		}

		debug!(target_frame_rate = self.target_frame_rate, "entering main loop");
		self.last_tick = self.clock.now();

		let result = loop {
			if self.exit.is_requested() {
				break Ok(());
			}

			let frame_start = self.clock.now();
			if let Err(error) = self.tick() {
				break Err(error);
			}

			if self.target_frame_rate > 0 {
				let target = Duration::from_secs_f64(1.0 / self.target_frame_rate as f64);
				let elapsed = self.clock.now().saturating_sub(frame_start);
				if elapsed < target {
					self.clock.sleep(target - elapsed);
				}
			}
		};

		self.exit.reset();
		debug!(frames = self.frame_count, "left main loop");
		result
	}

	/// Simulate one frame: measure the time since the previous tick, update the world,
	/// then advance the frame counter.
	pub fn tick(&mut self) -> Result<TickReport> {
		if self.surface.is_none() {
			return Err(Error::NotInitialized);
		}

		let now = self.clock.now();
		let delta = now.saturating_sub(self.last_tick).as_secs_f64();
		self.last_tick = now;

		let mut fixed_steps = 0;
		self.accumulator += delta;
		while self.accumulator >= self.fixed_timestep {
			self.accumulator -= self.fixed_timestep;
			fixed_steps += 1;
		}

		let frame = self.world.update(delta)?;

		self.delta_seconds = delta;
		self.total_time += delta;
		self.frame_count += 1;

		Ok(TickReport { frame, fixed_steps })
	}

	/// Stop [Engine::run] after the frame in progress.
	pub fn request_exit(&self) {
		self.exit.request();
	}

	/// A handle that can request an exit from elsewhere.
	pub fn exit_handle(&self) -> ExitHandle {
		self.exit.clone()
	}

	/// Duration of the last completed frame in seconds.
	#[inline]
	pub fn delta_seconds(&self) -> f64 {
		self.delta_seconds
	}

	/// Completed frames since creation.
	#[inline]
	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	/// Simulated seconds since creation.
	#[inline]
	pub fn total_time(&self) -> f64 {
		self.total_time
	}

	#[inline]
	pub fn fixed_timestep(&self) -> f64 {
		self.fixed_timestep
	}

	pub fn target_frame_rate(&self) -> u32 {
		self.target_frame_rate
	}

	/// 0 runs unpaced.
	pub fn set_target_frame_rate(&mut self, frames_per_second: u32) {
		self.target_frame_rate = frames_per_second;
	}

	pub fn app_name(&self) -> Option<&str> {
		self.surface.as_ref().map(|s| s.app_name.as_str())
	}

	pub fn dimensions(&self) -> Option<(u32, u32)> {
		self.surface.as_ref().map(|s| (s.width, s.height))
	}

	pub fn world(&self) -> &World {
		&self.world
	}

	pub fn world_mut(&mut self) -> &mut World {
		&mut self.world
	}

	pub fn clock(&self) -> &C {
		&self.clock
	}
}
