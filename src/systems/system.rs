use crate::world::World;

/// World-wide per-frame logic, such as integrating velocities or syncing external state.
pub trait System: 'static {
	/// Initialises the [System] before its first run.
	/// **This function should not be called by user code.**
	fn setup(&mut self, _world: &mut World) {}

	/// Executes the system.
	fn run(&mut self, world: &mut World, delta_seconds: f64);

	/// Tears the [System] down when the engine shuts down.
	/// It is set up again before its next run.
	fn shutdown(&mut self, _world: &mut World) {}
}
