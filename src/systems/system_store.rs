use crate::systems::System;
use crate::world::World;
use std::collections::HashSet;
use std::any::{type_name, TypeId};
use tracing::debug;

type Entry = (TypeId, Box<dyn System>);

/// The registered [systems](System) of a world.
///
/// While the systems run they are detached as a [SystemBatch]; the store keeps the set of
/// registered kinds, so [contains](SystemStore::contains) still sees them, and collects
/// systems registered during the run until the batch is reattached.
#[derive(Default)]
pub(crate) struct SystemStore {
	set: HashSet<TypeId>,
	systems: Vec<Entry>,
	initialized: usize,
}

/// Systems detached from their [SystemStore] so they can borrow the world.
pub(crate) struct SystemBatch {
	systems: Vec<Entry>,
	initialized: usize,
}

impl SystemStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains<T: System>(&self) -> bool {
		self.set.contains(&TypeId::of::<T>())
	}

	pub fn add_system<T: System>(&mut self, system: T) {
		let inserted = self.set.insert(TypeId::of::<T>());
		assert!(inserted, "System was already added to the current world");

		self.systems.push((TypeId::of::<T>(), Box::new(system)));
		debug!(system = type_name::<T>(), "system registered");
	}

	/// Take the registered systems out, leaving the set of kinds behind.
	pub fn detach(&mut self) -> SystemBatch {
		SystemBatch {
			systems: std::mem::take(&mut self.systems),
			initialized: std::mem::take(&mut self.initialized),
		}
	}

	/// Put a detached batch back, ahead of the systems registered while it was out.
	pub fn reattach(&mut self, mut batch: SystemBatch) {
		batch.systems.append(&mut self.systems);
		self.systems = batch.systems;
		self.initialized = batch.initialized;
	}
}

impl SystemBatch {
	/// Set up every system added since the last call, in registration order.
	pub fn setup_systems(&mut self, world: &mut World) {
		while self.initialized < self.systems.len() {
			self.systems[self.initialized].1.setup(world);
			self.initialized += 1;
		}
	}

	pub fn run_systems(&mut self, world: &mut World, delta_seconds: f64) {
		debug_assert_eq!(self.initialized, self.systems.len(), "Systems must be set up before they can run");
		self.systems.iter_mut().for_each(|(_, s)| s.run(world, delta_seconds));
	}

	/// Shut down every system that was set up, in reverse registration order.
	pub fn shutdown_systems(&mut self, world: &mut World) {
		for (kind, system) in self.systems[..self.initialized].iter_mut().rev() {
			system.shutdown(world);
			debug!(?kind, "system shut down");
		}
		self.initialized = 0;
	}
}
