use crate::commands::{Command, Commands};
use crate::components::{Component, ComponentId, ComponentMap, ComponentStore};
use crate::config::WorldConfig;
use crate::entities::{Entity, EntityRegistry};
use crate::error::{Error, Result};
use crate::scripts::{Script, ScriptScheduler, ScriptState, WorldParts};
use crate::systems::{System, SystemStore};
use crate::transform::Transform;
use nalgebra_glm::Mat4;
use tracing::{debug, error, trace, warn};

/// A container for [entities](Entity), their [components](Component), [scripts](Script)
/// and [systems](System).
///
/// The world is the only owner of entity lifecycles: destroying an entity runs the
/// `on_destroy` of its scripts and then removes its values from every store before
/// the slot is released.
pub struct World {
	registry: EntityRegistry,
	components: ComponentMap,
	scheduler: ScriptScheduler,
	commands: Commands,
	systems: SystemStore,
	store_capacity: usize,
	frame: u64,
}

/// What happened during one [World::update].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
	/// Index of the frame that was simulated, starting at 0.
	pub frame: u64,
	pub scripts_initialized: usize,
	pub scripts_updated: usize,
	pub commands_applied: usize,
	/// Deferred commands that could not be applied, in recording order.
	pub rejected: Vec<Error>,
}

/// Anything that can be attached to an entity: every [Component], and scripts wrapped in [Scripted].
pub trait Attachable: 'static {
	fn attach_to(self, world: &mut World, entity: Entity) -> Result<()>;
}

impl<T: Component> Attachable for T {
	fn attach_to(self, world: &mut World, entity: Entity) -> Result<()> {
		world.add_component(entity, self)
	}
}

/// Wraps a [Script] so it can be attached through [World::attach] or [Commands::attach].
pub struct Scripted<S>(pub S);

impl<S: Script> Attachable for Scripted<S> {
	fn attach_to(self, world: &mut World, entity: Entity) -> Result<()> {
		world.add_script(entity, self.0)
	}
}

impl World {
	pub fn new() -> Self {
		Self::with_config(&WorldConfig::default())
	}

	pub fn with_config(config: &WorldConfig) -> Self {
		debug!(?config, "creating world");
		Self {
			registry: EntityRegistry::with_limits(config.initial_capacity, config.max_entities),
			components: ComponentMap::new(),
			scheduler: ScriptScheduler::new(),
			commands: Commands::new(),
			systems: SystemStore::new(),
			store_capacity: config.initial_capacity,
			frame: 0,
		}
	}

	/// Number of frames completed by [World::update].
	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn registry(&self) -> &EntityRegistry {
		&self.registry
	}

	pub fn components(&self) -> &ComponentMap {
		&self.components
	}

	pub fn scripts(&self) -> &ScriptScheduler {
		&self.scheduler
	}

	/// Commands recorded outside a frame are applied at the end of the next update,
	/// or right away with [World::apply_commands].
	pub fn commands(&mut self) -> &mut Commands {
		&mut self.commands
	}

	/// Creates a single [entity](Entity) with nothing attached.
	pub fn create_entity(&mut self) -> Result<Entity> {
		self.registry.create()
	}

	/// Destroys an [entity](Entity).
	///
	/// Runs `on_destroy` for each of its scripts, removes every component value it owns,
	/// then releases its slot. Fails with [StaleHandle](Error::StaleHandle) otherwise.
	pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
		if !self.registry.is_alive(entity) {
			return Err(Error::StaleHandle(entity));
		}

		let mut parts = WorldParts {
			registry: &self.registry,
			components: &mut self.components,
			commands: &mut self.commands,
			frame: self.frame,
		};
		let scripts = self.scheduler.remove_all(&mut parts, entity);
		let components = self.components.purge(entity);
		self.registry.destroy(entity)?;

		trace!(%entity, scripts, components, "entity purged");
		Ok(())
	}

	/// Destroys every live entity in creation order.
	pub fn clear(&mut self) {
		let mut entities: Vec<_> = self.registry.iter().collect();
		entities.sort_by_key(|e| self.registry.creation_index(*e));

		for entity in entities {
			// Scripts of earlier entities may have destroyed later ones already.
			if self.registry.is_alive(entity) {
				let _ = self.destroy_entity(entity);
			}
		}
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.registry.is_alive(entity)
	}

	/// Number of live entities.
	pub fn entity_count(&self) -> usize {
		self.registry.len()
	}

	/// Create the store for `T` ahead of the first attach.
	pub fn register_component<T: Component>(&mut self) -> &mut ComponentStore<T> {
		self.components.get_or_register::<T>(self.store_capacity)
	}

	/// Attach a component to a live entity.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
		let store = self.components.get_or_register::<T>(self.store_capacity);
		store.attach(&self.registry, entity, value)
	}

	/// Detach and return a component.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T> {
		match self.components.get_mut::<T>() {
			Some(store) => store.detach(entity),
			None => Err(Error::NotAttached {
				entity,
				component: T::component_name(),
			}),
		}
	}

	/// Attach a component or a [Scripted] script.
	pub fn attach<T: Attachable>(&mut self, entity: Entity, value: T) -> Result<()> {
		value.attach_to(self, entity)
	}

	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.components.get::<T>()?.get(entity)
	}

	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.components.get_mut::<T>()?.get_mut(entity)
	}

	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.get_component::<T>(entity).is_some()
	}

	pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
		self.components.get::<T>()
	}

	pub fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
		self.components.get_mut::<T>()
	}

	/// Component kinds attached to the entity, for inspectors.
	pub fn component_kinds(&self, entity: Entity) -> Vec<ComponentId> {
		self.components.kinds_of(entity)
	}

	/// Visit every value of kind `T`.
	pub fn for_each<T: Component>(&mut self, func: impl FnMut(Entity, &mut T)) {
		if let Some(store) = self.components.get_mut::<T>() {
			store.for_each(func);
		}
	}

	/// Visit every entity owning both an `A` and a `B`.
	pub fn join<A: Component, B: Component>(&mut self, func: impl FnMut(Entity, &mut A, &B)) {
		self.components.join(func);
	}

	/// Attach a script. It is initialized on the next update.
	pub fn add_script<S: Script>(&mut self, entity: Entity, script: S) -> Result<()> {
		self.scheduler.insert(&self.registry, entity, script)
	}

	/// Detach a script, running its `on_destroy` before handing it back.
	pub fn remove_script<S: Script>(&mut self, entity: Entity) -> Result<S> {
		let mut parts = WorldParts {
			registry: &self.registry,
			components: &mut self.components,
			commands: &mut self.commands,
			frame: self.frame,
		};
		self.scheduler.remove(&mut parts, entity)
	}

	pub fn script<S: Script>(&self, entity: Entity) -> Option<&S> {
		self.scheduler.get(&self.registry, entity)
	}

	pub fn script_mut<S: Script>(&mut self, entity: Entity) -> Option<&mut S> {
		self.scheduler.get_mut(&self.registry, entity)
	}

	pub fn script_state<S: Script>(&self, entity: Entity) -> Option<ScriptState> {
		self.scheduler.state_of::<S>(&self.registry, entity)
	}

	/// Register a [system](System). Systems are set up before the next frame they run in.
	pub fn register_system<T: System>(&mut self, system: T) {
		self.systems.add_system(system);
	}

	pub fn has_system<T: System>(&self) -> bool {
		self.systems.contains::<T>()
	}

	/// Transform of the entity composed with the transforms of its parents.
	///
	/// A parent that is stale or has no transform ends the chain. Chains longer than the
	/// number of live entities can only be cycles and are cut there.
	pub fn world_matrix(&self, entity: Entity) -> Option<Mat4> {
		let transforms = self.components.get::<Transform>()?;
		let transform = transforms.get(entity)?;

		let mut matrix = transform.local_matrix();
		let mut parent = transform.parent;
		let mut depth = 0;

		while let Some(handle) = parent {
			if depth >= self.registry.len() {
				warn!(%entity, "transform hierarchy contains a cycle");
				break;
			}

			match transforms.get(handle) {
				Some(transform) => {
					matrix = transform.local_matrix() * matrix;
					parent = transform.parent;
				},
				None => break,
			}
			depth += 1;
		}

		Some(matrix)
	}

	/// Entities whose transform names `entity` as parent, in creation order.
	pub fn children_of(&self, entity: Entity) -> Vec<Entity> {
		let Some(transforms) = self.components.get::<Transform>() else {
			return Vec::new();
		};

		let mut children: Vec<_> = transforms
			.iter()
			.filter(|(_, t)| t.parent == Some(entity))
			.map(|(e, _)| e)
			.collect();
		children.sort_by_key(|e| self.registry.creation_index(*e));
		children
	}

	/// Simulate one frame.
	///
	/// Pending scripts are initialized, then every active script is updated, both in entity
	/// creation order. Commands recorded during the pass are applied afterwards, then the
	/// registered systems run. A negative or non-finite delta is rejected with
	/// [InvalidDelta](Error::InvalidDelta) before anything runs.
	///
	/// A fatal error raised by a deferred command (such as
	/// [AllocatorExhausted](Error::AllocatorExhausted)) stops the frame: the remaining
	/// commands stay queued, systems do not run and the frame counter does not advance.
	pub fn update(&mut self, delta_seconds: f64) -> Result<FrameReport> {
		if !delta_seconds.is_finite() || delta_seconds < 0.0 {
			return Err(Error::InvalidDelta(delta_seconds));
		}

		let mut report = FrameReport {
			frame: self.frame,
			..FrameReport::default()
		};

		let mut parts = WorldParts {
			registry: &self.registry,
			components: &mut self.components,
			commands: &mut self.commands,
			frame: self.frame,
		};
		let (initialized, updated) = self.scheduler.run(&mut parts, delta_seconds);
		report.scripts_initialized = initialized;
		report.scripts_updated = updated;

		self.flush_commands(&mut report)?;

		let mut systems = self.systems.detach();
		systems.setup_systems(self);
		systems.run_systems(self, delta_seconds);
		self.systems.reattach(systems);

		self.flush_commands(&mut report)?;

		self.frame += 1;
		Ok(report)
	}

	/// Apply every recorded command now. Returns the commands that failed,
	/// or the first fatal error, which leaves the commands after it queued.
	pub fn apply_commands(&mut self) -> Result<Vec<Error>> {
		let mut report = FrameReport::default();
		self.flush_commands(&mut report)?;
		Ok(report.rejected)
	}

	/// Tear down the registered systems, destroy every entity, and discard the
	/// commands recorded while doing so.
	pub(crate) fn shutdown(&mut self) {
		let mut systems = self.systems.detach();
		systems.shutdown_systems(self);
		self.systems.reattach(systems);

		self.clear();

		let discarded = self.commands.take().len();
		if discarded > 0 {
			warn!(discarded, "commands recorded during shutdown were discarded");
		}
	}

	fn flush_commands(&mut self, report: &mut FrameReport) -> Result<()> {
		// Destruction runs `on_destroy`, which may record further commands.
		loop {
			let batch = self.commands.take();
			if batch.is_empty() {
				return Ok(());
			}

			let mut batch = batch.into_iter();
			while let Some(command) = batch.next() {
				report.commands_applied += 1;
				match self.apply_command(command) {
					Ok(()) => {},
					Err(error) if error.is_fatal() => {
						error!(%error, frame = self.frame, "deferred command failed fatally");
						self.commands.requeue(batch);
						return Err(error);
					},
					Err(error) => {
						warn!(%error, frame = self.frame, "deferred command rejected");
						report.rejected.push(error);
					},
				}
			}
		}
	}

	fn apply_command(&mut self, command: Command) -> Result<()> {
		match command {
			Command::Destroy(entity) => self.destroy_entity(entity),
			Command::Apply(entity, change) => change.apply(self, entity),
			Command::Spawn(parts) => {
				let entity = self.create_entity()?;
				let mut result = Ok(());
				for part in parts {
					if let Err(error) = part.apply(self, entity) {
						result = result.and(Err(error));
					}
				}
				result
			},
		}
	}
}

impl Default for World {
	fn default() -> Self {
		Self::new()
	}
}
