use crate::commands::Commands;
use crate::components::ComponentMap;
use crate::entities::{Entity, EntityRegistry};
use crate::error::{Error, Result};
use crate::scripts::{Script, ScriptContext, ScriptObject};
use std::any::{type_name, TypeId};
use tracing::trace;

/// Lifecycle of a script instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScriptState {
	/// Attached, `on_init` not called yet.
	Pending,
	/// Initialized and updated every frame.
	Active,
	/// `on_destroy` has run; the instance is about to be dropped.
	Destroyed,
}

struct ScriptInstance {
	/// (entity creation index, attach sequence)
	order: (u64, u64),
	entity: Entity,
	kind: TypeId,
	state: ScriptState,
	script: Box<dyn ScriptObject>,
}

/// The parts of a [World](crate::world::World) a script callback may touch.
pub(crate) struct WorldParts<'w> {
	pub registry: &'w EntityRegistry,
	pub components: &'w mut ComponentMap,
	pub commands: &'w mut Commands,
	pub frame: u64,
}

impl WorldParts<'_> {
	fn context(&mut self, entity: Entity) -> ScriptContext<'_> {
		ScriptContext {
			entity,
			frame: self.frame,
			registry: self.registry,
			components: &mut *self.components,
			commands: &mut *self.commands,
		}
	}
}

/// Owns every [Script] instance of a world and runs their callbacks.
///
/// Instances are kept sorted by the creation order of their entity, then by attach order,
/// which is the order callbacks run in.
#[derive(Default)]
pub struct ScriptScheduler {
	instances: Vec<ScriptInstance>,
	next_sequence: u64,
}

impl ScriptScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total number of attached scripts.
	pub fn len(&self) -> usize {
		self.instances.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}

	pub fn pending_count(&self) -> usize {
		self.instances.iter().filter(|i| i.state == ScriptState::Pending).count()
	}

	pub fn active_count(&self) -> usize {
		self.instances.iter().filter(|i| i.state == ScriptState::Active).count()
	}

	/// Number of scripts attached to the entity.
	pub fn count_for(&self, registry: &EntityRegistry, entity: Entity) -> usize {
		match registry.creation_index(entity) {
			Some(creation) => self.entity_range(creation).len(),
			None => 0,
		}
	}

	/// Lifecycle state of the entity's script of kind `S`.
	pub fn state_of<S: Script>(&self, registry: &EntityRegistry, entity: Entity) -> Option<ScriptState> {
		let index = self.find::<S>(registry, entity)?;
		Some(self.instances[index].state)
	}

	pub fn get<S: Script>(&self, registry: &EntityRegistry, entity: Entity) -> Option<&S> {
		let index = self.find::<S>(registry, entity)?;
		self.instances[index].script.as_any().downcast_ref()
	}

	pub fn get_mut<S: Script>(&mut self, registry: &EntityRegistry, entity: Entity) -> Option<&mut S> {
		let index = self.find::<S>(registry, entity)?;
		self.instances[index].script.as_any_mut().downcast_mut()
	}

	/// Attach a script in the [Pending](ScriptState::Pending) state.
	pub(crate) fn insert<S: Script>(&mut self, registry: &EntityRegistry, entity: Entity, script: S) -> Result<()> {
		let creation = registry.creation_index(entity).ok_or(Error::StaleHandle(entity))?;
		if self.find::<S>(registry, entity).is_some() {
			return Err(Error::AlreadyAttached {
				entity,
				component: type_name::<S>(),
			});
		}

		let order = (creation, self.next_sequence);
		self.next_sequence += 1;

		let position = self.instances.partition_point(|i| i.order < order);
		self.instances.insert(
			position,
			ScriptInstance {
				order,
				entity,
				kind: TypeId::of::<S>(),
				state: ScriptState::Pending,
				script: Box::new(script),
			},
		);

		trace!(%entity, script = type_name::<S>(), "script attached");
		Ok(())
	}

	/// Detach the entity's script of kind `S`, running its `on_destroy` first.
	pub(crate) fn remove<S: Script>(&mut self, parts: &mut WorldParts, entity: Entity) -> Result<S> {
		let index = self.find::<S>(parts.registry, entity).ok_or(Error::NotAttached {
			entity,
			component: type_name::<S>(),
		})?;

		let instance = self.instances.remove(index);
		let script = Self::destroy(instance, parts);
		match script.into_any().downcast::<S>() {
			Ok(script) => Ok(*script),
			Err(_) => unreachable!("script instance stored under the wrong kind"),
		}
	}

	/// Detach every script of the entity, running their `on_destroy` in attach order.
	/// Must be called while the entity is still alive.
	pub(crate) fn remove_all(&mut self, parts: &mut WorldParts, entity: Entity) -> usize {
		let Some(creation) = parts.registry.creation_index(entity) else {
			return 0;
		};

		let range = self.entity_range(creation);
		let removed: Vec<_> = self.instances.drain(range).collect();
		let count = removed.len();
		for instance in removed {
			Self::destroy(instance, parts);
		}
		count
	}

	/// Run one frame: initialize pending scripts, then update every active script.
	/// Returns the number of `on_init` and `on_update` calls made.
	pub(crate) fn run(&mut self, parts: &mut WorldParts, delta_seconds: f64) -> (usize, usize) {
		let mut initialized = 0;
		for instance in self.instances.iter_mut().filter(|i| i.state == ScriptState::Pending) {
			let mut ctx = parts.context(instance.entity);
			instance.script.on_init(&mut ctx);
			instance.state = ScriptState::Active;
			initialized += 1;
		}

		let mut updated = 0;
		for instance in self.instances.iter_mut().filter(|i| i.state == ScriptState::Active) {
			let mut ctx = parts.context(instance.entity);
			instance.script.on_update(&mut ctx, delta_seconds);
			updated += 1;
		}

		(initialized, updated)
	}

	fn destroy(mut instance: ScriptInstance, parts: &mut WorldParts) -> Box<dyn ScriptObject> {
		instance.state = ScriptState::Destroyed;

		let mut ctx = parts.context(instance.entity);
		instance.script.on_destroy(&mut ctx);

		trace!(entity = %instance.entity, "script destroyed");
		instance.script
	}

	fn find<S: Script>(&self, registry: &EntityRegistry, entity: Entity) -> Option<usize> {
		let creation = registry.creation_index(entity)?;
		let kind = TypeId::of::<S>();
		self.entity_range(creation).find(|i| self.instances[*i].kind == kind)
	}

	fn entity_range(&self, creation: u64) -> std::ops::Range<usize> {
		let start = self.instances.partition_point(|i| i.order.0 < creation);
		let end = self.instances.partition_point(|i| i.order.0 <= creation);
		start..end
	}
}
