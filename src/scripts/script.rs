use crate::commands::Commands;
use crate::components::{Component, ComponentMap};
use crate::entities::{Entity, EntityRegistry};
use std::any::Any;

/// Per-entity behaviour driven by the [ScriptScheduler](crate::scripts::ScriptScheduler).
///
/// `on_init` runs once, on the first frame after the script was attached, right before its
/// first `on_update`. `on_update` runs once per frame in entity creation order.
/// `on_destroy` runs exactly once, when the script is removed or its entity is destroyed.
///
/// Scripts may freely read and write component values through the [ScriptContext];
/// structural changes go through [ScriptContext::commands] and are applied after the frame's pass.
pub trait Script: 'static {
	fn on_init(&mut self, _ctx: &mut ScriptContext) {}

	fn on_update(&mut self, _ctx: &mut ScriptContext, _delta_seconds: f64) {}

	fn on_destroy(&mut self, _ctx: &mut ScriptContext) {}
}

/// The view of the world handed to a [Script] callback.
pub struct ScriptContext<'w> {
	pub(crate) entity: Entity,
	pub(crate) frame: u64,
	pub(crate) registry: &'w EntityRegistry,
	pub(crate) components: &'w mut ComponentMap,
	pub(crate) commands: &'w mut Commands,
}

impl<'w> ScriptContext<'w> {
	/// The entity the running script is attached to.
	#[inline]
	pub fn entity(&self) -> Entity {
		self.entity
	}

	/// The frame being simulated.
	#[inline]
	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.registry.is_alive(entity)
	}

	pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.components.get::<T>()?.get(entity)
	}

	pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.components.get_mut::<T>()?.get_mut(entity)
	}

	/// Shorthand for a component of the script's own entity.
	pub fn get_own<T: Component>(&self) -> Option<&T> {
		self.get(self.entity)
	}

	/// Shorthand for a component of the script's own entity.
	pub fn get_own_mut<T: Component>(&mut self) -> Option<&mut T> {
		self.get_mut(self.entity)
	}

	/// Queue of structural changes applied once the current pass completes.
	pub fn commands(&mut self) -> &mut Commands {
		&mut *self.commands
	}
}

/// Object-safe wrapper adding downcasting to [Script].
pub(crate) trait ScriptObject: Script {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<S: Script> ScriptObject for S {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}
