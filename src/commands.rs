//! Deferred structural changes.
//!
//! Scripts cannot create or destroy entities, or attach and detach components, while the
//! scheduler is walking the world. They record [commands](Commands) instead, which the
//! [World](crate::world::World) applies in recording order once the pass has completed.

use crate::components::Component;
use crate::entities::Entity;
use crate::error::Result;
use crate::scripts::Script;
use crate::world::{Attachable, World};
use std::marker::PhantomData;

/// A structural change applied to a single entity.
pub(crate) trait Deferred {
	fn apply(self: Box<Self>, world: &mut World, entity: Entity) -> Result<()>;
}

pub(crate) enum Command {
	Spawn(Vec<Box<dyn Deferred>>),
	Destroy(Entity),
	Apply(Entity, Box<dyn Deferred>),
}

struct Attach<T>(T);

impl<T: Attachable> Deferred for Attach<T> {
	fn apply(self: Box<Self>, world: &mut World, entity: Entity) -> Result<()> {
		world.attach(entity, self.0)
	}
}

struct Detach<T>(PhantomData<fn() -> T>);

impl<T: Component> Deferred for Detach<T> {
	fn apply(self: Box<Self>, world: &mut World, entity: Entity) -> Result<()> {
		world.remove_component::<T>(entity).map(drop)
	}
}

struct RemoveScript<S>(PhantomData<fn() -> S>);

impl<S: Script> Deferred for RemoveScript<S> {
	fn apply(self: Box<Self>, world: &mut World, entity: Entity) -> Result<()> {
		world.remove_script::<S>(entity).map(drop)
	}
}

/// An ordered queue of structural changes.
#[derive(Default)]
pub struct Commands {
	queue: Vec<Command>,
}

impl Commands {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of recorded commands not yet applied.
	pub fn len(&self) -> usize {
		self.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	/// Record the creation of a new entity. Components added through the returned
	/// builder are attached right after the entity is created.
	pub fn spawn(&mut self) -> SpawnBuilder<'_> {
		self.queue.push(Command::Spawn(Vec::new()));
		let parts = match self.queue.last_mut() {
			Some(Command::Spawn(parts)) => parts,
			_ => unreachable!("spawn command was just pushed"),
		};
		SpawnBuilder { parts }
	}

	/// Record the destruction of an entity.
	pub fn destroy(&mut self, entity: Entity) {
		self.queue.push(Command::Destroy(entity));
	}

	/// Record attaching a component (or a [Scripted](crate::world::Scripted) script) to an entity.
	pub fn attach<T: Attachable>(&mut self, entity: Entity, value: T) {
		self.queue.push(Command::Apply(entity, Box::new(Attach(value))));
	}

	/// Record detaching the component of kind `T` from an entity.
	pub fn detach<T: Component>(&mut self, entity: Entity) {
		self.queue.push(Command::Apply(entity, Box::new(Detach::<T>(PhantomData))));
	}

	/// Record attaching a script to an entity.
	pub fn add_script<S: Script>(&mut self, entity: Entity, script: S) {
		self.attach(entity, crate::world::Scripted(script));
	}

	/// Record removing the script of kind `S` from an entity.
	pub fn remove_script<S: Script>(&mut self, entity: Entity) {
		self.queue.push(Command::Apply(entity, Box::new(RemoveScript::<S>(PhantomData))));
	}

	pub(crate) fn take(&mut self) -> Vec<Command> {
		std::mem::take(&mut self.queue)
	}

	/// Put unapplied commands back in front of anything recorded since they were taken.
	pub(crate) fn requeue(&mut self, commands: impl IntoIterator<Item = Command>) {
		let recorded = std::mem::take(&mut self.queue);
		self.queue.extend(commands);
		self.queue.extend(recorded);
	}
}

/// Collects the components of an entity recorded with [Commands::spawn].
pub struct SpawnBuilder<'c> {
	parts: &'c mut Vec<Box<dyn Deferred>>,
}

impl SpawnBuilder<'_> {
	/// Attach a component (or a [Scripted](crate::world::Scripted) script) to the new entity.
	pub fn with<T: Attachable>(self, value: T) -> Self {
		self.parts.push(Box::new(Attach(value)));
		self
	}

	/// Attach a script to the new entity.
	pub fn with_script<S: Script>(self, script: S) -> Self {
		self.with(crate::world::Scripted(script))
	}
}
