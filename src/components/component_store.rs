use crate::components::Component;
use crate::entities::{Entity, EntityRegistry};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::any::Any;

/// Dense storage for a single [component](Component) kind.
///
/// Values live in a contiguous array kept compact with swap-and-pop, next to a
/// parallel array of owning entities. A sparse array maps entity slots to dense indices.
pub struct ComponentStore<T> {
	values: Vec<T>,
	entities: Vec<Entity>,
	sparse: Vec<Option<u32>>,
}

impl<T> ComponentStore<T> {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: Vec::with_capacity(capacity),
			entities: Vec::with_capacity(capacity),
			sparse: Vec::new(),
		}
	}

	/// Attach a value to a live entity.
	///
	/// Fails with [StaleHandle](Error::StaleHandle) if the entity is not alive and with
	/// [AlreadyAttached](Error::AlreadyAttached) if it already has a value in this store.
	pub fn attach(&mut self, registry: &EntityRegistry, entity: Entity, value: T) -> Result<()>
	where
		T: Component,
	{
		if !registry.is_alive(entity) {
			return Err(Error::StaleHandle(entity));
		}
		if self.contains(entity) {
			return Err(Error::AlreadyAttached {
				entity,
				component: T::component_name(),
			});
		}

		self.insert(entity, value);
		Ok(())
	}

	/// Detach and return the value owned by the entity.
	pub fn detach(&mut self, entity: Entity) -> Result<T>
	where
		T: Component,
	{
		self.take(entity).ok_or(Error::NotAttached {
			entity,
			component: T::component_name(),
		})
	}

	#[inline]
	pub fn get(&self, entity: Entity) -> Option<&T> {
		let index = self.dense_index(entity)?;
		Some(&self.values[index])
	}

	#[inline]
	pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
		let index = self.dense_index(entity)?;
		Some(&mut self.values[index])
	}

	#[inline]
	pub fn contains(&self, entity: Entity) -> bool {
		self.dense_index(entity).is_some()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Entities owning a value, in dense order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter())
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter_mut())
	}

	/// Visit every value once, in dense order.
	pub fn for_each(&mut self, mut func: impl FnMut(Entity, &mut T)) {
		for (entity, value) in self.iter_mut() {
			func(entity, value);
		}
	}

	/// Visit every value once, spreading the work over the rayon thread pool.
	pub fn par_for_each(&mut self, func: impl Fn(Entity, &mut T) + Send + Sync)
	where
		T: Send,
	{
		self.entities
			.par_iter()
			.zip(self.values.par_iter_mut())
			.for_each(|(entity, value)| func(*entity, value));
	}

	pub(crate) fn insert(&mut self, entity: Entity, value: T) {
		let slot = entity.id as usize;
		if self.sparse.len() <= slot {
			self.sparse.resize(slot + 1, None);
		}

		debug_assert!(self.values.len() < u32::MAX as usize, "Component store is full");
		self.sparse[slot] = Some(self.values.len() as u32);
		self.values.push(value);
		self.entities.push(entity);
	}

	pub(crate) fn take(&mut self, entity: Entity) -> Option<T> {
		let index = self.dense_index(entity)?;
		let last = self.values.len() - 1;

		if index != last {
			let moved = self.entities[last];
			self.sparse[moved.id as usize] = Some(index as u32);
		}
		self.sparse[entity.id as usize] = None;

		self.entities.swap_remove(index);
		Some(self.values.swap_remove(index))
	}

	#[inline(always)]
	fn dense_index(&self, entity: Entity) -> Option<usize> {
		let slot = entity.index()?;
		let index = (*self.sparse.get(slot)?)? as usize;
		(self.entities[index] == entity).then_some(index)
	}
}

impl<T> Default for ComponentStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Type-erased view of a [ComponentStore] used by the [World](crate::world::World)
/// to manage stores of kinds it doesn't know statically.
pub(crate) trait ErasedStore: Any {
	/// Drop the entity's value, if any. Returns whether a value was removed.
	fn purge(&mut self, entity: Entity) -> bool;
	fn contains_entity(&self, entity: Entity) -> bool;
	fn len(&self) -> usize;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
	fn purge(&mut self, entity: Entity) -> bool {
		self.take(entity).is_some()
	}

	fn contains_entity(&self, entity: Entity) -> bool {
		self.contains(entity)
	}

	fn len(&self) -> usize {
		self.values.len()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
