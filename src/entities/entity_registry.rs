use crate::data_structures::{BitField, RangeAllocator};
use crate::entities::{Entity, EntityInstanceVec};
use crate::error::{Error, Result};
use tracing::{trace, warn};

const MIN_GROWTH: usize = 16;

/// Allocates, validates and recycles [entity](Entity) handles.
///
/// Free slots are handed out lowest index first. Every destruction bumps the
/// slot's generation, so handles issued before the destruction stay dead forever.
/// A slot whose generation counter is exhausted is retired instead of recycled.
pub struct EntityRegistry {
	allocator: RangeAllocator,
	instances: EntityInstanceVec,
	alive: BitField,
	next_creation_index: u64,
	max_entities: Option<u64>,
	retired: usize,
}

impl EntityRegistry {
	/// Creates an empty registry without an entity limit.
	pub fn new() -> Self {
		Self::with_limits(0, None)
	}

	/// Creates a registry with `capacity` pre-allocated slots,
	/// never growing past `max_entities` slots if a limit is given.
	pub fn with_limits(capacity: usize, max_entities: Option<u64>) -> Self {
		let capacity = match max_entities {
			Some(max) => capacity.min(usize::try_from(max).unwrap_or(usize::MAX)),
			None => capacity,
		};

		let mut registry = Self {
			allocator: RangeAllocator::new(),
			instances: EntityInstanceVec::default(),
			alive: BitField::new(),
			next_creation_index: 0,
			max_entities,
			retired: 0,
		};
		registry.reserve_slots(capacity);
		registry
	}

	/// Creates a new [entity](Entity).
	///
	/// Reuses the lowest free slot if there is one. Fails with
	/// [AllocatorExhausted](Error::AllocatorExhausted) when the slot limit is reached.
	pub fn create(&mut self) -> Result<Entity> {
		let index = match self.allocator.try_allocate(1) {
			Some(range) => range.start,
			None => {
				self.grow()?;
				match self.allocator.try_allocate(1) {
					Some(range) => range.start,
					None => return Err(self.exhausted()),
				}
			},
		};

		self.alive.set(index, true);
		self.instances.creation_indices[index] = self.next_creation_index;
		self.next_creation_index += 1;

		let entity = self.instances.handle(index);
		trace!(%entity, "entity created");
		Ok(entity)
	}

	/// Destroys an [entity](Entity), making every existing handle to it stale.
	pub fn destroy(&mut self, entity: Entity) -> Result<()> {
		if !self.is_alive(entity) {
			return Err(Error::StaleHandle(entity));
		}

		let index = entity.id as usize;
		self.alive.set(index, false);

		let generation = &mut self.instances.generations[index];
		if *generation == u32::MAX {
			self.retired += 1;
			warn!(%entity, "entity slot retired after exhausting its generations");
		} else {
			*generation += 1;
			self.allocator.free(index..index + 1);
		}

		trace!(%entity, "entity destroyed");
		Ok(())
	}

	/// Checks whether the handle refers to a live [entity](Entity).
	#[inline]
	pub fn is_alive(&self, entity: Entity) -> bool {
		match entity.index() {
			Some(index) if index < self.instances.len() => {
				self.alive.get(index) && self.instances.generations[index] == entity.generation
			},
			_ => false,
		}
	}

	/// Position of the entity in creation order, or `None` if the handle is stale.
	pub fn creation_index(&self, entity: Entity) -> Option<u64> {
		if self.is_alive(entity) {
			Some(self.instances.creation_indices[entity.id as usize])
		} else {
			None
		}
	}

	/// Number of live entities.
	pub fn len(&self) -> usize {
		self.alive.count_ones()
	}

	/// Whether there are no live entities.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of slots currently reserved, live or free.
	pub fn capacity(&self) -> usize {
		self.allocator.capacity()
	}

	/// Number of slots permanently taken out of circulation.
	pub fn retired(&self) -> usize {
		self.retired
	}

	/// Iterate over all live entities in slot order.
	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.alive.iter_ones().map(|i| self.instances.handle(i))
	}

	#[cfg(test)]
	pub(crate) fn force_generation(&mut self, index: usize, generation: u32) {
		self.instances.generations[index] = generation;
	}

	fn grow(&mut self) -> Result<()> {
		let capacity = self.allocator.capacity();
		let mut growth = usize::max(MIN_GROWTH, capacity);

		if let Some(max) = self.max_entities {
			let max = usize::try_from(max).unwrap_or(usize::MAX);
			growth = growth.min(max.saturating_sub(capacity));
		}
		growth = growth.min(usize::MAX - capacity);

		if growth == 0 {
			return Err(self.exhausted());
		}

		self.reserve_slots(growth);
		Ok(())
	}

	fn reserve_slots(&mut self, count: usize) {
		self.allocator.reserve(count);
		self.instances.ensure_capacity(self.allocator.capacity());
		self.alive.ensure_capacity(self.allocator.capacity());
	}

	fn exhausted(&self) -> Error {
		Error::AllocatorExhausted {
			capacity: self.allocator.capacity() as u64,
		}
	}
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}
