use std::fmt::{Display, Formatter};
use std::iter::repeat;

/// A unique handle to an entity.
///
/// Two handles are equal only if both the slot index and the generation match,
/// so a handle to a destroyed entity never equals the handle of a newer entity
/// that reuses the same slot.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity {
	pub(crate) id: u64,
	pub(crate) generation: u32,
}

impl Entity {
	/// The slot index of the entity. Slots are reused after destruction.
	#[inline(always)]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// How many times the slot had been recycled when this handle was issued.
	#[inline(always)]
	pub fn generation(&self) -> u32 {
		self.generation
	}

	#[inline(always)]
	pub(crate) fn index(&self) -> Option<usize> {
		usize::try_from(self.id).ok()
	}
}

impl Display for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}#{}", self.id, self.generation)
	}
}

/// Per-slot bookkeeping, stored as parallel arrays.
#[derive(Default)]
pub(crate) struct EntityInstanceVec {
	pub(crate) generations: Vec<u32>,
	pub(crate) creation_indices: Vec<u64>,
}

impl EntityInstanceVec {
	pub fn len(&self) -> usize {
		self.generations.len()
	}

	pub fn handle(&self, index: usize) -> Entity {
		Entity {
			id: index as u64,
			generation: self.generations[index],
		}
	}

	pub fn ensure_capacity(&mut self, capacity: usize) {
		if self.generations.len() < capacity {
			self.reserve(capacity - self.generations.len());
		}
	}

	pub fn reserve(&mut self, count: usize) {
		self.generations.extend(repeat(0).take(count));
		self.creation_indices.extend(repeat(0).take(count));
	}
}
