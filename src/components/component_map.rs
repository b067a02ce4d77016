use crate::components::{Component, ComponentId, ComponentStore, ErasedStore, IdHasher};
use crate::entities::Entity;
use std::collections::HashMap;

/// The set of [component stores](ComponentStore) owned by a [World](crate::world::World),
/// one per component kind, keyed by [ComponentId].
#[derive(Default)]
pub struct ComponentMap {
	stores: HashMap<ComponentId, Box<dyn ErasedStore>, IdHasher>,
}

impl ComponentMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// The store of kind `T`, if one was registered.
	pub fn get<T: Component>(&self) -> Option<&ComponentStore<T>> {
		self.stores.get(&T::component_id())?.as_any().downcast_ref()
	}

	/// The store of kind `T`, if one was registered.
	pub fn get_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
		self.stores.get_mut(&T::component_id())?.as_any_mut().downcast_mut()
	}

	/// The store of kind `T`, registering an empty one first if needed.
	pub fn get_or_register<T: Component>(&mut self, capacity: usize) -> &mut ComponentStore<T> {
		let store = self
			.stores
			.entry(T::component_id())
			.or_insert_with(|| Box::new(ComponentStore::<T>::with_capacity(capacity)) as Box<dyn ErasedStore>);

		match store.as_any_mut().downcast_mut() {
			Some(store) => store,
			None => unreachable!("store registered under the id of {}", T::component_name()),
		}
	}

	pub fn is_registered<T: Component>(&self) -> bool {
		self.stores.contains_key(&T::component_id())
	}

	/// Number of registered component kinds.
	pub fn len(&self) -> usize {
		self.stores.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stores.is_empty()
	}

	/// Number of values stored for the kind, 0 if it was never registered.
	pub fn count(&self, id: ComponentId) -> usize {
		self.stores.get(&id).map_or(0, |s| s.len())
	}

	/// Ids of the component kinds the entity currently has, in ascending id order.
	pub fn kinds_of(&self, entity: Entity) -> Vec<ComponentId> {
		let mut kinds: Vec<_> = self
			.stores
			.iter()
			.filter(|(_, store)| store.contains_entity(entity))
			.map(|(id, _)| *id)
			.collect();
		kinds.sort();
		kinds
	}

	/// Visit every `(A, B)` pair owned by the same entity, in the dense order of `A`'s store.
	pub fn join<A: Component, B: Component>(&mut self, mut func: impl FnMut(Entity, &mut A, &B)) {
		debug_assert_ne!(
			A::component_id(),
			B::component_id(),
			"A join needs two distinct component kinds"
		);

		let Some(mut first) = self.stores.remove(&A::component_id()) else {
			return;
		};

		if let (Some(a), Some(b)) = (first.as_any_mut().downcast_mut::<ComponentStore<A>>(), self.get::<B>()) {
			for (entity, value) in a.iter_mut() {
				if let Some(other) = b.get(entity) {
					func(entity, value, other);
				}
			}
		}

		self.stores.insert(A::component_id(), first);
	}

	/// Drop every value owned by the entity. Returns how many values were removed.
	pub(crate) fn purge(&mut self, entity: Entity) -> usize {
		self.stores.values_mut().map(|s| s.purge(entity)).filter(|removed| *removed).count()
	}
}
