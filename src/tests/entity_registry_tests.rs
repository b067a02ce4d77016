use crate::entities::EntityRegistry;
use crate::error::Error;
use rand::prelude::SliceRandom;
use rand::thread_rng;

#[test]
pub fn create_sequential() {
	let mut registry = EntityRegistry::new();

	for i in 0..64 {
		let entity = registry.create().unwrap();
		assert_eq!(i, entity.id(), "Fresh registries hand out slots in order");
		assert_eq!(0, entity.generation());
		assert_eq!(Some(i), registry.creation_index(entity));
	}

	assert_eq!(64, registry.len());
	assert!(registry.capacity() >= 64);
}

#[test]
pub fn reuse_lowest_free_slot() {
	let mut registry = EntityRegistry::new();
	let entities = (0..8).map(|_| registry.create().unwrap()).collect::<Vec<_>>();

	registry.destroy(entities[6]).unwrap();
	registry.destroy(entities[3]).unwrap();

	let reused = registry.create().unwrap();
	assert_eq!(3, reused.id(), "The lowest free slot must be reused first");
	assert_eq!(1, reused.generation(), "Reused slots must carry a new generation");
	assert_ne!(entities[3], reused);
	assert!(!registry.is_alive(entities[3]));
	assert!(registry.is_alive(reused));

	assert_eq!(6, registry.create().unwrap().id());
	assert_eq!(8, registry.create().unwrap().id());
}

#[test]
pub fn creation_order_survives_slot_reuse() {
	let mut registry = EntityRegistry::new();
	let first = registry.create().unwrap();
	let second = registry.create().unwrap();

	registry.destroy(first).unwrap();
	let third = registry.create().unwrap();

	assert_eq!(first.id(), third.id());
	assert!(registry.creation_index(second) < registry.creation_index(third));
	assert_eq!(None, registry.creation_index(first));
}

#[test]
pub fn stale_handles_are_rejected() {
	let mut registry = EntityRegistry::new();
	let entity = registry.create().unwrap();
	registry.destroy(entity).unwrap();

	assert_eq!(Err(Error::StaleHandle(entity)), registry.destroy(entity));
	assert!(!registry.is_alive(entity));
	assert!(registry.is_empty());
}

#[test]
pub fn generations_never_regress() {
	let mut registry = EntityRegistry::new();
	let mut last = registry.create().unwrap();

	for _ in 0..100 {
		registry.destroy(last).unwrap();
		let next = registry.create().unwrap();
		assert_eq!(last.id(), next.id());
		assert!(next.generation() > last.generation());
		last = next;
	}
}

#[test]
pub fn retire_exhausted_slots() {
	let mut registry = EntityRegistry::new();
	let entity = registry.create().unwrap();
	registry.destroy(entity).unwrap();
	registry.force_generation(0, u32::MAX);

	let last = registry.create().unwrap();
	assert_eq!(0, last.id());
	assert_eq!(u32::MAX, last.generation());

	registry.destroy(last).unwrap();
	assert_eq!(1, registry.retired());

	let next = registry.create().unwrap();
	assert_ne!(0, next.id(), "Retired slots must never be handed out again");
	assert!(!registry.is_alive(last));
}

#[test]
pub fn exhaust_entity_limit() {
	let mut registry = EntityRegistry::with_limits(2, Some(4));
	for _ in 0..4 {
		registry.create().unwrap();
	}

	let error = registry.create().unwrap_err();
	assert_eq!(Error::AllocatorExhausted { capacity: 4 }, error);
	assert!(error.is_fatal());
	assert_eq!(4, registry.len(), "A failed create must not change the registry");
}

#[test]
pub fn iterate_live_entities() {
	let mut registry = EntityRegistry::new();
	let mut entities = (0..256).map(|_| registry.create().unwrap()).collect::<Vec<_>>();
	entities.shuffle(&mut thread_rng());

	let (destroyed, kept) = entities.split_at(100);
	for entity in destroyed {
		registry.destroy(*entity).unwrap();
	}

	let mut expected = kept.to_vec();
	expected.sort();
	assert_eq!(expected, registry.iter().collect::<Vec<_>>());
	assert_eq!(156, registry.len());
}
