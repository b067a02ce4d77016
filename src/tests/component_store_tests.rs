use crate::components::{Component, ComponentId, ComponentStore};
use crate::entities::{Entity, EntityRegistry};
use crate::error::Error;
use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};
use std::collections::HashMap;

#[derive(Component, Debug, PartialEq)]
struct Health(i32);

#[derive(Component, Debug, PartialEq)]
struct Armor(i32);

fn spawn(registry: &mut EntityRegistry, count: usize) -> Vec<Entity> {
	(0..count).map(|_| registry.create().unwrap()).collect()
}

#[test]
pub fn component_ids() {
	assert_eq!(ComponentId::of::<Health>(), Health::component_id());
	assert_ne!(Health::component_id(), Armor::component_id());
	assert_eq!("Health", Health::component_id().name());
	assert_eq!("Armor", Armor::component_id().to_string());
}

#[test]
pub fn attach_detach_attach() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();
	let entity = registry.create().unwrap();

	store.attach(&registry, entity, Health(10)).unwrap();
	assert_eq!(
		Err(Error::AlreadyAttached { entity, component: "Health" }),
		store.attach(&registry, entity, Health(20))
	);
	assert_eq!(Some(&Health(10)), store.get(entity));

	assert_eq!(Ok(Health(10)), store.detach(entity));
	assert_eq!(
		Err(Error::NotAttached { entity, component: "Health" }),
		store.detach(entity)
	);

	store.attach(&registry, entity, Health(30)).unwrap();
	assert_eq!(Some(&Health(30)), store.get(entity));
	assert_eq!(1, store.len());
}

#[test]
pub fn reject_stale_entities() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();
	let entity = registry.create().unwrap();
	registry.destroy(entity).unwrap();

	assert_eq!(Err(Error::StaleHandle(entity)), store.attach(&registry, entity, Health(1)));
	assert!(store.is_empty());
}

#[test]
pub fn stale_handles_do_not_alias_reused_slots() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();

	let old = registry.create().unwrap();
	store.attach(&registry, old, Health(1)).unwrap();
	store.detach(old).unwrap();
	registry.destroy(old).unwrap();

	let new = registry.create().unwrap();
	store.attach(&registry, new, Health(2)).unwrap();

	assert_eq!(old.id(), new.id());
	assert_eq!(None, store.get(old));
	assert!(!store.contains(old));
	assert_eq!(Some(&Health(2)), store.get(new));
}

#[test]
pub fn for_each_visits_every_value_once() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();
	let mut rng = thread_rng();

	let mut entities = spawn(&mut registry, 512);
	let mut expected = HashMap::new();
	for (i, entity) in entities.iter().enumerate() {
		store.attach(&registry, *entity, Health(i as i32)).unwrap();
		expected.insert(*entity, i as i32);
	}

	entities.shuffle(&mut rng);
	for entity in entities.iter().take(200) {
		if rng.gen_bool(0.5) {
			store.detach(*entity).unwrap();
			expected.remove(entity);
		}
	}

	let mut visited = HashMap::new();
	store.for_each(|entity, health| {
		health.0 += 1;
		assert!(visited.insert(entity, health.0).is_none(), "Entity visited twice");
	});

	assert_eq!(expected.len(), store.len());
	assert_eq!(expected.len(), visited.len());
	for (entity, value) in expected {
		assert_eq!(Some(&(value + 1)), visited.get(&entity));
		assert_eq!(Some(&Health(value + 1)), store.get(entity));
	}
}

#[test]
pub fn dense_arrays_stay_consistent() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();
	let entities = spawn(&mut registry, 64);

	for entity in &entities {
		store.attach(&registry, *entity, Armor(entity.id() as i32)).unwrap();
	}
	for entity in entities.iter().step_by(3) {
		store.detach(*entity).unwrap();
	}

	for (entity, armor) in store.iter() {
		assert_eq!(entity.id() as i32, armor.0, "Value moved away from its owner");
	}
	assert_eq!(store.entities().len(), store.len());
}

#[test]
pub fn parallel_for_each() {
	let mut registry = EntityRegistry::new();
	let mut store = ComponentStore::new();
	for entity in spawn(&mut registry, 4096) {
		store.attach(&registry, entity, Health(entity.id() as i32)).unwrap();
	}

	store.par_for_each(|entity, health| health.0 += entity.id() as i32);

	for (entity, health) in store.iter() {
		assert_eq!(entity.id() as i32 * 2, health.0);
	}
}
