//! [Entities](Entity) represent the individual "things" in a simulation.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! Handles are issued and validated by the [EntityRegistry].

mod entity_registry;
mod entity_instance;

pub use entity_registry::*;
pub use entity_instance::Entity;

pub(crate) use entity_instance::EntityInstanceVec;
