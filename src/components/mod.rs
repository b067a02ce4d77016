//! [Components](Component) are the plain data records attached to [entities](crate::entities::Entity).
//!
//! Every kind is stored densely in its own [ComponentStore].

pub mod component_id;
mod component_type;
mod component_store;
mod component_map;

pub use component_id::ComponentId;
pub use component_type::*;
pub use component_store::ComponentStore;
pub use component_map::ComponentMap;
pub use orchard_ecs_derive::Component;

pub(crate) use component_id::IdHasher;
pub(crate) use component_store::ErasedStore;
