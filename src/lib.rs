extern crate self as orchard_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod scripts;
pub mod systems;
pub mod commands;
pub mod world;
pub mod engine;
pub mod config;
pub mod error;
pub mod transform;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::commands::{Commands, SpawnBuilder};
	pub use crate::components::*;
	pub use crate::config::{EngineConfig, WorldConfig};
	pub use crate::engine::{Engine, ExitHandle, ManualClock, SystemClock, TickReport, TimeSource};
	pub use crate::entities::{Entity, EntityRegistry};
	pub use crate::error::{Error, Result};
	pub use crate::scripts::{Script, ScriptContext, ScriptScheduler, ScriptState};
	pub use crate::systems::*;
	pub use crate::transform::Transform;
	pub use crate::world::{Attachable, FrameReport, Scripted, World};
}

#[cfg(test)]
mod tests;
