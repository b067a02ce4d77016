//! [Scripts](Script) attach behaviour to individual [entities](crate::entities::Entity).
//!
//! A script is attached like a component but lives in the world's [ScriptScheduler],
//! which calls `on_init`, `on_update` and `on_destroy` in a deterministic order.

mod script;
mod script_scheduler;

pub use script::{Script, ScriptContext};
pub use script_scheduler::{ScriptScheduler, ScriptState};

pub(crate) use script::ScriptObject;
pub(crate) use script_scheduler::WorldParts;
