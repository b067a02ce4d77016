//! [Systems](System) provide world-wide logic that isn't tied to a single entity.
//!
//! A [System] must be registered with a [World](crate::world::World)
//! for it to run; registered systems run once per frame, after the script pass.

mod system;
mod system_store;

pub use system::*;
pub(crate) use system_store::*;
