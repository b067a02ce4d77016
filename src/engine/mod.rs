//! The frame loop driving a [World](crate::world::World).

mod clock;
mod engine_loop;

pub use clock::*;
pub use engine_loop::*;
