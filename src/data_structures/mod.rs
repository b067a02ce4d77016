mod bit_field;
mod range_allocator;

pub use bit_field::*;
pub use range_allocator::*;
