//! Error types shared by the registry, the component stores, the [World](crate::world::World)
//! and the [Engine](crate::engine::Engine).
//!
//! Recoverable precondition failures (`StaleHandle`, `AlreadyAttached`, `NotAttached`, ...) are
//! returned to the caller. `AllocatorExhausted` and `InvalidDelta` are fatal: the operation that
//! raised them did nothing and the embedding application is expected to stop driving the world.

use crate::entities::Entity;
use thiserror::Error;

/// Errors produced by world and engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// The handle refers to a destroyed or never-existing entity.
	#[error("entity {0} is not alive")]
	StaleHandle(Entity),

	/// The entity already carries a value of this component (or script) kind.
	#[error("entity {entity} already has a {component} attached")]
	AlreadyAttached {
		/// Target entity.
		entity: Entity,
		/// Name of the component or script kind.
		component: &'static str,
	},

	/// The entity does not carry a value of this component (or script) kind.
	#[error("entity {entity} has no {component} attached")]
	NotAttached {
		/// Target entity.
		entity: Entity,
		/// Name of the component or script kind.
		component: &'static str,
	},

	/// No entity slot can be handed out any more.
	#[error("entity allocator exhausted ({capacity} slots)")]
	AllocatorExhausted {
		/// Number of slots the registry was allowed to use.
		capacity: u64,
	},

	/// A frame delta was negative, NaN or infinite.
	#[error("invalid frame delta: {0}")]
	InvalidDelta(f64),

	/// Engine initialization was given an unusable surface size.
	#[error("invalid dimensions {width}x{height}")]
	InvalidDimensions {
		/// Requested width.
		width: u32,
		/// Requested height.
		height: u32,
	},

	/// `initialize` was called twice without a `shutdown` in between.
	#[error("engine is already initialized")]
	AlreadyInitialized,

	/// The engine must be initialized before it can run.
	#[error("engine is not initialized")]
	NotInitialized,

	/// A configuration file could not be read or parsed.
	#[error("invalid configuration: {0}")]
	Config(String),
}

impl Error {
	/// Whether the error signals a condition the world cannot recover from.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Error::AllocatorExhausted { .. } | Error::InvalidDelta(_))
	}
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
