//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! They key the per-kind stores of a [World](crate::world::World).

use std::sync::atomic::Ordering::Relaxed;
use std::hash::BuildHasherDefault;
use std::sync::atomic::AtomicUsize;
use nohash_hasher::NoHashHasher;
use lazy_static::lazy_static;
use std::collections::HashMap;
use parking_lot::RwLock;
use std::fmt::{Display, Formatter};

use crate::components::Component;

pub(crate) type IdHasher = BuildHasherDefault<NoHashHasher<ComponentId>>;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

lazy_static! {
	static ref ID_TO_NAME: RwLock<HashMap<ComponentId, &'static str, IdHasher>> =
		RwLock::new(HashMap::default());
}

/// A process-wide unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: usize,
}

impl nohash_hasher::IsEnabled for ComponentId {}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// The name the component type was registered under.
	pub fn name(&self) -> &'static str {
		ID_TO_NAME.read().get(self).copied().unwrap_or("<unknown component>")
	}
}

impl Display for ComponentId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Generates a new [ComponentId]. **Should not be called from user code.**
///
/// Called once per type from the code generated by #[derive([Component])].
#[doc(hidden)]
pub fn register(name: &'static str) -> ComponentId {
	let value = NEXT_ID.fetch_add(1, Relaxed);
	debug_assert!(
		value <= u32::MAX as usize,
		"This is an insane number of components. Please seek help."
	);

	let id = ComponentId { value };
	ID_TO_NAME.write().insert(id, name);
	id
}
