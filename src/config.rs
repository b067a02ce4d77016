//! Startup configuration, loaded once from TOML.
//!
//! ```toml
//! app_name = "Physics Playground"
//! width = 1920
//! height = 1080
//! target_frame_rate = 120
//!
//! [world]
//! initial_capacity = 4096
//! max_entities = 100000
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Limits and pre-allocation of a [World](crate::world::World).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
	/// Entity slots and per-store entries reserved up front.
	pub initial_capacity: usize,
	/// Upper bound on entity slots; `None` grows until memory runs out.
	pub max_entities: Option<u64>,
}

impl Default for WorldConfig {
	fn default() -> Self {
		Self {
			initial_capacity: 1024,
			max_entities: None,
		}
	}
}

/// Settings of an [Engine](crate::engine::Engine).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
	pub app_name: String,
	pub width: u32,
	pub height: u32,
	/// Frames per second the loop is paced to; 0 runs unpaced.
	pub target_frame_rate: u32,
	/// Length of a fixed simulation step in seconds.
	pub fixed_timestep: f64,
	pub world: WorldConfig,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			app_name: String::from("Orchard"),
			width: 1280,
			height: 720,
			target_frame_rate: 60,
			fixed_timestep: 1.0 / 60.0,
			world: WorldConfig::default(),
		}
	}
}

impl EngineConfig {
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
		Self::from_toml_str(&source)
	}

	fn validate(&self) -> Result<()> {
		if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
			return Err(Error::Config(format!(
				"fixed_timestep must be a positive number of seconds, got {}",
				self.fixed_timestep
			)));
		}
		Ok(())
	}
}
