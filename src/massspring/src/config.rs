//! Scene configuration, loaded from JSON.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```json
//! {
//!   "integrator": "trapezoidal",
//!   "dt": 0.002,
//!   "cloth": { "rows": 12, "cols": 16, "drag": 0.5 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, Error, Result};
use crate::integrator::IntegratorKind;
use crate::network::GRAVITY;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
	pub integrator: IntegratorKind,
	/// Largest integration step, in seconds.
	pub dt: f32,
	pub chain: ChainConfig,
	pub cloth: ClothConfig,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			integrator: IntegratorKind::Rk4,
			dt: 0.005,
			chain: ChainConfig::default(),
			cloth: ClothConfig::default(),
		}
	}
}

impl SceneConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)
			.map_err(|e| Error::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Falls back to the defaults when the file is missing or unusable.
	pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
		let path = path.as_ref();
		match std::fs::read_to_string(path) {
			Ok(contents) => match Self::from_json(&contents) {
				Ok(config) => {
					log::info!("loaded scene config from {:?}", path);
					config
				}
				Err(e) => {
					log::warn!("{:?}: {}, using defaults", path, e);
					Self::default()
				}
			},
			Err(_) => {
				log::info!("{:?} not found, using default scene config", path);
				Self::default()
			}
		}
	}

	pub fn validate(&self) -> Result<()> {
		positive("dt", self.dt)?;
		self.chain.validate()?;
		self.cloth.validate()
	}
}

/// Hanging chain: particle 0 is pinned at `anchor`, the rest hang below it
/// `rest_length` apart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
	pub particles: usize,
	pub mass: f32,
	pub rest_length: f32,
	pub stiffness: f32,
	pub drag: f32,
	pub gravity: [f32; 3],
	pub anchor: [f32; 3],
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			particles: 6,
			mass: 1.0,
			rest_length: 0.3,
			stiffness: 100.0,
			drag: 0.3,
			gravity: GRAVITY,
			anchor: [1.0, 0.0, 0.0],
		}
	}
}

impl ChainConfig {
	pub fn validate(&self) -> Result<()> {
		positive("chain mass", self.mass)?;
		positive("chain rest length", self.rest_length)?;
		positive("chain stiffness", self.stiffness)?;
		non_negative("chain drag", self.drag)?;
		Ok(())
	}
}

/// Cloth sheet: `rows` x `cols` particles in the horizontal plane starting
/// at `origin`, pinned at the two corners of row 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
	pub rows: usize,
	pub cols: usize,
	pub spacing: f32,
	pub mass: f32,
	pub structural: f32,
	pub shear: f32,
	pub bend: f32,
	pub drag: f32,
	pub gravity: [f32; 3],
	pub origin: [f32; 3],
	pub wind_min: f32,
	pub wind_max: f32,
}

impl Default for ClothConfig {
	fn default() -> Self {
		Self {
			rows: 20,
			cols: 20,
			spacing: 0.1,
			mass: 1.0,
			structural: 3000.0,
			shear: 3000.0,
			bend: 1500.0,
			drag: 0.9,
			gravity: GRAVITY,
			origin: [2.0, 1.0, 0.0],
			wind_min: 5.0,
			wind_max: 15.0,
		}
	}
}

impl ClothConfig {
	pub fn validate(&self) -> Result<()> {
		if self.rows < 2 || self.cols < 2 {
			return Err(Error::InvalidConfig(format!(
				"cloth grid must be at least 2x2, got {}x{}",
				self.rows, self.cols
			)));
		}
		positive("cloth spacing", self.spacing)?;
		positive("cloth mass", self.mass)?;
		positive("structural stiffness", self.structural)?;
		positive("shear stiffness", self.shear)?;
		positive("bend stiffness", self.bend)?;
		non_negative("cloth drag", self.drag)?;
		non_negative("wind magnitude", self.wind_min)?;
		if !(self.wind_min <= self.wind_max) {
			return Err(Error::InvalidConfig(format!(
				"wind range [{}, {}] is empty",
				self.wind_min, self.wind_max
			)));
		}
		Ok(())
	}
}
