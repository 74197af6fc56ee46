use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ClothConfig;
use crate::error::{non_negative, Error, Result};
use crate::network::SpringNetwork;
use crate::state::ParticleState;
use crate::system::{OdeSystem, ParticleSystem, SpringSystem};
use crate::V3;
use protocol::pr_model::PrSpring;

/// Spring grid with toggleable, randomly sampled wind.
#[derive(Debug)]
pub struct ClothSystem {
	network: SpringNetwork,
	wind_on: bool,
	wind: V3,
	wind_range: [f32; 2],
	rng: StdRng,
}

impl ClothSystem {
	pub fn new(network: SpringNetwork) -> Self {
		Self {
			network,
			wind_on: false,
			wind: V3::zeros(),
			wind_range: [5.0, 15.0],
			rng: StdRng::from_entropy(),
		}
	}

	pub fn with_rng(mut self, rng: StdRng) -> Self {
		self.rng = rng;
		self
	}

	pub fn with_seed(self, seed: u64) -> Self {
		self.with_rng(StdRng::seed_from_u64(seed))
	}

	/// Magnitude range of sampled wind, `0 <= min <= max`.
	pub fn with_wind_range(mut self, min: f32, max: f32) -> Result<Self> {
		let min = non_negative("wind magnitude", min)?;
		if !(min <= max) {
			return Err(Error::InvalidConfig(format!(
				"wind range [{}, {}] is empty",
				min, max
			)));
		}
		self.wind_range = [min, max];
		Ok(self)
	}

	/// Cloth grid from `config`: structural springs to the right and below,
	/// shear springs on both lower diagonals, bend springs two cells right
	/// and two cells below. Row 0's corners are pinned.
	pub fn grid(config: &ClothConfig) -> Result<(Self, ParticleState)> {
		config.validate()?;
		let (rows, cols, l0) = (config.rows, config.cols, config.spacing);
		let idx = |r: usize, c: usize| r * cols + c;
		let network = SpringNetwork::default()
			.with_gravity(V3::from(config.gravity))
			.with_drag(config.drag)?;
		let mut system = Self::new(network)
			.with_wind_range(config.wind_min, config.wind_max)?;

		let origin = V3::from(config.origin);
		let mut positions = Vec::with_capacity(rows * cols);
		for r in 0..rows {
			for c in 0..cols {
				system.add_particle(config.mass, false)?;
				positions
					.push(origin + V3::new(c as f32 * l0, 0., r as f32 * l0));
			}
		}
		system.fix(idx(0, 0), true)?;
		system.fix(idx(0, cols - 1), true)?;

		let diagonal = l0 * std::f32::consts::SQRT_2;
		for r in 0..rows {
			for c in 0..cols {
				let a = idx(r, c);
				if r + 1 < rows {
					system.add_spring(a, idx(r + 1, c), config.structural, l0)?;
				}
				if c + 1 < cols {
					system.add_spring(a, idx(r, c + 1), config.structural, l0)?;
				}
				if r + 1 < rows && c + 1 < cols {
					system.add_spring(a, idx(r + 1, c + 1), config.shear, diagonal)?;
				}
				if r + 1 < rows && c >= 1 {
					system.add_spring(a, idx(r + 1, c - 1), config.shear, diagonal)?;
				}
				if r + 2 < rows {
					system.add_spring(a, idx(r + 2, c), config.bend, 2. * l0)?;
				}
				if c + 2 < cols {
					system.add_spring(a, idx(r, c + 2), config.bend, 2. * l0)?;
				}
			}
		}
		log::info!(
			"cloth: {}x{} grid, {} springs",
			rows,
			cols,
			system.network.springs().len()
		);
		Ok((system, ParticleState::at_rest(positions)))
	}

	/// Current wind force, `None` while wind is off.
	pub fn wind(&self) -> Option<V3> {
		if self.wind_on {
			Some(self.wind)
		} else {
			None
		}
	}

	/// Overrides the wind vector without changing whether wind is on.
	pub fn set_wind(&mut self, f: V3) {
		self.wind = f;
	}

	fn sample_wind(&mut self) -> V3 {
		let mut dir = V3::zeros();
		while dir.magnitude() < 1e-6 {
			dir = V3::new(
				self.rng.gen_range(-1.0..=1.0),
				self.rng.gen_range(-1.0..=1.0),
				self.rng.gen_range(-1.0..=1.0),
			);
		}
		let [min, max] = self.wind_range;
		let magnitude = if min < max {
			self.rng.gen_range(min..max)
		} else {
			min
		};
		dir.normalize() * magnitude
	}
}

impl OdeSystem for ClothSystem {
	type State = ParticleState;

	fn compute_time_derivative(&self, state: &ParticleState, _t: f32) -> ParticleState {
		self.network.derivative(state, self.wind())
	}
}

impl ParticleSystem for ClothSystem {
	fn particle_count(&self) -> usize {
		self.network.len()
	}

	fn pr_springs(&self) -> Vec<PrSpring> {
		self.network.pr_springs()
	}

	fn toggle_wind(&mut self) {
		self.wind_on = !self.wind_on;
		if self.wind_on {
			self.wind = self.sample_wind();
			log::debug!("wind on: {:?}", self.wind);
		} else {
			log::debug!("wind off");
		}
	}
}

impl SpringSystem for ClothSystem {
	fn network(&self) -> &SpringNetwork {
		&self.network
	}

	fn network_mut(&mut self) -> &mut SpringNetwork {
		&mut self.network
	}
}
