use crate::config::ChainConfig;
use crate::error::{positive, Result};
use crate::network::SpringNetwork;
use crate::state::ParticleState;
use crate::system::{OdeSystem, ParticleSystem, SpringSystem};
use crate::V3;
use protocol::pr_model::PrSpring;

/// Springs and particles under gravity and drag, no wind.
#[derive(Clone, Debug)]
pub struct ChainSystem {
	network: SpringNetwork,
}

impl ChainSystem {
	pub fn new(network: SpringNetwork) -> Self {
		Self { network }
	}

	/// A chain hanging straight down from a pinned anchor particle, every
	/// spring at rest length.
	pub fn hanging(config: &ChainConfig) -> Result<(Self, ParticleState)> {
		let spacing = positive("chain spacing", config.rest_length)?;
		let network = SpringNetwork::default()
			.with_gravity(V3::from(config.gravity))
			.with_drag(config.drag)?;
		let mut system = Self::new(network);
		let anchor = V3::from(config.anchor);
		let mut positions = Vec::with_capacity(config.particles);
		for idx in 0..config.particles {
			system.add_particle(config.mass, false)?;
			positions.push(anchor - V3::new(0., spacing * idx as f32, 0.));
		}
		if config.particles > 0 {
			system.fix(0, true)?;
		}
		for idx in 1..config.particles {
			system.add_spring(idx - 1, idx, config.stiffness, spacing)?;
		}
		log::info!(
			"chain: {} particles, {} springs",
			system.particle_count(),
			system.network.springs().len()
		);
		Ok((system, ParticleState::at_rest(positions)))
	}
}

impl OdeSystem for ChainSystem {
	type State = ParticleState;

	fn compute_time_derivative(&self, state: &ParticleState, _t: f32) -> ParticleState {
		self.network.derivative(state, None)
	}
}

impl ParticleSystem for ChainSystem {
	fn particle_count(&self) -> usize {
		self.network.len()
	}

	fn pr_springs(&self) -> Vec<PrSpring> {
		self.network.pr_springs()
	}
}

impl SpringSystem for ChainSystem {
	fn network(&self) -> &SpringNetwork {
		&self.network
	}

	fn network_mut(&mut self) -> &mut SpringNetwork {
		&mut self.network
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_hanging_layout() {
		let config = ChainConfig::default();
		let (chain, state) = ChainSystem::hanging(&config).unwrap();
		assert_eq!(chain.particle_count(), 6);
		assert_eq!(state.len(), 6);
		assert_eq!(chain.network().springs().len(), 5);
		assert_eq!(chain.network().get_drag(), 0.3);
		assert!(chain.network().particles()[0].is_fixed());
		assert!(!chain.network().particles()[5].is_fixed());
		assert_eq!(state.positions[0], V3::new(1., 0., 0.));
		assert_eq!(state.positions[2], V3::new(1., -0.6, 0.));
		assert_eq!(chain.pr_springs()[4].particles, [4, 5]);
	}

	#[test]
	fn test_anchor_stays_put() {
		let (chain, state) = ChainSystem::hanging(&ChainConfig::default()).unwrap();
		let d = chain.compute_time_derivative(&state, 0.0);
		assert_eq!(d.positions[0], V3::zeros());
		assert_eq!(d.velocities[0], V3::zeros());
		// only gravity acts on a chain at rest length
		assert_relative_eq!(d.velocities[3], V3::new(0., -9.81, 0.), epsilon = 1e-3);
	}

	#[test]
	fn test_invalid_config() {
		let config = ChainConfig {
			mass: 0.0,
			..Default::default()
		};
		assert!(ChainSystem::hanging(&config).is_err());
		let config = ChainConfig {
			rest_length: -0.3,
			..Default::default()
		};
		assert!(ChainSystem::hanging(&config).is_err());
	}
}
