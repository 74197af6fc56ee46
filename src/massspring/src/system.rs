use crate::error::Result;
use crate::network::SpringNetwork;
use crate::state::{ParticleState, State};
use protocol::pr_model::PrSpring;

/// `x' = f(x, t)`
pub trait OdeSystem {
	type State: State;

	fn compute_time_derivative(&self, state: &Self::State, t: f32) -> Self::State;
}

/// An ODE system over particle positions and velocities.
pub trait ParticleSystem: OdeSystem<State = ParticleState> {
	fn particle_count(&self) -> usize;

	fn pr_springs(&self) -> Vec<PrSpring> {
		Vec::new()
	}

	/// Systems without wind ignore the toggle.
	fn toggle_wind(&mut self) {}
}

/// A particle system whose forces come from a [`SpringNetwork`].
pub trait SpringSystem: ParticleSystem {
	fn network(&self) -> &SpringNetwork;

	fn network_mut(&mut self) -> &mut SpringNetwork;

	fn add_particle(&mut self, mass: f32, fixed: bool) -> Result<usize> {
		self.network_mut().add_particle(mass, fixed)
	}

	fn fix(&mut self, index: usize, on: bool) -> Result<()> {
		self.network_mut().fix(index, on)
	}

	fn add_spring(&mut self, i: usize, j: usize, k: f32, l0: f32) -> Result<usize> {
		self.network_mut().add_spring(i, j, k, l0)
	}
}
