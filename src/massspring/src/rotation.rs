use crate::state::ParticleState;
use crate::system::{OdeSystem, ParticleSystem};
use crate::V3;

/// A single particle circling the z axis at unit angular speed:
/// `p' = (-y, x, 0)`. The velocity slot is unused.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationSystem;

impl RotationSystem {
	pub fn initial_state(radius: f32) -> ParticleState {
		ParticleState::at_rest(vec![V3::new(radius, 0., 0.)])
	}

	/// Closed-form position after `t` seconds from `(radius, 0, 0)`.
	pub fn exact(radius: f32, t: f32) -> V3 {
		V3::new(radius * t.cos(), radius * t.sin(), 0.)
	}
}

impl OdeSystem for RotationSystem {
	type State = ParticleState;

	fn compute_time_derivative(&self, state: &ParticleState, _t: f32) -> ParticleState {
		let mut d = ParticleState::zeros(state.len());
		if let Some(p) = state.positions.first() {
			d.positions[0] = V3::new(-p.y, p.x, 0.);
		}
		d
	}
}

impl ParticleSystem for RotationSystem {
	fn particle_count(&self) -> usize {
		1
	}
}
