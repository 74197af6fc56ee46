use std::ops::{Add, Mul};

use crate::error::{Error, Result};
use crate::V3;

/// Vector-space operations integrators combine derivative samples with.
pub trait State: Clone {
	fn add(&self, other: &Self) -> Self;

	fn scale(&self, s: f32) -> Self;
}

/// Positions and velocities of every particle of one system, indexed by
/// particle id. A derivative sample has the same shape: velocities in
/// `positions` and accelerations in `velocities`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleState {
	pub positions: Vec<V3>,
	pub velocities: Vec<V3>,
}

impl ParticleState {
	pub fn new(positions: Vec<V3>, velocities: Vec<V3>) -> Result<Self> {
		if positions.len() != velocities.len() {
			return Err(Error::StateShape {
				expected: positions.len(),
				found: velocities.len(),
			});
		}
		Ok(Self {
			positions,
			velocities,
		})
	}

	/// Particles at the given positions, all at rest.
	pub fn at_rest(positions: Vec<V3>) -> Self {
		let velocities = vec![V3::zeros(); positions.len()];
		Self {
			positions,
			velocities,
		}
	}

	pub fn zeros(n: usize) -> Self {
		Self {
			positions: vec![V3::zeros(); n],
			velocities: vec![V3::zeros(); n],
		}
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	fn check_shape(&self, other: &Self) {
		assert!(
			self.positions.len() == other.positions.len()
				&& self.velocities.len() == other.velocities.len(),
			"particle state shape mismatch: {}/{} vs {}/{}",
			self.positions.len(),
			self.velocities.len(),
			other.positions.len(),
			other.velocities.len(),
		);
	}
}

impl State for ParticleState {
	fn add(&self, other: &Self) -> Self {
		self.check_shape(other);
		let zip_add = |a: &[V3], b: &[V3]| -> Vec<V3> {
			a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
		};
		Self {
			positions: zip_add(&self.positions, &other.positions),
			velocities: zip_add(&self.velocities, &other.velocities),
		}
	}

	fn scale(&self, s: f32) -> Self {
		Self {
			positions: self.positions.iter().map(|x| x * s).collect(),
			velocities: self.velocities.iter().map(|x| x * s).collect(),
		}
	}
}

impl Add for &ParticleState {
	type Output = ParticleState;

	fn add(self, rhs: Self) -> ParticleState {
		State::add(self, rhs)
	}
}

impl Add for ParticleState {
	type Output = ParticleState;

	fn add(self, rhs: Self) -> ParticleState {
		State::add(&self, &rhs)
	}
}

impl Mul<&ParticleState> for f32 {
	type Output = ParticleState;

	fn mul(self, rhs: &ParticleState) -> ParticleState {
		rhs.scale(self)
	}
}

impl Mul<ParticleState> for f32 {
	type Output = ParticleState;

	fn mul(self, rhs: ParticleState) -> ParticleState {
		rhs.scale(self)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn sample() -> ParticleState {
		ParticleState::new(
			vec![V3::new(1., 2., 3.), V3::new(-1., 0., 0.5)],
			vec![V3::new(0., 1., 0.), V3::new(2., 2., 2.)],
		)
		.unwrap()
	}

	#[test]
	fn test_add_scale() {
		let a = sample();
		let b = 2.0 * &a;
		assert_eq!(b.positions[0], V3::new(2., 4., 6.));
		assert_eq!(b.velocities[1], V3::new(4., 4., 4.));
		let c = &a + &b;
		assert_eq!(c, 3.0 * &a);
		assert_eq!(c.len(), 2);
	}

	#[test]
	fn test_new_rejects_uneven_arrays() {
		let result = ParticleState::new(vec![V3::zeros(); 3], vec![V3::zeros(); 2]);
		assert_eq!(
			result,
			Err(Error::StateShape {
				expected: 3,
				found: 2
			})
		);
	}

	#[test]
	#[should_panic(expected = "shape mismatch")]
	fn test_add_mismatch_panics() {
		let _ = &sample() + &ParticleState::zeros(3);
	}

	#[test]
	fn test_at_rest() {
		let s = ParticleState::at_rest(vec![V3::new(1., 1., 1.)]);
		assert_eq!(s.velocities, vec![V3::zeros()]);
		assert!(!s.is_empty());
		assert!(ParticleState::default().is_empty());
	}
}
