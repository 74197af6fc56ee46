use crate::error::{positive, Error, Result};
use crate::state::ParticleState;
use crate::V3;
use protocol::pr_model::PrSpring;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
	ps: [usize; 2],
	k: f32,
	l0: f32,
}

impl Spring {
	pub fn new(p1: usize, p2: usize, k: f32, l0: f32) -> Result<Self> {
		if p1 == p2 {
			return Err(Error::SelfLoop(p1));
		}
		Ok(Self {
			ps: [p1, p2],
			k: positive("stiffness", k)?,
			l0: positive("rest length", l0)?,
		})
	}

	pub fn particles(&self) -> [usize; 2] {
		self.ps
	}

	pub fn get_k(&self) -> f32 {
		self.k
	}

	pub fn get_l0(&self) -> f32 {
		self.l0
	}

	/// Hooke force pulling the first particle towards the second when
	/// stretched. The second particle receives the negation.
	pub fn force(&self, state: &ParticleState) -> V3 {
		let dp = state.positions[self.ps[1]] - state.positions[self.ps[0]];
		let l = dp.magnitude();
		if !l.is_normal() {
			log::debug!("bad spring length {} between {:?}", l, self.ps);
			return V3::zeros();
		}
		let u = dp / l;
		u * (self.k * (l - self.l0))
	}

	pub fn render(&self, id: usize) -> PrSpring {
		PrSpring {
			id,
			particles: self.ps,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn pair(p0: V3, p1: V3) -> ParticleState {
		ParticleState::at_rest(vec![p0, p1])
	}

	#[test]
	fn test_stretched_pulls_together() {
		let spring = Spring::new(0, 1, 10.0, 1.0).unwrap();
		let f = spring.force(&pair(V3::zeros(), V3::new(3., 0., 0.)));
		assert_eq!(f, V3::new(20., 0., 0.));
	}

	#[test]
	fn test_compressed_pushes_apart() {
		let spring = Spring::new(0, 1, 10.0, 1.0).unwrap();
		let f = spring.force(&pair(V3::zeros(), V3::new(0., 0.5, 0.)));
		assert_eq!(f, V3::new(0., -5., 0.));
	}

	#[test]
	fn test_rest_length_no_force() {
		let spring = Spring::new(0, 1, 100.0, 2.0).unwrap();
		let f = spring.force(&pair(V3::new(1., 1., 1.), V3::new(1., 1., 3.)));
		assert_eq!(f, V3::zeros());
	}

	#[test]
	fn test_degenerate_length() {
		let spring = Spring::new(0, 1, 100.0, 2.0).unwrap();
		let p = V3::new(0.3, 0.2, 0.1);
		let f = spring.force(&pair(p, p));
		assert_eq!(f, V3::zeros());
	}

	#[test]
	fn test_invalid() {
		assert_eq!(Spring::new(2, 2, 1.0, 1.0), Err(Error::SelfLoop(2)));
		assert!(Spring::new(0, 1, 0.0, 1.0).is_err());
		assert!(Spring::new(0, 1, 1.0, -1.0).is_err());
	}
}
