// pr_model: Physical model for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrParticle {
	pub pos: [f32; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrSpring {
	pub id: usize,
	pub particles: [usize; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub particles: Vec<PrParticle>,
	pub springs: Vec<PrSpring>,
}

impl PrModel {
	/// Endpoint positions of every spring, flattened as a line list:
	/// `a0, b0, a1, b1, ...`.
	pub fn segments(&self) -> Vec<[f32; 3]> {
		let mut result = Vec::with_capacity(self.springs.len() * 2);
		for spring in self.springs.iter() {
			let [i, j] = spring.particles;
			result.push(self.particles[i].pos);
			result.push(self.particles[j].pos);
		}
		result
	}

	pub fn centroid(&self) -> Option<[f32; 3]> {
		if self.particles.is_empty() {
			return None;
		}
		let mut sum = [0f32; 3];
		for p in self.particles.iter() {
			for (s, x) in sum.iter_mut().zip(p.pos.iter()) {
				*s += x;
			}
		}
		let n = self.particles.len() as f32;
		Some(sum.map(|s| s / n))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn two_springs() -> PrModel {
		PrModel {
			particles: vec![
				PrParticle { pos: [0., 0., 0.] },
				PrParticle { pos: [1., 0., 0.] },
				PrParticle { pos: [1., 2., 0.] },
			],
			springs: vec![
				PrSpring { id: 0, particles: [0, 1] },
				PrSpring { id: 1, particles: [2, 1] },
			],
		}
	}

	#[test]
	fn test_segments() {
		let model = two_springs();
		assert_eq!(
			model.segments(),
			vec![[0., 0., 0.], [1., 0., 0.], [1., 2., 0.], [1., 0., 0.]]
		);
	}

	#[test]
	fn test_centroid() {
		assert_eq!(PrModel::default().centroid(), None);
		assert_eq!(two_springs().centroid(), Some([2. / 3., 2. / 3., 0.]));
	}
}
