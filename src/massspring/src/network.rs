use crate::error::{non_negative, Error, Result};
use crate::particle::Particle;
use crate::spring::Spring;
use crate::state::ParticleState;
use crate::V3;
use protocol::pr_model::PrSpring;

pub const GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Particles, springs and the uniform force parameters shared by every
/// spring-based system.
#[derive(Clone, Debug)]
pub struct SpringNetwork {
	particles: Vec<Particle>,
	springs: Vec<Spring>,
	gravity: V3,
	drag: f32,
}

impl Default for SpringNetwork {
	fn default() -> Self {
		Self {
			particles: Vec::new(),
			springs: Vec::new(),
			gravity: V3::from(GRAVITY),
			drag: 0.0,
		}
	}
}

impl SpringNetwork {
	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_drag(mut self, drag: f32) -> Result<Self> {
		self.drag = non_negative("drag coefficient", drag)?;
		Ok(self)
	}

	pub fn get_gravity(&self) -> V3 {
		self.gravity
	}

	pub fn get_drag(&self) -> f32 {
		self.drag
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn springs(&self) -> &[Spring] {
		&self.springs
	}

	fn check_index(&self, index: usize) -> Result<usize> {
		if index < self.particles.len() {
			Ok(index)
		} else {
			Err(Error::ParticleIndex {
				index,
				len: self.particles.len(),
			})
		}
	}

	pub fn add_particle(&mut self, mass: f32, fixed: bool) -> Result<usize> {
		self.particles.push(Particle::new(mass, fixed)?);
		Ok(self.particles.len() - 1)
	}

	pub fn fix(&mut self, index: usize, on: bool) -> Result<()> {
		let index = self.check_index(index)?;
		self.particles[index].set_fixed(on);
		Ok(())
	}

	pub fn add_spring(
		&mut self,
		i: usize,
		j: usize,
		k: f32,
		l0: f32,
	) -> Result<usize> {
		let i = self.check_index(i)?;
		let j = self.check_index(j)?;
		self.springs.push(Spring::new(i, j, k, l0)?);
		Ok(self.springs.len() - 1)
	}

	pub fn pr_springs(&self) -> Vec<PrSpring> {
		self.springs
			.iter()
			.enumerate()
			.map(|(id, s)| s.render(id))
			.collect()
	}

	/// Net force on every particle. Fixed particles always get zero.
	/// `external` is added uniformly to every free particle.
	pub fn forces(&self, state: &ParticleState, external: Option<V3>) -> Vec<V3> {
		assert_eq!(
			state.len(),
			self.particles.len(),
			"state does not match spring network"
		);
		let mut forces: Vec<V3> = self
			.particles
			.iter()
			.zip(state.velocities.iter())
			.map(|(p, v)| {
				if p.is_fixed() {
					return V3::zeros();
				}
				let f = p.get_mass() * self.gravity - self.drag * v;
				match external {
					Some(e) => f + e,
					None => f,
				}
			})
			.collect();
		for spring in self.springs.iter() {
			let [i, j] = spring.particles();
			let f = spring.force(state);
			if !self.particles[i].is_fixed() {
				forces[i] += f;
			}
			if !self.particles[j].is_fixed() {
				forces[j] -= f;
			}
		}
		forces
	}

	pub fn derivative(
		&self,
		state: &ParticleState,
		external: Option<V3>,
	) -> ParticleState {
		let forces = self.forces(state, external);
		let mut positions = Vec::with_capacity(state.len());
		let mut velocities = Vec::with_capacity(state.len());
		for ((p, v), f) in self
			.particles
			.iter()
			.zip(state.velocities.iter())
			.zip(forces.iter())
		{
			if p.is_fixed() {
				positions.push(V3::zeros());
				velocities.push(V3::zeros());
			} else {
				positions.push(*v);
				velocities.push(f / p.get_mass());
			}
		}
		ParticleState {
			positions,
			velocities,
		}
	}
}
