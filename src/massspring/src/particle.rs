use crate::error::{positive, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	mass: f32,
	fixed: bool,
}

impl Particle {
	pub fn new(mass: f32, fixed: bool) -> Result<Self> {
		let mass = positive("mass", mass)?;
		Ok(Self { mass, fixed })
	}

	pub fn get_mass(&self) -> f32 {
		self.mass
	}

	pub fn is_fixed(&self) -> bool {
		self.fixed
	}

	pub fn set_fixed(&mut self, fixed: bool) {
		self.fixed = fixed;
	}
}
