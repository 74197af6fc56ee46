use crate::error::{positive, Error, Result};
use crate::integrator::{Integrator, IntegratorKind};
use crate::state::ParticleState;
use crate::system::ParticleSystem;
use crate::V3;
use protocol::input::{InputState, NoInput, KEY_WIND};
use protocol::pr_model::{PrModel, PrParticle};
use protocol::renderer::Renderer;

/// Fixed-step driver: owns a particle system and its state, splits each
/// `advance` into sub-steps of at most `dt` and publishes a render model.
pub struct Simulation<S: ParticleSystem> {
	system: S,
	state: ParticleState,
	integrator: IntegratorKind,
	dt: f32,
	// f64 so long runs keep advancing
	time: f64,
	steps: usize,

	// wind key was up at the previous poll
	released: bool,

	input: Box<dyn InputState>,
	renderer: Option<Box<dyn Renderer>>,
}

impl<S: ParticleSystem> Simulation<S> {
	pub fn new(
		system: S,
		state: ParticleState,
		integrator: IntegratorKind,
		dt: f32,
	) -> Result<Self> {
		let dt = positive("dt", dt)?;
		if state.len() != system.particle_count() {
			return Err(Error::StateShape {
				expected: system.particle_count(),
				found: state.len(),
			});
		}
		log::info!(
			"simulation: {} particles, {} integrator, dt {}",
			state.len(),
			integrator,
			dt
		);
		Ok(Self {
			system,
			state,
			integrator,
			dt,
			time: 0.0,
			steps: 0,
			released: true,
			input: Box::new(NoInput),
			renderer: None,
		})
	}

	pub fn with_input(mut self, input: Box<dyn InputState>) -> Self {
		self.input = input;
		self
	}

	pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
		self.renderer = Some(renderer);
		self
	}

	/// Advances the clock by `elapsed` seconds, then renders one frame.
	pub fn advance(&mut self, elapsed: f32) {
		self.poll_input();
		if elapsed.is_finite() && elapsed > 0.0 {
			let (n, last) = substeps(elapsed, self.dt);
			let t0 = self.time;
			for idx in 0..n {
				let h = if idx + 1 == n { last } else { self.dt };
				let t = t0 + idx as f64 * self.dt as f64;
				self.state =
					self.integrator.integrate(&self.system, &self.state, t as f32, h);
				self.steps += 1;
			}
			self.time = t0 + elapsed as f64;
		} else {
			log::warn!("ignoring advance by {} s", elapsed);
		}
		if let Some(mut renderer) = self.renderer.take() {
			renderer.render(&self.pr_model());
			self.renderer = Some(renderer);
		}
	}

	/// Flips the system's wind, as a press of the wind key would.
	pub fn toggle_wind(&mut self) {
		self.system.toggle_wind();
	}

	fn poll_input(&mut self) {
		let pressed = self.input.is_pressed(KEY_WIND);
		if pressed && self.released {
			self.system.toggle_wind();
		}
		self.released = !pressed;
	}

	pub fn positions(&self) -> &[V3] {
		&self.state.positions
	}

	/// Endpoint positions of every spring.
	pub fn springs(&self) -> Vec<[V3; 2]> {
		self.system
			.pr_springs()
			.iter()
			.map(|s| {
				let [i, j] = s.particles;
				[self.state.positions[i], self.state.positions[j]]
			})
			.collect()
	}

	pub fn pr_model(&self) -> PrModel {
		let particles = self
			.state
			.positions
			.iter()
			.map(|p| PrParticle {
				pos: [p.x, p.y, p.z],
			})
			.collect();
		PrModel {
			particles,
			springs: self.system.pr_springs(),
		}
	}

	pub fn state(&self) -> &ParticleState {
		&self.state
	}

	pub fn system(&self) -> &S {
		&self.system
	}

	pub fn time(&self) -> f32 {
		self.time as f32
	}

	pub fn steps(&self) -> usize {
		self.steps
	}

	pub fn dt(&self) -> f32 {
		self.dt
	}

	pub fn integrator(&self) -> IntegratorKind {
		self.integrator
	}
}

/// Splits `elapsed` into `n` steps of `dt` where only the last one may
/// differ, returning `n` and the last step's length. A remainder left by
/// rounding, at most a hundredth of a step, is folded into the last full
/// step instead of becoming a step of its own.
fn substeps(elapsed: f32, dt: f32) -> (usize, f32) {
	let (elapsed, dt) = (elapsed as f64, dt as f64);
	let ratio = elapsed / dt;
	let slack = (ratio * 1e-6).min(1e-2);
	let n = (ratio - slack).ceil().max(1.0);
	let last = elapsed - (n - 1.0) * dt;
	(n as usize, last as f32)
}
