//! Single-step integrators over any [`OdeSystem`].
//!
//! Each integrator reads the current state and returns a new one built with
//! the [`State`] algebra; inputs are never modified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::state::State;
use crate::system::OdeSystem;

pub trait Integrator {
	/// Advances `state` from time `t` by `h`.
	fn integrate<S: OdeSystem>(
		&self,
		system: &S,
		state: &S::State,
		t: f32,
		h: f32,
	) -> S::State;
}

/// `x + h f(x, t)`
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
	fn integrate<S: OdeSystem>(
		&self,
		system: &S,
		state: &S::State,
		t: f32,
		h: f32,
	) -> S::State {
		let f0 = system.compute_time_derivative(state, t);
		state.add(&f0.scale(h))
	}
}

/// Heun's method: average of the slopes at both ends of an Euler step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trapezoidal;

impl Integrator for Trapezoidal {
	fn integrate<S: OdeSystem>(
		&self,
		system: &S,
		state: &S::State,
		t: f32,
		h: f32,
	) -> S::State {
		let f0 = system.compute_time_derivative(state, t);
		let f1 = system.compute_time_derivative(&state.add(&f0.scale(h)), t + h);
		state.add(&f0.add(&f1).scale(h / 2.))
	}
}

/// Classical fourth order Runge-Kutta.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
	fn integrate<S: OdeSystem>(
		&self,
		system: &S,
		state: &S::State,
		t: f32,
		h: f32,
	) -> S::State {
		let half = h / 2.;
		let k1 = system.compute_time_derivative(state, t);
		let k2 = system.compute_time_derivative(&state.add(&k1.scale(half)), t + half);
		let k3 = system.compute_time_derivative(&state.add(&k2.scale(half)), t + half);
		let k4 = system.compute_time_derivative(&state.add(&k3.scale(h)), t + h);
		let sum = k1.add(&k2.add(&k3).scale(2.)).add(&k4);
		state.add(&sum.scale(h / 6.))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
	Euler,
	Trapezoidal,
	Rk4,
}

impl IntegratorKind {
	pub const ALL: [Self; 3] = [Self::Euler, Self::Trapezoidal, Self::Rk4];

	/// Derivative evaluations per step.
	pub fn evaluations(&self) -> usize {
		match self {
			Self::Euler => 1,
			Self::Trapezoidal => 2,
			Self::Rk4 => 4,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Euler => "euler",
			Self::Trapezoidal => "trapezoidal",
			Self::Rk4 => "rk4",
		}
	}
}

impl Integrator for IntegratorKind {
	fn integrate<S: OdeSystem>(
		&self,
		system: &S,
		state: &S::State,
		t: f32,
		h: f32,
	) -> S::State {
		match self {
			Self::Euler => ForwardEuler.integrate(system, state, t, h),
			Self::Trapezoidal => Trapezoidal.integrate(system, state, t, h),
			Self::Rk4 => Rk4.integrate(system, state, t, h),
		}
	}
}

impl fmt::Display for IntegratorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for IntegratorKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		let lower = s.to_ascii_lowercase();
		Self::ALL
			.into_iter()
			.find(|kind| kind.name() == lower)
			.ok_or_else(|| Error::InvalidConfig(format!("unknown integrator {:?}", s)))
	}
}
