use std::collections::HashSet;

use approx::assert_relative_eq;

use massspring::chain::ChainSystem;
use massspring::cloth::ClothSystem;
use massspring::config::{ChainConfig, ClothConfig};
use massspring::integrator::IntegratorKind;
use massspring::rotation::RotationSystem;
use massspring::simulation::Simulation;
use massspring::system::{ParticleSystem, SpringSystem};
use massspring::V3;
use protocol::input::KEY_WIND;

fn all_finite(positions: &[V3]) -> bool {
	positions.iter().all(|p| p.iter().all(|x| x.is_finite()))
}

#[test]
fn chain_settles_under_gravity() {
	let config = ChainConfig::default();
	let (chain, state) = ChainSystem::hanging(&config).unwrap();
	let mut sim = Simulation::new(chain, state, IntegratorKind::Rk4, 0.005).unwrap();
	for _ in 0..40 * 60 {
		sim.advance(1.0 / 60.0);
	}
	let positions = sim.positions();
	assert!(all_finite(positions));
	assert_eq!(positions[0], V3::new(1., 0., 0.));
	for (idx, p) in positions.iter().enumerate() {
		// nothing pushes the chain sideways
		assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
		assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
		if idx > 0 {
			// spring idx carries the weight of every particle below it
			let below = (config.particles - idx) as f32;
			let expected = config.rest_length + below * 9.81 / config.stiffness;
			let length = (positions[idx - 1] - p).magnitude();
			assert_relative_eq!(length, expected, epsilon = 0.02);
		}
	}
}

#[test]
fn cloth_keeps_corners_pinned() {
	let config = ClothConfig {
		rows: 6,
		cols: 6,
		..Default::default()
	};
	let (cloth, state) = ClothSystem::grid(&config).unwrap();
	let corners = [state.positions[0], state.positions[5]];
	let mut sim = Simulation::new(cloth, state, IntegratorKind::Rk4, 0.001).unwrap();
	for _ in 0..30 {
		sim.advance(1.0 / 60.0);
	}
	let positions = sim.positions();
	assert!(all_finite(positions));
	assert_eq!([positions[0], positions[5]], corners);
	// the free edge falls
	assert!(positions[35].y < 1.0);
	assert!(sim.system().network().particles()[0].is_fixed());
}

#[test]
fn cloth_wind_pushes_sheet() {
	let config = ClothConfig {
		rows: 5,
		cols: 5,
		..Default::default()
	};
	let mean_z = |wind: Option<V3>| {
		let (cloth, state) = ClothSystem::grid(&config).unwrap();
		let mut cloth = cloth.with_seed(5);
		if let Some(f) = wind {
			cloth.toggle_wind();
			cloth.set_wind(f);
		}
		let mut sim = Simulation::new(cloth, state, IntegratorKind::Rk4, 0.001).unwrap();
		for _ in 0..30 {
			sim.advance(1.0 / 60.0);
		}
		assert_eq!(sim.system().wind(), wind);
		assert!(all_finite(sim.positions()));
		sim.positions().iter().map(|p| p.z).sum::<f32>() / sim.positions().len() as f32
	};
	let calm = mean_z(None);
	let windy = mean_z(Some(V3::new(0., 0., 10.)));
	assert!(windy > calm + 0.01, "calm {} windy {}", calm, windy);
}

#[test]
fn held_wind_key_blows_once() {
	let config = ClothConfig {
		rows: 3,
		cols: 4,
		..Default::default()
	};
	let (cloth, state) = ClothSystem::grid(&config).unwrap();
	let keys: HashSet<u8> = [KEY_WIND].into_iter().collect();
	let mut sim = Simulation::new(cloth.with_seed(9), state, IntegratorKind::Rk4, 0.002)
		.unwrap()
		.with_input(Box::new(keys));
	sim.advance(0.01);
	let wind = sim.system().wind();
	assert!(wind.is_some());
	for _ in 0..10 {
		sim.advance(0.01);
	}
	assert_eq!(sim.system().wind(), wind);
}

#[test]
fn rotation_completes_a_turn() {
	let state = RotationSystem::initial_state(1.0);
	let mut sim = Simulation::new(RotationSystem, state, IntegratorKind::Rk4, 0.01).unwrap();
	let turn = 2.0 * std::f32::consts::PI;
	sim.advance(turn);
	assert_relative_eq!(sim.time(), turn, epsilon = 1e-3);
	assert_relative_eq!(sim.positions()[0], V3::new(1., 0., 0.), epsilon = 2e-3);
}
