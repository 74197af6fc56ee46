use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::SystemTime;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use massspring::chain::ChainSystem;
use massspring::cloth::ClothSystem;
use massspring::config::SceneConfig;
use massspring::integrator::IntegratorKind;
use massspring::rotation::RotationSystem;
use massspring::simulation::Simulation;
use massspring::state::ParticleState;
use massspring::system::ParticleSystem;
use protocol::input::{InputState, KEY_WIND};
use protocol::pr_model::PrModel;
use protocol::renderer::Renderer;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
	Chain,
	Cloth,
	Rotation,
}

/// Runs a scene headless and reports simulation load against real time.
#[derive(Parser, Debug)]
struct Args {
	#[arg(long, value_enum, default_value_t = Scene::Cloth)]
	scene: Scene,

	/// euler, trapezoidal or rk4, overrides the config file
	#[arg(long)]
	integrator: Option<IntegratorKind>,

	/// Sub-step in seconds, overrides the config file
	#[arg(long)]
	dt: Option<f32>,

	#[arg(long, default_value_t = 300)]
	frames: usize,

	/// Seconds of simulation per frame
	#[arg(long, default_value_t = 1.0 / 60.0)]
	frame_time: f32,

	#[arg(long, default_value = "scene.json")]
	config: PathBuf,

	/// Seed for the cloth wind
	#[arg(long)]
	seed: Option<u64>,

	/// Press the wind key on this frame
	#[arg(long)]
	wind_frame: Option<usize>,

	/// Print the final render model as JSON
	#[arg(long)]
	dump: bool,
}

struct ScriptedInput {
	frame: Rc<Cell<usize>>,
	press_at: Option<usize>,
}

impl InputState for ScriptedInput {
	fn is_pressed(&self, key: u8) -> bool {
		key == KEY_WIND && self.press_at == Some(self.frame.get())
	}
}

struct LogRenderer {
	frame: Rc<Cell<usize>>,
	every: usize,
}

impl Renderer for LogRenderer {
	fn render(&mut self, pr_model: &PrModel) {
		let frame = self.frame.get();
		if frame % self.every == 0 {
			log::debug!("frame {}: centroid {:?}", frame, pr_model.centroid());
		}
	}
}

fn run<S: ParticleSystem>(
	system: S,
	state: ParticleState,
	config: &SceneConfig,
	args: &Args,
) -> Result<()> {
	let frame = Rc::new(Cell::new(0));
	let mut sim = Simulation::new(system, state, config.integrator, config.dt)?
		.with_input(Box::new(ScriptedInput {
			frame: frame.clone(),
			press_at: args.wind_frame,
		}))
		.with_renderer(Box::new(LogRenderer {
			frame: frame.clone(),
			every: 60,
		}));

	let start = SystemTime::now();
	for idx in 0..args.frames {
		frame.set(idx);
		sim.advance(args.frame_time);
	}
	let duration = start.elapsed()?.as_micros();

	if sim.positions().iter().any(|p| !p.iter().all(|x| x.is_finite())) {
		log::warn!("state diverged, try a smaller dt or another integrator");
	}
	let time = sim.time();
	log::info!(
		"{:?}: {} frames, {} steps, {:.3} s simulated",
		args.scene,
		args.frames,
		sim.steps(),
		time
	);
	if time > 0.0 {
		eprintln!("{:.3}%", duration as f32 / time / 1e4);
	}
	if args.dump {
		println!("{}", serde_json::to_string_pretty(&sim.pr_model())?);
	}
	Ok(())
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();
	let mut config = SceneConfig::load_or_default(&args.config);
	if let Some(kind) = args.integrator {
		config.integrator = kind;
	}
	if let Some(dt) = args.dt {
		config.dt = dt;
	}

	match args.scene {
		Scene::Chain => {
			let (system, state) = ChainSystem::hanging(&config.chain)?;
			run(system, state, &config, &args)
		}
		Scene::Cloth => {
			let (system, state) = ClothSystem::grid(&config.cloth)?;
			let system = match args.seed {
				Some(seed) => system.with_seed(seed),
				None => system,
			};
			run(system, state, &config, &args)
		}
		Scene::Rotation => {
			let state = RotationSystem::initial_state(1.0);
			run(RotationSystem, state, &config, &args)
		}
	}
}
