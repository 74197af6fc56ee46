pub mod chain;
pub mod cloth;
pub mod config;
pub mod error;
pub mod integrator;
pub mod network;
pub mod particle;
pub mod rotation;
pub mod simulation;
pub mod spring;
pub mod state;
pub mod system;

pub use error::{Error, Result};

pub type V3 = nalgebra::Vector3<f32>;
