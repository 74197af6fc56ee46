pub mod input;
pub mod pr_model;
pub mod renderer;

pub use input::{InputState, NoInput, KEY_WIND};
pub use pr_model::{PrModel, PrParticle, PrSpring};
pub use renderer::Renderer;
