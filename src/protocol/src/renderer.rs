use crate::pr_model::PrModel;

/// Receives the render model once per simulation update.
pub trait Renderer {
	fn render(&mut self, pr_model: &PrModel);
}
