use crate::generator::{GeneratedUnit, GenerationOutput};

mod rust;
mod tree;

pub use rust::RustRenderer;
pub use tree::PlanTreeRenderer;

/// Turns generated units into text.
///
/// Renderers only read plans; every mapping decision has already been made,
/// so the same output always renders to the same text.
pub trait Renderer {
    fn render_unit(&self, unit: &GeneratedUnit) -> String;

    fn render(&self, output: &GenerationOutput) -> String {
        output
            .units
            .iter()
            .map(|unit| self.render_unit(unit))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderChoice {
    /// Rust source with one module per generated unit.
    Rust,
    /// Indented plan trees, for inspecting mapping decisions.
    PlanTree,
}

impl RenderChoice {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderChoice::Rust => Box::new(RustRenderer::new()),
            RenderChoice::PlanTree => Box::new(PlanTreeRenderer),
        }
    }
}
