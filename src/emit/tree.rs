use super::Renderer;
use crate::generator::{Direction, GeneratedUnit};
use crate::plan::DisplayPlan;

/// Renders every operation of a unit as a plan tree.
pub struct PlanTreeRenderer;

impl Renderer for PlanTreeRenderer {
    fn render_unit(&self, unit: &GeneratedUnit) -> String {
        let mut out = format!("== {} ({}) ==\n", unit.name, unit.source_type);
        for op in &unit.operations {
            let direction = match op.direction {
                Direction::Forward => "forward",
                Direction::Reverse => "reverse",
            };
            out.push_str(&format!("{} [{}, {:?}]\n", op.name, direction, op.visibility));
            out.push_str(&DisplayPlan { plan: &op.plan }.to_string());
        }
        out
    }
}
