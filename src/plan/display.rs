use super::{ConversionPlan, PlanAction, PlanEntry};
use std::fmt;

/// Renders a plan as an indented tree for debugging and the CLI.
pub struct DisplayPlan<'a> {
    pub plan: &'a ConversionPlan,
}

impl<'a> fmt::Display for DisplayPlan<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} -> {} ({})",
            self.plan.source_type, self.plan.target_type, self.plan.strategy
        )?;
        let count = self.plan.entries.len();
        for (i, entry) in self.plan.entries.iter().enumerate() {
            self.fmt_entry(entry, f, "", i + 1 == count)?;
        }
        Ok(())
    }
}

impl<'a> DisplayPlan<'a> {
    fn fmt_entry(
        &self,
        entry: &PlanEntry,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let target = entry.target.as_deref().unwrap_or("<none>");

        match &entry.action {
            PlanAction::Assign(conversion) => {
                let note = if conversion.is_narrowing() { " (narrowing)" } else { "" };
                writeln!(f, "{} <- {}: {}{}", target, entry.source, conversion, note)?
            }
            PlanAction::Constant => writeln!(f, "{} <- {}", target, entry.source)?,
            PlanAction::DeferredFailure => writeln!(f, "{} => error (unmapped)", entry.source)?,
            PlanAction::Variant {
                source_path,
                target_path,
                fields,
            } => {
                writeln!(f, "{} <- {}", target_path.join("::"), source_path.join("::"))?;
                if let Some(fields) = fields {
                    let count = fields.len();
                    for (i, field) in fields.iter().enumerate() {
                        self.fmt_entry(field, f, &child_prefix, i + 1 == count)?;
                    }
                }
            }
        }
        Ok(())
    }
}
