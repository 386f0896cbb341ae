use crate::diagnostics::{DiagnosticSink, Severity};
use crate::model::TypeDeclaration;
use crate::plan::{PlanAction, PlanEntry};

/// Maps every source constant, in source order, onto the same-named target
/// constant. Unmatched constants get a deferred-failure entry and a warning,
/// so the result is always exhaustive.
pub(super) fn build_enumeration_entries(
    source: &TypeDeclaration,
    target: &TypeDeclaration,
    sink: &mut dyn DiagnosticSink,
) -> Vec<PlanEntry> {
    source
        .constants
        .iter()
        .map(|constant| {
            if target.has_constant(constant) {
                PlanEntry {
                    target: Some(constant.clone()),
                    source: constant.clone(),
                    action: PlanAction::Constant,
                }
            } else {
                sink.emit(
                    Severity::Warning,
                    &format!(
                        "constant '{}' of '{}' has no counterpart in '{}'; mapping it fails at use time",
                        constant, source.qualified_name, target.qualified_name
                    ),
                    &source.qualified_name,
                );
                PlanEntry {
                    target: None,
                    source: constant.clone(),
                    action: PlanAction::DeferredFailure,
                }
            }
        })
        .collect()
}
