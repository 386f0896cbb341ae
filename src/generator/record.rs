use super::{MissingFieldPolicy, resolver::ConversionResolver};
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::MappingError;
use crate::model::FieldDeclaration;
use crate::plan::PlanEntry;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Builds field-assignment plans for product types.
pub(super) struct RecordBuilder<'a> {
    resolver: &'a ConversionResolver,
    policy: MissingFieldPolicy,
}

/// The pair of types a field plan is built for, used in messages.
pub(super) struct RecordScope<'a> {
    pub source_type: &'a str,
    pub target_type: &'a str,
}

impl<'a> RecordBuilder<'a> {
    pub(super) fn new(resolver: &'a ConversionResolver, policy: MissingFieldPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Produces one entry per target field that has a source, in target declaration order.
    pub(super) fn build(
        &self,
        scope: &RecordScope<'_>,
        source_fields: &[FieldDeclaration],
        target_fields: &[FieldDeclaration],
        aliases: &BTreeMap<String, String>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<PlanEntry>, MappingError> {
        for alias_target in aliases.keys() {
            if !target_fields.iter().any(|f| &f.name == alias_target) {
                sink.emit(
                    Severity::Warning,
                    &format!(
                        "alias for '{}' names no field of '{}'",
                        alias_target, scope.target_type
                    ),
                    scope.source_type,
                );
            }
        }

        let mut entries = Vec::with_capacity(target_fields.len());
        let mut unmapped = Vec::new();

        for target in target_fields {
            let source_name = aliases.get(&target.name).unwrap_or(&target.name);
            match source_fields.iter().find(|f| &f.name == source_name) {
                Some(source) => {
                    let conversion = self.resolver.resolve_field(source, target);
                    entries.push(PlanEntry::assign(&target.name, &source.name, conversion));
                }
                None => {
                    tracing::debug!(
                        field = %target.name,
                        target_type = scope.target_type,
                        "no source field for target field"
                    );
                    if target.is_mandatory() {
                        unmapped.push(target.name.as_str());
                    }
                }
            }
        }

        if self.policy == MissingFieldPolicy::Reject && !unmapped.is_empty() {
            return Err(MappingError::validation(
                scope.source_type,
                scope.target_type,
                format!(
                    "required target fields have no source: {}",
                    unmapped.iter().join(", ")
                ),
            ));
        }
        Ok(entries)
    }
}
