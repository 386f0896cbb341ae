use crate::diagnostics::{DiagnosticSink, PendingDiagnostics, Severity, report_mapping_error};
use crate::error::{CatalogError, GenerationError, MappingError};
use crate::model::{MapperGroup, MappingDirective, TypeCatalog, Visibility, simple_name};
use crate::plan::ConversionPlan;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod enumeration;
mod record;
pub mod resolver;
pub mod strategy;
pub mod sum_type;

use enumeration::build_enumeration_entries;
use record::{RecordBuilder, RecordScope};
use resolver::ConversionResolver;
pub use strategy::{Strategy, select_strategy};
use sum_type::build_sum_type_entries;

/// What to do with a target field that no source field feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Leave the field out of the plan without a diagnostic.
    Omit,
    /// Fail the directive when a mandatory field (not nullable, no default) is left out.
    #[default]
    Reject,
}

/// Tunables for a generation round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub missing_field_policy: MissingFieldPolicy,
    /// Warn about delegated nested conversions that no directive generates.
    pub check_delegates: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            missing_field_policy: MissingFieldPolicy::Reject,
            check_delegates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

/// One generated conversion operation, attached to its receiver type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    /// `as<ResultSimpleName>`.
    pub name: String,
    pub receiver: String,
    pub result: String,
    pub direction: Direction,
    pub visibility: Visibility,
    pub plan: ConversionPlan,
}

/// All operations generated for one source type, named `<SourceSimpleName>Mapper`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedUnit {
    pub name: String,
    pub source_type: String,
    pub operations: Vec<Operation>,
}

impl GeneratedUnit {
    fn new(source_type: &str) -> Self {
        Self {
            name: format!("{}Mapper", simple_name(source_type)),
            source_type: source_type.to_string(),
            operations: Vec::new(),
        }
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// The result of a generation round, ordered by source type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub units: Vec<GeneratedUnit>,
}

impl GenerationOutput {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, source_type: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.source_type == source_type)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.units.iter().flat_map(|u| u.operations.iter())
    }

    /// The plan converting `source_type` into `target_type`, forward or reverse.
    pub fn plan(&self, source_type: &str, target_type: &str) -> Option<&ConversionPlan> {
        self.operations()
            .map(|op| &op.plan)
            .find(|plan| plan.source_type == source_type && plan.target_type == target_type)
    }
}

/// The mapping-decision engine for one round of directives.
pub struct Generator<C: TypeCatalog> {
    catalog: C,
    groups: Vec<MapperGroup>,
    options: GeneratorOptions,
    resolver: ConversionResolver,
}

pub struct GeneratorBuilder<C: TypeCatalog> {
    catalog: C,
    groups: Vec<MapperGroup>,
    options: GeneratorOptions,
}

impl<C: TypeCatalog> GeneratorBuilder<C> {
    pub fn new(catalog: C, groups: Vec<MapperGroup>) -> Self {
        Self {
            catalog,
            groups,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_missing_field_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.options.missing_field_policy = policy;
        self
    }

    pub fn with_delegate_check(mut self, enabled: bool) -> Self {
        self.options.check_delegates = enabled;
        self
    }

    pub fn build(self) -> Generator<C> {
        Generator {
            catalog: self.catalog,
            groups: self.groups,
            options: self.options,
            resolver: ConversionResolver::new(),
        }
    }
}

impl<C: TypeCatalog> Generator<C> {
    pub fn builder(catalog: C, groups: Vec<MapperGroup>) -> GeneratorBuilder<C> {
        GeneratorBuilder::new(catalog, groups)
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Runs one generation round.
    ///
    /// Directive-level failures become diagnostics and skip only that directive.
    /// An internal failure (such as a catalog miss) is reported and yields an
    /// empty output instead of propagating.
    #[tracing::instrument(level = "debug", skip_all, fields(groups = self.groups.len()))]
    pub fn generate(&self, sink: &mut dyn DiagnosticSink) -> GenerationOutput {
        match self.try_generate(sink) {
            Ok(output) => output,
            Err(error) => {
                tracing::error!(%error, "generation round aborted");
                let related_type = match &error {
                    GenerationError::Internal(
                        CatalogError::NotFound(name) | CatalogError::DuplicateType(name),
                    ) => name.clone(),
                    GenerationError::Mapping(_) => String::new(),
                };
                sink.emit(Severity::Error, &error.to_string(), &related_type);
                GenerationOutput::default()
            }
        }
    }

    fn try_generate(&self, sink: &mut dyn DiagnosticSink) -> Result<GenerationOutput, GenerationError> {
        let mut units: BTreeMap<String, GeneratedUnit> = BTreeMap::new();
        let mut generated: AHashSet<(String, String)> = AHashSet::new();

        for group in &self.groups {
            tracing::debug!(group = %group.name, directives = group.directives.len(), "processing group");
            for directive in &group.directives {
                // Warnings of a directive that ends up aborted are dropped with it.
                let mut pending = PendingDiagnostics::new();
                let operations = match self.plan_operations(directive, group.visibility, &mut pending) {
                    Ok(operations) => operations,
                    Err(GenerationError::Mapping(error)) => {
                        report_mapping_error(sink, &error);
                        continue;
                    }
                    Err(internal) => return Err(internal),
                };
                if let Err(error) = check_operation_names(&generated, &operations, directive) {
                    report_mapping_error(sink, &error);
                    continue;
                }
                pending.commit(sink);
                tracing::info!(
                    source = %directive.source_type,
                    target = %directive.target_type,
                    operations = operations.len(),
                    "planned directive"
                );
                generated.extend(
                    operations
                        .iter()
                        .map(|op| (op.receiver.clone(), op.name.clone())),
                );
                units
                    .entry(directive.source_type.clone())
                    .or_insert_with(|| GeneratedUnit::new(&directive.source_type))
                    .operations
                    .extend(operations);
            }
        }

        let output = GenerationOutput {
            units: units.into_values().collect(),
        };
        if self.options.check_delegates {
            check_delegates(&output, sink);
        }
        Ok(output)
    }

    /// Plans the forward operation and, for reversible directives, the reverse one.
    /// Either failing aborts the whole directive.
    fn plan_operations(
        &self,
        directive: &MappingDirective,
        visibility: Visibility,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Operation>, GenerationError> {
        directive.validate()?;
        let forward = self.plan_directive(directive, sink)?;
        let mut operations = vec![Operation {
            name: directive.forward_operation_name(),
            receiver: directive.source_type.clone(),
            result: directive.target_type.clone(),
            direction: Direction::Forward,
            visibility,
            plan: forward,
        }];

        if directive.reversible {
            let mirrored = directive.mirrored()?;
            let reverse = self.plan_directive(&mirrored, sink)?;
            operations.push(Operation {
                name: directive.reverse_operation_name(),
                receiver: directive.target_type.clone(),
                result: directive.source_type.clone(),
                direction: Direction::Reverse,
                visibility,
                plan: reverse,
            });
        }
        Ok(operations)
    }

    /// Computes the conversion plan for one directive.
    pub fn plan_directive(
        &self,
        directive: &MappingDirective,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ConversionPlan, GenerationError> {
        let source = self.catalog.resolve(&directive.source_type)?;
        let target = self.catalog.resolve(&directive.target_type)?;
        let aliases = directive.alias_map()?;
        let strategy = select_strategy(source, target);
        tracing::debug!(
            source = %source.qualified_name,
            target = %target.qualified_name,
            %strategy,
            "selected strategy"
        );
        if strategy != Strategy::Record && !aliases.is_empty() {
            sink.emit(
                Severity::Warning,
                &format!(
                    "field aliases are ignored for the {} mapping from '{}' to '{}'; fields match by name",
                    strategy, source.qualified_name, target.qualified_name
                ),
                &source.qualified_name,
            );
        }

        let records = RecordBuilder::new(&self.resolver, self.options.missing_field_policy);
        let mut plan = ConversionPlan::new(&source.qualified_name, &target.qualified_name, strategy);
        plan.entries = match strategy {
            Strategy::Record => {
                let scope = RecordScope {
                    source_type: &source.qualified_name,
                    target_type: &target.qualified_name,
                };
                records.build(&scope, &source.fields, &target.fields, &aliases, sink)?
            }
            Strategy::Enumeration => build_enumeration_entries(source, target, sink),
            Strategy::SumType => build_sum_type_entries(&records, source, target, sink)?,
        };
        Ok(plan)
    }
}

/// Rejects a directive whose operations would clash by receiver and name with
/// operations already generated, or with each other.
fn check_operation_names(
    existing: &AHashSet<(String, String)>,
    operations: &[Operation],
    directive: &MappingDirective,
) -> Result<(), MappingError> {
    let mut seen = existing.clone();
    for op in operations {
        if !seen.insert((op.receiver.clone(), op.name.clone())) {
            return Err(MappingError::validation(
                &directive.source_type,
                &directive.target_type,
                format!("operation '{}' is already generated for '{}'", op.name, op.receiver),
            ));
        }
    }
    Ok(())
}

/// Warns about delegated conversions that no operation of the round provides.
fn check_delegates(output: &GenerationOutput, sink: &mut dyn DiagnosticSink) {
    let available: AHashSet<(&str, &str)> = output
        .operations()
        .map(|op| (op.receiver.as_str(), op.result.as_str()))
        .collect();

    for op in output.operations() {
        for (source_type, target_type) in op.plan.delegates() {
            if !available.contains(&(source_type.as_str(), target_type.as_str())) {
                sink.emit(
                    Severity::Warning,
                    &format!(
                        "'{}' delegates to a conversion from '{}' to '{}' that no directive generates",
                        op.name, source_type, target_type
                    ),
                    &op.receiver,
                );
            }
        }
    }
}
