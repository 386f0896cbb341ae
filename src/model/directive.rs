use super::{Visibility, simple_name};
use crate::error::MappingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field rename: the target field `target` is filled from the source field `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldAlias {
    pub target: String,
    pub source: String,
}

/// A request to generate conversions between one source and one target type.
///
/// Aliases are kept as supplied; uniqueness of their target names is checked
/// when the directive is planned, so a malformed directive only fails itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingDirective {
    #[serde(rename = "source")]
    pub source_type: String,
    #[serde(rename = "target")]
    pub target_type: String,
    #[serde(default)]
    pub reversible: bool,
    #[serde(default)]
    pub aliases: Vec<FieldAlias>,
}

impl MappingDirective {
    pub fn new(source_type: &str, target_type: &str) -> Self {
        Self {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            reversible: false,
            aliases: Vec::new(),
        }
    }

    pub fn reversible(mut self) -> Self {
        self.reversible = true;
        self
    }

    pub fn with_alias(mut self, target: &str, source: &str) -> Self {
        self.aliases.push(FieldAlias {
            target: target.to_string(),
            source: source.to_string(),
        });
        self
    }

    /// Name of the forward operation, `as<TargetSimpleName>`.
    pub fn forward_operation_name(&self) -> String {
        operation_name(&self.target_type)
    }

    /// Name of the reverse operation, `as<SourceSimpleName>`.
    pub fn reverse_operation_name(&self) -> String {
        operation_name(&self.source_type)
    }

    /// Checks the directive's shape before any planning happens.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.source_type.trim().is_empty() || self.target_type.trim().is_empty() {
            return Err(MappingError::validation(
                &self.source_type,
                &self.target_type,
                "a directive needs both a source and a target type",
            ));
        }
        for alias in &self.aliases {
            if alias.target.is_empty() || alias.source.is_empty() {
                return Err(MappingError::validation(
                    &self.source_type,
                    &self.target_type,
                    "field aliases must name both a target and a source field",
                ));
            }
        }
        Ok(())
    }

    /// The alias table keyed by target field name.
    pub fn alias_map(&self) -> Result<BTreeMap<String, String>, MappingError> {
        let mut map = BTreeMap::new();
        for alias in &self.aliases {
            if map
                .insert(alias.target.clone(), alias.source.clone())
                .is_some()
            {
                return Err(MappingError::validation(
                    &self.source_type,
                    &self.target_type,
                    format!("target field '{}' is aliased more than once", alias.target),
                ));
            }
        }
        Ok(map)
    }

    /// The directive running the other way: source and target swapped and
    /// every alias pair inverted.
    pub fn mirrored(&self) -> Result<MappingDirective, MappingError> {
        let mirrored = MappingDirective {
            source_type: self.target_type.clone(),
            target_type: self.source_type.clone(),
            reversible: false,
            aliases: self
                .aliases
                .iter()
                .map(|alias| FieldAlias {
                    target: alias.source.clone(),
                    source: alias.target.clone(),
                })
                .collect(),
        };
        // Two targets fed from one source field collide once inverted.
        mirrored.alias_map().map_err(|_| {
            MappingError::validation(
                &self.source_type,
                &self.target_type,
                "aliases cannot be inverted for the reverse mapping: a source field is used twice",
            )
        })?;
        Ok(mirrored)
    }
}

/// A set of directives declared together, sharing one visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperGroup {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub directives: Vec<MappingDirective>,
}

impl MapperGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::Public,
            directives: Vec::new(),
        }
    }

    pub fn restricted(mut self) -> Self {
        self.visibility = Visibility::Restricted;
        self
    }

    pub fn with_directive(mut self, directive: MappingDirective) -> Self {
        self.directives.push(directive);
        self
    }
}

/// `as<SimpleName>` for the given qualified type name.
pub fn operation_name(qualified_name: &str) -> String {
    format!("as{}", simple_name(qualified_name))
}
