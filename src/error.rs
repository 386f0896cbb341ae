use crate::interpreter::Value;
use thiserror::Error;

/// Errors raised by a type catalog lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Type '{0}' was not found in the type catalog")]
    NotFound(String),

    #[error("Type '{0}' is declared more than once in the type catalog")]
    DuplicateType(String),
}

/// Errors that abort the generation of a single directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Invalid mapping from '{source_type}' to '{target_type}': {message}")]
    ValidationError {
        source_type: String,
        target_type: String,
        message: String,
    },

    #[error(
        "Cannot map sum type '{source_type}' to '{target_type}': no variant named {} in the target hierarchy",
        .unmatched.join(", ")
    )]
    StructuralMismatch {
        source_type: String,
        target_type: String,
        unmatched: Vec<String>,
    },
}

impl MappingError {
    pub fn validation(source_type: &str, target_type: &str, message: impl Into<String>) -> Self {
        MappingError::ValidationError {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading a mapping manifest.
#[derive(Error, Debug, Clone)]
pub enum ManifestError {
    #[error("Failed to parse manifest JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to read manifest '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors that can occur while executing a plan against runtime values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(
        "Type mismatch during '{operation}': expected {expected}, but found {} value '{found}'",
        .found.kind_name()
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },

    #[error("Field '{field}' is missing from the '{type_name}' value")]
    MissingField { type_name: String, field: String },

    #[error("Required value was absent while converting to '{0}'")]
    MissingValue(String),

    #[error("Cannot parse '{input}' as {expected}")]
    ParseFailure { input: String, expected: String },

    #[error("No mapping for constant '{constant}' of '{source_type}' into '{target_type}'")]
    DeferredFailure {
        source_type: String,
        target_type: String,
        constant: String,
    },

    #[error("No plan converts '{source_type}' into '{target_type}'")]
    MissingPlan {
        source_type: String,
        target_type: String,
    },

    #[error("Value of type '{found}' is not covered by the plan from '{source_type}'")]
    UnknownVariant { source_type: String, found: String },
}

/// Errors that can occur while persisting or loading generation artifacts.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact error: {0}")]
    Generic(String),
}

/// Failures while planning one directive, split by how far they propagate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Aborts the directive; the round continues.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Aborts the whole round, which then yields an empty output.
    #[error("Internal generation failure: {0}")]
    Internal(#[from] CatalogError),
}
