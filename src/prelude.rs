//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the utsushi crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use utsushi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let manifest = Manifest::from_file("path/to/mappers.json")?;
//! let generator = manifest.into_generator()?;
//!
//! let mut diagnostics = Diagnostics::new();
//! let output = generator.generate(&mut diagnostics);
//! println!("{}", PlanTreeRenderer.render(&output));
//! # Ok(())
//! # }
//! ```

// Generation
pub use crate::generator::{
    Direction, GeneratedUnit, GenerationOutput, Generator, GeneratorBuilder, GeneratorOptions,
    MissingFieldPolicy, Operation, Strategy,
};
pub use crate::manifest::Manifest;

// Type model
pub use crate::model::{
    CollectionKind, FieldAlias, FieldDeclaration, InMemoryCatalog, MapperGroup, MappingDirective,
    Primitive, TypeCatalog, TypeDeclaration, TypeKind, TypeRef, Visibility,
};

// Plans
pub use crate::plan::{Conversion, ConversionPlan, DisplayPlan, PlanAction, PlanEntry};

// Diagnostics and errors
pub use crate::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity};
pub use crate::error::{
    ArtifactError, CatalogError, EvaluationError, GenerationError, ManifestError, MappingError,
};

// Output
pub use crate::artifact::GenerationArtifact;
pub use crate::emit::{PlanTreeRenderer, RenderChoice, Renderer, RustRenderer};
pub use crate::interpreter::{PlanInterpreter, Value};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
