//! # Utsushi - Build-Time Conversion Mapper Generation
//!
//! **Utsushi** plans conversion functions between structurally related types
//! (records, enumerations and closed sum types) ahead of time, without any
//! runtime reflection. Given a type catalog and a set of mapping directives it
//! decides, field by field and variant by variant, how each value is carried
//! over, and hands the resulting plans to a renderer.
//!
//! ## Core Workflow
//!
//! 1.  **Describe Your Types**: Provide `TypeDeclaration`s through a `TypeCatalog`
//!     (or load them from a JSON `Manifest`).
//! 2.  **Declare Directives**: Group `MappingDirective`s into `MapperGroup`s. A
//!     reversible directive also gets the mirrored conversion.
//! 3.  **Generate**: Use `Generator::builder` to configure a round and call
//!     `generate`. Problems are reported to a `DiagnosticSink`; a failing directive
//!     never stops the others.
//! 4.  **Render or Execute**: Render the `GenerationOutput` to Rust source with a
//!     `Renderer`, or run plans directly with the `PlanInterpreter`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use utsushi::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = InMemoryCatalog::from_declarations([
//!         TypeDeclaration::record(
//!             "app.Person",
//!             vec![
//!                 FieldDeclaration::new("name", TypeRef::Primitive(Primitive::String)),
//!                 FieldDeclaration::new("age", TypeRef::Primitive(Primitive::Int)),
//!             ],
//!         ),
//!         TypeDeclaration::record(
//!             "app.PersonDto",
//!             vec![
//!                 FieldDeclaration::new("fullName", TypeRef::Primitive(Primitive::String)),
//!                 FieldDeclaration::new("age", TypeRef::Primitive(Primitive::String)),
//!             ],
//!         ),
//!     ])?;
//!
//!     let group = MapperGroup::new("people").with_directive(
//!         MappingDirective::new("app.Person", "app.PersonDto")
//!             .reversible()
//!             .with_alias("fullName", "name"),
//!     );
//!
//!     let generator = Generator::builder(catalog, vec![group]).build();
//!     let mut diagnostics = Diagnostics::new();
//!     let output = generator.generate(&mut diagnostics);
//!
//!     for diagnostic in diagnostics.entries() {
//!         eprintln!("{}", diagnostic);
//!     }
//!     println!("{}", RustRenderer::new().render(&output));
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod generator;
pub mod interpreter;
pub mod manifest;
pub mod model;
pub mod plan;
pub mod prelude;
