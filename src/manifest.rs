//! The plain-data input of a generation round.
//!
//! A manifest carries the type catalog and the directive groups that a
//! discovery step produced, so the engine never needs to inspect annotations.
//!
//! ```json
//! {
//!   "options": { "missing_field_policy": "reject" },
//!   "types": [
//!     { "qualified_name": "app.Person", "kind": "record",
//!       "fields": [{ "name": "age", "type": "Int" }] },
//!     { "qualified_name": "app.PersonDto", "kind": "record",
//!       "fields": [{ "name": "age", "type": "String" }] }
//!   ],
//!   "groups": [
//!     { "name": "people", "directives": [
//!       { "source": "app.Person", "target": "app.PersonDto", "reversible": true }
//!     ] }
//!   ]
//! }
//! ```

use crate::error::ManifestError;
use crate::generator::{Generator, GeneratorOptions};
use crate::model::{InMemoryCatalog, MapperGroup, TypeDeclaration};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub options: GeneratorOptions,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    #[serde(default)]
    pub groups: Vec<MapperGroup>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::JsonParseError(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, ManifestError> {
        let json = fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn directive_count(&self) -> usize {
        self.groups.iter().map(|g| g.directives.len()).sum()
    }

    /// Builds the catalog and a generator configured with the manifest's options.
    pub fn into_generator(self) -> Result<Generator<InMemoryCatalog>, ManifestError> {
        let catalog = InMemoryCatalog::from_declarations(self.types)?;
        Ok(Generator::builder(catalog, self.groups)
            .with_options(self.options)
            .build())
    }
}
