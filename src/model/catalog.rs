use super::TypeDeclaration;
use crate::error::CatalogError;
use ahash::AHashMap;

/// Lookup of type declarations by qualified name.
///
/// This is the seam to whatever host discovers types; the engine never
/// inspects program source itself.
pub trait TypeCatalog {
    fn resolve(&self, qualified_name: &str) -> Result<&TypeDeclaration, CatalogError>;
}

/// A catalog backed by an in-memory table of declarations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    types: AHashMap<String, TypeDeclaration>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting a qualified name declared twice.
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = TypeDeclaration>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for declaration in declarations {
            catalog.insert(declaration)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, declaration: TypeDeclaration) -> Result<(), CatalogError> {
        if self.types.contains_key(&declaration.qualified_name) {
            return Err(CatalogError::DuplicateType(declaration.qualified_name));
        }
        self.types
            .insert(declaration.qualified_name.clone(), declaration);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for InMemoryCatalog {
    fn resolve(&self, qualified_name: &str) -> Result<&TypeDeclaration, CatalogError> {
        self.types
            .get(qualified_name)
            .ok_or_else(|| CatalogError::NotFound(qualified_name.to_string()))
    }
}
