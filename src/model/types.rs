use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The shape of a declared type, which decides the mapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A product type with a fixed, named field list.
    Record,
    /// A closed set of named constants without data.
    Enumeration,
    /// A closed hierarchy of variants, each a marker or a record.
    SumType,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Record => write!(f, "record"),
            TypeKind::Enumeration => write!(f, "enumeration"),
            TypeKind::SumType => write!(f, "sum type"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

/// Primitive types known to the conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Primitive {
    String,
    Long,
    Int,
    Double,
    Float,
    Boolean,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Long => "Long",
            Primitive::Int => "Int",
            Primitive::Double => "Double",
            Primitive::Float => "Float",
            Primitive::Boolean => "Boolean",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Primitive::String),
            "Long" => Some(Primitive::Long),
            "Int" => Some(Primitive::Int),
            "Double" => Some(Primitive::Double),
            "Float" => Some(Primitive::Float),
            "Boolean" => Some(Primitive::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Ordered, duplicates allowed.
    List,
    /// Unordered, no duplicates.
    Set,
}

impl CollectionKind {
    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::List => "List",
            CollectionKind::Set => "Set",
        }
    }
}

/// A reference to the type of a field.
///
/// In manifests a type reference is written as a string: `Int`, `List<String>`,
/// `Set<com.example.Tag>` or a qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    Collection {
        kind: CollectionKind,
        element: Box<TypeRef>,
    },
    Named(String),
}

impl TypeRef {
    pub fn list(element: TypeRef) -> Self {
        TypeRef::Collection {
            kind: CollectionKind::List,
            element: Box::new(element),
        }
    }

    pub fn set(element: TypeRef) -> Self {
        TypeRef::Collection {
            kind: CollectionKind::Set,
            element: Box::new(element),
        }
    }

    pub fn named(name: &str) -> Self {
        TypeRef::Named(name.to_string())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p.name()),
            TypeRef::Collection { kind, element } => write!(f, "{}<{}>", kind.name(), element),
            TypeRef::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty type reference".to_string());
        }
        if let Some(primitive) = Primitive::from_name(s) {
            return Ok(TypeRef::Primitive(primitive));
        }
        for kind in [CollectionKind::List, CollectionKind::Set] {
            if let Some(inner) = s
                .strip_prefix(kind.name())
                .and_then(|rest| rest.strip_prefix('<'))
                .and_then(|rest| rest.strip_suffix('>'))
            {
                return Ok(TypeRef::Collection {
                    kind,
                    element: Box::new(inner.parse()?),
                });
            }
        }
        if s.contains(['<', '>', ',', ' ']) {
            return Err(format!("unsupported type reference '{}'", s));
        }
        Ok(TypeRef::Named(s.to_string()))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// A single named field of a record (or of a record-shaped variant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub nullable: bool,
    /// The field may be left out when constructing the type.
    #[serde(default)]
    pub has_default: bool,
}

impl FieldDeclaration {
    pub fn new(name: &str, type_ref: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            type_ref,
            nullable: false,
            has_default: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Whether the field must be supplied when constructing its owner.
    pub fn is_mandatory(&self) -> bool {
        !self.nullable && !self.has_default
    }
}

/// The read-only description of a type taken from the type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub qualified_name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub variants: Vec<TypeDeclaration>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl TypeDeclaration {
    pub fn record(qualified_name: &str, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            kind: TypeKind::Record,
            fields,
            constants: Vec::new(),
            variants: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    pub fn enumeration(qualified_name: &str, constants: &[&str]) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            kind: TypeKind::Enumeration,
            fields: Vec::new(),
            constants: constants.iter().map(|c| c.to_string()).collect(),
            variants: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    pub fn sum_type(qualified_name: &str, variants: Vec<TypeDeclaration>) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            kind: TypeKind::SumType,
            fields: Vec::new(),
            constants: Vec::new(),
            variants,
            visibility: Visibility::Public,
        }
    }

    /// A marker variant: no fields, no nested variants.
    pub fn marker(qualified_name: &str) -> Self {
        Self::record(qualified_name, Vec::new())
    }

    pub fn restricted(mut self) -> Self {
        self.visibility = Visibility::Restricted;
        self
    }

    /// The last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.iter().any(|c| c == name)
    }

    /// A variant is a leaf when it has no nested variants.
    pub fn is_leaf(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Returns the last `.`-separated segment of a qualified name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}
