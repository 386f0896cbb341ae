use crate::model::{CollectionKind, Primitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a single value is transformed on its way from source to target.
///
/// This is the language-neutral expression IR; renderers and the plan
/// interpreter both consume it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    /// Direct assignment.
    Identity,
    /// Parse a string into the given primitive.
    Parse(Primitive),
    /// Render the given primitive as a string.
    Stringify(Primitive),
    /// Numeric widening or narrowing cast.
    Cast { from: Primitive, to: Primitive },
    /// Convert each element, then collect into the target container kind.
    Collect {
        element: Box<Conversion>,
        into: CollectionKind,
    },
    /// Call the generated conversion of a nested type.
    Delegate {
        source_type: String,
        target_type: String,
        operation: String,
    },
    /// Optional source into a required target; absent values fail at use time.
    ForceUnwrap(Box<Conversion>),
    /// Required source into an optional target.
    WrapPresent(Box<Conversion>),
    /// Optional into optional, applying the inner transform when present.
    NullSafe(Box<Conversion>),
}

impl Conversion {
    pub fn is_identity(&self) -> bool {
        matches!(self, Conversion::Identity)
    }

    /// Whether the conversion contains a `Cast` that loses range or precision.
    pub fn is_narrowing(&self) -> bool {
        match self {
            Conversion::Cast { from, to } => matches!(
                (from, to),
                (Primitive::Long, Primitive::Int) | (Primitive::Double, Primitive::Float)
            ),
            Conversion::Collect { element, .. } => element.is_narrowing(),
            Conversion::ForceUnwrap(inner)
            | Conversion::WrapPresent(inner)
            | Conversion::NullSafe(inner) => inner.is_narrowing(),
            Conversion::Identity
            | Conversion::Parse(_)
            | Conversion::Stringify(_)
            | Conversion::Delegate { .. } => false,
        }
    }

    /// Collects every `(source_type, target_type)` pair this conversion delegates to.
    pub fn collect_delegates(&self, delegates: &mut Vec<(String, String)>) {
        match self {
            Conversion::Delegate {
                source_type,
                target_type,
                ..
            } => delegates.push((source_type.clone(), target_type.clone())),
            Conversion::Collect { element, .. } => element.collect_delegates(delegates),
            Conversion::ForceUnwrap(inner)
            | Conversion::WrapPresent(inner)
            | Conversion::NullSafe(inner) => inner.collect_delegates(delegates),
            Conversion::Identity
            | Conversion::Parse(_)
            | Conversion::Stringify(_)
            | Conversion::Cast { .. } => {}
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Identity => write!(f, "identity"),
            Conversion::Parse(p) => write!(f, "parse<{}>", p.name()),
            Conversion::Stringify(p) => write!(f, "stringify<{}>", p.name()),
            Conversion::Cast { from, to } => write!(f, "cast<{} -> {}>", from.name(), to.name()),
            Conversion::Collect { element, into } => {
                write!(f, "map(each: {}) -> {}", element, into.name())
            }
            Conversion::Delegate { operation, .. } => write!(f, "{}()", operation),
            Conversion::ForceUnwrap(inner) => write!(f, "unwrap!({})", inner),
            Conversion::WrapPresent(inner) => write!(f, "present({})", inner),
            Conversion::NullSafe(inner) => write!(f, "?.{}", inner),
        }
    }
}
