use crate::model::{TypeDeclaration, TypeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The generation strategy picked for a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Record,
    Enumeration,
    SumType,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Record => write!(f, "record"),
            Strategy::Enumeration => write!(f, "enumeration"),
            Strategy::SumType => write!(f, "sum type"),
        }
    }
}

/// Picks the builder for a pair of types by their shape.
///
/// Shape mismatches are not rejected: they fall through to the record
/// strategy, which maps whatever fields happen to line up.
pub fn select_strategy(source: &TypeDeclaration, target: &TypeDeclaration) -> Strategy {
    match (source.kind, target.kind) {
        (TypeKind::Enumeration, TypeKind::Enumeration) => Strategy::Enumeration,
        (TypeKind::SumType, TypeKind::SumType) => Strategy::SumType,
        (TypeKind::Record, _)
        | (TypeKind::Enumeration, _)
        | (TypeKind::SumType, _) => Strategy::Record,
    }
}
