use crate::model::{FieldDeclaration, Primitive, TypeRef, operation_name};
use crate::plan::Conversion;

/// Resolves the conversion expression between two type references.
///
/// Rules are tried in order and the first match wins:
/// identity, the primitive table, collections, nested delegation and
/// finally a best-effort direct assignment. Nullability is applied on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionResolver;

impl ConversionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolves a field-to-field conversion, including nullability adaptation.
    pub fn resolve_field(&self, source: &FieldDeclaration, target: &FieldDeclaration) -> Conversion {
        let inner = self.resolve(&source.type_ref, &target.type_ref);
        Self::adapt_nullability(inner, source.nullable, target.nullable)
    }

    /// Resolves the conversion between two non-null type references.
    pub fn resolve(&self, source: &TypeRef, target: &TypeRef) -> Conversion {
        if source == target {
            return Conversion::Identity;
        }

        if let (TypeRef::Primitive(from), TypeRef::Primitive(to)) = (source, target) {
            if let Some(conversion) = primitive_conversion(*from, *to) {
                return conversion;
            }
        }

        if let (
            TypeRef::Collection {
                kind: source_kind,
                element: source_element,
            },
            TypeRef::Collection {
                kind: target_kind,
                element: target_element,
            },
        ) = (source, target)
        {
            let element = self.resolve(source_element, target_element);
            if !element.is_identity() || source_kind != target_kind {
                return Conversion::Collect {
                    element: Box::new(element),
                    into: *target_kind,
                };
            }
            return Conversion::Identity;
        }

        if let (TypeRef::Named(source_type), TypeRef::Named(target_type)) = (source, target) {
            return Conversion::Delegate {
                source_type: source_type.clone(),
                target_type: target_type.clone(),
                operation: operation_name(target_type),
            };
        }

        // No rule matched; the assignment may not type-check downstream.
        tracing::debug!(%source, %target, "no conversion rule matched, assigning directly");
        Conversion::Identity
    }

    fn adapt_nullability(inner: Conversion, source_nullable: bool, target_nullable: bool) -> Conversion {
        match (source_nullable, target_nullable) {
            (false, false) => inner,
            (true, false) => Conversion::ForceUnwrap(Box::new(inner)),
            (false, true) => Conversion::WrapPresent(Box::new(inner)),
            (true, true) if inner.is_identity() => Conversion::Identity,
            (true, true) => Conversion::NullSafe(Box::new(inner)),
        }
    }
}

/// The explicit primitive coercion table.
fn primitive_conversion(from: Primitive, to: Primitive) -> Option<Conversion> {
    use Primitive::*;
    match (from, to) {
        (String, Long | Int | Double | Float | Boolean) => Some(Conversion::Parse(to)),
        (Long | Int | Double | Float | Boolean, String) => Some(Conversion::Stringify(from)),
        (Int, Long) | (Float, Double) | (Long, Int) | (Double, Float) => {
            Some(Conversion::Cast { from, to })
        }
        _ => None,
    }
}
