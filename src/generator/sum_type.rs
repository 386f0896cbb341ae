use super::record::{RecordBuilder, RecordScope};
use crate::diagnostics::DiagnosticSink;
use crate::error::MappingError;
use crate::model::TypeDeclaration;
use crate::plan::{PlanAction, PlanEntry};
use std::collections::BTreeMap;

/// A leaf variant together with the simple names leading to it from the root.
#[derive(Debug, Clone)]
pub struct Leaf<'a> {
    pub path: Vec<String>,
    pub declaration: &'a TypeDeclaration,
}

impl Leaf<'_> {
    pub fn simple_name(&self) -> &str {
        self.declaration.simple_name()
    }
}

/// Flattens a sum-type hierarchy into its leaves, depth first, in declaration order.
pub fn flatten_leaves(root: &TypeDeclaration) -> Vec<Leaf<'_>> {
    let mut leaves = Vec::new();
    let mut path = vec![root.simple_name().to_string()];
    collect_leaves(root, &mut path, &mut leaves);
    leaves
}

fn collect_leaves<'a>(node: &'a TypeDeclaration, path: &mut Vec<String>, leaves: &mut Vec<Leaf<'a>>) {
    for variant in &node.variants {
        path.push(variant.simple_name().to_string());
        if variant.is_leaf() {
            leaves.push(Leaf {
                path: path.clone(),
                declaration: variant,
            });
        } else {
            collect_leaves(variant, path, leaves);
        }
        path.pop();
    }
}

/// Finds a leaf anywhere in the hierarchy by simple name; the first one in
/// depth-first order wins.
pub fn find_leaf<'a, 'b>(leaves: &'b [Leaf<'a>], name: &str) -> Option<&'b Leaf<'a>> {
    leaves.iter().find(|leaf| leaf.simple_name() == name)
}

/// Builds the variant-to-variant entries, or fails naming every unmatched source leaf.
pub(super) fn build_sum_type_entries(
    records: &RecordBuilder<'_>,
    source: &TypeDeclaration,
    target: &TypeDeclaration,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PlanEntry>, MappingError> {
    let source_leaves = flatten_leaves(source);
    let target_leaves = flatten_leaves(target);

    let unmatched: Vec<String> = source_leaves
        .iter()
        .filter(|leaf| find_leaf(&target_leaves, leaf.simple_name()).is_none())
        .map(|leaf| leaf.simple_name().to_string())
        .collect();
    if !unmatched.is_empty() {
        return Err(MappingError::StructuralMismatch {
            source_type: source.qualified_name.clone(),
            target_type: target.qualified_name.clone(),
            unmatched,
        });
    }

    let no_aliases = BTreeMap::new();
    let mut entries = Vec::with_capacity(source_leaves.len());
    for source_leaf in &source_leaves {
        let Some(target_leaf) = find_leaf(&target_leaves, source_leaf.simple_name()) else {
            continue;
        };
        // A field-less target is built by direct reference; anything else goes
        // through the record rules so the missing-field policy applies.
        let fields = if target_leaf.declaration.fields.is_empty() {
            None
        } else {
            let scope = RecordScope {
                source_type: &source_leaf.declaration.qualified_name,
                target_type: &target_leaf.declaration.qualified_name,
            };
            Some(records.build(
                &scope,
                &source_leaf.declaration.fields,
                &target_leaf.declaration.fields,
                &no_aliases,
                sink,
            )?)
        };
        entries.push(PlanEntry {
            target: Some(target_leaf.declaration.qualified_name.clone()),
            source: source_leaf.declaration.qualified_name.clone(),
            action: PlanAction::Variant {
                source_path: source_leaf.path.clone(),
                target_path: target_leaf.path.clone(),
                fields,
            },
        });
    }
    Ok(entries)
}
