pub mod conversion;
pub mod display;

pub use conversion::*;
pub use display::*;

use crate::generator::Strategy;
use serde::{Deserialize, Serialize};

/// What a single plan entry does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanAction {
    /// Assign the source field to the target field through a conversion.
    Assign(Conversion),
    /// Map an enumeration constant onto the target constant of the same name.
    Constant,
    /// The source constant has no counterpart; reaching it at use time is an error.
    DeferredFailure,
    /// Map a sum-type leaf onto a target leaf.
    ///
    /// Paths hold the simple names from the hierarchy root down to the leaf.
    /// `fields` is `None` when the target leaf is a marker, which is built by
    /// direct reference.
    Variant {
        source_path: Vec<String>,
        target_path: Vec<String>,
        fields: Option<Vec<PlanEntry>>,
    },
}

/// One assignment instruction of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Target field, constant or leaf. `None` for a deferred failure, which has no target.
    pub target: Option<String>,
    pub source: String,
    pub action: PlanAction,
}

impl PlanEntry {
    pub fn assign(target: &str, source: &str, conversion: Conversion) -> Self {
        Self {
            target: Some(target.to_string()),
            source: source.to_string(),
            action: PlanAction::Assign(conversion),
        }
    }

    /// The conversion of an `Assign` entry.
    pub fn conversion(&self) -> Option<&Conversion> {
        match &self.action {
            PlanAction::Assign(conversion) => Some(conversion),
            _ => None,
        }
    }

    fn collect_delegates(&self, delegates: &mut Vec<(String, String)>) {
        match &self.action {
            PlanAction::Assign(conversion) => conversion.collect_delegates(delegates),
            PlanAction::Variant {
                fields: Some(fields),
                ..
            } => fields
                .iter()
                .for_each(|entry| entry.collect_delegates(delegates)),
            _ => {}
        }
    }
}

/// The resolved, ordered assignment instructions for one directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionPlan {
    pub source_type: String,
    pub target_type: String,
    pub strategy: Strategy,
    pub entries: Vec<PlanEntry>,
}

impl ConversionPlan {
    pub fn new(source_type: &str, target_type: &str, strategy: Strategy) -> Self {
        Self {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            strategy,
            entries: Vec::new(),
        }
    }

    pub fn entry_for(&self, target: &str) -> Option<&PlanEntry> {
        self.entries
            .iter()
            .find(|e| e.target.as_deref() == Some(target))
    }

    /// Every nested conversion this plan delegates to, in entry order.
    pub fn delegates(&self) -> Vec<(String, String)> {
        let mut delegates = Vec::new();
        for entry in &self.entries {
            entry.collect_delegates(&mut delegates);
        }
        delegates
    }
}
