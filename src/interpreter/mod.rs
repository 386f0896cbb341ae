use crate::error::EvaluationError;
use crate::generator::{GenerationOutput, Strategy};
use crate::model::{CollectionKind, Primitive};
use crate::plan::{Conversion, ConversionPlan, PlanAction, PlanEntry};
use ahash::AHashMap;
use std::collections::BTreeMap;

mod value;

pub use value::Value;

/// Executes conversion plans against dynamic values.
///
/// Nested delegations are resolved against the other plans of the same
/// generation output, the way generated operations call each other.
pub struct PlanInterpreter<'a> {
    plans: AHashMap<(String, String), &'a ConversionPlan>,
}

impl<'a> PlanInterpreter<'a> {
    pub fn new(output: &'a GenerationOutput) -> Self {
        let plans = output
            .operations()
            .map(|op| {
                (
                    (op.plan.source_type.clone(), op.plan.target_type.clone()),
                    &op.plan,
                )
            })
            .collect();
        Self { plans }
    }

    /// Converts `value` of `source_type` into `target_type` using the matching plan.
    pub fn convert(
        &self,
        source_type: &str,
        target_type: &str,
        value: &Value,
    ) -> Result<Value, EvaluationError> {
        let plan = self
            .plans
            .get(&(source_type.to_string(), target_type.to_string()))
            .ok_or_else(|| EvaluationError::MissingPlan {
                source_type: source_type.to_string(),
                target_type: target_type.to_string(),
            })?;
        self.apply(plan, value)
    }

    /// Runs a single plan against a value.
    pub fn apply(&self, plan: &ConversionPlan, value: &Value) -> Result<Value, EvaluationError> {
        match plan.strategy {
            Strategy::Record => {
                let fields = self.apply_fields(&plan.entries, value, &plan.source_type)?;
                Ok(Value::Record {
                    type_name: plan.target_type.clone(),
                    fields,
                })
            }
            Strategy::Enumeration => self.apply_constant(plan, value),
            Strategy::SumType => self.apply_variant(plan, value),
        }
    }

    fn apply_fields(
        &self,
        entries: &[PlanEntry],
        value: &Value,
        source_type: &str,
    ) -> Result<BTreeMap<String, Value>, EvaluationError> {
        if !matches!(value, Value::Record { .. }) {
            return Err(type_mismatch(source_type, "Record", value));
        }
        let mut fields = BTreeMap::new();
        for entry in entries {
            let (Some(target), PlanAction::Assign(conversion)) = (&entry.target, &entry.action)
            else {
                continue;
            };
            let source_value =
                value
                    .field(&entry.source)
                    .ok_or_else(|| EvaluationError::MissingField {
                        type_name: source_type.to_string(),
                        field: entry.source.clone(),
                    })?;
            fields.insert(target.clone(), self.apply_conversion(conversion, source_value, target)?);
        }
        Ok(fields)
    }

    fn apply_constant(&self, plan: &ConversionPlan, value: &Value) -> Result<Value, EvaluationError> {
        let Value::Constant { name, .. } = value else {
            return Err(type_mismatch(&plan.source_type, "Constant", value));
        };
        let entry = plan
            .entries
            .iter()
            .find(|e| &e.source == name)
            .ok_or_else(|| EvaluationError::UnknownVariant {
                source_type: plan.source_type.clone(),
                found: name.clone(),
            })?;
        match (&entry.action, &entry.target) {
            (PlanAction::Constant, Some(target)) => Ok(Value::constant(&plan.target_type, target)),
            _ => Err(EvaluationError::DeferredFailure {
                source_type: plan.source_type.clone(),
                target_type: plan.target_type.clone(),
                constant: name.clone(),
            }),
        }
    }

    fn apply_variant(&self, plan: &ConversionPlan, value: &Value) -> Result<Value, EvaluationError> {
        let Value::Record { type_name, .. } = value else {
            return Err(type_mismatch(&plan.source_type, "Record", value));
        };
        let entry = plan
            .entries
            .iter()
            .find(|e| &e.source == type_name)
            .ok_or_else(|| EvaluationError::UnknownVariant {
                source_type: plan.source_type.clone(),
                found: type_name.clone(),
            })?;
        let (Some(target), PlanAction::Variant { fields, .. }) = (&entry.target, &entry.action)
        else {
            return Err(type_mismatch(&plan.source_type, "variant entry", value));
        };
        let fields = match fields {
            Some(entries) => self.apply_fields(entries, value, type_name)?,
            None => BTreeMap::new(),
        };
        Ok(Value::Record {
            type_name: target.clone(),
            fields,
        })
    }

    fn apply_conversion(
        &self,
        conversion: &Conversion,
        value: &Value,
        target: &str,
    ) -> Result<Value, EvaluationError> {
        match conversion {
            Conversion::Identity => Ok(value.clone()),
            Conversion::Parse(primitive) => parse_primitive(*primitive, value),
            Conversion::Stringify(primitive) => stringify_primitive(*primitive, value),
            Conversion::Cast { from, to } => cast_primitive(*from, *to, value),
            Conversion::Collect { element, into } => {
                let items = match value {
                    Value::List(items) | Value::Set(items) => items,
                    other => return Err(type_mismatch("collect", "List or Set", other)),
                };
                let converted = items
                    .iter()
                    .map(|item| self.apply_conversion(element, item, target))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match into {
                    CollectionKind::List => Value::List(converted),
                    CollectionKind::Set => Value::set(converted),
                })
            }
            Conversion::Delegate {
                source_type,
                target_type,
                ..
            } => self.convert(source_type, target_type, value),
            Conversion::ForceUnwrap(inner) => {
                if value.is_null() {
                    return Err(EvaluationError::MissingValue(target.to_string()));
                }
                self.apply_conversion(inner, value, target)
            }
            Conversion::WrapPresent(inner) => self.apply_conversion(inner, value, target),
            Conversion::NullSafe(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.apply_conversion(inner, value, target)
                }
            }
        }
    }
}

fn type_mismatch(operation: &str, expected: &str, found: &Value) -> EvaluationError {
    EvaluationError::TypeMismatch {
        operation: operation.to_string(),
        expected: expected.to_string(),
        found: found.clone(),
    }
}

fn parse_primitive(primitive: Primitive, value: &Value) -> Result<Value, EvaluationError> {
    let Value::Str(input) = value else {
        return Err(type_mismatch("parse", "String", value));
    };
    let failure = || EvaluationError::ParseFailure {
        input: input.clone(),
        expected: primitive.name().to_string(),
    };
    let text = input.trim();
    match primitive {
        Primitive::Long => text.parse::<i64>().map(Value::Int).map_err(|_| failure()),
        Primitive::Int => text
            .parse::<i32>()
            .map(|i| Value::Int(i64::from(i)))
            .map_err(|_| failure()),
        Primitive::Double => text.parse::<f64>().map(Value::Float).map_err(|_| failure()),
        Primitive::Float => text
            .parse::<f32>()
            .map(|f| Value::Float(f64::from(f)))
            .map_err(|_| failure()),
        Primitive::Boolean => text.parse::<bool>().map(Value::Bool).map_err(|_| failure()),
        Primitive::String => Ok(value.clone()),
    }
}

fn stringify_primitive(primitive: Primitive, value: &Value) -> Result<Value, EvaluationError> {
    match (primitive, value) {
        (Primitive::Long | Primitive::Int, Value::Int(i)) => Ok(Value::Str(i.to_string())),
        (Primitive::Double | Primitive::Float, Value::Float(n)) => Ok(Value::Str(n.to_string())),
        (Primitive::Boolean, Value::Bool(b)) => Ok(Value::Str(b.to_string())),
        (Primitive::String, Value::Str(_)) => Ok(value.clone()),
        (_, other) => Err(type_mismatch("stringify", primitive.name(), other)),
    }
}

fn cast_primitive(from: Primitive, to: Primitive, value: &Value) -> Result<Value, EvaluationError> {
    match (to, value) {
        (Primitive::Long, Value::Int(i)) => Ok(Value::Int(*i)),
        (Primitive::Int, Value::Int(i)) => Ok(Value::Int(i64::from(*i as i32))),
        (Primitive::Double, Value::Float(n)) => Ok(Value::Float(*n)),
        (Primitive::Float, Value::Float(n)) => Ok(Value::Float(f64::from(*n as f32))),
        (_, other) => Err(type_mismatch("cast", from.name(), other)),
    }
}
