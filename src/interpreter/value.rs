use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value that plans can be executed against.
///
/// Sum-type values are `Record`s named after their leaf variant; marker
/// variants are records without fields.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Deduplicated on construction; equality ignores order.
    Set(Vec<Value>),
    Record {
        type_name: String,
        fields: BTreeMap<String, Value>,
    },
    Constant {
        type_name: String,
        name: String,
    },
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    /// Builds a set, dropping duplicates and keeping the first occurrence.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    pub fn record<'a>(type_name: &str, fields: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Value::Record {
            type_name: type_name.to_string(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    pub fn constant(type_name: &str, name: &str) -> Self {
        Value::Constant {
            type_name: type_name.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record { fields, .. } => fields.get(name),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Record { .. } => "Record",
            Value::Constant { .. } => "Constant",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a.len() == b.len() && a.iter().all(|v| b.contains(v)),
            (
                Value::Record {
                    type_name: ta,
                    fields: fa,
                },
                Value::Record {
                    type_name: tb,
                    fields: fb,
                },
            ) => ta == tb && fa == fb,
            (
                Value::Constant {
                    type_name: ta,
                    name: na,
                },
                Value::Constant {
                    type_name: tb,
                    name: nb,
                },
            ) => ta == tb && na == nb,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Value::Set(items) => write!(f, "{{{}}}", items.iter().join(", ")),
            Value::Record { type_name, fields } => {
                let body = fields
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .join(", ");
                write!(f, "{} {{ {} }}", type_name, body)
            }
            Value::Constant { type_name, name } => write!(f, "{}.{}", type_name, name),
        }
    }
}
