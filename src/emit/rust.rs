use super::Renderer;
use crate::generator::{GeneratedUnit, Operation, Strategy};
use crate::model::{CollectionKind, Primitive, Visibility, simple_name};
use crate::plan::{Conversion, PlanAction, PlanEntry};
use heck::ToSnakeCase;
use itertools::Itertools;

const INDENT: &str = "    ";

/// Renders units as Rust source: one module per unit, one inherent impl
/// block per receiver type, one method per operation.
///
/// Types are referenced by absolute paths built from their qualified names:
/// leading lowercase segments become modules under `crate`, so `app.Color`
/// renders as `crate::app::Color`. Nested sum-type variants are expected as
/// sibling enums in the module of their root.
#[derive(Debug, Clone, Default)]
pub struct RustRenderer {
    header: bool,
}

impl RustRenderer {
    pub fn new() -> Self {
        Self { header: true }
    }

    /// Skips the "generated file" banner.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    fn render_operation(&self, op: &Operation) -> String {
        let visibility = match op.visibility {
            Visibility::Public => "pub ",
            Visibility::Restricted => "pub(crate) ",
        };
        let result = type_path(&op.result);
        let body = match op.plan.strategy {
            Strategy::Record => render_record(&op.plan.entries, &result, "self.", 3),
            Strategy::Enumeration => render_enumeration(op),
            Strategy::SumType => render_sum_type(op),
        };
        format!(
            "{i}{i}{vis}fn {name}(&self) -> {result} {{\n{body}{i}{i}}}\n",
            i = INDENT,
            vis = visibility,
            name = op.name.to_snake_case(),
            result = result,
            body = body,
        )
    }
}

impl Renderer for RustRenderer {
    fn render_unit(&self, unit: &GeneratedUnit) -> String {
        let mut out = String::new();
        if self.header {
            out.push_str("// @generated by utsushi. Do not edit.\n");
        }
        out.push_str(&format!(
            "/// Conversions generated for `{}`.\npub mod {} {{\n",
            unit.source_type,
            unit.name.to_snake_case(),
        ));

        // Group operations by receiver, keeping first-appearance order.
        let receivers: Vec<&str> = unit
            .operations
            .iter()
            .map(|op| op.receiver.as_str())
            .unique()
            .collect();
        for receiver in receivers {
            out.push_str(&format!("\n{}impl {} {{\n", INDENT, type_path(receiver)));
            let methods = unit
                .operations
                .iter()
                .filter(|op| op.receiver == receiver)
                .map(|op| self.render_operation(op))
                .join("\n");
            out.push_str(&methods);
            out.push_str(&format!("{}}}\n", INDENT));
        }
        out.push_str("}\n");
        out
    }
}

fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// A struct literal of `type_name` filled from the `Assign` entries.
fn render_record(entries: &[PlanEntry], type_name: &str, access: &str, depth: usize) -> String {
    format!("{}{} {}\n", pad(depth), type_name, render_fields(entries, access, depth))
}

/// The braced field list of a struct literal; the closing brace sits at `depth`.
/// `access` prefixes each source field name (`self.` or empty for pattern bindings).
fn render_fields(entries: &[PlanEntry], access: &str, depth: usize) -> String {
    let mut out = String::from("{\n");
    for entry in entries {
        let (Some(target), Some(conversion)) = (&entry.target, entry.conversion()) else {
            continue;
        };
        let input = format!("{}{}.clone()", access, entry.source);
        out.push_str(&format!(
            "{}{}: {},\n",
            pad(depth + 1),
            target,
            render_conversion(conversion, &input)
        ));
    }
    out.push_str(&format!("{}}}", pad(depth)));
    out
}

fn render_enumeration(op: &Operation) -> String {
    let source = type_path(&op.plan.source_type);
    let target = type_path(&op.plan.target_type);
    if op.plan.entries.is_empty() {
        return format!("{}match *self {{}}\n", pad(3));
    }
    let mut out = format!("{}match *self {{\n", pad(3));
    for entry in &op.plan.entries {
        let arm = match (&entry.action, &entry.target) {
            (PlanAction::Constant, Some(constant)) => format!("{}::{}", target, constant),
            _ => format!(
                "panic!(\"no mapping for constant `{}` of `{}` into `{}`\")",
                entry.source, op.plan.source_type, op.plan.target_type
            ),
        };
        out.push_str(&format!("{}{}::{} => {},\n", pad(4), source, entry.source, arm));
    }
    out.push_str(&format!("{}}}\n", pad(3)));
    out
}

fn render_sum_type(op: &Operation) -> String {
    if op.plan.entries.is_empty() {
        return format!("{}match *self {{}}\n", pad(3));
    }
    let source_module = module_path(&op.plan.source_type);
    let target_module = module_path(&op.plan.target_type);
    let mut out = format!("{}match self {{\n", pad(3));
    for entry in &op.plan.entries {
        let PlanAction::Variant {
            source_path,
            target_path,
            fields,
        } = &entry.action
        else {
            continue;
        };
        match fields {
            None => {
                out.push_str(&format!(
                    "{}{} => {},\n",
                    pad(4),
                    nest_path(&source_module, source_path, " { .. }"),
                    nest_path(&target_module, target_path, "")
                ));
            }
            Some(fields) => {
                let bindings = fields.iter().map(|f| f.source.as_str()).unique().join(", ");
                let pattern = if bindings.is_empty() {
                    nest_path(&source_module, source_path, " { .. }")
                } else {
                    nest_path(
                        &source_module,
                        source_path,
                        &format!(" {{ {}, .. }}", bindings),
                    )
                };
                let construct = nest_path(
                    &target_module,
                    target_path,
                    &format!(" {}", render_fields(fields, "", 4)),
                );
                out.push_str(&format!("{}{} => {},\n", pad(4), pattern, construct));
            }
        }
    }
    out.push_str(&format!("{}}}\n", pad(3)));
    out
}

/// Builds `m::Root::Mid(m::Mid::Leaf<suffix>)` from a root-to-leaf path,
/// every enum of the path living in `module`.
fn nest_path(module: &str, path: &[String], suffix: &str) -> String {
    match path {
        [] => String::new(),
        [only] => format!("{}::{}{}", module, only, suffix),
        [.., parent, leaf] => {
            let mut expr = format!("{}::{}::{}{}", module, parent, leaf, suffix);
            for window in path[..path.len() - 1].windows(2).rev() {
                expr = format!("{}::{}::{}({})", module, window[0], window[1], expr);
            }
            expr
        }
    }
}

/// `crate` followed by the package segments of a qualified name, the leading
/// segments that start with a lowercase letter.
fn module_path(qualified_name: &str) -> String {
    let segments: Vec<&str> = qualified_name.split('.').collect();
    let packages = segments[..segments.len().saturating_sub(1)]
        .iter()
        .take_while(|segment| segment.starts_with(|c: char| c.is_lowercase()));
    std::iter::once("crate").chain(packages.copied()).join("::")
}

/// The absolute Rust path of a declared type.
fn type_path(qualified_name: &str) -> String {
    format!("{}::{}", module_path(qualified_name), simple_name(qualified_name))
}

fn rust_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Long => "i64",
        Primitive::Int => "i32",
        Primitive::Double => "f64",
        Primitive::Float => "f32",
        Primitive::Boolean => "bool",
    }
}

/// Renders `conversion` applied to the expression `input`.
fn render_conversion(conversion: &Conversion, input: &str) -> String {
    match conversion {
        Conversion::Identity => input.to_string(),
        Conversion::Parse(primitive) => format!(
            "{}.parse::<{}>().expect(\"invalid {}\")",
            input,
            rust_primitive(*primitive),
            primitive.name()
        ),
        Conversion::Stringify(_) => format!("{}.to_string()", input),
        Conversion::Cast { to, .. } => format!("({}) as {}", input, rust_primitive(*to)),
        Conversion::Collect { element, into } => {
            let container = match into {
                CollectionKind::List => "Vec<_>",
                CollectionKind::Set => "std::collections::HashSet<_>",
            };
            format!(
                "{}.into_iter().map(|item| {}).collect::<{}>()",
                input,
                render_conversion(element, "item"),
                container
            )
        }
        Conversion::Delegate { operation, .. } => {
            format!("{}.{}()", input, operation.to_snake_case())
        }
        Conversion::ForceUnwrap(inner) => render_conversion(
            inner,
            &format!("{}.expect(\"required value is absent\")", input),
        ),
        Conversion::WrapPresent(inner) => format!("Some({})", render_conversion(inner, input)),
        Conversion::NullSafe(inner) => format!(
            "{}.map(|value| {})",
            input,
            render_conversion(inner, "value")
        ),
    }
}
