//! Tests for the record, enumeration and sum-type plan builders.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use utsushi::generator::sum_type::{find_leaf, flatten_leaves};
use utsushi::prelude::*;

#[test]
fn test_identical_records_assign_every_field_directly() {
    let source = TypeDeclaration::record(
        "app.Point",
        vec![
            FieldDeclaration::new("x", int()),
            FieldDeclaration::new("y", int()),
        ],
    );
    let target = TypeDeclaration::record(
        "dto.Point",
        vec![
            FieldDeclaration::new("x", int()),
            FieldDeclaration::new("y", int()),
        ],
    );
    let (output, diagnostics) = run(
        vec![source, target],
        vec![MappingDirective::new("app.Point", "dto.Point")],
    );

    assert!(diagnostics.is_empty());
    let plan = output.plan("app.Point", "dto.Point").expect("plan should exist");
    assert_eq!(plan.strategy, Strategy::Record);
    assert_eq!(
        plan.entries,
        vec![
            PlanEntry::assign("x", "x", Conversion::Identity),
            PlanEntry::assign("y", "y", Conversion::Identity),
        ]
    );
}

#[test]
fn test_record_entries_follow_target_order_and_aliases() {
    let (output, diagnostics) = run(
        vec![person(), person_dto()],
        vec![MappingDirective::new("app.Person", "app.PersonDto").with_alias("fullName", "name")],
    );

    assert!(!diagnostics.has_errors());
    let plan = output.plan("app.Person", "app.PersonDto").unwrap();
    assert_eq!(
        plan.entries,
        vec![
            PlanEntry::assign("fullName", "name", Conversion::Identity),
            PlanEntry::assign("age", "age", Conversion::Stringify(Primitive::Int)),
            PlanEntry::assign("nickname", "nickname", Conversion::Identity),
        ]
    );
}

#[test]
fn test_missing_mandatory_field_is_rejected_by_default() {
    // Without the alias, `fullName` has no source.
    let (output, diagnostics) = run(
        vec![person(), person_dto()],
        vec![MappingDirective::new("app.Person", "app.PersonDto")],
    );

    assert!(output.is_empty());
    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("required target fields have no source: fullName"));
    assert_eq!(errors[0].related_type, "app.Person");
}

#[test]
fn test_omit_policy_drops_unfed_fields_silently() {
    let group = MapperGroup::new("test")
        .with_directive(MappingDirective::new("app.Person", "app.PersonDto"));
    let generator = Generator::builder(catalog(vec![person(), person_dto()]), vec![group])
        .with_missing_field_policy(MissingFieldPolicy::Omit)
        .build();
    let mut diagnostics = Diagnostics::new();
    let output = generator.generate(&mut diagnostics);

    assert!(diagnostics.is_empty());
    let plan = output.plan("app.Person", "app.PersonDto").unwrap();
    assert!(plan.entry_for("fullName").is_none());
    assert_eq!(plan.entries.len(), 2);
}

#[test]
fn test_nullable_and_defaulted_fields_may_stay_unfed() {
    let source = TypeDeclaration::record("app.Tag", vec![FieldDeclaration::new("label", string())]);
    let target = TypeDeclaration::record(
        "dto.Tag",
        vec![
            FieldDeclaration::new("label", string()),
            FieldDeclaration::new("color", string()).nullable(),
            FieldDeclaration::new("weight", int()).with_default(),
        ],
    );
    let (output, diagnostics) = run(
        vec![source, target],
        vec![MappingDirective::new("app.Tag", "dto.Tag")],
    );

    assert!(diagnostics.is_empty());
    assert_eq!(output.plan("app.Tag", "dto.Tag").unwrap().entries.len(), 1);
}

#[test]
fn test_alias_for_unknown_target_field_warns() {
    let (output, diagnostics) = run(
        vec![person(), person_dto()],
        vec![
            MappingDirective::new("app.Person", "app.PersonDto")
                .with_alias("fullName", "name")
                .with_alias("surname", "name"),
        ],
    );

    assert!(!output.is_empty());
    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("'surname'"));
}

#[test]
fn test_enumeration_with_unmatched_constant_defers_failure() {
    let (output, diagnostics) = run(
        vec![color(), color_dto()],
        vec![MappingDirective::new("app.Color", "dto.Color")],
    );

    let plan = output.plan("app.Color", "dto.Color").unwrap();
    assert_eq!(plan.strategy, Strategy::Enumeration);
    assert_eq!(plan.entries.len(), 3);
    assert_eq!(plan.entries[0].target.as_deref(), Some("RED"));
    assert_eq!(plan.entries[0].action, PlanAction::Constant);
    assert_eq!(plan.entries[1].target.as_deref(), Some("GREEN"));
    assert_eq!(plan.entries[2].target, None);
    assert_eq!(plan.entries[2].source, "BLUE");
    assert_eq!(plan.entries[2].action, PlanAction::DeferredFailure);

    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("'BLUE'"));
    assert_eq!(warnings[0].related_type, "app.Color");
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_flatten_leaves_walks_nested_hierarchies() {
    let shape = shape();
    let leaves = flatten_leaves(&shape);
    let names: Vec<&str> = leaves.iter().map(|leaf| leaf.simple_name()).collect();
    assert_eq!(names, vec!["Circle", "Square", "Triangle", "Empty"]);

    let square = find_leaf(&leaves, "Square").unwrap();
    assert_eq!(square.path, vec!["Shape", "Polygon", "Square"]);
    assert!(find_leaf(&leaves, "Polygon").is_none());
}

#[test]
fn test_sum_type_maps_leaves_across_different_nesting() {
    let (output, diagnostics) = run(
        vec![shape(), shape_dto()],
        vec![MappingDirective::new("app.Shape", "dto.Shape")],
    );

    assert!(diagnostics.is_empty());
    let plan = output.plan("app.Shape", "dto.Shape").unwrap();
    assert_eq!(plan.strategy, Strategy::SumType);
    assert_eq!(plan.entries.len(), 4);

    let square = plan.entry_for("dto.Shape.Square").unwrap();
    assert_eq!(square.source, "app.Shape.Polygon.Square");
    assert_eq!(
        square.action,
        PlanAction::Variant {
            source_path: vec!["Shape".into(), "Polygon".into(), "Square".into()],
            target_path: vec!["Shape".into(), "Square".into()],
            fields: Some(vec![PlanEntry::assign(
                "side",
                "side",
                Conversion::Cast {
                    from: Primitive::Int,
                    to: Primitive::Long
                }
            )]),
        }
    );

    let triangle = plan.entry_for("dto.Shape.Triangle").unwrap();
    assert!(matches!(triangle.action, PlanAction::Variant { fields: None, .. }));
}

#[test]
fn test_sum_type_with_unmatched_leaf_fails_structurally() {
    let source = TypeDeclaration::sum_type(
        "app.Letter",
        vec![
            TypeDeclaration::marker("app.Letter.X"),
            TypeDeclaration::marker("app.Letter.Y"),
            TypeDeclaration::marker("app.Letter.Z"),
        ],
    );
    let target = TypeDeclaration::sum_type(
        "dto.Letter",
        vec![
            TypeDeclaration::marker("dto.Letter.X"),
            TypeDeclaration::marker("dto.Letter.Y"),
        ],
    );
    let (output, diagnostics) = run(
        vec![source, target],
        vec![MappingDirective::new("app.Letter", "dto.Letter")],
    );

    assert!(output.unit("app.Letter").is_none());
    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("no variant named Z"));
    assert_eq!(errors[0].related_type, "app.Letter");
}

#[test]
fn test_mismatched_shapes_fall_back_to_record_strategy() {
    let source = TypeDeclaration::record("app.Holder", vec![]);
    let (output, diagnostics) = run(
        vec![source, color_dto()],
        vec![MappingDirective::new("app.Holder", "dto.Color")],
    );

    assert!(diagnostics.is_empty());
    let plan = output.plan("app.Holder", "dto.Color").unwrap();
    assert_eq!(plan.strategy, Strategy::Record);
    assert!(plan.entries.is_empty());
}

fn letter_with_marker() -> TypeDeclaration {
    TypeDeclaration::sum_type("app.L", vec![TypeDeclaration::marker("app.L.X")])
}

fn letter_with_field() -> TypeDeclaration {
    TypeDeclaration::sum_type(
        "dto.L",
        vec![TypeDeclaration::record(
            "dto.L.X",
            vec![FieldDeclaration::new("n", int())],
        )],
    )
}

#[test]
fn test_marker_leaf_into_leaf_with_required_fields_is_rejected() {
    let (output, diagnostics) = run(
        vec![letter_with_marker(), letter_with_field()],
        vec![MappingDirective::new("app.L", "dto.L")],
    );

    assert!(output.is_empty());
    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("required target fields have no source: n"));
    assert_eq!(errors[0].related_type, "app.L.X");
}

#[test]
fn test_marker_leaf_into_leaf_with_fields_under_omit_builds_fields() {
    let group = MapperGroup::new("test").with_directive(MappingDirective::new("app.L", "dto.L"));
    let generator = Generator::builder(
        catalog(vec![letter_with_marker(), letter_with_field()]),
        vec![group],
    )
    .with_missing_field_policy(MissingFieldPolicy::Omit)
    .build();
    let output = generator.generate(&mut Diagnostics::new());

    let plan = output.plan("app.L", "dto.L").unwrap();
    assert!(matches!(
        &plan.entries[0].action,
        PlanAction::Variant { fields: Some(fields), .. } if fields.is_empty()
    ));
}

#[test]
fn test_leaf_with_fields_into_marker_maps_by_reference() {
    let (output, diagnostics) = run(
        vec![
            TypeDeclaration::sum_type(
                "app.L",
                vec![TypeDeclaration::record(
                    "app.L.X",
                    vec![FieldDeclaration::new("n", int())],
                )],
            ),
            TypeDeclaration::sum_type("dto.L", vec![TypeDeclaration::marker("dto.L.X")]),
        ],
        vec![MappingDirective::new("app.L", "dto.L")],
    );

    assert!(diagnostics.is_empty());
    let plan = output.plan("app.L", "dto.L").unwrap();
    assert!(matches!(
        plan.entries[0].action,
        PlanAction::Variant { fields: None, .. }
    ));
}

#[test]
fn test_aliases_on_sum_type_directive_warn() {
    let (output, diagnostics) = run(
        vec![shape(), shape_dto()],
        vec![MappingDirective::new("app.Shape", "dto.Shape").with_alias("side", "radius")],
    );

    assert!(output.plan("app.Shape", "dto.Shape").is_some());
    assert!(!diagnostics.has_errors());
    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("field aliases are ignored for the sum type mapping"));
    assert_eq!(warnings[0].related_type, "app.Shape");
}
