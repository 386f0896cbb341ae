//! Tests for the type model, directives, manifests and artifacts.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use utsushi::prelude::*;

#[test]
fn test_type_ref_parsing_and_display() {
    let parsed: TypeRef = "List<Set<app.Tag>>".parse().unwrap();
    assert_eq!(
        parsed,
        TypeRef::list(TypeRef::set(TypeRef::named("app.Tag")))
    );
    assert_eq!(parsed.to_string(), "List<Set<app.Tag>>");

    assert_eq!(" Int ".parse::<TypeRef>().unwrap(), int());
    assert!("Map<String, Int>".parse::<TypeRef>().is_err());
    assert!("".parse::<TypeRef>().is_err());
}

#[test]
fn test_simple_names_and_operation_names() {
    let directive = MappingDirective::new("com.example.Person", "com.example.api.PersonDto");
    assert_eq!(directive.forward_operation_name(), "asPersonDto");
    assert_eq!(directive.reverse_operation_name(), "asPerson");
    assert_eq!(person().simple_name(), "Person");
    assert_eq!(TypeDeclaration::marker("Root").simple_name(), "Root");
}

#[test]
fn test_mandatory_fields() {
    assert!(FieldDeclaration::new("a", int()).is_mandatory());
    assert!(!FieldDeclaration::new("a", int()).nullable().is_mandatory());
    assert!(!FieldDeclaration::new("a", int()).with_default().is_mandatory());
}

#[test]
fn test_catalog_lookup() {
    let catalog = catalog(vec![person(), color()]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.resolve("app.Color").unwrap().kind, TypeKind::Enumeration);
    assert_eq!(
        catalog.resolve("app.Nope"),
        Err(CatalogError::NotFound("app.Nope".to_string()))
    );

    let duplicate = InMemoryCatalog::from_declarations(vec![person(), person()]);
    assert_eq!(
        duplicate.err(),
        Some(CatalogError::DuplicateType("app.Person".to_string()))
    );
}

#[test]
fn test_mirrored_directive_inverts_aliases() {
    let directive = MappingDirective::new("app.A", "app.B")
        .reversible()
        .with_alias("fullName", "name");
    let mirrored = directive.mirrored().unwrap();

    assert_eq!(mirrored.source_type, "app.B");
    assert_eq!(mirrored.target_type, "app.A");
    assert!(!mirrored.reversible);
    assert_eq!(
        mirrored.alias_map().unwrap().get("name").map(String::as_str),
        Some("fullName")
    );
}

#[test]
fn test_aliases_sharing_a_source_cannot_be_mirrored() {
    let directive = MappingDirective::new("app.A", "app.B")
        .reversible()
        .with_alias("first", "name")
        .with_alias("second", "name");

    assert!(directive.alias_map().is_ok());
    let error = directive.mirrored().unwrap_err();
    assert!(error.to_string().contains("aliases cannot be inverted"));
}

#[test]
fn test_directive_validation() {
    assert!(MappingDirective::new("", "app.B").validate().is_err());
    assert!(
        MappingDirective::new("app.A", "app.B")
            .with_alias("x", "")
            .validate()
            .is_err()
    );
    assert!(MappingDirective::new("app.A", "app.B").validate().is_ok());
}

#[test]
fn test_error_messages() {
    let mismatch = MappingError::StructuralMismatch {
        source_type: "app.Letter".to_string(),
        target_type: "dto.Letter".to_string(),
        unmatched: vec!["Y".to_string(), "Z".to_string()],
    };
    assert_eq!(
        mismatch.to_string(),
        "Cannot map sum type 'app.Letter' to 'dto.Letter': no variant named Y, Z in the target hierarchy"
    );

    let diagnostic = Diagnostic {
        severity: Severity::Warning,
        message: "something odd".to_string(),
        related_type: "app.Person".to_string(),
    };
    assert_eq!(diagnostic.to_string(), "warning: something odd [app.Person]");
}

#[test]
fn test_manifest_from_json() {
    let json = r#"{
        "options": { "missing_field_policy": "omit" },
        "types": [
            { "qualified_name": "app.Person", "kind": "record",
              "fields": [
                { "name": "name", "type": "String" },
                { "name": "tags", "type": "List<String>", "nullable": true }
              ] },
            { "qualified_name": "app.PersonDto", "kind": "record",
              "fields": [
                { "name": "fullName", "type": "String" },
                { "name": "tags", "type": "Set<String>", "nullable": true }
              ] },
            { "qualified_name": "app.Color", "kind": "enumeration", "constants": ["RED"] }
        ],
        "groups": [
            { "name": "people", "visibility": "restricted", "directives": [
                { "source": "app.Person", "target": "app.PersonDto", "reversible": true,
                  "aliases": [{ "target": "fullName", "source": "name" }] }
            ] }
        ]
    }"#;

    let manifest = Manifest::from_json(json).unwrap();
    assert_eq!(manifest.types.len(), 3);
    assert_eq!(manifest.directive_count(), 1);
    assert_eq!(manifest.options.missing_field_policy, MissingFieldPolicy::Omit);
    assert!(manifest.options.check_delegates);
    assert_eq!(
        manifest.types[0].fields[1].type_ref,
        TypeRef::list(string())
    );

    let generator = manifest.into_generator().unwrap();
    let mut diagnostics = Diagnostics::new();
    let output = generator.generate(&mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(output.operations().count(), 2);
    assert!(output.operations().all(|op| op.visibility == Visibility::Restricted));
    assert_eq!(
        output
            .plan("app.Person", "app.PersonDto")
            .and_then(|plan| plan.entry_for("tags"))
            .and_then(PlanEntry::conversion),
        Some(&Conversion::NullSafe(Box::new(Conversion::Collect {
            element: Box::new(Conversion::Identity),
            into: CollectionKind::Set,
        })))
    );
}

#[test]
fn test_manifest_errors() {
    assert!(matches!(
        Manifest::from_json("{ not json"),
        Err(ManifestError::JsonParseError(_))
    ));
    assert!(matches!(
        Manifest::from_json(r#"{ "types": [{ "qualified_name": "a.B", "kind": "record",
            "fields": [{ "name": "x", "type": "Map<A, B>" }] }] }"#),
        Err(ManifestError::JsonParseError(_))
    ));
    assert!(matches!(
        Manifest::from_file("/definitely/not/here.json"),
        Err(ManifestError::Io { .. })
    ));

    let duplicated = Manifest {
        types: vec![color(), color()],
        ..Manifest::default()
    };
    assert!(matches!(
        duplicated.into_generator(),
        Err(ManifestError::Catalog(CatalogError::DuplicateType(_)))
    ));
}

#[test]
fn test_artifact_bytes_round_trip() {
    let (output, diagnostics) = run(
        vec![color(), color_dto()],
        vec![MappingDirective::new("app.Color", "dto.Color")],
    );
    let artifact = GenerationArtifact::new(output, diagnostics.entries().to_vec());

    let bytes = artifact.to_bytes().unwrap();
    let restored = GenerationArtifact::from_bytes(&bytes).unwrap();
    assert_eq!(restored, artifact);
    assert_eq!(restored.diagnostics.len(), 1);

    let changed = GenerationArtifact::new(GenerationOutput::default(), Vec::new());
    assert!(!artifact.is_identical_to(&changed).unwrap());
}

#[test]
fn test_artifact_file_round_trip() {
    let (output, _) = run(
        vec![person(), person_dto()],
        vec![MappingDirective::new("app.Person", "app.PersonDto").with_alias("fullName", "name")],
    );
    let artifact = GenerationArtifact::new(output, Vec::new());
    let path = std::env::temp_dir().join(format!("utsushi-artifact-{}.bin", std::process::id()));
    let path = path.to_string_lossy().to_string();

    artifact.save(&path).unwrap();
    let loaded = GenerationArtifact::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(loaded.is_identical_to(&artifact).unwrap());
}

#[test]
fn test_value_display() {
    let value = Value::record(
        "dto.Bag",
        [
            ("ids", Value::List(vec![Value::Int(1), Value::Int(2)])),
            ("label", Value::str("x")),
        ],
    );
    assert_eq!(value.to_string(), "dto.Bag { ids: [1, 2], label: \"x\" }");
    assert_eq!(Value::set([Value::Int(1), Value::Int(1)]), Value::set([Value::Int(1)]));
}
