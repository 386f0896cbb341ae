//! Common test utilities for building type catalogs and directives.
use utsushi::prelude::*;

#[allow(dead_code)]
pub fn string() -> TypeRef {
    TypeRef::Primitive(Primitive::String)
}

#[allow(dead_code)]
pub fn int() -> TypeRef {
    TypeRef::Primitive(Primitive::Int)
}

#[allow(dead_code)]
pub fn long() -> TypeRef {
    TypeRef::Primitive(Primitive::Long)
}

/// `app.Person { name: String, age: Int, nickname: String? }`
#[allow(dead_code)]
pub fn person() -> TypeDeclaration {
    TypeDeclaration::record(
        "app.Person",
        vec![
            FieldDeclaration::new("name", string()),
            FieldDeclaration::new("age", int()),
            FieldDeclaration::new("nickname", string()).nullable(),
        ],
    )
}

/// `app.PersonDto { fullName: String, age: String, nickname: String? }`
#[allow(dead_code)]
pub fn person_dto() -> TypeDeclaration {
    TypeDeclaration::record(
        "app.PersonDto",
        vec![
            FieldDeclaration::new("fullName", string()),
            FieldDeclaration::new("age", string()),
            FieldDeclaration::new("nickname", string()).nullable(),
        ],
    )
}

/// `app.Color { RED, GREEN, BLUE }`
#[allow(dead_code)]
pub fn color() -> TypeDeclaration {
    TypeDeclaration::enumeration("app.Color", &["RED", "GREEN", "BLUE"])
}

/// `dto.Color { RED, GREEN }`
#[allow(dead_code)]
pub fn color_dto() -> TypeDeclaration {
    TypeDeclaration::enumeration("dto.Color", &["RED", "GREEN"])
}

/// `app.Shape = Circle { radius: Int } | Polygon = (Square { side: Int } | Triangle) | Empty`
#[allow(dead_code)]
pub fn shape() -> TypeDeclaration {
    TypeDeclaration::sum_type(
        "app.Shape",
        vec![
            TypeDeclaration::record(
                "app.Shape.Circle",
                vec![FieldDeclaration::new("radius", int())],
            ),
            TypeDeclaration::sum_type(
                "app.Shape.Polygon",
                vec![
                    TypeDeclaration::record(
                        "app.Shape.Polygon.Square",
                        vec![FieldDeclaration::new("side", int())],
                    ),
                    TypeDeclaration::marker("app.Shape.Polygon.Triangle"),
                ],
            ),
            TypeDeclaration::marker("app.Shape.Empty"),
        ],
    )
}

/// A flat target hierarchy with the same leaves as `shape()` and `Long` fields.
#[allow(dead_code)]
pub fn shape_dto() -> TypeDeclaration {
    TypeDeclaration::sum_type(
        "dto.Shape",
        vec![
            TypeDeclaration::marker("dto.Shape.Empty"),
            TypeDeclaration::record(
                "dto.Shape.Square",
                vec![FieldDeclaration::new("side", long())],
            ),
            TypeDeclaration::record(
                "dto.Shape.Circle",
                vec![FieldDeclaration::new("radius", long())],
            ),
            TypeDeclaration::marker("dto.Shape.Triangle"),
        ],
    )
}

#[allow(dead_code)]
pub fn catalog(types: Vec<TypeDeclaration>) -> InMemoryCatalog {
    InMemoryCatalog::from_declarations(types).expect("catalog should build")
}

/// Runs a single-group round and returns the output with its diagnostics.
#[allow(dead_code)]
pub fn run(
    types: Vec<TypeDeclaration>,
    directives: Vec<MappingDirective>,
) -> (GenerationOutput, Diagnostics) {
    let group = directives
        .into_iter()
        .fold(MapperGroup::new("test"), |group, d| group.with_directive(d));
    let generator = Generator::builder(catalog(types), vec![group]).build();
    let mut diagnostics = Diagnostics::new();
    let output = generator.generate(&mut diagnostics);
    (output, diagnostics)
}
