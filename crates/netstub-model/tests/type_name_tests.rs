use crate::{ModelError, TypeName};

fn named(path: &str) -> TypeName {
    TypeName::Named {
        path: path.to_string(),
        args: Vec::new(),
    }
}

#[test]
fn parses_plain_qualified_name() {
    assert_eq!(TypeName::parse("System.Int32").ok(), Some(named("System.Int32")));
}

#[test]
fn parses_nested_generic_with_arguments() {
    let parsed = TypeName::parse("Acme.Outer`1+Inner[System.String]").ok();
    assert_eq!(
        parsed,
        Some(TypeName::Named {
            path: "Acme.Outer`1+Inner".to_string(),
            args: vec![named("System.String")],
        })
    );
}

#[test]
fn parses_multiple_and_nested_arguments() {
    let parsed = TypeName::parse("Dict`2[K, List`1[V]]").ok();
    assert_eq!(
        parsed,
        Some(TypeName::Named {
            path: "Dict`2".to_string(),
            args: vec![
                named("K"),
                TypeName::Named {
                    path: "List`1".to_string(),
                    args: vec![named("V")],
                },
            ],
        })
    );
}

#[test]
fn distinguishes_array_suffix_from_arguments() {
    assert_eq!(
        TypeName::parse("T[]").ok(),
        Some(TypeName::Array {
            element: Box::new(named("T")),
            rank: 1,
        })
    );
    assert_eq!(
        TypeName::parse("System.Int32[,]").ok(),
        Some(TypeName::Array {
            element: Box::new(named("System.Int32")),
            rank: 2,
        })
    );
}

#[test]
fn parses_generic_array_then_reference() {
    let parsed = TypeName::parse("List`1[T][]&").ok();
    assert_eq!(
        parsed,
        Some(TypeName::ByRef(Box::new(TypeName::Array {
            element: Box::new(TypeName::Named {
                path: "List`1".to_string(),
                args: vec![named("T")],
            }),
            rank: 1,
        })))
    );
}

#[test]
fn parses_pointer_suffix() {
    assert_eq!(
        TypeName::parse("System.Byte*").ok(),
        Some(TypeName::Pointer(Box::new(named("System.Byte"))))
    );
}

#[test]
fn rejects_malformed_names() {
    for text in ["", "List`1[T", "System.", "A[B]]", "[T]"] {
        let result = TypeName::parse(text);
        assert!(
            matches!(result, Err(ModelError::TypeNameSyntax { .. })),
            "Expected syntax error for {text:?}, got {result:?}"
        );
    }
}

#[test]
fn simple_identifier_only_for_bare_names() {
    assert_eq!(named("T").as_simple_identifier(), Some("T"));
    assert_eq!(named("System.T").as_simple_identifier(), None);
    assert_eq!(named("Outer+T").as_simple_identifier(), None);
}
