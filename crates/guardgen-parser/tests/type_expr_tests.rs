use guardgen_parser::ast::*;
use guardgen_parser::parser::Parser;

/// Parse `type T = <src>;` and return the aliased type expression.
fn parse_type(src: &str) -> TypeExpr {
    let source = format!("type T = {};", src);
    let module = Parser::new(&source).unwrap().parse().unwrap();
    match module.declarations.into_iter().next().unwrap() {
        Declaration::Alias(alias) => alias.ty,
        other => panic!("expected alias, got {:?}", other),
    }
}

// ============================================================================
// Modeled Constructs
// ============================================================================

#[test]
fn test_primitives() {
    assert_eq!(
        parse_type("number"),
        TypeExpr::Primitive(PrimitiveKind::Number)
    );
    assert_eq!(
        parse_type("string"),
        TypeExpr::Primitive(PrimitiveKind::String)
    );
    assert_eq!(
        parse_type("object"),
        TypeExpr::Primitive(PrimitiveKind::Object)
    );
    assert_eq!(parse_type("any"), TypeExpr::Primitive(PrimitiveKind::Any));
}

#[test]
fn test_string_literal() {
    assert_eq!(
        parse_type("'clubs'"),
        TypeExpr::LiteralValue("clubs".to_string())
    );
    assert_eq!(
        parse_type("\"hearts\""),
        TypeExpr::LiteralValue("hearts".to_string())
    );
}

#[test]
fn test_array_postfix() {
    assert_eq!(
        parse_type("number[]"),
        TypeExpr::ArrayOf(Box::new(TypeExpr::Primitive(PrimitiveKind::Number)))
    );
}

#[test]
fn test_nested_array() {
    assert_eq!(
        parse_type("string[][]"),
        TypeExpr::ArrayOf(Box::new(TypeExpr::ArrayOf(Box::new(
            TypeExpr::Primitive(PrimitiveKind::String)
        ))))
    );
}

#[test]
fn test_union() {
    assert_eq!(
        parse_type("'a' | 'b' | number"),
        TypeExpr::UnionOf(vec![
            TypeExpr::LiteralValue("a".to_string()),
            TypeExpr::LiteralValue("b".to_string()),
            TypeExpr::Primitive(PrimitiveKind::Number),
        ])
    );
}

#[test]
fn test_reference() {
    assert_eq!(
        parse_type("Card"),
        TypeExpr::Reference("Card".to_string())
    );
}

#[test]
fn test_parenthesized_union_array() {
    // ('a' | 'b')[] is an array whose element is a parenthesized union
    assert_eq!(
        parse_type("('a' | 'b')[]"),
        TypeExpr::ArrayOf(Box::new(TypeExpr::Parenthesized(Box::new(
            TypeExpr::UnionOf(vec![
                TypeExpr::LiteralValue("a".to_string()),
                TypeExpr::LiteralValue("b".to_string()),
            ])
        ))))
    );
}

#[test]
fn test_generic_arguments_are_dropped() {
    assert_eq!(
        parse_type("Array<number>"),
        TypeExpr::Reference("Array".to_string())
    );
    assert_eq!(
        parse_type("Map<string, Array<number>>"),
        TypeExpr::Reference("Map".to_string())
    );
}

// ============================================================================
// Degraded Constructs
// ============================================================================

#[test]
fn test_type_literal_is_opaque() {
    assert_eq!(
        parse_type("{ a: string; b: { c: number } }"),
        TypeExpr::Unknown("TypeLiteral".to_string())
    );
}

#[test]
fn test_tuple_is_opaque() {
    assert_eq!(
        parse_type("[string, number]"),
        TypeExpr::Unknown("TupleType".to_string())
    );
}

#[test]
fn test_function_type_is_opaque() {
    assert_eq!(
        parse_type("(x: number) => string"),
        TypeExpr::Unknown("FunctionType".to_string())
    );
    assert_eq!(
        parse_type("() => void"),
        TypeExpr::Unknown("FunctionType".to_string())
    );
}

#[test]
fn test_untyped_single_parameter_function_is_opaque() {
    assert_eq!(
        parse_type("(A) => void"),
        TypeExpr::Unknown("FunctionType".to_string())
    );
}

#[test]
fn test_parenthesized_reference_is_not_a_function_type() {
    assert_eq!(
        parse_type("(A)"),
        TypeExpr::Parenthesized(Box::new(TypeExpr::Reference("A".to_string())))
    );
}

#[test]
fn test_keyword_types_are_opaque() {
    assert_eq!(
        parse_type("boolean"),
        TypeExpr::Unknown("BooleanKeyword".to_string())
    );
    assert_eq!(
        parse_type("undefined"),
        TypeExpr::Unknown("UndefinedKeyword".to_string())
    );
    assert_eq!(
        parse_type("never"),
        TypeExpr::Unknown("NeverKeyword".to_string())
    );
}

#[test]
fn test_literal_types_outside_subset_are_opaque() {
    assert_eq!(
        parse_type("42"),
        TypeExpr::Unknown("NumericLiteral".to_string())
    );
    assert_eq!(
        parse_type("true"),
        TypeExpr::Unknown("BooleanLiteral".to_string())
    );
    assert_eq!(
        parse_type("null"),
        TypeExpr::Unknown("NullKeyword".to_string())
    );
}

#[test]
fn test_intersection_is_opaque() {
    assert_eq!(
        parse_type("A & B"),
        TypeExpr::Unknown("IntersectionType".to_string())
    );
}

#[test]
fn test_qualified_name_is_opaque() {
    assert_eq!(
        parse_type("ns.Inner.Type"),
        TypeExpr::Unknown("QualifiedName".to_string())
    );
}

#[test]
fn test_union_mixing_modeled_and_opaque_members() {
    assert_eq!(
        parse_type("string | boolean"),
        TypeExpr::UnionOf(vec![
            TypeExpr::Primitive(PrimitiveKind::String),
            TypeExpr::Unknown("BooleanKeyword".to_string()),
        ])
    );
}

#[test]
fn test_array_of_opaque_element() {
    assert_eq!(
        parse_type("boolean[]"),
        TypeExpr::ArrayOf(Box::new(TypeExpr::Unknown("BooleanKeyword".to_string())))
    );
}
