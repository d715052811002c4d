//! Integration tests for the lexical scanner.

use tinct_css::lexer::{LexicalUnit, Operator, parse_units, units_text};
use tinct_css::{CssUnit, SerializeMode, ValueError};

fn single(text: &str) -> LexicalUnit {
    let mut units = parse_units(text).unwrap();
    assert_eq!(units.len(), 1, "expected one unit for {text:?}: {units:?}");
    units.remove(0)
}

#[test]
fn test_numeric_kinds() {
    assert_eq!(
        single("42"),
        LexicalUnit::Number {
            value: 42.0,
            integer: true
        }
    );
    assert_eq!(
        single("-0.5"),
        LexicalUnit::Number {
            value: -0.5,
            integer: false
        }
    );
    assert_eq!(single("50%"), LexicalUnit::Percentage(50.0));
    match single("1.5EM") {
        LexicalUnit::Dimension {
            value,
            unit,
            unit_text,
        } => {
            assert_eq!(value, 1.5);
            assert_eq!(unit, CssUnit::Em);
            assert_eq!(unit_text, "EM");
        }
        other => panic!("expected a dimension, got {other:?}"),
    }
    match single("3furlongs") {
        LexicalUnit::Dimension { unit, .. } => assert_eq!(unit, CssUnit::Invalid),
        other => panic!("expected a dimension, got {other:?}"),
    }
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        single(r"'it\'s'"),
        LexicalUnit::String {
            value: "it's".to_string(),
            quote: '\''
        }
    );
    assert_eq!(
        single(r#""\41 B""#),
        LexicalUnit::String {
            value: "AB".to_string(),
            quote: '"'
        }
    );
}

#[test]
fn test_sequence_kinds() {
    let units = parse_units("auto #fff \"x\" url(a.png) U+0-7F U+4??").unwrap();
    assert_eq!(units.len(), 6);
    assert_eq!(units[0], LexicalUnit::Ident("auto".to_string()));
    assert_eq!(units[1], LexicalUnit::Hash("fff".to_string()));
    assert_eq!(
        units[2],
        LexicalUnit::String {
            value: "x".to_string(),
            quote: '"'
        }
    );
    assert_eq!(units[3], LexicalUnit::Uri("a.png".to_string()));
    assert_eq!(units[4], LexicalUnit::UnicodeRange { start: 0, end: 0x7F });
    assert_eq!(units[5], LexicalUnit::UnicodeWildcard("4??".to_string()));
}

#[test]
fn test_function_params_are_nested() {
    match single("Translate(10px, 20px)") {
        LexicalUnit::Function { name, params } => {
            assert_eq!(name, "translate");
            assert_eq!(params.len(), 3);
            assert!(params[1].is_operator(Operator::Comma));
        }
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn test_math_mode_operators_without_whitespace() {
    match single("calc(1px+2px*3)") {
        LexicalUnit::Function { params, .. } => {
            assert_eq!(params.len(), 5);
            assert!(params[1].is_operator(Operator::Plus));
            assert!(params[3].is_operator(Operator::Multiply));
        }
        other => panic!("expected calc(), got {other:?}"),
    }

    // Outside math functions a sign belongs to the number.
    let units = parse_units("1px +2px").unwrap();
    assert_eq!(units.len(), 2);
    assert!(matches!(units[1], LexicalUnit::Dimension { value, .. } if value == 2.0));

    // A leading sign in calc() is still part of the number.
    match single("calc(-1px + 2px)") {
        LexicalUnit::Function { params, .. } => {
            assert!(matches!(params[0], LexicalUnit::Dimension { value, .. } if value == -1.0));
            assert!(params[1].is_operator(Operator::Plus));
        }
        other => panic!("expected calc(), got {other:?}"),
    }
}

#[test]
fn test_parenthesized_groups_in_math() {
    match single("calc((1px + 2px) * 3)") {
        LexicalUnit::Function { params, .. } => {
            assert!(matches!(&params[0], LexicalUnit::SubExpression(inner) if inner.len() == 3));
            assert!(params[1].is_operator(Operator::Multiply));
        }
        other => panic!("expected calc(), got {other:?}"),
    }
}

#[test]
fn test_proxy_units() {
    let var = single("var(--gap, 1px 2px)");
    assert!(var.is_proxy());
    match var {
        LexicalUnit::Var { name, fallback } => {
            assert_eq!(name, "--gap");
            assert_eq!(fallback.map(|f| f.len()), Some(2));
        }
        other => panic!("expected var(), got {other:?}"),
    }

    match single("attr(data-size px, 0)") {
        LexicalUnit::Attr {
            name,
            type_or_unit,
            fallback,
        } => {
            assert_eq!(name, "data-size");
            assert_eq!(type_or_unit.as_deref(), Some("px"));
            assert!(fallback.is_some());
        }
        other => panic!("expected attr(), got {other:?}"),
    }

    let nested = single("calc(var(--a) * 2)");
    assert!(!nested.is_proxy());
    assert!(nested.contains_proxy());
}

#[test]
fn test_syntax_errors() {
    for text in ["calc(1px", "a)", "[1", "var(gap)", "var(--a 1px)", "#", "!", "'a\nb'"] {
        assert!(
            matches!(parse_units(text), Err(ValueError::Syntax(_))),
            "{text:?} should not scan"
        );
    }
}

#[test]
fn test_units_serialize_back() {
    let units = parse_units("a , b/c var(--x,1px)").unwrap();
    assert_eq!(
        units_text(&units, SerializeMode::Canonical),
        "a, b / c var(--x, 1px)"
    );
    assert_eq!(units_text(&units, SerializeMode::Minified), "a,b/c var(--x,1px)");
}
