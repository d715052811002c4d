//! Integration tests for value translation, serialization and substitution.

use tinct_css::values::{ListSeparator, Provenance, ShorthandValue};
use tinct_css::{
    AbsoluteEvaluator, CssKind, CssUnit, Evaluator, PrimitiveType, PrimitiveValue,
    SubstitutionContext, Value, ValueError, parse_value,
};

#[test]
fn test_value_kinds() {
    let cases = [
        ("initial", CssKind::Keyword, Some(PrimitiveType::Initial)),
        ("10px", CssKind::Typed, Some(PrimitiveType::Dimension)),
        ("50%", CssKind::Typed, Some(PrimitiveType::Percentage)),
        ("auto", CssKind::Typed, Some(PrimitiveType::Ident)),
        ("var(--x)", CssKind::Proxy, Some(PrimitiveType::Var)),
        ("attr(title)", CssKind::Proxy, Some(PrimitiveType::Attr)),
        ("1px var(--x)", CssKind::Proxy, Some(PrimitiveType::Lexical)),
        ("1px 2px", CssKind::List, None),
        ("calc(1px + 2px)", CssKind::Typed, Some(PrimitiveType::Expression)),
        ("clamp(1px, 2vw, 3px)", CssKind::Typed, Some(PrimitiveType::MathFunction)),
        ("rotate(45deg)", CssKind::Typed, Some(PrimitiveType::TransformFunction)),
        ("linear-gradient(red, blue)", CssKind::Typed, Some(PrimitiveType::Gradient)),
        ("#abc", CssKind::Typed, Some(PrimitiveType::Color)),
    ];
    for (text, kind, primitive_type) in cases {
        let value = parse_value(text).unwrap();
        assert_eq!(value.css_kind(), kind, "kind of {text:?}");
        assert_eq!(value.primitive_type(), primitive_type, "type of {text:?}");
    }
}

#[test]
fn test_invalid_values() {
    for text in ["", "   ", "initial 1px", "1px, inherit", "calc(1px +)", "rgb(1 2)"] {
        assert!(
            matches!(parse_value(text), Err(ValueError::Syntax(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn test_ratio() {
    let value = parse_value("16/9").unwrap();
    let Some(PrimitiveValue::Ratio(ratio)) = value.as_primitive() else {
        panic!("expected a ratio, got {value:?}");
    };
    assert_eq!(ratio.numerator, 16.0);
    assert_eq!(ratio.denominator, 9.0);
    assert_eq!(value.css_text(), "16 / 9");

    // A negative side is not a ratio.
    let value = parse_value("-16 / 9").unwrap();
    assert_eq!(value.css_kind(), CssKind::List);
}

#[test]
fn test_comma_list() {
    let value = parse_value("1px 2px, 3px").unwrap();
    let list = value.as_list().unwrap();
    assert_eq!(list.separator(), ListSeparator::Comma);
    assert_eq!(list.len(), 2);
    assert_eq!(list.items()[0].css_kind(), CssKind::List);
    assert_eq!(value.css_text(), "1px 2px, 3px");
    assert_eq!(value.minified_text(), "1px 2px,3px");
}

#[test]
fn test_serialization_forms() {
    let cases = [
        ("10PX", "10px", "10px"),
        ("0.50em", "0.5em", ".5em"),
        ("-0.25", "-0.25", "-.25"),
        ("0px", "0px", "0px"),
        ("calc( 1px  +  2px )", "calc(1px + 2px)", "calc(1px+2px)"),
        ("calc(1em - 2px)", "calc(1em - 2px)", "calc(1em - 2px)"),
        ("translate(10px , 20px)", "translate(10px, 20px)", "translate(10px,20px)"),
        ("1px 2px/3px", "1px 2px / 3px", "1px 2px/3px"),
        ("#FFFFFF", "#ffffff", "#fff"),
        ("rgba(255, 0, 0, 0.5)", "rgba(255, 0, 0, 0.5)", "rgba(255,0,0,.5)"),
        ("url(a.png)", "url(\"a.png\")", "url(\"a.png\")"),
        ("var(--x,  1px)", "var(--x, 1px)", "var(--x,1px)"),
    ];
    for (input, canonical, minified) in cases {
        let value = parse_value(input).unwrap();
        assert_eq!(value.css_text(), canonical, "canonical form of {input:?}");
        assert_eq!(value.minified_text(), minified, "minified form of {input:?}");
    }
}

#[test]
fn test_both_forms_reparse_equal() {
    let samples = [
        "10px",
        "1px 2px 3px 4px",
        "a, b c, d",
        "calc((1px + 2px) * 3)",
        "calc(100% - 2 * 1em)",
        "min(10px, 5vw, calc(1px + 1em))",
        "round(up, 10.5px, 1px)",
        "clamp(none, 2vw, 3px)",
        "'quoted \"text\"'",
        "counter(item, upper-roman)",
        "counters(item, \".\")",
        "oklch(0.7 0.1 200 / 0.5)",
        "color(display-p3 1 0 0)",
        "hsl(120deg 50% 50%)",
        "U+0-7F",
        "16 / 9",
        "cubic-bezier(0.1, 0.7, 1, 0.1)",
        "1px var(--gap, 2px)",
    ];
    for text in samples {
        let value = parse_value(text).unwrap();
        let canonical = Value::parse(&value.css_text()).unwrap();
        let minified = Value::parse(&value.minified_text()).unwrap();
        assert_eq!(canonical, value, "canonical reparse of {text:?}");
        assert_eq!(minified, value, "minified reparse of {text:?}");
    }
}

#[test]
fn test_set_css_text() {
    let mut value = parse_value("10px").unwrap();
    value.set_css_text("2em 3em").unwrap();
    assert_eq!(value.css_kind(), CssKind::List);

    // A failed update leaves the value as it was.
    assert!(value.set_css_text("calc(").is_err());
    assert_eq!(value.css_text(), "2em 3em");
}

#[test]
fn test_subproperty_values_reject_mutation() {
    let mut shorthand = ShorthandValue::new(
        "padding",
        vec![
            ("padding-top".to_string(), parse_value("1px").unwrap()),
            ("padding-left".to_string(), parse_value("2px").unwrap()),
        ],
    );
    let top = shorthand.longhand_mut("padding-top").unwrap();
    assert_eq!(top.provenance(), Provenance::Subproperty);
    assert!(matches!(
        top.set_css_text("5px"),
        Err(ValueError::InvalidModification(_))
    ));
    assert!(matches!(
        top.primitive_mut(),
        Err(ValueError::InvalidModification(_))
    ));
    assert_eq!(top.css_text(), "1px");

    // A copy can be changed freely.
    let mut copy = shorthand.longhand("padding-top").unwrap().clone();
    copy.set_css_text("5px").unwrap();
    assert_eq!(copy.css_text(), "5px");
}

#[test]
fn test_color_mutation_through_value() {
    let mut value = parse_value("#102030").unwrap();
    value
        .color_mut()
        .unwrap()
        .set_component(1, PrimitiveValue::number(255.0))
        .unwrap();
    assert_eq!(value.css_text(), "rgb(255 32 48)");

    let mut length = parse_value("1px").unwrap();
    assert!(matches!(
        length.color_mut(),
        Err(ValueError::TypeMismatch(_))
    ));
}

#[test]
fn test_substitute_var() {
    let mut ctx = SubstitutionContext::new();
    ctx.set_property("--gap", "4px").unwrap();
    ctx.set_property("--pair", "var(--gap) 8px").unwrap();

    let value = parse_value("var(--gap)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap(), parse_value("4px").unwrap());

    let value = parse_value("var(--pair)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap().css_text(), "4px 8px");

    let value = parse_value("calc(var(--gap) * 2)").unwrap();
    let resolved = value.substitute(&ctx).unwrap();
    let result = AbsoluteEvaluator
        .evaluate(resolved.as_primitive().unwrap())
        .unwrap();
    assert_eq!(result.value, 8.0);
    assert_eq!(result.unit, CssUnit::Px);
}

#[test]
fn test_substitute_fallback_and_missing() {
    let ctx = SubstitutionContext::new();
    let value = parse_value("var(--missing, 1em 2em)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap().css_text(), "1em 2em");

    let value = parse_value("var(--missing)").unwrap();
    assert!(matches!(
        value.substitute(&ctx),
        Err(ValueError::Evaluation(_))
    ));
}

#[test]
fn test_substitute_cycle() {
    let mut ctx = SubstitutionContext::new();
    ctx.set_property("--a", "var(--b)").unwrap();
    ctx.set_property("--b", "1px var(--a)").unwrap();
    let value = parse_value("var(--a)").unwrap();
    assert!(matches!(
        value.substitute(&ctx),
        Err(ValueError::Evaluation(_))
    ));
}

#[test]
fn test_substitute_attr() {
    let mut ctx = SubstitutionContext::new();
    ctx.set_attribute("data-width", "12");
    ctx.set_attribute("data-label", "hello");

    let value = parse_value("attr(data-width px)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap().css_text(), "12px");

    let value = parse_value("attr(data-label)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap().css_text(), "\"hello\"");

    let value = parse_value("attr(data-label number, 3)").unwrap();
    assert_eq!(value.substitute(&ctx).unwrap().css_text(), "3");
}

#[test]
fn test_values_without_proxies_substitute_to_themselves() {
    let value = parse_value("1px solid red").unwrap();
    let same = value.substitute(&SubstitutionContext::new()).unwrap();
    assert_eq!(same, value);
}
