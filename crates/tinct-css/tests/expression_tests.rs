//! Integration tests for expression trees, analysis and evaluation.

use tinct_common::warning::has_warned;
use tinct_css::expr::{ExpressionBuilder, NodeKind};
use tinct_css::{
    AbsoluteEvaluator, ContextEvaluator, CssUnit, Evaluator, ExpressionValue,
    PercentageEvaluator, PrimitiveValue, ResolutionContext, ResultCategory, SerializeMode,
    Value, ValueError, parse_value,
};

fn primitive(text: &str) -> PrimitiveValue {
    parse_value(text)
        .unwrap()
        .as_primitive()
        .cloned()
        .unwrap_or_else(|| panic!("{text:?} is not a primitive"))
}

fn absolute(text: &str) -> (f64, CssUnit) {
    let result = AbsoluteEvaluator.evaluate(&primitive(text)).unwrap();
    (result.value, result.unit)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_builder_groups_subexpressions() {
    let mut inner = ExpressionBuilder::new();
    inner
        .push_operand(PrimitiveValue::dimension(1.0, CssUnit::Px))
        .unwrap();
    inner.add().unwrap();
    inner
        .push_operand(PrimitiveValue::dimension(2.0, CssUnit::Px))
        .unwrap();
    let sum = inner.build().unwrap();

    let mut outer = ExpressionBuilder::new();
    outer.push_tree(sum).unwrap();
    outer.multiply().unwrap();
    outer.push_operand(PrimitiveValue::number(3.0)).unwrap();
    let tree = outer.build().unwrap();

    let root = tree.node(tree.root());
    assert!(matches!(root.kind(), NodeKind::Product(children) if children.len() == 2));
    let first = tree.children(tree.root())[0];
    assert!(matches!(tree.node(first).kind(), NodeKind::Sum(_)));
    assert_eq!(tree.node(first).parent(), Some(tree.root()));

    let value = PrimitiveValue::Expression(Box::new(ExpressionValue::new(tree)));
    assert_eq!(value.css_text(SerializeMode::Minified), "calc((1px+2px)*3)");
    assert_eq!(
        value.css_text(SerializeMode::Canonical),
        "calc((1px + 2px) * 3)"
    );
    assert_eq!(
        parse_value("calc((1px+2px)*3)").unwrap(),
        Value::primitive(value)
    );
}

#[test]
fn test_builder_precedence_and_errors() {
    // 1 + 2 * 3 keeps the product inside the sum.
    let mut builder = ExpressionBuilder::new();
    builder.push_operand(PrimitiveValue::number(1.0)).unwrap();
    builder.add().unwrap();
    builder.push_operand(PrimitiveValue::number(2.0)).unwrap();
    builder.multiply().unwrap();
    builder.push_operand(PrimitiveValue::number(3.0)).unwrap();
    let tree = builder.build().unwrap();
    assert!(matches!(tree.node(tree.root()).kind(), NodeKind::Sum(c) if c.len() == 2));
    assert_eq!(tree.operands().len(), 3);

    let mut builder = ExpressionBuilder::new();
    assert!(matches!(builder.add(), Err(ValueError::Syntax(_))));

    let mut builder = ExpressionBuilder::new();
    builder.push_operand(PrimitiveValue::number(1.0)).unwrap();
    assert!(builder.push_operand(PrimitiveValue::number(2.0)).is_err());

    assert!(ExpressionBuilder::new().build().is_err());
}

#[test]
fn test_leading_term_cannot_be_subtracted() {
    let mut builder = ExpressionBuilder::new();
    builder.set_next_operand_inverse(true);
    assert!(matches!(
        builder.push_operand(PrimitiveValue::number(2.0)),
        Err(ValueError::Syntax(_))
    ));

    // The builder is still usable and the flag does not leak.
    builder.set_next_operand_inverse(false);
    builder.push_operand(PrimitiveValue::number(2.0)).unwrap();
    builder.add().unwrap();
    builder.set_next_operand_inverse(true);
    builder.push_operand(PrimitiveValue::number(5.0)).unwrap();
    let value = PrimitiveValue::Expression(Box::new(ExpressionValue::new(builder.build().unwrap())));
    assert_eq!(value.css_text(SerializeMode::Canonical), "calc(2 - 5)");
    assert_eq!(
        parse_value(&value.css_text(SerializeMode::Minified)).unwrap(),
        Value::primitive(value)
    );
}

#[test]
fn test_subtraction_and_division() {
    assert_eq!(absolute("calc(10px - 4px)"), (6.0, CssUnit::Px));
    assert_eq!(absolute("calc(10px - 4px - 1px)"), (5.0, CssUnit::Px));
    assert_eq!(absolute("calc(12px / 4 / 3)"), (1.0, CssUnit::Px));
    assert_eq!(absolute("calc(2 * (3 + 4))"), (14.0, CssUnit::Number));
    assert_eq!(absolute("calc(-1 * 5px)"), (-5.0, CssUnit::Px));
}

#[test]
fn test_absolute_units_are_canonicalized() {
    assert_eq!(absolute("calc(1in + 4px)"), (100.0, CssUnit::Px));
    let (seconds, unit) = absolute("calc(1s + 500ms)");
    assert_close(seconds, 1.5);
    assert_eq!(unit, CssUnit::S);
    assert_eq!(absolute("calc(0.5turn - 90deg)"), (90.0, CssUnit::Deg));

    let one_inch = AbsoluteEvaluator
        .evaluate_as(&primitive("1in"), CssUnit::Cm)
        .unwrap();
    assert_close(one_inch, 2.54);
}

#[test]
fn test_incompatible_units_fail() {
    for text in [
        "calc(1px + 1s)",
        "calc(1px * 2px)",
        "calc(1px / 2px)",
        "calc(50% - 10px)",
    ] {
        assert!(
            matches!(
                AbsoluteEvaluator.evaluate(&primitive(text)),
                Err(ValueError::Evaluation(_))
            ),
            "{text:?} should not evaluate"
        );
    }
    assert!(matches!(
        AbsoluteEvaluator.evaluate(&primitive("2em")),
        Err(ValueError::Evaluation(_))
    ));
}

#[test]
fn test_percentage_evaluator() {
    let result = PercentageEvaluator
        .evaluate(&primitive("calc(25% * 2)"))
        .unwrap();
    assert_eq!((result.value, result.unit), (50.0, CssUnit::Percentage));
    assert!(PercentageEvaluator.evaluate(&primitive("0.5")).is_ok());
    assert!(matches!(
        PercentageEvaluator.evaluate(&primitive("10px")),
        Err(ValueError::Evaluation(_))
    ));
}

#[test]
fn test_context_evaluator() {
    let ctx = ResolutionContext::new(20.0, 10.0, 800.0, 600.0).with_percentage_basis(400.0);
    let evaluator = ContextEvaluator::new(ctx);
    let eval = |text: &str| {
        let q = evaluator.evaluate(&primitive(text)).unwrap();
        (q.value, q.unit)
    };
    assert_eq!(eval("calc(50% - 2em)"), (160.0, CssUnit::Px));
    assert_eq!(eval("3rem"), (30.0, CssUnit::Px));
    assert_eq!(eval("10vw"), (80.0, CssUnit::Px));
    assert_eq!(eval("calc(10vh + 1vmax)"), (68.0, CssUnit::Px));

    // Without a basis, percentages stay percentages.
    let evaluator = ContextEvaluator::new(ResolutionContext::with_viewport(800.0, 600.0));
    let q = evaluator.evaluate(&primitive("calc(20% + 30%)")).unwrap();
    assert_eq!((q.value, q.unit), (50.0, CssUnit::Percentage));
}

#[test]
fn test_math_functions() {
    let cases = [
        ("min(10px, 2in)", 10.0, CssUnit::Px),
        ("max(1px, 2px, 3px)", 3.0, CssUnit::Px),
        ("clamp(10px, 50px, 20px)", 20.0, CssUnit::Px),
        ("clamp(none, 5px, 3px)", 3.0, CssUnit::Px),
        ("clamp(10px, 5px, none)", 10.0, CssUnit::Px),
        ("round(down, 7.8px, 2px)", 6.0, CssUnit::Px),
        ("round(7.5)", 8.0, CssUnit::Number),
        ("round(to-zero, -7.5)", -7.0, CssUnit::Number),
        ("mod(-7, 3)", 2.0, CssUnit::Number),
        ("rem(-7, 3)", -1.0, CssUnit::Number),
        ("abs(-3px)", 3.0, CssUnit::Px),
        ("sign(-2px)", -1.0, CssUnit::Number),
        ("atan2(1, 1)", 45.0, CssUnit::Deg),
        ("pow(2, 10)", 1024.0, CssUnit::Number),
        ("sqrt(16)", 4.0, CssUnit::Number),
        ("hypot(3px, 4px)", 5.0, CssUnit::Px),
        ("log(8, 2)", 3.0, CssUnit::Number),
        ("calc(min(1px, 2px) + max(3px, 4px))", 5.0, CssUnit::Px),
    ];
    for (text, expected, unit) in cases {
        let (value, actual_unit) = absolute(text);
        assert_close(value, expected);
        assert_eq!(actual_unit, unit, "unit of {text:?}");
    }

    let (sin, _) = absolute("sin(90deg)");
    assert_close(sin, 1.0);
    let (cos, _) = absolute("cos(pi)");
    assert_close(cos, -1.0);
    let (double_pi, _) = absolute("calc(pi * 2)");
    assert_close(double_pi, std::f64::consts::TAU);
}

#[test]
fn test_math_function_arity_is_checked_when_parsing() {
    for text in ["clamp(1px, 2px)", "pow(2)", "sqrt(1, 2)", "min()", "clamp(1px, none, 2px)"] {
        assert!(
            matches!(parse_value(text), Err(ValueError::Syntax(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn test_analysis() {
    let analyze = |text: &str| match primitive(text) {
        PrimitiveValue::Expression(e) => e.analyze(),
        PrimitiveValue::MathFunction(f) => f.analyze(),
        other => panic!("not a math value: {other:?}"),
    };
    assert_eq!(analyze("calc(1px + 50%)").unwrap(), ResultCategory::LengthPercentage);
    assert_eq!(analyze("calc(2 * 3)").unwrap(), ResultCategory::Number);
    assert_eq!(analyze("calc(1px * 2)").unwrap(), ResultCategory::Length);
    assert_eq!(analyze("sin(1rad)").unwrap(), ResultCategory::Number);
    assert_eq!(analyze("acos(0.5)").unwrap(), ResultCategory::Angle);
    assert_eq!(analyze("calc(var(--x) + 1px)").unwrap(), ResultCategory::Unknown);
    assert!(matches!(
        analyze("calc(1px + 1s)"),
        Err(ValueError::TypeMismatch(_))
    ));
    assert!(matches!(
        analyze("calc(1px * 1px)"),
        Err(ValueError::TypeMismatch(_))
    ));
    assert!(matches!(
        analyze("sqrt(4px)"),
        Err(ValueError::TypeMismatch(_))
    ));
}

#[test]
fn test_untyped_operands_share_one_warning() {
    for text in ["calc(frobnicate(1px) + 1px)", "calc(wibble(2em) + 1px)"] {
        let PrimitiveValue::Expression(e) = primitive(text) else {
            panic!("expected calc() for {text:?}");
        };
        assert_eq!(e.analyze().unwrap(), ResultCategory::Unknown);
    }
    // Keyed on the operand type, not its text.
    assert!(has_warned(
        "calc",
        "cannot type function operands inside a math function"
    ));
}

#[test]
fn test_expect_integer_rounds() {
    let mut value = parse_value("calc(7 / 2)").unwrap();
    let PrimitiveValue::Expression(e) = value.primitive_mut().unwrap() else {
        panic!("expected calc()");
    };
    assert!(!e.expect_integer());
    e.set_expect_integer(true);
    assert_eq!(e.analyze().unwrap(), ResultCategory::Integer);

    let result = AbsoluteEvaluator
        .evaluate(value.as_primitive().unwrap())
        .unwrap();
    assert_eq!(result.value, 4.0);

    let mut value = parse_value("max(-2.5, -3)").unwrap();
    let PrimitiveValue::MathFunction(f) = value.primitive_mut().unwrap() else {
        panic!("expected max()");
    };
    f.set_expect_integer(true);
    let result = AbsoluteEvaluator
        .evaluate(value.as_primitive().unwrap())
        .unwrap();
    // Ties round toward positive infinity.
    assert_eq!(result.value, -2.0);
}

#[test]
fn test_unresolved_substitution_fails_evaluation() {
    assert!(matches!(
        AbsoluteEvaluator.evaluate(&primitive("calc(var(--x) * 2)")),
        Err(ValueError::Evaluation(_))
    ));
}
