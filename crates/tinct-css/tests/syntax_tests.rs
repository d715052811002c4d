//! Integration tests for grammar matching.

use tinct_common::warning::has_warned;
use tinct_css::{Match, Multiplier, Syntax, SyntaxCategory, Value};

fn check(value: &str, syntax: &str) -> Match {
    let value = Value::parse(value).unwrap();
    let syntax = Syntax::parse(syntax).unwrap();
    value.matches(&syntax)
}

#[test]
fn test_parse_multipliers() {
    let syntax = Syntax::parse("<length>+ | <color># | <integer>* | none").unwrap();
    let parts: Vec<_> = syntax.iter().map(Syntax::multiplier).collect();
    assert_eq!(
        parts,
        vec![
            Multiplier::OneOrMore,
            Multiplier::CommaSeparated,
            Multiplier::ZeroOrMore,
            Multiplier::None,
        ]
    );
    assert_eq!(
        Syntax::parse("*").unwrap().category(),
        SyntaxCategory::Universal
    );
}

#[test]
fn test_single_primitives() {
    assert_eq!(check("10px", "<length>"), Match::True);
    assert_eq!(check("10px", "<percentage>"), Match::False);
    assert_eq!(check("0", "<length>"), Match::True);
    assert_eq!(check("3", "<integer>"), Match::True);
    assert_eq!(check("3.5", "<integer>"), Match::False);
    assert_eq!(check("45deg", "<angle>"), Match::True);
    assert_eq!(check("200ms", "<time>"), Match::True);
    assert_eq!(check("2x", "<resolution>"), Match::True);
    assert_eq!(check("1fr", "<flex>"), Match::True);
    assert_eq!(check("'hi'", "<string>"), Match::True);
    assert_eq!(check("url(a.png)", "<url>"), Match::True);
    assert_eq!(check("url(a.png)", "<image>"), Match::True);
    assert_eq!(check("16 / 9", "<ratio>"), Match::True);
    assert_eq!(check("U+0-7F", "<unicode-range>"), Match::True);
}

#[test]
fn test_keywords_and_idents() {
    assert_eq!(check("auto", "<length> | auto"), Match::True);
    assert_eq!(check("AUTO", "<length> | auto"), Match::True);
    assert_eq!(check("none", "<length> | auto"), Match::False);
    assert_eq!(check("my-name", "<custom-ident>"), Match::True);
    assert_eq!(check("ease-in-out", "<easing-function>"), Match::True);
}

#[test]
fn test_length_percentage_lists() {
    assert_eq!(check("10px 50%", "<length-percentage>+"), Match::True);
    assert_eq!(check("10px 50%", "<length>+"), Match::False);
    assert_eq!(check("10px 20px", "<length>+"), Match::True);
    assert_eq!(check("10px 20px", "<length>*"), Match::True);
}

#[test]
fn test_math_categories() {
    assert_eq!(check("calc(2 * 3)", "<integer>"), Match::True);
    assert_eq!(check("calc(2 * 3)", "<number>"), Match::True);
    assert_eq!(check("calc(1px + 50%)", "<length-percentage>"), Match::True);
    assert_eq!(check("calc(1px + 50%)", "<length>"), Match::False);
    assert_eq!(check("min(1px, 2em)", "<length>"), Match::True);
    assert_eq!(check("calc(1s + 2ms)", "<time>"), Match::True);
}

#[test]
fn test_substitutions_are_pending() {
    assert_eq!(check("var(--x)", "<length>"), Match::Pending);
    assert_eq!(check("1px var(--x)", "<length>+"), Match::Pending);
    assert_eq!(check("calc(var(--x) * 2)", "<length>"), Match::Pending);
}

#[test]
fn test_universal_and_wide_keywords() {
    assert_eq!(check("frobnicate(1, 2)", "*"), Match::True);
    assert_eq!(check("frobnicate(1, 2)", "<length>"), Match::False);
    assert_eq!(check("inherit", "<length>"), Match::True);
    assert_eq!(check("revert-layer", "<color>"), Match::True);
}

#[test]
fn test_colors() {
    assert_eq!(check("#ff0000", "<color>"), Match::True);
    assert_eq!(check("rebeccapurple", "<color>"), Match::True);
    assert_eq!(check("currentcolor", "<color>"), Match::True);
    assert_eq!(check("oklch(0.7 0.1 200)", "<color>"), Match::True);
    assert_eq!(check("red, #00f", "<color>#"), Match::True);
    assert_eq!(check("10px", "<color>"), Match::False);
}

#[test]
fn test_three_way_mix_is_flagged() {
    assert_eq!(check("10px 50% auto", "<length-percentage>+"), Match::False);
    assert!(has_warned(
        "syntax",
        "list mixes lengths, percentages and other values; each item must match one alternative"
    ));
}
