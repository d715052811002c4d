//! Matching values against a [`Syntax`] chain.
//!
//! [§ 5.5 Matching a value against a syntax](https://www.w3.org/TR/css-properties-values-api-1/#calculation-of-computed-values)

use tinct_common::warning::warn_once;
use tracing::trace;

use crate::color::is_color_keyword;
use crate::expr::ResultCategory;
use crate::units::UnitCategory;
use crate::values::{CssWideKeyword, ListSeparator, PrimitiveValue, Value, ValueKind, ValueList};

use super::{Match, Multiplier, Syntax, SyntaxCategory};

/// [CSS Easing § 2.1](https://www.w3.org/TR/css-easing-1/#easing-functions)
const EASING_KEYWORDS: &[&str] = &[
    "linear",
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
];

/// [CSS Images § 2](https://www.w3.org/TR/css-images-4/#image-values)
const IMAGE_FUNCTIONS: &[&str] = &["image", "image-set", "-webkit-image-set", "cross-fade"];

impl Match {
    /// Both outcomes hold: `False` wins over `Pending`, `Pending` over `True`.
    const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::Pending, _) | (_, Self::Pending) => Self::Pending,
            (Self::True, Self::True) => Self::True,
        }
    }
}

/// Match `value` against the alternatives of `syntax`.
///
/// CSS-wide keywords and the universal syntax always match. Values that
/// still contain a `var()` or `attr()` are [`Match::Pending`]. Otherwise the
/// first alternative that accepts the whole value wins; a list must be
/// accepted item by item by one alternative.
pub fn matches(value: &Value, syntax: &Syntax) -> Match {
    if matches!(value.kind(), ValueKind::Keyword(_)) {
        return Match::True;
    }
    if syntax
        .iter()
        .any(|alt| alt.category() == SyntaxCategory::Universal)
    {
        return Match::True;
    }
    if value.contains_proxy() {
        return Match::Pending;
    }
    let result = match value.kind() {
        ValueKind::Keyword(_) => Match::True,
        ValueKind::Primitive(p) => first_match(syntax, |alt| match_primitive(p, alt)),
        ValueKind::List(list) => match_list(list, syntax),
        ValueKind::Shorthand(_) => Match::False,
    };
    trace!(syntax = %syntax, %result, "matched value");
    result
}

fn first_match(syntax: &Syntax, mut match_alt: impl FnMut(&Syntax) -> Match) -> Match {
    let mut result = Match::False;
    for alt in syntax.iter() {
        match match_alt(alt) {
            Match::True => return Match::True,
            Match::Pending => result = Match::Pending,
            Match::False => {}
        }
    }
    result
}

/// How a list item takes part in length/percentage unification.
#[derive(Default)]
struct Witnessed {
    length: bool,
    percentage: bool,
    other: bool,
}

impl Witnessed {
    fn collect(list: &ValueList) -> Self {
        let mut seen = Self::default();
        for item in list.iter() {
            match item.as_primitive() {
                Some(PrimitiveValue::Number(n)) => match n.category() {
                    UnitCategory::Length => seen.length = true,
                    UnitCategory::Percentage => seen.percentage = true,
                    UnitCategory::Number if n.value == 0.0 => seen.length = true,
                    _ => seen.other = true,
                },
                Some(PrimitiveValue::Expression(e)) => match e.analyze() {
                    Ok(ResultCategory::Length) => seen.length = true,
                    Ok(ResultCategory::Percentage) => seen.percentage = true,
                    Ok(ResultCategory::LengthPercentage) => {
                        seen.length = true;
                        seen.percentage = true;
                    }
                    _ => seen.other = true,
                },
                _ => seen.other = true,
            }
        }
        seen
    }
}

fn match_list(list: &ValueList, syntax: &Syntax) -> Match {
    let seen = Witnessed::collect(list);
    if seen.length && seen.percentage && seen.other {
        warn_once(
            "syntax",
            "list mixes lengths, percentages and other values; each item must match one alternative",
        );
    }
    first_match(syntax, |alt| {
        let accepts_shape = match (alt.multiplier(), list.separator()) {
            (Multiplier::ZeroOrMore, ListSeparator::Space) => true,
            (Multiplier::OneOrMore, ListSeparator::Space)
            | (Multiplier::CommaSeparated, ListSeparator::Comma) => !list.is_empty(),
            // "<transform-list>" is itself a space-separated list.
            (Multiplier::None, ListSeparator::Space) => {
                alt.category() == SyntaxCategory::TransformList && !list.is_empty()
            }
            _ => false,
        };
        if !accepts_shape {
            return Match::False;
        }
        list.iter()
            .map(|item| match_item(item, alt))
            .fold(Match::True, Match::and)
    })
}

fn match_item(item: &Value, alt: &Syntax) -> Match {
    match item.kind() {
        ValueKind::Primitive(p) => match_primitive(p, alt),
        ValueKind::Keyword(_) | ValueKind::List(_) | ValueKind::Shorthand(_) => Match::False,
    }
}

fn match_primitive(value: &PrimitiveValue, alt: &Syntax) -> Match {
    use SyntaxCategory as C;

    let category = alt.category();
    let matched = match value {
        PrimitiveValue::Proxy(_) => return Match::Pending,
        PrimitiveValue::Expression(e) => return match_analysis(e.analyze().ok(), category),
        PrimitiveValue::MathFunction(f) => return match_analysis(f.analyze().ok(), category),
        PrimitiveValue::Number(n) => match n.category() {
            UnitCategory::Number => match category {
                C::Number => true,
                C::Integer => n.integer,
                C::Ratio => n.value >= 0.0,
                // "0" is a valid length.
                C::Length | C::LengthPercentage => n.value == 0.0,
                _ => false,
            },
            UnitCategory::Percentage => matches!(category, C::Percentage | C::LengthPercentage),
            UnitCategory::Length => matches!(category, C::Length | C::LengthPercentage),
            UnitCategory::Angle => category == C::Angle,
            UnitCategory::Time => category == C::Time,
            UnitCategory::Frequency => category == C::Frequency,
            UnitCategory::Resolution => category == C::Resolution,
            UnitCategory::Flex => category == C::Flex,
            UnitCategory::Invalid => false,
        },
        PrimitiveValue::Ident(name) => match category {
            C::Ident => alt
                .keyword_text()
                .is_some_and(|keyword| keyword.eq_ignore_ascii_case(name)),
            // [CSS Values § 3.2](https://www.w3.org/TR/css-values-4/#custom-idents)
            C::CustomIdent => {
                CssWideKeyword::from_ident(name).is_none() && !name.eq_ignore_ascii_case("default")
            }
            C::Color => is_color_keyword(name),
            C::EasingFunction => EASING_KEYWORDS
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(name)),
            _ => false,
        },
        PrimitiveValue::String { .. } => category == C::String,
        PrimitiveValue::Color(_) => category == C::Color,
        PrimitiveValue::Ratio(_) => category == C::Ratio,
        PrimitiveValue::Uri(_) => matches!(category, C::Url | C::Image),
        PrimitiveValue::Gradient(_) | PrimitiveValue::ElementReference(_) => category == C::Image,
        PrimitiveValue::Function(f) => {
            category == C::Image && IMAGE_FUNCTIONS.contains(&f.name.as_str())
        }
        PrimitiveValue::TransformFunction(_) => {
            matches!(category, C::TransformFunction | C::TransformList)
        }
        PrimitiveValue::Shape(_) | PrimitiveValue::Path(_) => category == C::BasicShape,
        PrimitiveValue::EasingFunction(_) => category == C::EasingFunction,
        PrimitiveValue::Counter(_) => category == C::Counter,
        PrimitiveValue::UnicodeRange { .. } | PrimitiveValue::UnicodeWildcard(_) => {
            category == C::UnicodeRange
        }
        PrimitiveValue::Unknown(_) => false,
    };
    matched.into()
}

/// Match the statically inferred category of a math expression. A failed or
/// unknown analysis only matches the universal syntax, which was checked
/// before.
fn match_analysis(result: Option<ResultCategory>, category: SyntaxCategory) -> Match {
    use ResultCategory as R;
    use SyntaxCategory as C;

    let Some(result) = result else {
        return Match::False;
    };
    let matched = match result {
        // A number-typed calculation is rounded when an integer is expected.
        R::Number | R::Integer => matches!(category, C::Number | C::Integer),
        R::Length => matches!(category, C::Length | C::LengthPercentage),
        R::Percentage => matches!(category, C::Percentage | C::LengthPercentage),
        R::LengthPercentage => category == C::LengthPercentage,
        R::Angle => category == C::Angle,
        R::Time => category == C::Time,
        R::Frequency => category == C::Frequency,
        R::Resolution => category == C::Resolution,
        R::Flex => category == C::Flex,
        R::Unknown => false,
    };
    matched.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: &str, syntax: &str) -> Match {
        matches(
            &Value::parse(value).unwrap(),
            &Syntax::parse(syntax).unwrap(),
        )
    }

    #[test]
    fn test_same_alternative_for_every_item() {
        assert_eq!(check("10px 50%", "<length>+ | <percentage>+"), Match::False);
        assert_eq!(check("10px 50%", "<length-percentage>+"), Match::True);
        assert_eq!(check("10px 20px", "<length>"), Match::False);
    }

    #[test]
    fn test_comma_lists_need_hash() {
        assert_eq!(check("1px, 2px", "<length>+"), Match::False);
        assert_eq!(check("1px, 2px", "<length>#"), Match::True);
        assert_eq!(check("1px", "<length>#"), Match::True);
    }

    #[test]
    fn test_transform_list() {
        assert_eq!(
            check("rotate(10deg) scale(2)", "<transform-list>"),
            Match::True
        );
        assert_eq!(check("rotate(10deg)", "<transform-function>"), Match::True);
    }
}
