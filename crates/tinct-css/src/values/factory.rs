//! Translation of lexical units into typed values.
//!
//! A unit sequence becomes a keyword, a primitive, or a list. A substitution
//! (`var()`, `attr()`) nested where the surrounding value needs concrete
//! operands defers the whole value: it is kept as a
//! [`ProxyValue::Lexical`] and typed only after substitution.

use tracing::debug;

use crate::color::{color_from_hash, is_color_function, parse_color_function};
use crate::error::{Result, ValueError};
use crate::expr::{ExpressionValue, MathFunction, parse_calc, parse_math_function};
use crate::lexer::{LexicalUnit, Operator, parse_units};
use crate::units::CssUnit;

use super::function::{CounterValue, FunctionValue};
use super::keyword::CssWideKeyword;
use super::list::{ListSeparator, ValueList};
use super::primitive::{NumberValue, PrimitiveValue, RatioValue};
use super::proxy::ProxyValue;
use super::value::Value;

/// Outcome of translating a piece of a value.
#[derive(Debug)]
pub(crate) enum Translated<T> {
    /// The piece translated to a typed value.
    Value(T),
    /// The piece contains a substitution; the enclosing value must be kept
    /// unparsed until substitution.
    Deferred,
}

impl<T> Translated<T> {
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Translated<U> {
        match self {
            Self::Value(value) => Translated::Value(f(value)),
            Self::Deferred => Translated::Deferred,
        }
    }
}

/// Unwrap a [`Translated::Value`] or return [`Translated::Deferred`] from the
/// enclosing function.
macro_rules! ready {
    ($e:expr) => {
        match $e {
            $crate::values::Translated::Value(value) => value,
            $crate::values::Translated::Deferred => {
                return Ok($crate::values::Translated::Deferred);
            }
        }
    };
}
pub(crate) use ready;

/// Parse value text.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] when the text is not a valid value.
pub fn parse_value(text: &str) -> Result<Value> {
    value_from_units(&parse_units(text)?)
}

/// Translate a unit sequence into a value.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] when the units are not a valid value.
pub fn value_from_units(units: &[LexicalUnit]) -> Result<Value> {
    match units {
        [] => return Err(ValueError::syntax("empty value")),
        [LexicalUnit::Ident(name)] => {
            // [CSS Cascade § 7.3](https://www.w3.org/TR/css-cascade-5/#defaulting-keywords)
            if let Some(keyword) = CssWideKeyword::from_ident(name) {
                return Ok(Value::keyword(keyword));
            }
        }
        [unit] => {
            if let Some(proxy) = ProxyValue::from_unit(unit) {
                return Ok(Value::primitive(PrimitiveValue::Proxy(proxy)));
            }
        }
        _ => {
            // "...as the entire value of the property."
            if let Some(LexicalUnit::Ident(name)) = units
                .iter()
                .find(|u| matches!(u, LexicalUnit::Ident(n) if CssWideKeyword::from_ident(n).is_some()))
            {
                return Err(ValueError::syntax(format!(
                    "'{name}' must be the entire value"
                )));
            }
        }
    }

    match translate_sequence(units)? {
        Translated::Value(value) => Ok(value),
        Translated::Deferred => {
            debug!(units = units.len(), "value deferred until substitution");
            Ok(Value::primitive(PrimitiveValue::Proxy(ProxyValue::Lexical(
                units.to_vec(),
            ))))
        }
    }
}

/// Split `units` on `op`, rejecting empty pieces.
fn split_on(units: &[LexicalUnit], op: Operator) -> Result<Vec<&[LexicalUnit]>> {
    let pieces: Vec<&[LexicalUnit]> = units.split(|u| u.is_operator(op)).collect();
    if pieces.iter().any(|piece| piece.is_empty()) {
        return Err(ValueError::syntax(format!(
            "missing value around '{}'",
            op.as_str()
        )));
    }
    Ok(pieces)
}

/// A comma-separated sequence: one group, or a comma list of groups.
fn translate_sequence(units: &[LexicalUnit]) -> Result<Translated<Value>> {
    let groups = split_on(units, Operator::Comma)?;
    if let [group] = groups.as_slice() {
        return translate_group(group);
    }
    let mut items = Vec::with_capacity(groups.len());
    for group in groups {
        items.push(ready!(translate_group(group)?));
    }
    Ok(Translated::Value(ValueList::comma(items).into()))
}

/// A comma-free group: a ratio, a slash list, a single unit or a space list.
fn translate_group(units: &[LexicalUnit]) -> Result<Translated<Value>> {
    // [§ 5.7 Ratios](https://www.w3.org/TR/css-values-4/#ratios)
    // "<ratio> = <number [0,∞]> [ / <number [0,∞]> ]?"
    if let [
        LexicalUnit::Number { value: a, .. },
        LexicalUnit::Operator(Operator::Slash),
        LexicalUnit::Number { value: b, .. },
    ] = units
    {
        if *a >= 0.0 && *b >= 0.0 {
            return Ok(Translated::Value(Value::primitive(PrimitiveValue::Ratio(
                RatioValue {
                    numerator: *a,
                    denominator: *b,
                },
            ))));
        }
    }

    if units.iter().any(|u| u.is_operator(Operator::Slash)) {
        let mut items = Vec::new();
        for part in split_on(units, Operator::Slash)? {
            items.push(ready!(translate_space(part)?));
        }
        return Ok(Translated::Value(
            ValueList::new(ListSeparator::Slash, items).into(),
        ));
    }

    translate_space(units)
}

/// A single unit, or a space list of units.
fn translate_space(units: &[LexicalUnit]) -> Result<Translated<Value>> {
    if let [unit] = units {
        return Ok(translate_unit(unit)?.map(Value::primitive));
    }
    let mut items = Vec::with_capacity(units.len());
    for unit in units {
        items.push(Value::primitive(ready!(translate_unit(unit)?)));
    }
    Ok(Translated::Value(ValueList::space(items).into()))
}

/// Translate one unit into a primitive.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for operators outside math functions and
/// malformed function arguments.
pub(crate) fn translate_unit(unit: &LexicalUnit) -> Result<Translated<PrimitiveValue>> {
    let value = match unit {
        LexicalUnit::Ident(name) => PrimitiveValue::Ident(name.clone()),
        LexicalUnit::Number { value, integer } => PrimitiveValue::Number(NumberValue {
            value: *value,
            unit: CssUnit::Number,
            integer: *integer,
        }),
        LexicalUnit::Dimension { value, unit: u, .. } => {
            if *u == CssUnit::Invalid {
                PrimitiveValue::Unknown(unit.clone())
            } else {
                PrimitiveValue::dimension(*value, *u)
            }
        }
        LexicalUnit::Percentage(value) => PrimitiveValue::Number(NumberValue::percentage(*value)),
        LexicalUnit::String { value, quote } => PrimitiveValue::String {
            value: value.clone(),
            quote: *quote,
        },
        LexicalUnit::Hash(hash) => match color_from_hash(hash) {
            Some(color) => color.into(),
            None => PrimitiveValue::Unknown(unit.clone()),
        },
        LexicalUnit::Function { name, params } => return translate_function(name, params),
        LexicalUnit::Brackets(_) => PrimitiveValue::Unknown(unit.clone()),
        LexicalUnit::SubExpression(_) => {
            return Err(ValueError::syntax(
                "parenthesized group outside a math function",
            ));
        }
        LexicalUnit::Operator(op) => {
            return Err(ValueError::syntax(format!(
                "unexpected '{}' in value",
                op.as_str()
            )));
        }
        LexicalUnit::Uri(url) => PrimitiveValue::Uri(url.clone()),
        LexicalUnit::UnicodeRange { start, end } => PrimitiveValue::UnicodeRange {
            start: *start,
            end: *end,
        },
        LexicalUnit::UnicodeWildcard(text) => PrimitiveValue::UnicodeWildcard(text.clone()),
        LexicalUnit::Var { .. } | LexicalUnit::Attr { .. } => return Ok(Translated::Deferred),
    };
    Ok(Translated::Value(value))
}

const GRADIENTS: &[&str] = &[
    "linear-gradient",
    "radial-gradient",
    "conic-gradient",
    "repeating-linear-gradient",
    "repeating-radial-gradient",
    "repeating-conic-gradient",
];

const TRANSFORMS: &[&str] = &[
    "matrix",
    "matrix3d",
    "translate",
    "translatex",
    "translatey",
    "translatez",
    "translate3d",
    "scale",
    "scalex",
    "scaley",
    "scalez",
    "scale3d",
    "rotate",
    "rotatex",
    "rotatey",
    "rotatez",
    "rotate3d",
    "skew",
    "skewx",
    "skewy",
    "perspective",
];

const SHAPES: &[&str] = &["inset", "circle", "ellipse", "polygon", "rect", "xywh"];

const EASINGS: &[&str] = &["cubic-bezier", "steps", "linear"];

fn translate_function(name: &str, params: &[LexicalUnit]) -> Result<Translated<PrimitiveValue>> {
    // [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
    if name == "calc" || name == "-webkit-calc" {
        return Ok(parse_calc(params)?
            .map(|tree| PrimitiveValue::Expression(Box::new(ExpressionValue::new(tree)))));
    }
    if let Some(function) = MathFunction::from_name(name) {
        return Ok(parse_math_function(function, params)?
            .map(|value| PrimitiveValue::MathFunction(Box::new(value))));
    }
    if is_color_function(name) {
        return Ok(parse_color_function(name, params)?.map(PrimitiveValue::from));
    }
    if params.iter().any(LexicalUnit::contains_proxy) {
        return Ok(Translated::Deferred);
    }

    let value = match name {
        "counter" | "counters" => PrimitiveValue::Counter(counter(name, params)?),
        "path" => match params {
            [LexicalUnit::String { value, .. }] => PrimitiveValue::Path(value.clone()),
            _ => return Err(ValueError::syntax("path() takes a single string")),
        },
        "element" => match params {
            [LexicalUnit::Hash(id)] => PrimitiveValue::ElementReference(id.clone()),
            _ => return Err(ValueError::syntax("element() takes an #id")),
        },
        _ if GRADIENTS.contains(&name) => {
            PrimitiveValue::Gradient(ready!(function_value(name, params)?))
        }
        _ if TRANSFORMS.contains(&name) => {
            PrimitiveValue::TransformFunction(ready!(function_value(name, params)?))
        }
        _ if SHAPES.contains(&name) => PrimitiveValue::Shape(ready!(function_value(name, params)?)),
        _ if EASINGS.contains(&name) => {
            PrimitiveValue::EasingFunction(ready!(function_value(name, params)?))
        }
        _ => PrimitiveValue::Function(ready!(function_value(name, params)?)),
    };
    Ok(Translated::Value(value))
}

/// A generic function: one argument value per comma-separated group.
fn function_value(name: &str, params: &[LexicalUnit]) -> Result<Translated<FunctionValue>> {
    if params.is_empty() {
        return Ok(Translated::Value(FunctionValue::new(
            name,
            ValueList::comma(Vec::new()),
        )));
    }
    let mut arguments = Vec::new();
    for group in split_on(params, Operator::Comma)? {
        arguments.push(ready!(translate_group(group)?));
    }
    Ok(Translated::Value(FunctionValue::new(
        name,
        ValueList::comma(arguments),
    )))
}

/// [CSS Lists § 4.2](https://www.w3.org/TR/css-lists-3/#counter-functions)
fn counter(name: &str, params: &[LexicalUnit]) -> Result<CounterValue> {
    let groups = split_on(params, Operator::Comma)?;
    let ident = |group: &[LexicalUnit]| match group {
        [LexicalUnit::Ident(ident)] => Ok(ident.clone()),
        _ => Err(ValueError::syntax(format!("{name}() expects an identifier"))),
    };
    match (name, groups.as_slice()) {
        ("counter", [counter_name]) => Ok(CounterValue {
            name: ident(*counter_name)?,
            separator: None,
            style: None,
        }),
        ("counter", [counter_name, style]) => Ok(CounterValue {
            name: ident(*counter_name)?,
            separator: None,
            style: Some(ident(*style)?),
        }),
        ("counters", [counter_name, separator, rest @ ..]) if rest.len() <= 1 => {
            let [LexicalUnit::String { value, .. }] = separator else {
                return Err(ValueError::syntax("counters() expects a separator string"));
            };
            Ok(CounterValue {
                name: ident(*counter_name)?,
                separator: Some(value.clone()),
                style: rest.first().map(|style| ident(*style)).transpose()?,
            })
        }
        _ => Err(ValueError::syntax(format!(
            "wrong number of arguments to {name}()"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{CssKind, PrimitiveType, ValueKind};

    #[test]
    fn test_css_wide_keyword_alone() {
        let value = parse_value("INHERIT").unwrap();
        assert_eq!(value.css_kind(), CssKind::Keyword);
        assert_eq!(value.primitive_type(), Some(PrimitiveType::Inherit));
        assert!(parse_value("1px inherit").is_err());
    }

    #[test]
    fn test_nested_var_defers_value() {
        let value = parse_value("1px var(--gap)").unwrap();
        assert_eq!(value.primitive_type(), Some(PrimitiveType::Lexical));
        assert_eq!(value.css_text(), "1px var(--gap)");
    }

    #[test]
    fn test_ratio_and_slash_list() {
        let ratio = parse_value("16 / 9").unwrap();
        assert_eq!(ratio.primitive_type(), Some(PrimitiveType::Ratio));
        assert_eq!(ratio.minified_text(), "16/9");

        let slash = parse_value("1px 2px / 3px").unwrap();
        let ValueKind::List(list) = slash.kind() else {
            panic!("expected a list");
        };
        assert_eq!(list.separator(), ListSeparator::Slash);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_counters_arguments() {
        let value = parse_value("counters(item, \".\", upper-roman)").unwrap();
        assert_eq!(value.primitive_type(), Some(PrimitiveType::Counters));
        assert!(parse_value("counters(item)").is_err());
    }
}
