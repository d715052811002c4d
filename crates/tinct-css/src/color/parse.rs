//! Parsing of `<color>` syntax.
//!
//! [CSS Color Module Level 4 § 4](https://www.w3.org/TR/css-color-4/#color-syntax)

use tracing::debug;

use crate::error::{Result, ValueError};
use crate::lexer::{LexicalUnit, Operator, parse_units};
use crate::sink::SerializeMode;
use crate::values::{PrimitiveValue, Translated, ready, translate_unit};

use super::profile::builtin;
use super::value::{ColorModel, ColorValue, Notation, hex_bytes};

const COLOR_FUNCTIONS: [&str; 10] = [
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
];

/// Whether `name` is a color function.
pub fn is_color_function(name: &str) -> bool {
    COLOR_FUNCTIONS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(name))
}

/// A hex color from the text of a hash token, with or without `#`.
pub fn color_from_hash(hash: &str) -> Option<ColorValue> {
    hex_bytes(hash).map(ColorValue::from_rgba8)
}

/// Parse a complete color: a hex color, a named color, `transparent` or a
/// color function.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for anything else, including colors that
/// depend on `var()` or `attr()`.
pub fn parse_color(text: &str) -> Result<ColorValue> {
    let units = parse_units(text)?;
    let color = match units.as_slice() {
        [LexicalUnit::Hash(hash)] => color_from_hash(hash),
        [LexicalUnit::Ident(name)] => ColorValue::named(name),
        [LexicalUnit::Function { name, params }] if is_color_function(name) => {
            match parse_color_function(name, params)? {
                Translated::Value(color) => Some(color),
                Translated::Deferred => {
                    return Err(ValueError::syntax(format!(
                        "'{}' depends on a substitution",
                        text.trim()
                    )));
                }
            }
        }
        _ => None,
    };
    color.ok_or_else(|| ValueError::syntax(format!("'{}' is not a color", text.trim())))
}

fn notation_for(name: &str, legacy: bool) -> Option<Notation> {
    let notation = match name {
        "rgb" | "rgba" => Notation::Rgb {
            alias: name == "rgba",
            legacy,
        },
        "hsl" | "hsla" => Notation::Hsl {
            alias: name == "hsla",
            legacy,
        },
        "hwb" => Notation::Hwb,
        "lab" => Notation::Lab,
        "lch" => Notation::Lch,
        "oklab" => Notation::Oklab,
        "oklch" => Notation::Oklch,
        _ => return None,
    };
    Some(notation)
}

/// Translate the parameters of a color function.
///
/// Parameters containing `var()` or `attr()` defer translation.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for a malformed component list, relative
/// color syntax and unknown color spaces.
pub(crate) fn parse_color_function(
    name: &str,
    params: &[LexicalUnit],
) -> Result<Translated<ColorValue>> {
    if params.iter().any(LexicalUnit::contains_proxy) {
        return Ok(Translated::Deferred);
    }
    if params.first().is_some_and(|u| u.is_ident("from")) {
        return Err(ValueError::syntax(format!(
            "relative color syntax is not supported in {name}()"
        )));
    }
    let name = name.to_ascii_lowercase();

    let (notation, params) = if name == "color" {
        // [§ 10.1 Specifying Predefined Colors](https://www.w3.org/TR/css-color-4/#color-function)
        // "color( [ <ident> | <dashed-ident> ] [ <number> | <percentage> | none ]{3} [ / <alpha-value> ]? )"
        let Some((LexicalUnit::Ident(space), rest)) = params.split_first() else {
            return Err(ValueError::syntax("color() needs a color space"));
        };
        let space = if space.starts_with("--") {
            space.clone()
        } else {
            let lowered = space.to_ascii_lowercase();
            if builtin(&lowered).is_none() {
                return Err(ValueError::syntax(format!("unknown color space '{space}'")));
            }
            lowered
        };
        (Notation::Color { space }, rest)
    } else {
        let legacy = params.iter().any(|u| u.is_operator(Operator::Comma));
        let notation = notation_for(&name, legacy)
            .ok_or_else(|| ValueError::syntax(format!("{name}() is not a color function")))?;
        (notation, params)
    };

    let model = notation.model();
    let legacy = notation.is_legacy();
    let (channels, alpha) = if legacy {
        legacy_components(&name, params)?
    } else {
        modern_components(&name, params)?
    };

    let mut components = Vec::with_capacity(4);
    components.push(match alpha {
        Some(unit) => ready!(component(&model, 0, unit, &name)?),
        None => PrimitiveValue::number(1.0),
    });
    for (i, unit) in channels.iter().enumerate() {
        components.push(ready!(component(&model, i + 1, unit, &name)?));
    }
    if legacy && components.iter().any(|c| c.as_ident().is_some()) {
        return Err(ValueError::syntax(format!(
            "'none' is not allowed in legacy {name}()"
        )));
    }
    let color = ColorValue::new(notation, components)?;
    debug!(function = %name, "parsed color");
    Ok(Translated::Value(color))
}

/// "rgb( <percentage>#{3} , <alpha-value>? )", "rgb( <number>#{3} , <alpha-value>? )"
fn legacy_components<'a>(
    name: &str,
    params: &'a [LexicalUnit],
) -> Result<(Vec<&'a LexicalUnit>, Option<&'a LexicalUnit>)> {
    let mut items = Vec::with_capacity(4);
    for group in params.split(|u| u.is_operator(Operator::Comma)) {
        match group {
            [unit] => items.push(unit),
            _ => {
                return Err(ValueError::syntax(format!(
                    "each argument of legacy {name}() must be a single value"
                )));
            }
        }
    }
    match items.len() {
        3 => Ok((items, None)),
        4 => {
            let alpha = items.pop();
            Ok((items, alpha))
        }
        n => Err(ValueError::syntax(format!(
            "{name}() takes 3 or 4 arguments, got {n}"
        ))),
    }
}

/// "[ <number> | <percentage> | none ]{3} [ / [ <alpha-value> | none ] ]?"
fn modern_components<'a>(
    name: &str,
    params: &'a [LexicalUnit],
) -> Result<(Vec<&'a LexicalUnit>, Option<&'a LexicalUnit>)> {
    let mut parts = params.split(|u| u.is_operator(Operator::Slash));
    let channels: Vec<&LexicalUnit> = parts.next().unwrap_or_default().iter().collect();
    let alpha = match (parts.next(), parts.next()) {
        (None, _) => None,
        (Some([unit]), None) => Some(unit),
        _ => {
            return Err(ValueError::syntax(format!(
                "{name}() takes a single alpha value after '/'"
            )));
        }
    };
    if channels.len() != 3 {
        return Err(ValueError::syntax(format!(
            "{name}() takes 3 components, got {}",
            channels.len()
        )));
    }
    Ok((channels, alpha))
}

fn component(
    model: &ColorModel,
    index: usize,
    unit: &LexicalUnit,
    name: &str,
) -> Result<Translated<PrimitiveValue>> {
    let value = match unit {
        LexicalUnit::Ident(ident) if ident.eq_ignore_ascii_case("none") => {
            PrimitiveValue::ident("none")
        }
        LexicalUnit::Number { .. }
        | LexicalUnit::Dimension { .. }
        | LexicalUnit::Percentage(_)
        | LexicalUnit::Function { .. } => ready!(translate_unit(unit)?),
        _ => PrimitiveValue::Unknown(unit.clone()),
    };
    if !model.accepts(index, &value) {
        return Err(ValueError::syntax(format!(
            "invalid component '{}' in {name}()",
            unit.css_text(SerializeMode::Canonical)
        )));
    }
    Ok(Translated::Value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_and_modern_rgb() {
        let legacy = parse_color("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(
            legacy.css_text(SerializeMode::Canonical),
            "rgba(255, 0, 0, 0.5)"
        );
        let modern = parse_color("rgb(255 0 0 / 50%)").unwrap();
        assert_eq!(
            modern.css_text(SerializeMode::Minified),
            "rgb(255 0 0/50%)"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_color("rgb(255 0)").is_err());
        assert!(parse_color("rgb(255, 0 0)").is_err());
        assert!(parse_color("rgb(none, 0, 0)").is_err());
        assert!(parse_color("hsl(10px 50% 50%)").is_err());
        assert!(parse_color("color(nonsense 1 0 0)").is_err());
        assert!(parse_color("rgb(from red r g b)").is_err());
        assert!(parse_color("notacolor").is_err());
    }

    #[test]
    fn test_proxy_defers() {
        let units = parse_units("var(--r) 0 0").unwrap();
        assert!(matches!(
            parse_color_function("rgb", &units),
            Ok(Translated::Deferred)
        ));
    }
}
