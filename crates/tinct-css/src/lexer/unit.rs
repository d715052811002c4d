//! Lexical units: the token stream values are translated from.
//!
//! A value is a `Vec<LexicalUnit>`; the "next unit" is the successor in the
//! vector and function parameters are a nested vector. Whitespace is not a
//! unit: adjacent units are whitespace-separated, commas are explicit
//! [`Operator::Comma`] units.

use std::io;

use serde::Serialize;

use crate::sink::{SerializeMode, SimpleWriter, to_text, write_ident, write_number, write_string};
use crate::units::CssUnit;

/// [§ 10.1 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#calc-syntax)
/// and the separators of component value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// `,`
    Comma,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Slash,
    /// `^`
    Exponent,
    /// `~`
    Tilde,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `=`
    Equals,
}

impl Operator {
    /// The operator's text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Slash => "/",
            Self::Exponent => "^",
            Self::Tilde => "~",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Equals => "=",
        }
    }
}

/// One unit of lexical input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LexicalUnit {
    /// An identifier, e.g. `auto`.
    Ident(String),

    /// A `<number>`; `integer` is set when it was written without a fraction
    /// or exponent.
    Number {
        /// The numeric value.
        value: f64,
        /// Whether the number was written as an integer.
        integer: bool,
    },

    /// A number followed by a unit.
    Dimension {
        /// The numeric value.
        value: f64,
        /// The recognized unit, or [`CssUnit::Invalid`].
        unit: CssUnit,
        /// The unit exactly as written.
        unit_text: String,
    },

    /// A number followed by `%`.
    Percentage(f64),

    /// A quoted string.
    String {
        /// The unescaped contents.
        value: String,
        /// The quote the string was written with.
        quote: char,
    },

    /// `#` followed by an ident sequence (hex colors, element ids).
    Hash(String),

    /// A function with its parameters.
    Function {
        /// The ASCII-lowercased function name.
        name: String,
        /// The parameters between the parentheses.
        params: Vec<LexicalUnit>,
    },

    /// A parenthesized group inside a math function.
    SubExpression(Vec<LexicalUnit>),

    /// A `[ ... ]` block.
    Brackets(Vec<LexicalUnit>),

    /// An operator or separator.
    Operator(Operator),

    /// `url(...)`
    Uri(String),

    /// `U+0-7F`
    UnicodeRange {
        /// First code point.
        start: u32,
        /// Last code point (equal to `start` for a single code point).
        end: u32,
    },

    /// `U+4??` (text after `U+`).
    UnicodeWildcard(String),

    /// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
    ///
    /// `var( <custom-property-name> [, <declaration-value>? ]? )`
    Var {
        /// The custom property name, including `--`.
        name: String,
        /// The fallback after the comma (possibly empty).
        fallback: Option<Vec<LexicalUnit>>,
    },

    /// [CSS Values § 7.7](https://www.w3.org/TR/css-values-5/#attr-notation)
    ///
    /// `attr( <attr-name> <attr-type>? [, <declaration-value>? ]? )`
    Attr {
        /// The attribute name.
        name: String,
        /// The attribute type or unit keyword.
        type_or_unit: Option<String>,
        /// The fallback after the comma (possibly empty).
        fallback: Option<Vec<LexicalUnit>>,
    },
}

impl LexicalUnit {
    /// Whether this is one of the proxy kinds whose value is only known after
    /// substitution.
    pub const fn is_proxy(&self) -> bool {
        matches!(self, Self::Var { .. } | Self::Attr { .. })
    }

    /// Whether this unit, or any unit nested in it, is a proxy.
    pub fn contains_proxy(&self) -> bool {
        match self {
            Self::Var { .. } | Self::Attr { .. } => true,
            Self::Function { params, .. } => params.iter().any(Self::contains_proxy),
            Self::SubExpression(units) | Self::Brackets(units) => {
                units.iter().any(Self::contains_proxy)
            }
            _ => false,
        }
    }

    /// Whether this is the given operator.
    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Self::Operator(o) if *o == op)
    }

    /// Whether this is an identifier equal (ASCII case-insensitive) to `ident`.
    pub fn is_ident(&self, ident: &str) -> bool {
        matches!(self, Self::Ident(name) if name.eq_ignore_ascii_case(ident))
    }

    /// Write this unit as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        match self {
            Self::Ident(name) => write_ident(w, name),
            Self::Number { value, .. } => write_number(w, *value, mode),
            Self::Dimension {
                value, unit_text, ..
            } => {
                write_number(w, *value, mode)?;
                w.write_str(unit_text)
            }
            Self::Percentage(value) => {
                write_number(w, *value, mode)?;
                w.write_char('%')
            }
            Self::String { value, quote } => write_string(w, value, *quote),
            Self::Hash(value) => {
                w.write_char('#')?;
                w.write_str(value)
            }
            Self::Function { name, params } => {
                w.write_str(name)?;
                w.write_char('(')?;
                write_units(w, params, mode)?;
                w.write_char(')')
            }
            Self::SubExpression(units) => {
                w.write_char('(')?;
                write_units(w, units, mode)?;
                w.write_char(')')
            }
            Self::Brackets(units) => {
                w.write_char('[')?;
                write_units(w, units, mode)?;
                w.write_char(']')
            }
            Self::Operator(op) => w.write_str(op.as_str()),
            Self::Uri(url) => {
                w.write_str("url(")?;
                write_string(w, url, '"')?;
                w.write_char(')')
            }
            Self::UnicodeRange { start, end } => {
                w.write_str(&format!("U+{start:X}"))?;
                if end != start {
                    w.write_str(&format!("-{end:X}"))?;
                }
                Ok(())
            }
            Self::UnicodeWildcard(text) => {
                w.write_str("U+")?;
                w.write_str(text)
            }
            Self::Var { name, fallback } => {
                w.write_str("var(")?;
                w.write_str(name)?;
                write_fallback(w, fallback.as_deref(), mode)?;
                w.write_char(')')
            }
            Self::Attr {
                name,
                type_or_unit,
                fallback,
            } => {
                w.write_str("attr(")?;
                write_ident(w, name)?;
                if let Some(t) = type_or_unit {
                    w.write_char(' ')?;
                    w.write_str(t)?;
                }
                write_fallback(w, fallback.as_deref(), mode)?;
                w.write_char(')')
            }
        }
    }

    /// This unit as CSS text.
    pub fn css_text(&self, mode: SerializeMode) -> String {
        to_text(|buf| self.write_css(buf, mode))
    }
}

fn write_fallback(
    w: &mut dyn SimpleWriter,
    fallback: Option<&[LexicalUnit]>,
    mode: SerializeMode,
) -> io::Result<()> {
    if let Some(units) = fallback {
        w.write_char(',')?;
        if !units.is_empty() && !mode.is_minified() {
            w.write_char(' ')?;
        }
        write_units(w, units, mode)?;
    }
    Ok(())
}

/// Write a unit sequence, separating adjacent units with whitespace.
///
/// # Errors
///
/// Returns the sink's I/O error.
pub fn write_units(
    w: &mut dyn SimpleWriter,
    units: &[LexicalUnit],
    mode: SerializeMode,
) -> io::Result<()> {
    let mut previous: Option<&LexicalUnit> = None;
    for unit in units {
        if let Some(prev) = previous {
            let tight = unit.is_operator(Operator::Comma)
                || (mode.is_minified()
                    && (prev.is_operator(Operator::Comma)
                        || prev.is_operator(Operator::Slash)
                        || unit.is_operator(Operator::Slash)));
            if !tight {
                w.write_char(' ')?;
            }
        }
        unit.write_css(w, mode)?;
        previous = Some(unit);
    }
    Ok(())
}

/// A unit sequence as CSS text.
pub fn units_text(units: &[LexicalUnit], mode: SerializeMode) -> String {
    to_text(|buf| write_units(buf, units, mode))
}
