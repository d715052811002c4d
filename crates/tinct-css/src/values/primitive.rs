use std::io;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::color::ColorValue;
use crate::expr::{ExpressionValue, MathFunctionValue};
use crate::lexer::LexicalUnit;
use crate::sink::{SerializeMode, SimpleWriter, to_text, write_ident, write_number, write_string};
use crate::units::{CssUnit, UnitCategory};

use super::function::{CounterValue, FunctionValue};
use super::proxy::ProxyValue;

/// The fine-grained type tag of a typed or proxy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum PrimitiveType {
    /// `<number>`
    Number,
    /// `<percentage>`
    Percentage,
    /// A number with a unit.
    Dimension,
    /// An identifier.
    Ident,
    /// A quoted string.
    String,
    /// `<color>`
    Color,
    /// `<ratio>`
    Ratio,
    /// `calc()`
    Expression,
    /// `min()`, `clamp()`, `sin()`...
    MathFunction,
    /// Any other function.
    Function,
    /// `<transform-function>`
    TransformFunction,
    /// `<gradient>`
    Gradient,
    /// `<basic-shape>`
    Shape,
    /// `path()`
    Path,
    /// `cubic-bezier()`, `steps()`, `linear()`
    EasingFunction,
    /// `counter()`
    Counter,
    /// `counters()`
    Counters,
    /// `U+0-7F`
    UnicodeRange,
    /// `U+4??`
    UnicodeWildcard,
    /// `url()`
    Uri,
    /// `element()`
    ElementReference,
    /// `var()`
    Var,
    /// `attr()`
    Attr,
    /// A token sequence that can only be typed after substitution.
    Lexical,
    /// A value the translator does not recognize.
    Unknown,
    /// `initial`
    Initial,
    /// `inherit`
    Inherit,
    /// `unset`
    Unset,
    /// `revert`
    Revert,
    /// `revert-layer`
    RevertLayer,
}

/// [§ 4 Numeric Data Types](https://www.w3.org/TR/css-values-4/#numeric-types)
///
/// A number, percentage or dimension.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumberValue {
    /// The numeric value.
    pub value: f64,
    /// The unit ([`CssUnit::Number`] for a plain number).
    pub unit: CssUnit,
    /// Whether the number was written as an integer.
    pub integer: bool,
}

impl NumberValue {
    /// A value with a unit.
    pub const fn new(value: f64, unit: CssUnit) -> Self {
        Self {
            value,
            unit,
            integer: false,
        }
    }

    /// A plain number; integral values are flagged as integers.
    pub fn number(value: f64) -> Self {
        Self {
            value,
            unit: CssUnit::Number,
            integer: value.is_finite() && value.fract() == 0.0,
        }
    }

    /// A percentage.
    pub const fn percentage(value: f64) -> Self {
        Self::new(value, CssUnit::Percentage)
    }

    /// The unit category.
    pub const fn category(&self) -> UnitCategory {
        self.unit.category()
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        write_number(w, self.value, mode)?;
        w.write_str(self.unit.as_str())
    }
}

/// The integer flag records how the number was written; it does not take part
/// in equality.
impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && (self.value == other.value || (self.value.is_nan() && other.value.is_nan()))
    }
}

/// [§ 5.7 Ratios](https://www.w3.org/TR/css-values-4/#ratios)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioValue {
    /// The number before the slash.
    pub numerator: f64,
    /// The number after the slash.
    pub denominator: f64,
}

impl RatioValue {
    /// `numerator / denominator`
    pub fn value(&self) -> f64 {
        self.numerator / self.denominator
    }
}

/// A typed or proxy value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// A number, percentage or dimension.
    Number(NumberValue),
    /// An identifier.
    Ident(String),
    /// A quoted string.
    String {
        /// The unescaped contents.
        value: String,
        /// The quote character it was written with.
        quote: char,
    },
    /// A color.
    Color(Box<ColorValue>),
    /// `a / b`
    Ratio(RatioValue),
    /// `calc()`
    Expression(Box<ExpressionValue>),
    /// A math function.
    MathFunction(Box<MathFunctionValue>),
    /// A function with no more specific type.
    Function(FunctionValue),
    /// [CSS Transforms § 9](https://www.w3.org/TR/css-transforms-1/#transform-functions)
    TransformFunction(FunctionValue),
    /// [CSS Images § 3](https://www.w3.org/TR/css-images-3/#gradients)
    Gradient(FunctionValue),
    /// [CSS Shapes § 3](https://www.w3.org/TR/css-shapes-1/#basic-shape-functions)
    Shape(FunctionValue),
    /// `path("...")`
    Path(String),
    /// [CSS Easing § 2](https://www.w3.org/TR/css-easing-1/#easing-functions)
    EasingFunction(FunctionValue),
    /// `counter()` / `counters()`
    Counter(CounterValue),
    /// `U+start-end`
    UnicodeRange {
        /// First code point.
        start: u32,
        /// Last code point.
        end: u32,
    },
    /// `U+4??`
    UnicodeWildcard(String),
    /// `url()`
    Uri(String),
    /// `element(#id)`
    ElementReference(String),
    /// A deferred substitution.
    Proxy(ProxyValue),
    /// A unit the translator does not recognize, kept verbatim.
    Unknown(LexicalUnit),
}

impl PrimitiveValue {
    /// A plain number.
    pub fn number(value: f64) -> Self {
        Self::Number(NumberValue::number(value))
    }

    /// A dimension or percentage.
    pub const fn dimension(value: f64, unit: CssUnit) -> Self {
        Self::Number(NumberValue::new(value, unit))
    }

    /// An identifier.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// The type tag.
    pub const fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Number(n) => match n.unit {
                CssUnit::Number => PrimitiveType::Number,
                CssUnit::Percentage => PrimitiveType::Percentage,
                _ => PrimitiveType::Dimension,
            },
            Self::Ident(_) => PrimitiveType::Ident,
            Self::String { .. } => PrimitiveType::String,
            Self::Color(_) => PrimitiveType::Color,
            Self::Ratio(_) => PrimitiveType::Ratio,
            Self::Expression(_) => PrimitiveType::Expression,
            Self::MathFunction(_) => PrimitiveType::MathFunction,
            Self::Function(_) => PrimitiveType::Function,
            Self::TransformFunction(_) => PrimitiveType::TransformFunction,
            Self::Gradient(_) => PrimitiveType::Gradient,
            Self::Shape(_) => PrimitiveType::Shape,
            Self::Path(_) => PrimitiveType::Path,
            Self::EasingFunction(_) => PrimitiveType::EasingFunction,
            Self::Counter(c) => {
                if c.separator.is_some() {
                    PrimitiveType::Counters
                } else {
                    PrimitiveType::Counter
                }
            }
            Self::UnicodeRange { .. } => PrimitiveType::UnicodeRange,
            Self::UnicodeWildcard(_) => PrimitiveType::UnicodeWildcard,
            Self::Uri(_) => PrimitiveType::Uri,
            Self::ElementReference(_) => PrimitiveType::ElementReference,
            Self::Proxy(p) => p.primitive_type(),
            Self::Unknown(_) => PrimitiveType::Unknown,
        }
    }

    /// Whether this is a proxy value.
    pub const fn is_proxy(&self) -> bool {
        matches!(self, Self::Proxy(_))
    }

    /// Whether this value, or an operand nested in it, is a proxy.
    pub fn contains_proxy(&self) -> bool {
        match self {
            Self::Proxy(_) => true,
            Self::Expression(e) => e.tree().contains_proxy(),
            Self::MathFunction(f) => f.contains_proxy(),
            _ => false,
        }
    }

    /// The number, if this is a number, percentage or dimension.
    pub const fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The identifier, if this is one.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// The color, if this is one.
    pub fn as_color(&self) -> Option<&ColorValue> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        match self {
            Self::Number(n) => n.write_css(w, mode),
            Self::Ident(name) => write_ident(w, name),
            Self::String { value, quote } => write_string(w, value, *quote),
            Self::Color(color) => color.write_css(w, mode),
            Self::Ratio(ratio) => {
                write_number(w, ratio.numerator, mode)?;
                w.write_str(if mode.is_minified() { "/" } else { " / " })?;
                write_number(w, ratio.denominator, mode)
            }
            Self::Expression(e) => e.write_css(w, mode),
            Self::MathFunction(f) => f.write_css(w, mode),
            Self::Function(f)
            | Self::TransformFunction(f)
            | Self::Gradient(f)
            | Self::Shape(f)
            | Self::EasingFunction(f) => f.write_css(w, mode),
            Self::Path(data) => {
                w.write_str("path(")?;
                write_string(w, data, '"')?;
                w.write_char(')')
            }
            Self::Counter(counter) => counter.write_css(w, mode),
            Self::UnicodeRange { start, end } => {
                LexicalUnit::UnicodeRange {
                    start: *start,
                    end: *end,
                }
                .write_css(w, mode)
            }
            Self::UnicodeWildcard(text) => {
                w.write_str("U+")?;
                w.write_str(text)
            }
            Self::Uri(url) => LexicalUnit::Uri(url.clone()).write_css(w, mode),
            Self::ElementReference(id) => {
                w.write_str("element(#")?;
                write_ident(w, id)?;
                w.write_char(')')
            }
            Self::Proxy(proxy) => proxy.write_css(w, mode),
            Self::Unknown(unit) => unit.write_css(w, mode),
        }
    }

    /// This value as CSS text.
    pub fn css_text(&self, mode: SerializeMode) -> String {
        to_text(|buf| self.write_css(buf, mode))
    }
}

impl From<NumberValue> for PrimitiveValue {
    fn from(value: NumberValue) -> Self {
        Self::Number(value)
    }
}

impl From<ColorValue> for PrimitiveValue {
    fn from(value: ColorValue) -> Self {
        Self::Color(Box::new(value))
    }
}
