use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
///
/// The math functions other than `calc()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum MathFunction {
    /// [§ 10.4 Comparison Functions](https://www.w3.org/TR/css-values-4/#comp-func)
    Min,
    /// `max()`
    Max,
    /// `clamp(MIN, VAL, MAX)`
    Clamp,
    /// [§ 10.5 Stepped Value Functions](https://www.w3.org/TR/css-values-4/#round-func)
    Round,
    /// `mod()`: result has the sign of the divisor.
    Mod,
    /// `rem()`: result has the sign of the dividend.
    Rem,
    /// [§ 10.8 Sign-Related Functions](https://www.w3.org/TR/css-values-4/#sign-funcs)
    Abs,
    /// `sign()`
    Sign,
    /// [§ 10.6 Trigonometric Functions](https://www.w3.org/TR/css-values-4/#trig-funcs)
    Sin,
    /// `cos()`
    Cos,
    /// `tan()`
    Tan,
    /// `asin()`
    Asin,
    /// `acos()`
    Acos,
    /// `atan()`
    Atan,
    /// `atan2()`
    Atan2,
    /// [§ 10.7 Exponential Functions](https://www.w3.org/TR/css-values-4/#exponent-funcs)
    Pow,
    /// `sqrt()`
    Sqrt,
    /// `hypot()`
    Hypot,
    /// `log()`
    Log,
    /// `exp()`
    Exp,
}

impl MathFunction {
    /// Recognize a math function name (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        name.to_ascii_lowercase().parse().ok()
    }

    /// The function name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The accepted number of arguments, `(min, max)`. `None` is unbounded.
    pub const fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::Min | Self::Max | Self::Hypot => (1, None),
            Self::Clamp => (3, Some(3)),
            Self::Round | Self::Log => (1, Some(2)),
            Self::Mod | Self::Rem | Self::Atan2 | Self::Pow => (2, Some(2)),
            Self::Abs
            | Self::Sign
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Asin
            | Self::Acos
            | Self::Atan
            | Self::Sqrt
            | Self::Exp => (1, Some(1)),
        }
    }

    /// Whether `count` arguments are accepted.
    pub const fn accepts(self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min
            && match max {
                Some(max) => count <= max,
                None => true,
            }
    }
}

/// [§ 10.5.1](https://www.w3.org/TR/css-values-4/#typedef-rounding-strategy)
///
/// `<rounding-strategy> = nearest | up | down | to-zero`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RoundingStrategy {
    /// Round to the nearest multiple, ties toward +∞.
    #[default]
    Nearest,
    /// Round toward +∞.
    Up,
    /// Round toward −∞.
    Down,
    /// Round toward zero.
    ToZero,
}

impl RoundingStrategy {
    /// Round `value` to a multiple of `step`.
    pub fn apply(self, value: f64, step: f64) -> f64 {
        let q = value / step;
        let rounded = match self {
            Self::Nearest => (q + 0.5).floor(),
            Self::Up => q.ceil(),
            Self::Down => q.floor(),
            Self::ToZero => q.trunc(),
        };
        rounded * step
    }
}

/// [§ 10.7.1 Numeric Constants](https://www.w3.org/TR/css-values-4/#calc-constants)
///
/// The value of a constant keyword usable as a calc operand.
pub fn constant(name: &str) -> Option<f64> {
    let value = match name.to_ascii_lowercase().as_str() {
        "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        "infinity" => f64::INFINITY,
        "-infinity" => f64::NEG_INFINITY,
        "nan" => f64::NAN,
        _ => return None,
    };
    Some(value)
}
