//! Numeric unit table per [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/).
//!
//! Shared by the value model, the expression engine and the colorimetry
//! engine. Every unit belongs to exactly one [`UnitCategory`]; absolute units
//! carry a conversion factor to their category's canonical unit.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// [§ 4 Numeric Data Types](https://www.w3.org/TR/css-values-4/#numeric-types)
///
/// A unit code. `Number` is the absence of a unit; `Invalid` marks a
/// dimension whose unit text is not recognized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CssUnit {
    /// A plain `<number>`.
    #[strum(serialize = "")]
    Number,
    /// `%`
    #[strum(serialize = "%")]
    Percentage,

    // [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    #[strum(serialize = "px")]
    Px,
    /// "1cm = 96px/2.54"
    #[strum(serialize = "cm")]
    Cm,
    /// "1mm = 1/10th of 1cm"
    #[strum(serialize = "mm")]
    Mm,
    /// "1Q = 1/40th of 1cm"
    #[strum(serialize = "q")]
    Q,
    /// "1in = 2.54cm = 96px"
    #[strum(serialize = "in")]
    In,
    /// "1pt = 1/72th of 1in"
    #[strum(serialize = "pt")]
    Pt,
    /// "1pc = 1/6th of 1in"
    #[strum(serialize = "pc")]
    Pc,

    // [§ 6.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// Computed font-size of the element.
    #[strum(serialize = "em")]
    Em,
    /// Computed font-size of the root element.
    #[strum(serialize = "rem")]
    Rem,
    /// x-height of the first available font.
    #[strum(serialize = "ex")]
    Ex,
    /// Advance measure of the "0" glyph.
    #[strum(serialize = "ch")]
    Ch,
    /// Cap height.
    #[strum(serialize = "cap")]
    Cap,
    /// Advance measure of the "水" glyph.
    #[strum(serialize = "ic")]
    Ic,
    /// Computed line-height.
    #[strum(serialize = "lh")]
    Lh,
    /// Computed line-height of the root element.
    #[strum(serialize = "rlh")]
    Rlh,

    // [§ 6.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// 1% of viewport width.
    #[strum(serialize = "vw")]
    Vw,
    /// 1% of viewport height.
    #[strum(serialize = "vh")]
    Vh,
    /// 1% of viewport size in the inline axis.
    #[strum(serialize = "vi")]
    Vi,
    /// 1% of viewport size in the block axis.
    #[strum(serialize = "vb")]
    Vb,
    /// Smaller of `vw` and `vh`.
    #[strum(serialize = "vmin")]
    Vmin,
    /// Larger of `vw` and `vh`.
    #[strum(serialize = "vmax")]
    Vmax,

    // [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
    /// Degrees.
    #[strum(serialize = "deg")]
    Deg,
    /// Gradians.
    #[strum(serialize = "grad")]
    Grad,
    /// Radians.
    #[strum(serialize = "rad")]
    Rad,
    /// Turns.
    #[strum(serialize = "turn")]
    Turn,

    // [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
    /// Seconds.
    #[strum(serialize = "s")]
    S,
    /// Milliseconds.
    #[strum(serialize = "ms")]
    Ms,

    // [§ 7.3 Frequency Units](https://www.w3.org/TR/css-values-4/#frequency)
    /// Hertz.
    #[strum(serialize = "hz")]
    Hz,
    /// Kilohertz.
    #[strum(serialize = "khz")]
    KHz,

    // [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
    /// Dots per inch.
    #[strum(serialize = "dpi")]
    Dpi,
    /// Dots per centimeter.
    #[strum(serialize = "dpcm")]
    Dpcm,
    /// Dots per `px` unit.
    #[strum(serialize = "dppx")]
    Dppx,
    /// Alias of `dppx`.
    #[strum(serialize = "x")]
    X,

    /// [CSS Grid § 7.2.3 Flexible Lengths](https://www.w3.org/TR/css-grid-2/#fr-unit)
    #[strum(serialize = "fr")]
    Fr,

    /// Unrecognized unit text.
    #[strum(serialize = "invalid")]
    Invalid,
}

/// The dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum UnitCategory {
    /// Dimensionless.
    Number,
    /// Percentages.
    Percentage,
    /// Distances.
    Length,
    /// Angles.
    Angle,
    /// Durations.
    Time,
    /// Frequencies.
    Frequency,
    /// Resolutions.
    Resolution,
    /// Grid flex fractions.
    Flex,
    /// Unknown unit.
    Invalid,
}

impl CssUnit {
    /// Look up a unit from dimension text. Unknown text maps to [`CssUnit::Invalid`].
    pub fn from_unit_text(text: &str) -> Self {
        // "" and "invalid" are not dimension units.
        if text.is_empty() || text.eq_ignore_ascii_case("invalid") {
            return Self::Invalid;
        }
        text.parse().unwrap_or(Self::Invalid)
    }

    /// The unit as it appears after a number (`"px"`, `"%"`, `""`).
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The category this unit measures.
    pub const fn category(self) -> UnitCategory {
        match self {
            Self::Number => UnitCategory::Number,
            Self::Percentage => UnitCategory::Percentage,
            Self::Px
            | Self::Cm
            | Self::Mm
            | Self::Q
            | Self::In
            | Self::Pt
            | Self::Pc
            | Self::Em
            | Self::Rem
            | Self::Ex
            | Self::Ch
            | Self::Cap
            | Self::Ic
            | Self::Lh
            | Self::Rlh
            | Self::Vw
            | Self::Vh
            | Self::Vi
            | Self::Vb
            | Self::Vmin
            | Self::Vmax => UnitCategory::Length,
            Self::Deg | Self::Grad | Self::Rad | Self::Turn => UnitCategory::Angle,
            Self::S | Self::Ms => UnitCategory::Time,
            Self::Hz | Self::KHz => UnitCategory::Frequency,
            Self::Dpi | Self::Dpcm | Self::Dppx | Self::X => UnitCategory::Resolution,
            Self::Fr => UnitCategory::Flex,
            Self::Invalid => UnitCategory::Invalid,
        }
    }

    /// Whether this is a length unit.
    pub const fn is_length(self) -> bool {
        matches!(self.category(), UnitCategory::Length)
    }

    /// [§ 6.1.1](https://www.w3.org/TR/css-values-4/#font-relative-lengths),
    /// [§ 6.1.2](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    ///
    /// Whether resolving this unit needs font or viewport context.
    pub const fn is_relative_length(self) -> bool {
        self.is_length() && self.canonical_factor().is_none()
    }

    /// Multiplier converting a value in this unit to its category's canonical
    /// unit (`px`, `deg`, `s`, `Hz`, `dppx`). `None` for relative units.
    pub const fn canonical_factor(self) -> Option<f64> {
        let factor = match self {
            Self::Number
            | Self::Percentage
            | Self::Fr
            | Self::Px
            | Self::Deg
            | Self::S
            | Self::Hz
            | Self::Dppx
            | Self::X => 1.0,
            Self::Cm => 96.0 / 2.54,
            Self::Mm => 96.0 / 25.4,
            Self::Q => 96.0 / 101.6,
            Self::In => 96.0,
            Self::Pt => 96.0 / 72.0,
            Self::Pc => 16.0,
            Self::Grad => 0.9,
            Self::Rad => 180.0 / std::f64::consts::PI,
            Self::Turn => 360.0,
            Self::Ms => 0.001,
            Self::KHz => 1000.0,
            Self::Dpi => 1.0 / 96.0,
            Self::Dpcm => 2.54 / 96.0,
            _ => return None,
        };
        Some(factor)
    }
}

impl UnitCategory {
    /// The canonical unit values of this category are reduced to.
    pub const fn canonical_unit(self) -> CssUnit {
        match self {
            Self::Number => CssUnit::Number,
            Self::Percentage => CssUnit::Percentage,
            Self::Length => CssUnit::Px,
            Self::Angle => CssUnit::Deg,
            Self::Time => CssUnit::S,
            Self::Frequency => CssUnit::Hz,
            Self::Resolution => CssUnit::Dppx,
            Self::Flex => CssUnit::Fr,
            Self::Invalid => CssUnit::Invalid,
        }
    }
}

/// Convert `value` between two absolute units of the same category.
///
/// Returns `None` when the categories differ or either unit is relative.
pub fn convert(value: f64, from: CssUnit, to: CssUnit) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    if from.category() != to.category() {
        return None;
    }
    Some(value * from.canonical_factor()? / to.canonical_factor()?)
}
