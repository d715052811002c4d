//! Color values.
//!
//! [CSS Color Module Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Every color holds four component primitives, alpha first:
//! `[alpha, c1, c2, c3]`. Components keep their specified form (numbers,
//! percentages, angles, `none`, `calc()`) and are resolved to numbers only
//! when the color is converted.

use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::error::{Result, ValueError};
use crate::expr::{AbsoluteEvaluator, Evaluator, PercentageEvaluator};
use crate::sink::{SerializeMode, SimpleWriter, to_text};
use crate::units::{CssUnit, UnitCategory, convert};
use crate::values::{NumberValue, PrimitiveValue};

use super::adaptation::{D50, D65, adapt};
use super::gamut::map_to_srgb;
use super::hsl::{hsl_to_srgb, hwb_to_srgb};
use super::lab::{
    delta_e76, delta_eok, lab_to_lch, lab_to_xyz_d50, lch_to_lab, oklab_to_oklch,
    oklab_to_xyz_d65, oklch_to_oklab, xyz_d50_to_lab, xyz_d65_to_oklab,
};
use super::named;
use super::profile::{ColorProfile, builtin, srgb};

/// How the color was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Notation {
    /// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
    Hex,
    /// A named color or `transparent` (lowercase).
    Named(String),
    /// `rgb()` or, when `alias` is set, `rgba()`.
    Rgb {
        /// Written as `rgba`.
        alias: bool,
        /// Comma-separated legacy syntax.
        legacy: bool,
    },
    /// `hsl()` or, when `alias` is set, `hsla()`.
    Hsl {
        /// Written as `hsla`.
        alias: bool,
        /// Comma-separated legacy syntax.
        legacy: bool,
    },
    /// `hwb()`
    Hwb,
    /// `lab()`
    Lab,
    /// `lch()`
    Lch,
    /// `oklab()`
    Oklab,
    /// `oklch()`
    Oklch,
    /// `color(<space> ...)`
    Color {
        /// The color space name.
        space: String,
    },
}

/// The color model the components are expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ColorModel {
    /// Red, green, blue in `0..=255`.
    Srgb,
    /// Hue, saturation, lightness.
    Hsl,
    /// Hue, whiteness, blackness.
    Hwb,
    /// CIE Lab (D50).
    Lab,
    /// CIE LCH (D50).
    Lch,
    /// Oklab (D65).
    Oklab,
    /// OkLCh (D65).
    Oklch,
    /// Components of an RGB or XYZ profile, `0..=1`.
    Profiled(String),
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Srgb => "srgb",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
            Self::Profiled(space) => space,
        })
    }
}

impl Notation {
    /// The model of this notation.
    pub fn model(&self) -> ColorModel {
        match self {
            Self::Hex | Self::Named(_) | Self::Rgb { .. } => ColorModel::Srgb,
            Self::Hsl { .. } => ColorModel::Hsl,
            Self::Hwb => ColorModel::Hwb,
            Self::Lab => ColorModel::Lab,
            Self::Lch => ColorModel::Lch,
            Self::Oklab => ColorModel::Oklab,
            Self::Oklch => ColorModel::Oklch,
            Self::Color { space } => ColorModel::Profiled(space.clone()),
        }
    }

    pub(crate) const fn is_legacy(&self) -> bool {
        matches!(
            self,
            Self::Rgb { legacy: true, .. } | Self::Hsl { legacy: true, .. }
        )
    }
}

impl ColorModel {
    /// Whether component `index` is a hue.
    pub const fn is_hue(&self, index: usize) -> bool {
        matches!(
            (self, index),
            (Self::Hsl | Self::Hwb, 1) | (Self::Lch | Self::Oklch, 3)
        )
    }

    /// The number `100%` stands for in component `index`.
    ///
    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions),
    /// [§ 8 Device-independent Colors](https://www.w3.org/TR/css-color-4/#lab-colors)
    pub const fn percent_reference(&self, index: usize) -> f64 {
        match (self, index) {
            (_, 0) => 1.0,
            (Self::Srgb, _) => 255.0,
            (Self::Hsl | Self::Hwb, _) => 100.0,
            (Self::Lab | Self::Lch, 1) => 100.0,
            (Self::Lab, _) => 125.0,
            (Self::Lch, _) => 150.0,
            (Self::Oklab | Self::Oklch, 1) => 1.0,
            (Self::Oklab | Self::Oklch, _) => 0.4,
            (Self::Profiled(_), _) => 1.0,
        }
    }

    /// Whether `value` may be stored as component `index`.
    pub fn accepts(&self, index: usize, value: &PrimitiveValue) -> bool {
        let hue = self.is_hue(index);
        match value {
            PrimitiveValue::Ident(name) => name.eq_ignore_ascii_case("none"),
            PrimitiveValue::Number(n) => match n.unit {
                CssUnit::Number => true,
                CssUnit::Percentage => !hue,
                unit => hue && unit.category() == UnitCategory::Angle,
            },
            PrimitiveValue::Expression(_) | PrimitiveValue::MathFunction(_) => true,
            _ => false,
        }
    }
}

/// A color.
#[derive(Debug, Clone)]
pub struct ColorValue {
    notation: Notation,
    components: Vec<PrimitiveValue>,
    profile: OnceLock<Arc<ColorProfile>>,
}

/// Colors are equal when they are in the same model with equal components;
/// notation spelling (hex, name, `rgb()`) and the profile cache are ignored.
impl PartialEq for ColorValue {
    fn eq(&self, other: &Self) -> bool {
        self.notation.model() == other.notation.model() && self.components == other.components
    }
}

impl ColorValue {
    /// Create a color from its notation and `[alpha, c1, c2, c3]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for a wrong component count or a
    /// component of the wrong type.
    pub fn new(notation: Notation, components: Vec<PrimitiveValue>) -> Result<Self> {
        check_components(&notation.model(), &components)?;
        Ok(Self {
            notation,
            components,
            profile: OnceLock::new(),
        })
    }

    /// A hex color from 8-bit components.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::srgb_bytes(Notation::Hex, rgba)
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// A named color or `transparent` (ASCII case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        // "transparent ... rgba(0, 0, 0, 0)"
        let rgba = if name == "transparent" {
            [0, 0, 0, 0]
        } else {
            let [r, g, b] = named::lookup(&name)?;
            [r, g, b, 255]
        };
        Some(Self::srgb_bytes(Notation::Named(name), rgba))
    }

    fn srgb_bytes(notation: Notation, [r, g, b, a]: [u8; 4]) -> Self {
        let alpha = if a == 255 {
            1.0
        } else {
            f64::from(a) / 255.0
        };
        Self {
            notation,
            components: vec![
                PrimitiveValue::number(alpha),
                PrimitiveValue::number(f64::from(r)),
                PrimitiveValue::number(f64::from(g)),
                PrimitiveValue::number(f64::from(b)),
            ],
            profile: OnceLock::new(),
        }
    }

    /// How the color was written.
    pub const fn notation(&self) -> &Notation {
        &self.notation
    }

    /// The color model.
    pub fn model(&self) -> ColorModel {
        self.notation.model()
    }

    /// `[alpha, c1, c2, c3]` as specified.
    pub fn components(&self) -> &[PrimitiveValue] {
        &self.components
    }

    /// The profile of the color's model: the named space for `color()`,
    /// sRGB for the sRGB notations, XYZ-D50 for Lab/LCH and XYZ-D65 for
    /// Oklab/OkLCh. Bound once and cached.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnsupportedConversion`] for a custom color space
    /// that has not been bound with [`ColorValue::bind_profile`].
    pub fn profile(&self) -> Result<Arc<ColorProfile>> {
        if let Some(profile) = self.profile.get() {
            return Ok(Arc::clone(profile));
        }
        let space = match &self.notation {
            Notation::Color { space } => space.as_str(),
            Notation::Lab | Notation::Lch => "xyz-d50",
            Notation::Oklab | Notation::Oklch => "xyz-d65",
            _ => "srgb",
        };
        let profile = builtin(space).ok_or_else(|| {
            ValueError::unsupported(format!(
                "color space '{space}' has no calibration; bind a profile first"
            ))
        })?;
        Ok(Arc::clone(self.profile.get_or_init(|| profile)))
    }

    /// Bind a profile to a `color()` value, e.g. for a custom `--space`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] when this is not a `color()`
    /// value of the profile's space.
    pub fn bind_profile(&mut self, profile: Arc<ColorProfile>) -> Result<()> {
        match &self.notation {
            Notation::Color { space } if space.eq_ignore_ascii_case(profile.name()) => {
                self.profile = OnceLock::from(profile);
                Ok(())
            }
            _ => Err(ValueError::type_mismatch(format!(
                "cannot bind profile '{}' to {}",
                profile.name(),
                self.css_text(SerializeMode::Canonical)
            ))),
        }
    }

    fn resolve(&self, index: usize) -> Result<f64> {
        let model = self.model();
        let value = &self.components[index];
        let hue = model.is_hue(index);
        let reference = model.percent_reference(index);
        match value {
            // [§ 4.4 "Missing" Color Components](https://www.w3.org/TR/css-color-4/#missing)
            PrimitiveValue::Ident(name) if name.eq_ignore_ascii_case("none") => Ok(0.0),
            PrimitiveValue::Number(n) => number_component(n, hue, reference),
            PrimitiveValue::Expression(_) | PrimitiveValue::MathFunction(_) => {
                let q = if hue {
                    AbsoluteEvaluator.evaluate(value)?
                } else {
                    PercentageEvaluator.evaluate(value)?
                };
                number_component(&NumberValue::new(q.value, q.unit), hue, reference)
            }
            other => Err(ValueError::type_mismatch(format!(
                "color component cannot be {}",
                other.primitive_type()
            ))),
        }
    }

    /// The three channels as numbers in the model's own ranges (`0..=255`
    /// for sRGB notations, degrees for hues).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when a `calc()` component cannot be
    /// resolved.
    pub fn channels(&self) -> Result<[f64; 3]> {
        Ok([self.resolve(1)?, self.resolve(2)?, self.resolve(3)?])
    }

    /// The alpha channel, clamped to `0..=1`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when a `calc()` alpha cannot be
    /// resolved.
    pub fn alpha(&self) -> Result<f64> {
        Ok(self.resolve(0)?.clamp(0.0, 1.0))
    }

    /// [§ 18 Sample code for color conversions](https://www.w3.org/TR/css-color-4/#color-conversion-code)
    ///
    /// CIE XYZ relative to `white`, adapted with Bradford when `white`
    /// differs from the model's own reference white.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnsupportedConversion`] for an uncalibrated
    /// custom color space and [`ValueError::Evaluation`] for unresolvable
    /// components.
    pub fn to_xyz(&self, white: [f64; 3]) -> Result<[f64; 3]> {
        let [c1, c2, c3] = self.channels()?;
        let xyz = match self.model() {
            ColorModel::Srgb => srgb()?.to_xyz([c1 / 255.0, c2 / 255.0, c3 / 255.0], white),
            ColorModel::Hsl => srgb()?.to_xyz(hsl_to_srgb(c1, c2 / 100.0, c3 / 100.0), white),
            ColorModel::Hwb => srgb()?.to_xyz(hwb_to_srgb(c1, c2 / 100.0, c3 / 100.0), white),
            ColorModel::Lab => adapt(lab_to_xyz_d50([c1, c2, c3]), D50, white),
            ColorModel::Lch => adapt(lab_to_xyz_d50(lch_to_lab([c1, c2, c3])), D50, white),
            ColorModel::Oklab => adapt(oklab_to_xyz_d65([c1, c2, c3]), D65, white),
            ColorModel::Oklch => adapt(oklab_to_xyz_d65(oklch_to_oklab([c1, c2, c3])), D65, white),
            ColorModel::Profiled(_) => self.profile()?.to_xyz([c1, c2, c3], white),
        };
        Ok(xyz)
    }

    /// Companded sRGB components. With `clamp`, out-of-gamut colors are
    /// mapped into `[0, 1]` by reducing chroma in LCH; without it, they are
    /// returned out of range.
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`], and [`ValueError::UnsupportedConversion`]
    /// when `clamp` is set and the color overflows to non-finite values.
    pub fn to_srgb(&self, clamp: bool) -> Result<[f64; 3]> {
        let xyz = self.to_xyz(D65)?;
        let srgb = srgb()?;
        if clamp {
            map_to_srgb(&srgb, xyz)
        } else {
            Ok(srgb.from_xyz(xyz, D65))
        }
    }

    /// 8-bit sRGB with alpha, gamut mapped.
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn to_rgba8(&self) -> Result<[u8; 4]> {
        let [r, g, b] = self.to_srgb(true)?;
        let byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        Ok([byte(r), byte(g), byte(b), byte(self.alpha()?)])
    }

    /// CIE Lab (D50).
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn to_lab(&self) -> Result<[f64; 3]> {
        Ok(xyz_d50_to_lab(self.to_xyz(D50)?))
    }

    /// CIE LCH (D50).
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn to_lch(&self) -> Result<[f64; 3]> {
        Ok(lab_to_lch(self.to_lab()?))
    }

    /// Oklab (D65).
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn to_oklab(&self) -> Result<[f64; 3]> {
        Ok(xyz_d65_to_oklab(self.to_xyz(D65)?))
    }

    /// OkLCh (D65).
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn to_oklch(&self) -> Result<[f64; 3]> {
        Ok(oklab_to_oklch(self.to_oklab()?))
    }

    /// CIE76 color difference.
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn delta_e76(&self, other: &Self) -> Result<f64> {
        Ok(delta_e76(self.to_lab()?, other.to_lab()?))
    }

    /// Oklab color difference.
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_xyz`].
    pub fn delta_eok(&self, other: &Self) -> Result<f64> {
        Ok(delta_eok(self.to_oklab()?, other.to_oklab()?))
    }

    /// Replace one component (`0` is alpha).
    ///
    /// Hex, named and legacy notations switch to the modern functional
    /// notation, which can express any component.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for an index past the last
    /// component or a value of the wrong type.
    pub fn set_component(&mut self, index: usize, value: PrimitiveValue) -> Result<()> {
        let model = self.model();
        if index >= self.components.len() {
            return Err(ValueError::type_mismatch(format!(
                "{model} has no component {index}"
            )));
        }
        if !model.accepts(index, &value) {
            return Err(ValueError::type_mismatch(format!(
                "{} is not a valid {model} component {index}",
                value.css_text(SerializeMode::Canonical)
            )));
        }
        self.components[index] = value;
        self.modernize();
        Ok(())
    }

    /// Replace all components, `[alpha, c1, c2, c3]`. Nothing changes on
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for a wrong count or a value of
    /// the wrong type.
    pub fn set_components(&mut self, components: Vec<PrimitiveValue>) -> Result<()> {
        check_components(&self.model(), &components)?;
        self.components = components;
        self.modernize();
        Ok(())
    }

    fn modernize(&mut self) {
        self.notation = match &self.notation {
            Notation::Hex | Notation::Named(_) => Notation::Rgb {
                alias: false,
                legacy: false,
            },
            Notation::Rgb { alias, .. } => Notation::Rgb {
                alias: *alias,
                legacy: false,
            },
            Notation::Hsl { alias, .. } => Notation::Hsl {
                alias: *alias,
                legacy: false,
            },
            other => other.clone(),
        };
    }

    fn rgba8_exact(&self) -> Option<[u8; 4]> {
        let [r, g, b] = self.channels().ok()?;
        let byte = |c: f64| (0.0..=255.0).contains(&c).then(|| c.round() as u8);
        Some([byte(r)?, byte(g)?, byte(b)?, byte(self.alpha().ok()? * 255.0)?])
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        match &self.notation {
            Notation::Hex => match self.rgba8_exact() {
                Some(rgba) => write_hex(w, rgba, mode),
                None => self.write_function(w, "rgb", false, mode),
            },
            Notation::Named(name) => {
                let short_hex = self
                    .rgba8_exact()
                    .map(|rgba| to_text(|buf| write_hex(buf, rgba, SerializeMode::Minified)));
                match short_hex {
                    Some(hex) if mode.is_minified() && hex.len() < name.len() => w.write_str(&hex),
                    _ => w.write_str(name),
                }
            }
            Notation::Rgb { alias, legacy } => {
                self.write_function(w, if *alias { "rgba" } else { "rgb" }, *legacy, mode)
            }
            Notation::Hsl { alias, legacy } => {
                self.write_function(w, if *alias { "hsla" } else { "hsl" }, *legacy, mode)
            }
            Notation::Hwb => self.write_function(w, "hwb", false, mode),
            Notation::Lab => self.write_function(w, "lab", false, mode),
            Notation::Lch => self.write_function(w, "lch", false, mode),
            Notation::Oklab => self.write_function(w, "oklab", false, mode),
            Notation::Oklch => self.write_function(w, "oklch", false, mode),
            Notation::Color { .. } => self.write_function(w, "color", false, mode),
        }
    }

    fn write_function(
        &self,
        w: &mut dyn SimpleWriter,
        name: &str,
        legacy: bool,
        mode: SerializeMode,
    ) -> io::Result<()> {
        w.write_str(name)?;
        w.write_char('(')?;
        if let Notation::Color { space } = &self.notation {
            w.write_str(space)?;
            w.write_char(' ')?;
        }
        let separator = if legacy { mode.comma() } else { " " };
        for (i, component) in self.components[1..].iter().enumerate() {
            if i > 0 {
                w.write_str(separator)?;
            }
            component.write_css(w, mode)?;
        }
        // [§ 4.2 Representing Transparency](https://www.w3.org/TR/css-color-4/#transparency)
        let alpha = &self.components[0];
        let opaque = matches!(alpha, PrimitiveValue::Number(n) if n.unit == CssUnit::Number && n.value == 1.0);
        if !opaque {
            w.write_str(match (legacy, mode) {
                (true, _) => mode.comma(),
                (false, SerializeMode::Canonical) => " / ",
                (false, SerializeMode::Minified) => "/",
            })?;
            alpha.write_css(w, mode)?;
        }
        w.write_char(')')
    }

    /// This color as CSS text.
    pub fn css_text(&self, mode: SerializeMode) -> String {
        to_text(|buf| self.write_css(buf, mode))
    }
}

fn number_component(n: &NumberValue, hue: bool, reference: f64) -> Result<f64> {
    match n.unit {
        CssUnit::Number => Ok(n.value),
        CssUnit::Percentage if !hue => Ok(n.value / 100.0 * reference),
        unit if hue && unit.category() == UnitCategory::Angle => convert(n.value, unit, CssUnit::Deg)
            .ok_or_else(|| ValueError::type_mismatch("unconvertible hue")),
        unit => Err(ValueError::type_mismatch(format!(
            "'{}' is not valid in this color component",
            unit.as_str()
        ))),
    }
}

fn check_components(model: &ColorModel, components: &[PrimitiveValue]) -> Result<()> {
    if components.len() != 4 {
        return Err(ValueError::type_mismatch(format!(
            "{model} takes alpha and 3 components, got {}",
            components.len()
        )));
    }
    if let Some((index, value)) = components
        .iter()
        .enumerate()
        .find(|(i, v)| !model.accepts(*i, v))
    {
        return Err(ValueError::type_mismatch(format!(
            "{} is not a valid {model} component {index}",
            value.css_text(SerializeMode::Canonical)
        )));
    }
    Ok(())
}

/// [§ 5.2 The RGB Hexadecimal Notations](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// Minified output uses the three- or four-digit form when every channel
/// repeats its digit.
fn write_hex(w: &mut dyn SimpleWriter, [r, g, b, a]: [u8; 4], mode: SerializeMode) -> io::Result<()> {
    let bytes: &[u8] = if a == 255 { &[r, g, b] } else { &[r, g, b, a] };
    let short = mode.is_minified() && bytes.iter().all(|byte| byte >> 4 == byte & 0xF);
    w.write_char('#')?;
    for byte in bytes {
        if short {
            w.write_str(&format!("{:x}", byte & 0xF))?;
        } else {
            w.write_str(&format!("{byte:02x}"))?;
        }
    }
    Ok(())
}

/// [§ 5.2](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
/// consists of 3, 4, 6, or 8 hexadecimal digits."
pub fn hex_bytes(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    // "The three-digit RGB notation (#RGB) is converted into six-digit form
    // (#RRGGBB) by replicating digits, not by adding zeros."
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some([digit(0)?, digit(1)?, digit(2)?, 255]),
        4 => Some([digit(0)?, digit(1)?, digit(2)?, digit(3)?]),
        6 => Some([pair(0)?, pair(2)?, pair(4)?, 255]),
        8 => Some([pair(0)?, pair(2)?, pair(4)?, pair(6)?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_bytes() {
        assert_eq!(hex_bytes("#f00"), Some([255, 0, 0, 255]));
        assert_eq!(hex_bytes("0f08"), Some([0, 255, 0, 136]));
        assert_eq!(hex_bytes("663399"), Some([0x66, 0x33, 0x99, 255]));
        assert_eq!(hex_bytes("12345"), None);
        assert_eq!(hex_bytes("gggggg"), None);
        assert_eq!(hex_bytes("ééé"), None);
    }

    #[test]
    fn test_named_minifies_to_shorter_hex() {
        let color = ColorValue::named("white").unwrap();
        assert_eq!(color.css_text(SerializeMode::Canonical), "white");
        assert_eq!(color.css_text(SerializeMode::Minified), "#fff");
        let red = ColorValue::named("red").unwrap();
        assert_eq!(red.css_text(SerializeMode::Minified), "red");
    }

    #[test]
    fn test_set_component_rejects_wrong_type() {
        let mut color = ColorValue::from_rgba8([1, 2, 3, 255]);
        assert!(matches!(
            color.set_component(4, PrimitiveValue::number(0.0)),
            Err(ValueError::TypeMismatch(_))
        ));
        assert!(matches!(
            color.set_component(1, PrimitiveValue::dimension(10.0, CssUnit::Deg)),
            Err(ValueError::TypeMismatch(_))
        ));
        color.set_component(1, PrimitiveValue::number(255.0)).unwrap();
        assert_eq!(color.css_text(SerializeMode::Canonical), "rgb(255 2 3)");
    }
}
