//! RGB color-space profiles.
//!
//! [CSS Color 4 § 10 Predefined Color Spaces](https://www.w3.org/TR/css-color-4/#predefined)
//!
//! A profile is an immutable primaries→XYZ matrix, its inverse, a reference
//! white and a transfer function pair. Built-in profiles are created once and
//! shared through `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::Serialize;
use strum_macros::Display;

use crate::error::{Result, ValueError};

use super::adaptation::{D50, D65, adapt, white_from_chromaticity};
use super::matrix::Matrix3;

/// [§ 10.2 sRGB](https://www.w3.org/TR/css-color-4/#predefined-sRGB)
///
/// Linear sRGB to XYZ (D65), as published rational constants.
pub const SRGB_TO_XYZ: Matrix3 = Matrix3::from_rows([
    506_752.0 / 1_228_815.0,
    87_881.0 / 245_763.0,
    12_673.0 / 70_218.0,
    87_098.0 / 409_605.0,
    175_762.0 / 245_763.0,
    12_673.0 / 175_545.0,
    7_918.0 / 409_605.0,
    87_881.0 / 737_289.0,
    1_001_167.0 / 1_053_270.0,
]);

/// XYZ (D65) to linear sRGB.
pub const XYZ_TO_SRGB: Matrix3 = Matrix3::from_rows([
    12_831.0 / 3_959.0,
    -329.0 / 214.0,
    -1_974.0 / 3_959.0,
    -851_781.0 / 878_810.0,
    1_648_619.0 / 878_810.0,
    36_519.0 / 878_810.0,
    705.0 / 12_673.0,
    -2_585.0 / 12_673.0,
    705.0 / 667.0,
]);

/// Rec. 2020 α.
const REC2020_ALPHA: f64 = 1.099_296_826_809_44;
/// Rec. 2020 β.
const REC2020_BETA: f64 = 0.018_053_968_510_807;

/// A gamma companding function and its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum TransferFunction {
    /// sRGB piecewise curve (also used by Display P3).
    Srgb,
    /// Adobe RGB (1998) pure gamma 563/256.
    A98,
    /// ProPhoto (ROMM) piecewise gamma 1.8.
    ProPhoto,
    /// ITU-R BT.2020 piecewise curve.
    Rec2020,
    /// Identity.
    Linear,
}

impl TransferFunction {
    /// Linear light to companded component ("gamma encode").
    pub fn compand(self, x: f64) -> f64 {
        let sign = x.signum();
        let abs = x.abs();
        match self {
            Self::Srgb => {
                if abs <= 0.003_130_8 {
                    12.92 * x
                } else {
                    sign * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
                }
            }
            Self::A98 => sign * abs.powf(256.0 / 563.0),
            Self::ProPhoto => {
                if abs < 1.0 / 512.0 {
                    16.0 * x
                } else {
                    sign * abs.powf(1.0 / 1.8)
                }
            }
            Self::Rec2020 => {
                if abs < REC2020_BETA {
                    4.5 * x
                } else {
                    sign * (REC2020_ALPHA * abs.powf(0.45) - (REC2020_ALPHA - 1.0))
                }
            }
            Self::Linear => x,
        }
    }

    /// Companded component to linear light.
    pub fn linearize(self, c: f64) -> f64 {
        let sign = c.signum();
        let abs = c.abs();
        match self {
            Self::Srgb => {
                if abs <= 0.040_45 {
                    c / 12.92
                } else {
                    sign * ((abs + 0.055) / 1.055).powf(2.4)
                }
            }
            Self::A98 => sign * abs.powf(563.0 / 256.0),
            Self::ProPhoto => {
                if abs <= 16.0 / 512.0 {
                    c / 16.0
                } else {
                    sign * abs.powf(1.8)
                }
            }
            Self::Rec2020 => {
                if abs < REC2020_BETA * 4.5 {
                    c / 4.5
                } else {
                    sign * ((abs + REC2020_ALPHA - 1.0) / REC2020_ALPHA).powf(1.0 / 0.45)
                }
            }
            Self::Linear => c,
        }
    }
}

/// An RGB color space calibration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorProfile {
    name: String,
    to_xyz: Matrix3,
    from_xyz: Matrix3,
    white: [f64; 3],
    transfer: TransferFunction,
}

impl ColorProfile {
    /// [§ 18 Sample code for color conversions](https://www.w3.org/TR/css-color-4/#color-conversion-code)
    ///
    /// Derive a profile from the xy chromaticities of its red, green and blue
    /// primaries and its reference white (XYZ, Y = 1). The matrix columns are
    /// scaled so that RGB (1, 1, 1) maps exactly to `white`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnsupportedConversion`] when the primaries are
    /// collinear (no invertible matrix).
    pub fn from_primaries(
        name: impl Into<String>,
        primaries: [(f64, f64); 3],
        white: [f64; 3],
        transfer: TransferFunction,
    ) -> Result<Self> {
        let name = name.into();
        let columns = primaries.map(|(x, y)| white_from_chromaticity(x, y));
        let unscaled = Matrix3([
            [columns[0][0], columns[1][0], columns[2][0]],
            [columns[0][1], columns[1][1], columns[2][1]],
            [columns[0][2], columns[1][2], columns[2][2]],
        ]);
        let degenerate = || ValueError::unsupported(format!("primaries of '{name}' are degenerate"));
        let scale = unscaled.inverse().ok_or_else(degenerate)?.apply(white);
        let to_xyz = unscaled.scale_columns(scale);
        let from_xyz = to_xyz.inverse().ok_or_else(degenerate)?;
        Ok(Self {
            name,
            to_xyz,
            from_xyz,
            white,
            transfer,
        })
    }

    /// Build a profile from explicit matrices.
    pub fn from_matrices(
        name: impl Into<String>,
        to_xyz: Matrix3,
        from_xyz: Matrix3,
        white: [f64; 3],
        transfer: TransferFunction,
    ) -> Self {
        Self {
            name: name.into(),
            to_xyz,
            from_xyz,
            white,
            transfer,
        }
    }

    /// The color space name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Linear RGB → XYZ.
    pub const fn to_xyz_matrix(&self) -> &Matrix3 {
        &self.to_xyz
    }

    /// XYZ → linear RGB.
    pub const fn from_xyz_matrix(&self) -> &Matrix3 {
        &self.from_xyz
    }

    /// The reference white, XYZ with Y = 1.
    pub const fn white(&self) -> [f64; 3] {
        self.white
    }

    /// The transfer function pair.
    pub const fn transfer(&self) -> TransferFunction {
        self.transfer
    }

    /// Linear component to companded.
    pub fn gamma_companding(&self, x: f64) -> f64 {
        self.transfer.compand(x)
    }

    /// Companded component to linear.
    pub fn linear_component(&self, c: f64) -> f64 {
        self.transfer.linearize(c)
    }

    /// Companded RGB to XYZ relative to `white`, adapting when `white`
    /// differs from the profile's own reference white.
    pub fn to_xyz(&self, rgb: [f64; 3], white: [f64; 3]) -> [f64; 3] {
        let linear = rgb.map(|c| self.linear_component(c));
        adapt(self.to_xyz.apply(linear), self.white, white)
    }

    /// XYZ relative to `white` to companded RGB in this space.
    pub fn from_xyz(&self, xyz: [f64; 3], white: [f64; 3]) -> [f64; 3] {
        let native = adapt(xyz, white, self.white);
        self.from_xyz.apply(native).map(|c| self.gamma_companding(c))
    }
}

/// Names accepted by `color()` for the built-in profiles.
pub const BUILTIN_SPACES: [&str; 9] = [
    "srgb",
    "srgb-linear",
    "display-p3",
    "a98-rgb",
    "prophoto-rgb",
    "rec2020",
    "xyz-d50",
    "xyz-d65",
    "xyz",
];

static BUILTIN_PROFILES: LazyLock<HashMap<&'static str, Arc<ColorProfile>>> = LazyLock::new(|| {
    let derived = [
        // [§ 10.4 display-p3](https://www.w3.org/TR/css-color-4/#predefined-display-p3)
        (
            "display-p3",
            [(0.680, 0.320), (0.265, 0.690), (0.150, 0.060)],
            D65,
            TransferFunction::Srgb,
        ),
        // [§ 10.5 a98-rgb](https://www.w3.org/TR/css-color-4/#predefined-a98-rgb)
        (
            "a98-rgb",
            [(0.640, 0.330), (0.210, 0.710), (0.150, 0.060)],
            D65,
            TransferFunction::A98,
        ),
        // [§ 10.6 prophoto-rgb](https://www.w3.org/TR/css-color-4/#predefined-prophoto-rgb)
        (
            "prophoto-rgb",
            [(0.734_699, 0.265_301), (0.159_597, 0.840_403), (0.036_598, 0.000_105)],
            D50,
            TransferFunction::ProPhoto,
        ),
        // [§ 10.7 rec2020](https://www.w3.org/TR/css-color-4/#predefined-rec2020)
        (
            "rec2020",
            [(0.708, 0.292), (0.170, 0.797), (0.131, 0.046)],
            D65,
            TransferFunction::Rec2020,
        ),
    ];

    let mut profiles: HashMap<&'static str, Arc<ColorProfile>> = derived
        .into_iter()
        .filter_map(|(name, primaries, white, transfer)| {
            ColorProfile::from_primaries(name, primaries, white, transfer)
                .ok()
                .map(|profile| (name, Arc::new(profile)))
        })
        .collect();

    let fixed = [
        ("srgb", SRGB_TO_XYZ, XYZ_TO_SRGB, D65, TransferFunction::Srgb),
        ("srgb-linear", SRGB_TO_XYZ, XYZ_TO_SRGB, D65, TransferFunction::Linear),
        ("xyz-d50", Matrix3::IDENTITY, Matrix3::IDENTITY, D50, TransferFunction::Linear),
        ("xyz-d65", Matrix3::IDENTITY, Matrix3::IDENTITY, D65, TransferFunction::Linear),
    ];
    for (name, to_xyz, from_xyz, white, transfer) in fixed {
        let _ = profiles.insert(
            name,
            Arc::new(ColorProfile::from_matrices(name, to_xyz, from_xyz, white, transfer)),
        );
    }
    if let Some(xyz) = profiles.get("xyz-d65").cloned() {
        let _ = profiles.insert("xyz", xyz);
    }
    profiles
});

/// Look up a built-in profile by color space name (ASCII case-insensitive).
pub fn builtin(name: &str) -> Option<Arc<ColorProfile>> {
    BUILTIN_PROFILES
        .get(name.to_ascii_lowercase().as_str())
        .cloned()
}

/// The sRGB profile.
///
/// # Errors
///
/// Returns [`ValueError::UnsupportedConversion`] if the built-in table has no
/// sRGB entry.
pub fn srgb() -> Result<Arc<ColorProfile>> {
    builtin("srgb").ok_or_else(|| ValueError::unsupported("sRGB profile unavailable"))
}
