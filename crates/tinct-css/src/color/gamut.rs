//! Gamut mapping into sRGB.
//!
//! Out-of-range colors are reduced in CIE LCH (D50): lightness is clamped
//! and chroma is searched down at constant hue until the sRGB result is
//! displayable. Raw linear components are never clamped.

use tracing::debug;

use crate::error::{Result, ValueError};

use super::adaptation::{D50, D65, adapt};
use super::lab::{lab_to_lch, lab_to_xyz_d50, lch_to_lab, xyz_d50_to_lab};
use super::profile::ColorProfile;

/// Tolerance for accepting a companded component as in range.
const GAMUT_EPSILON: f64 = 1e-7;

/// Chroma search resolution.
const CHROMA_EPSILON: f64 = 1e-6;

/// Whether companded components all lie in `[0, 1]`.
pub fn in_gamut(rgb: [f64; 3]) -> bool {
    rgb.iter()
        .all(|c| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(c))
}

/// Convert XYZ (D65) to companded sRGB, mapping out-of-gamut colors
/// perceptually.
///
/// # Errors
///
/// Returns [`ValueError::UnsupportedConversion`] when the color overflows to
/// a non-finite Lab value and has no nearest displayable color.
pub fn map_to_srgb(srgb: &ColorProfile, xyz_d65: [f64; 3]) -> Result<[f64; 3]> {
    let direct = srgb.from_xyz(xyz_d65, D65);
    if in_gamut(direct) {
        return Ok(clip(direct));
    }

    let lab = xyz_d50_to_lab(adapt(xyz_d65, D65, D50));
    let [lightness, chroma, hue] = lab_to_lch(lab);
    if !(lightness.is_finite() && chroma.is_finite() && hue.is_finite()) {
        return Err(ValueError::unsupported(format!(
            "cannot map non-finite Lab {lab:?} into sRGB"
        )));
    }
    if lightness >= 100.0 {
        return Ok([1.0; 3]);
    }
    if lightness <= 0.0 {
        return Ok([0.0; 3]);
    }

    let from_lch = |c: f64| {
        let xyz_d50 = lab_to_xyz_d50(lch_to_lab([lightness, c, hue]));
        srgb.from_xyz(xyz_d50, D50)
    };

    let mut low = 0.0;
    let mut high = chroma;
    while high - low > CHROMA_EPSILON {
        let mid = (low + high) / 2.0;
        if in_gamut(from_lch(mid)) {
            low = mid;
        } else {
            high = mid;
        }
    }
    debug!(chroma, mapped = low, "reduced chroma into sRGB gamut");
    Ok(clip(from_lch(low)))
}

/// Clamp companded components into `[0, 1]`.
fn clip(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| c.clamp(0.0, 1.0))
}
