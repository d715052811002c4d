//! Cylindrical sRGB notations.

/// [§ 7.1 Converting HSL Colors to sRGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// - hue: angle in degrees (wraps)
/// - saturation, lightness: 0.0-1.0
///
/// Returns companded sRGB components in `[0, 1]`.
pub fn hsl_to_srgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    // "HOW TO RETURN hsl.h, hsl.s, hsl.l converted to an idealized-rgb color"
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime.floor() as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    [r1 + m, g1 + m, b1 + m]
}

/// [§ 8.1 Converting HWB Colors to sRGB](https://www.w3.org/TR/css-color-4/#hwb-to-rgb)
///
/// "If the sum of whiteness and blackness is greater than or equal to 100%,
/// it defines an achromatic color."
pub fn hwb_to_srgb(hue: f64, whiteness: f64, blackness: f64) -> [f64; 3] {
    let w = whiteness.clamp(0.0, 1.0);
    let b = blackness.clamp(0.0, 1.0);
    if w + b >= 1.0 {
        let gray = w / (w + b);
        return [gray; 3];
    }
    hsl_to_srgb(hue, 1.0, 0.5).map(|c| c * (1.0 - w - b) + w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_u8(rgb: [f64; 3]) -> [u8; 3] {
        rgb.map(|c| (c * 255.0).round() as u8)
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(to_u8(hsl_to_srgb(0.0, 1.0, 0.5)), [255, 0, 0]);
        assert_eq!(to_u8(hsl_to_srgb(120.0, 1.0, 0.5)), [0, 255, 0]);
        assert_eq!(to_u8(hsl_to_srgb(240.0, 1.0, 0.5)), [0, 0, 255]);
        assert_eq!(to_u8(hsl_to_srgb(-120.0, 1.0, 0.5)), [0, 0, 255]);
    }

    #[test]
    fn test_hwb_achromatic() {
        assert_eq!(hwb_to_srgb(90.0, 0.6, 0.6), [0.5; 3]);
        assert_eq!(to_u8(hwb_to_srgb(0.0, 0.0, 0.0)), [255, 0, 0]);
    }
}
