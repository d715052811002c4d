//! Perceptual color models.
//!
//! [CSS Color 4 § 9 Device-independent Colors](https://www.w3.org/TR/css-color-4/#lab-colors)
//!
//! CIE Lab/LCH are relative to D50, Oklab/OkLCh to D65. Hues are in degrees.

use super::adaptation::D50;
use super::matrix::Matrix3;

/// 29³/3³
const KAPPA: f64 = 24389.0 / 27.0;
/// 6³/29³
const EPSILON: f64 = 216.0 / 24389.0;

const XYZ_TO_LMS: Matrix3 = Matrix3::from_rows([
    0.819_022_443_216_431_9,
    0.361_906_256_280_122_1,
    -0.128_873_782_612_164_14,
    0.032_983_667_198_027_1,
    0.929_286_846_896_554_6,
    0.036_144_668_169_998_44,
    0.048_177_199_566_046_255,
    0.264_239_524_944_227_64,
    0.633_547_825_813_693_7,
]);

const LMS_TO_OKLAB: Matrix3 = Matrix3::from_rows([
    0.210_454_255_3,
    0.793_617_785_0,
    -0.004_072_046_8,
    1.977_998_495_1,
    -2.428_592_205_0,
    0.450_593_709_9,
    0.025_904_037_1,
    0.782_771_766_2,
    -0.808_675_766_0,
]);

const OKLAB_TO_LMS: Matrix3 = Matrix3::from_rows([
    0.999_999_998_450_519_8,
    0.396_337_792_173_767_86,
    0.215_803_758_060_758_8,
    1.000_000_008_881_760_8,
    -0.105_561_342_323_656_35,
    -0.063_854_174_771_705_9,
    1.000_000_054_672_410_9,
    -0.089_484_182_094_965_76,
    -1.291_485_537_864_091_7,
]);

const LMS_TO_XYZ: Matrix3 = Matrix3::from_rows([
    1.226_879_873_374_155_7,
    -0.557_814_996_555_481_3,
    0.281_391_050_177_215_83,
    -0.040_575_762_624_313_72,
    1.112_286_829_397_059_4,
    -0.071_711_066_661_517_01,
    -0.076_372_949_746_721_42,
    -0.421_493_323_962_791_4,
    1.586_924_024_427_241_8,
]);

/// [§ 18.5 Converting XYZ to Lab](https://www.w3.org/TR/css-color-4/#color-conversion-code)
pub fn xyz_d50_to_lab(xyz: [f64; 3]) -> [f64; 3] {
    let f = |v: f64| {
        if v > EPSILON {
            v.cbrt()
        } else {
            (KAPPA * v + 16.0) / 116.0
        }
    };
    let f0 = f(xyz[0] / D50[0]);
    let f1 = f(xyz[1] / D50[1]);
    let f2 = f(xyz[2] / D50[2]);
    [116.0 * f1 - 16.0, 500.0 * (f0 - f1), 200.0 * (f1 - f2)]
}

/// Lab (D50) to XYZ relative to D50.
pub fn lab_to_xyz_d50(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let f1 = (l + 16.0) / 116.0;
    let f0 = a / 500.0 + f1;
    let f2 = f1 - b / 200.0;

    let x = if f0.powi(3) > EPSILON {
        f0.powi(3)
    } else {
        (116.0 * f0 - 16.0) / KAPPA
    };
    let y = if l > KAPPA * EPSILON {
        f1.powi(3)
    } else {
        l / KAPPA
    };
    let z = if f2.powi(3) > EPSILON {
        f2.powi(3)
    } else {
        (116.0 * f2 - 16.0) / KAPPA
    };
    [x * D50[0], y * D50[1], z * D50[2]]
}

/// Rectangular `[l, a, b]` to cylindrical `[l, c, h]`.
pub fn to_polar(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let chroma = a.hypot(b);
    let hue = if chroma.abs() < 1e-12 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    };
    [l, chroma, hue]
}

/// Cylindrical `[l, c, h]` to rectangular `[l, a, b]`.
pub fn from_polar(lch: [f64; 3]) -> [f64; 3] {
    let [l, c, h] = lch;
    let radians = h.to_radians();
    [l, c.max(0.0) * radians.cos(), c.max(0.0) * radians.sin()]
}

/// Lab to LCH.
pub fn lab_to_lch(lab: [f64; 3]) -> [f64; 3] {
    to_polar(lab)
}

/// LCH to Lab.
pub fn lch_to_lab(lch: [f64; 3]) -> [f64; 3] {
    from_polar(lch)
}

/// [Oklab](https://bottosson.github.io/posts/oklab/) from XYZ relative to D65.
pub fn xyz_d65_to_oklab(xyz: [f64; 3]) -> [f64; 3] {
    let lms = XYZ_TO_LMS.apply(xyz);
    LMS_TO_OKLAB.apply([lms[0].cbrt(), lms[1].cbrt(), lms[2].cbrt()])
}

/// Oklab to XYZ relative to D65.
pub fn oklab_to_xyz_d65(oklab: [f64; 3]) -> [f64; 3] {
    let lms = OKLAB_TO_LMS.apply(oklab);
    LMS_TO_XYZ.apply([lms[0].powi(3), lms[1].powi(3), lms[2].powi(3)])
}

/// Oklab to OkLCh.
pub fn oklab_to_oklch(oklab: [f64; 3]) -> [f64; 3] {
    to_polar(oklab)
}

/// OkLCh to Oklab.
pub fn oklch_to_oklab(oklch: [f64; 3]) -> [f64; 3] {
    from_polar(oklch)
}

fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// CIE76 color difference between two Lab colors.
pub fn delta_e76(a: [f64; 3], b: [f64; 3]) -> f64 {
    euclidean(a, b)
}

/// [§ 13.2 deltaEOK](https://www.w3.org/TR/css-color-4/#color-difference-OK)
pub fn delta_eok(a: [f64; 3], b: [f64; 3]) -> f64 {
    euclidean(a, b)
}
