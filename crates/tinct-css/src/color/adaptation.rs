//! Reference whites and chromatic adaptation.
//!
//! [CSS Color 4 § 10.3 Converting Between Reference Whites](https://www.w3.org/TR/css-color-4/#color-conversion-code)

use super::matrix::Matrix3;

/// CIE standard illuminant D50 as XYZ with Y = 1.
pub const D50: [f64; 3] = [0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585];

/// CIE standard illuminant D65 as XYZ with Y = 1.
pub const D65: [f64; 3] = [0.3127 / 0.3290, 1.0, (1.0 - 0.3127 - 0.3290) / 0.3290];

/// The Bradford cone-response matrix.
pub const BRADFORD: Matrix3 = Matrix3::from_rows([
    0.8951, 0.2664, -0.1614, //
    -0.7502, 1.7135, 0.0367, //
    0.0389, -0.0685, 1.0296,
]);

/// Convert an xy chromaticity to XYZ with Y = 1.
pub fn white_from_chromaticity(x: f64, y: f64) -> [f64; 3] {
    [x / y, 1.0, (1.0 - x - y) / y]
}

/// The Bradford adaptation matrix taking XYZ relative to `from` to XYZ
/// relative to `to`.
///
/// `inverse(B) · diag(cone(to) / cone(from)) · B`
pub fn adaptation_matrix(from: [f64; 3], to: [f64; 3]) -> Matrix3 {
    if from == to {
        return Matrix3::IDENTITY;
    }
    let source = BRADFORD.apply(from);
    let destination = BRADFORD.apply(to);
    let scale = Matrix3::diagonal([
        destination[0] / source[0],
        destination[1] / source[1],
        destination[2] / source[2],
    ]);
    // The Bradford matrix is a fixed, well-conditioned constant.
    let inverse = BRADFORD.inverse().unwrap_or(Matrix3::IDENTITY);
    inverse * scale * BRADFORD
}

/// Adapt `xyz` from white `from` to white `to`.
pub fn adapt(xyz: [f64; 3], from: [f64; 3], to: [f64; 3]) -> [f64; 3] {
    adaptation_matrix(from, to).apply(xyz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapting_white_lands_on_target_white() {
        let adapted = adapt(D65, D65, D50);
        for (got, want) in adapted.iter().zip(D50) {
            assert!((got - want).abs() < 1e-9, "{adapted:?}");
        }
    }

    #[test]
    fn test_d50_d65_round_trip() {
        let xyz = [0.2, 0.3, 0.4];
        let back = adapt(adapt(xyz, D50, D65), D65, D50);
        for (got, want) in back.iter().zip(xyz) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_matches_published_bradford_d50_to_d65() {
        // CSS Color 4 sample code, D50 to D65.
        let published = Matrix3::from_rows([
            0.955_473_452_704_218_2,
            -0.023_098_536_874_261_423,
            0.063_259_308_661_021_7,
            -0.028_369_706_963_208_136,
            1.009_995_458_005_822_6,
            0.021_041_398_966_943_008,
            0.012_314_001_688_319_899,
            -0.020_507_696_433_477_912,
            1.330_365_936_608_075_3,
        ]);
        assert!(adaptation_matrix(D50, D65).max_difference(&published) < 1e-3);
    }
}
