//! Property tests for the numeric and serialization invariants.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use tinct_css::color::{D50, D65, Matrix3, Notation, TransferFunction, adaptation};
use tinct_css::{
    ColorValue, CssUnit, PrimitiveValue, SerializeMode, Value, parse_color, parse_value,
};

const TRANSFERS: [TransferFunction; 5] = [
    TransferFunction::Srgb,
    TransferFunction::A98,
    TransferFunction::ProPhoto,
    TransferFunction::Rec2020,
    TransferFunction::Linear,
];

const UNITS: [CssUnit; 8] = [
    CssUnit::Number,
    CssUnit::Percentage,
    CssUnit::Px,
    CssUnit::Em,
    CssUnit::Deg,
    CssUnit::Ms,
    CssUnit::Dppx,
    CssUnit::Fr,
];

/// Map an arbitrary integer into `[-2, 2]`.
fn unit_interval(seed: i32) -> f64 {
    f64::from(seed % 20_001) / 10_000.0
}

#[quickcheck]
fn prop_transfer_functions_round_trip(seed: i32) -> bool {
    let x = unit_interval(seed);
    TRANSFERS.iter().all(|transfer| {
        let back = transfer.linearize(transfer.compand(x));
        (back - x).abs() < 1e-9
    })
}

#[quickcheck]
fn prop_transfer_functions_are_odd(seed: i32) -> bool {
    let x = unit_interval(seed);
    TRANSFERS
        .iter()
        .all(|transfer| (transfer.compand(-x) + transfer.compand(x)).abs() < 1e-12)
}

#[quickcheck]
fn prop_matrix_inverse(off_diagonal: Vec<i8>, diagonal: (u8, u8, u8)) -> TestResult {
    if off_diagonal.len() < 6 {
        return TestResult::discard();
    }
    // Diagonally dominant, so always invertible.
    let o: Vec<f64> = off_diagonal.iter().map(|v| f64::from(*v) / 500.0).collect();
    let d = [diagonal.0, diagonal.1, diagonal.2].map(|v| 1.0 + f64::from(v) / 100.0);
    let matrix = Matrix3::from_rows([
        d[0], o[0], o[1], //
        o[2], d[1], o[3], //
        o[4], o[5], d[2],
    ]);
    let Some(inverse) = matrix.inverse() else {
        return TestResult::failed();
    };
    TestResult::from_bool(
        (matrix * inverse).max_difference(&Matrix3::IDENTITY) < 1e-9
            && (inverse * matrix).max_difference(&Matrix3::IDENTITY) < 1e-9,
    )
}

#[quickcheck]
fn prop_adaptation_round_trip(x: u16, y: u16, z: u16) -> bool {
    let xyz = [f64::from(x), f64::from(y), f64::from(z)].map(|c| c / 65_535.0);
    let there = adaptation::adapt(xyz, D65, D50);
    let back = adaptation::adapt(there, D50, D65);
    let same = adaptation::adapt(xyz, D65, D65);
    xyz.iter()
        .zip(back)
        .zip(same)
        .all(|((a, b), s)| (a - b).abs() < 1e-12 && a == &s)
}

#[test]
fn test_adaptation_maps_white_to_white() {
    let d50 = adaptation::adapt(D65, D65, D50);
    assert!(d50.iter().zip(D50).all(|(a, b)| (a - b).abs() < 1e-9));
}

#[quickcheck]
fn prop_dimension_serialization_is_stable(hundredths: i32, unit_index: usize) -> bool {
    let unit = UNITS[unit_index % UNITS.len()];
    let value = Value::primitive(PrimitiveValue::dimension(f64::from(hundredths) / 100.0, unit));
    let canonical = parse_value(&value.css_text());
    let minified = parse_value(&value.minified_text());
    matches!(canonical, Ok(v) if v == value) && matches!(minified, Ok(v) if v == value)
}

#[quickcheck]
fn prop_list_serialization_is_stable(items: Vec<(i16, bool)>) -> TestResult {
    if items.len() < 2 {
        return TestResult::discard();
    }
    let text = items
        .iter()
        .map(|(n, percent)| {
            if *percent {
                format!("{n}%")
            } else {
                format!("{}px", f64::from(*n) / 8.0)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let Ok(value) = parse_value(&text) else {
        return TestResult::failed();
    };
    let minified = parse_value(&value.minified_text());
    TestResult::from_bool(matches!(minified, Ok(v) if v == value))
}

#[quickcheck]
fn prop_hex_colors_round_trip(rgba: (u8, u8, u8, u8)) -> bool {
    let bytes = [rgba.0, rgba.1, rgba.2, rgba.3];
    let color = ColorValue::from_rgba8(bytes);
    let reparsed = parse_color(&color.css_text(SerializeMode::Minified));
    matches!(reparsed, Ok(c) if c.to_rgba8().ok() == Some(bytes))
}

#[quickcheck]
fn prop_lab_round_trip(rgb: (u8, u8, u8)) -> bool {
    let source = ColorValue::from_rgba8([rgb.0, rgb.1, rgb.2, 255]);
    let Ok([l, a, b]) = source.to_lab() else {
        return false;
    };
    let lab = ColorValue::new(
        Notation::Lab,
        vec![
            PrimitiveValue::number(1.0),
            PrimitiveValue::number(l),
            PrimitiveValue::number(a),
            PrimitiveValue::number(b),
        ],
    );
    let expected = [rgb.0, rgb.1, rgb.2, 255];
    matches!(lab.and_then(|c| c.to_rgba8()), Ok(bytes) if bytes.iter().zip(expected).all(|(x, y)| x.abs_diff(y) <= 1))
}
