//! Integration tests for color parsing, conversion and gamut mapping.

use std::sync::Arc;

use tinct_css::color::{ColorModel, D50, D65, Notation, TransferFunction};
use tinct_css::{ColorProfile, ColorValue, PrimitiveValue, SerializeMode, ValueError, parse_color};

const SRGB_PRIMARIES: [(f64, f64); 3] = [(0.640, 0.330), (0.300, 0.600), (0.150, 0.060)];

fn assert_near(actual: [f64; 3], expected: [f64; 3], tolerance: f64) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }
}

fn rgba8(text: &str) -> [u8; 4] {
    parse_color(text).unwrap().to_rgba8().unwrap()
}

fn assert_bytes_near(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            a.abs_diff(e) <= 1,
            "expected {expected:?}, got {actual:?}"
        );
    }
}

#[test]
fn test_hex_and_named() {
    assert_eq!(rgba8("#f00"), [255, 0, 0, 255]);
    assert_eq!(rgba8("#336699"), [0x33, 0x66, 0x99, 255]);
    assert_eq!(rgba8("#0000ff80"), [0, 0, 255, 128]);
    assert_eq!(rgba8("RebeccaPurple"), [102, 51, 153, 255]);
    assert_eq!(rgba8("transparent"), [0, 0, 0, 0]);

    let named = parse_color("white").unwrap();
    assert_eq!(named.notation(), &Notation::Named("white".to_string()));
    assert_eq!(named, parse_color("#ffffff").unwrap());
    assert_eq!(named, parse_color("rgb(255 255 255)").unwrap());
}

#[test]
fn test_rejects_non_colors() {
    for text in ["currentcolor", "#ggg", "#12345", "10px", "rgb(1 2)", "rgb(from red r g b)"] {
        assert!(
            matches!(parse_color(text), Err(ValueError::Syntax(_))),
            "{text:?} should not be a color"
        );
    }
}

#[test]
fn test_functional_notations() {
    assert_eq!(rgba8("rgb(255 0 0)"), [255, 0, 0, 255]);
    assert_eq!(rgba8("rgb(100% 0% 0% / 50%)"), [255, 0, 0, 128]);
    assert_eq!(rgba8("rgba(0, 128, 0, 0.5)"), [0, 128, 0, 128]);
    assert_eq!(rgba8("rgb(none 0 0)"), [0, 0, 0, 255]);
    assert_eq!(rgba8("hsl(120 100% 50%)"), [0, 255, 0, 255]);
    assert_eq!(rgba8("hsl(0.5turn 100% 50%)"), [0, 255, 255, 255]);
    assert_eq!(rgba8("hsla(240, 100%, 50%, 1)"), [0, 0, 255, 255]);
    assert_eq!(rgba8("hwb(0 0% 0%)"), [255, 0, 0, 255]);
    assert_bytes_near(rgba8("hwb(0 50% 50%)"), [128, 128, 128, 255]);
    assert_bytes_near(rgba8("rgb(calc(255 / 2) 0 0)"), [128, 0, 0, 255]);
    assert_eq!(rgba8("hsl(calc(60deg * 2) 100% 50%)"), [0, 255, 0, 255]);
}

#[test]
fn test_lab_family_to_srgb() {
    assert_bytes_near(rgba8("lab(54.29 80.8 69.89)"), [255, 0, 0, 255]);
    assert_bytes_near(rgba8("lch(54.29 106.84 40.85)"), [255, 0, 0, 255]);
    assert_bytes_near(rgba8("oklab(0.628 0.2249 0.1258)"), [255, 0, 0, 255]);
    assert_bytes_near(rgba8("oklch(0.628 0.2577 29.23)"), [255, 0, 0, 255]);
    assert_eq!(rgba8("lab(100 0 0)"), [255, 255, 255, 255]);
    assert_eq!(rgba8("lab(0 0 0)"), [0, 0, 0, 255]);
}

#[test]
fn test_srgb_to_lab_family() {
    let red = parse_color("red").unwrap();
    assert_near(red.to_lab().unwrap(), [54.29, 80.80, 69.89], 0.1);
    assert_near(red.to_lch().unwrap(), [54.29, 106.84, 40.85], 0.1);
    assert_near(red.to_oklab().unwrap(), [0.628, 0.2249, 0.1258], 1e-3);
    assert_near(red.to_oklch().unwrap(), [0.628, 0.2577, 29.23], 0.05);

    let white = parse_color("white").unwrap();
    assert_near(white.to_lab().unwrap(), [100.0, 0.0, 0.0], 1e-3);
    assert_near(white.to_xyz(D50).unwrap(), D50, 1e-3);
    assert_near(white.to_xyz(D65).unwrap(), D65, 1e-3);
}

#[test]
fn test_wide_gamut_is_mapped_only_when_clamping() {
    let p3_red = parse_color("color(display-p3 1 0 0)").unwrap();
    assert_eq!(p3_red.model(), ColorModel::Profiled("display-p3".to_string()));

    let raw = p3_red.to_srgb(false).unwrap();
    assert!(raw[0] > 1.0, "display-p3 red is outside sRGB: {raw:?}");
    assert!(raw[1] < 0.0);

    let mapped = p3_red.to_srgb(true).unwrap();
    assert!(mapped.iter().all(|c| (0.0..=1.0).contains(c)), "{mapped:?}");
    assert!(mapped[0] > 0.9);

    // In-gamut colors pass through unchanged.
    let p3_gray = parse_color("color(display-p3 0.5 0.5 0.5)").unwrap();
    assert_near(p3_gray.to_srgb(true).unwrap(), [0.5; 3], 1e-4);
}

#[test]
fn test_overflowing_color_is_not_mapped() {
    for text in ["lab(50 1e308 0)", "oklch(0.5 1e308 30)"] {
        let color = parse_color(text).unwrap();
        assert!(
            matches!(color.to_srgb(true), Err(ValueError::UnsupportedConversion(_))),
            "{text:?} should not map into sRGB"
        );
        assert!(color.to_rgba8().is_err());
    }

    // Large but finite chroma still lands inside the gamut.
    let vivid = parse_color("lch(50 1000 30)").unwrap();
    let mapped = vivid.to_srgb(true).unwrap();
    assert!(mapped.iter().all(|c| (0.0..=1.0).contains(c)), "{mapped:?}");
}

#[test]
fn test_builtin_spaces() {
    assert_bytes_near(rgba8("color(srgb 1 0 0)"), [255, 0, 0, 255]);
    assert_bytes_near(rgba8("color(srgb-linear 0.214 0.214 0.214)"), [128, 128, 128, 255]);
    assert_bytes_near(rgba8("color(xyz-d65 0.9505 1 1.089)"), [255, 255, 255, 255]);
    assert_bytes_near(rgba8("color(xyz-d50 0.9642 1 0.8251)"), [255, 255, 255, 255]);
    for space in ["a98-rgb", "prophoto-rgb", "rec2020", "display-p3"] {
        let white = parse_color(&format!("color({space} 1 1 1)")).unwrap();
        assert_bytes_near(white.to_rgba8().unwrap(), [255, 255, 255, 255]);
    }
    assert!(parse_color("color(unknown-space 1 0 0)").is_err());
}

#[test]
fn test_custom_space_needs_a_profile() {
    let mut color = parse_color("color(--brand 1 0 0)").unwrap();
    assert!(matches!(
        color.to_xyz(D65),
        Err(ValueError::UnsupportedConversion(_))
    ));

    let wrong = Arc::new(
        ColorProfile::from_primaries("--other", SRGB_PRIMARIES, D65, TransferFunction::Srgb)
            .unwrap(),
    );
    assert!(matches!(
        color.bind_profile(wrong),
        Err(ValueError::TypeMismatch(_))
    ));

    let profile = Arc::new(
        ColorProfile::from_primaries("--brand", SRGB_PRIMARIES, D65, TransferFunction::Srgb)
            .unwrap(),
    );
    color.bind_profile(Arc::clone(&profile)).unwrap();
    assert_bytes_near(color.to_rgba8().unwrap(), [255, 0, 0, 255]);
    assert_eq!(color.profile().unwrap().name(), "--brand");

    let mut hex = parse_color("#fff").unwrap();
    assert!(matches!(
        hex.bind_profile(profile),
        Err(ValueError::TypeMismatch(_))
    ));
}

#[test]
fn test_serialization() {
    let cases = [
        ("#FF0000", "#ff0000", "#f00"),
        ("#aabbccdd", "#aabbccdd", "#abcd"),
        ("rgb(255 0 0 / 1)", "rgb(255 0 0)", "rgb(255 0 0)"),
        ("rgb(255 0 0 / 0.5)", "rgb(255 0 0 / 0.5)", "rgb(255 0 0/.5)"),
        ("rgb(255, 0, 0)", "rgb(255, 0, 0)", "rgb(255,0,0)"),
        ("hsl(120deg 50% 50%)", "hsl(120deg 50% 50%)", "hsl(120deg 50% 50%)"),
        ("oklch(0.70 0.1 200)", "oklch(0.7 0.1 200)", "oklch(.7 .1 200)"),
        ("color(display-p3 1 0.5 0)", "color(display-p3 1 0.5 0)", "color(display-p3 1 .5 0)"),
    ];
    for (input, canonical, minified) in cases {
        let color = parse_color(input).unwrap();
        assert_eq!(color.css_text(SerializeMode::Canonical), canonical, "{input:?}");
        assert_eq!(color.css_text(SerializeMode::Minified), minified, "{input:?}");
    }
}

#[test]
fn test_component_mutation() {
    let mut color = parse_color("rgb(10, 20, 30)").unwrap();
    color
        .set_component(0, PrimitiveValue::number(0.5))
        .unwrap();
    assert_eq!(color.css_text(SerializeMode::Canonical), "rgb(10 20 30 / 0.5)");

    assert!(matches!(
        color.set_components(vec![PrimitiveValue::number(1.0)]),
        Err(ValueError::TypeMismatch(_))
    ));
    // A rejected update leaves every component in place.
    assert_eq!(color.components().len(), 4);
    assert_eq!(color.alpha().unwrap(), 0.5);

    let mut hsl = parse_color("hsl(0 100% 50%)").unwrap();
    assert!(hsl
        .set_component(2, PrimitiveValue::dimension(10.0, tinct_css::CssUnit::Deg))
        .is_err());
    hsl.set_component(1, PrimitiveValue::dimension(120.0, tinct_css::CssUnit::Deg))
        .unwrap();
    assert_eq!(hsl.to_rgba8().unwrap(), [0, 255, 0, 255]);
}

#[test]
fn test_color_difference() {
    let red = parse_color("red").unwrap();
    let also_red = parse_color("#ff0000").unwrap();
    let blue = parse_color("blue").unwrap();
    assert!(red.delta_e76(&also_red).unwrap() < 1e-9);
    assert!(red.delta_e76(&blue).unwrap() > 100.0);
    assert!(red.delta_eok(&blue).unwrap() > 0.3);
}

#[test]
fn test_from_rgba8() {
    let color = ColorValue::from_rgba8([1, 2, 3, 255]);
    assert_eq!(color.css_text(SerializeMode::Canonical), "#010203");
    assert_eq!(color.to_rgba8().unwrap(), [1, 2, 3, 255]);
}
