//! The colorimetry engine.
//!
//! [CSS Color Module Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Color values keep their specified components; conversions go through CIE
//! XYZ using the profiles in [`profile`] and Bradford adaptation between
//! reference whites.

pub mod adaptation;
pub mod gamut;
pub mod hsl;
pub mod lab;
pub mod matrix;
pub mod named;
mod parse;
pub mod profile;
mod value;

pub use adaptation::{D50, D65};
pub use matrix::Matrix3;
pub use named::is_color_keyword;
pub(crate) use parse::parse_color_function;
pub use parse::{color_from_hash, is_color_function, parse_color};
pub use profile::{ColorProfile, TransferFunction, builtin};
pub use value::{ColorModel, ColorValue, Notation, hex_bytes};
