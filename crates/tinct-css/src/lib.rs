//! CSS value algebra: typed values, grammar matching, `calc()` evaluation and
//! colorimetry.
//!
//! # Scope
//!
//! This crate implements:
//! - **Lexical scanner** ([CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/))
//!   - Numbers, dimensions, strings, hashes, functions, operators
//!   - `var()` / `attr()` references and unicode ranges
//!
//! - **Value model** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - CSS-wide keywords, typed primitives, lists and shorthands
//!   - Deferred substitution values and their resolution
//!   - Canonical and minified serialization
//!
//! - **Grammar matching** ([CSS Properties and Values API § 5](https://www.w3.org/TR/css-properties-values-api-1/#syntax-strings))
//!   - Syntax strings with `|`, `+`, `*` and `#`
//!   - Three-valued matching: true, false, pending
//!
//! - **Expression engine** ([CSS Values Level 4 § 10](https://www.w3.org/TR/css-values-4/#math))
//!   - `calc()` trees, math functions, dimensional analysis
//!   - Evaluation against a resolution context
//!
//! - **Colorimetry** ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - Hex, named, `rgb()`, `hsl()`, `hwb()`, Lab, LCH, Oklab, OkLCh, `color()`
//!   - RGB profiles, Bradford adaptation, sRGB gamut mapping
//!
//! # Not Yet Implemented
//!
//! - Relative color syntax (`rgb(from ...)`)
//! - Color interpolation and `color-mix()`
//! - Property-specific grammars and the cascade

/// Color values and conversions per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// The crate error type.
pub mod error;
/// `calc()` and math functions per [CSS Values Level 4 § 10](https://www.w3.org/TR/css-values-4/#math).
pub mod expr;
/// Lexical units per [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/).
pub mod lexer;
/// Serialization sink.
pub mod sink;
/// Value grammars per [CSS Properties and Values API § 5](https://www.w3.org/TR/css-properties-values-api-1/#syntax-strings).
pub mod syntax;
/// Units and their conversions.
pub mod units;
/// The value model.
pub mod values;

// Re-exports for convenience
pub use color::{ColorProfile, ColorValue, parse_color};
pub use error::{Result, ValueError};
pub use expr::{
    AbsoluteEvaluator, ContextEvaluator, Evaluator, ExpressionValue, MathFunctionValue,
    PercentageEvaluator, ResolutionContext, ResultCategory,
};
pub use lexer::{LexicalUnit, parse_units};
pub use sink::{SerializeMode, SimpleWriter};
pub use syntax::{Match, Multiplier, Syntax, SyntaxCategory, matches};
pub use units::{CssUnit, UnitCategory};
pub use values::{
    CssKind, CssWideKeyword, PrimitiveType, PrimitiveValue, SubstitutionContext, Value,
    ValueKind, parse_value,
};
