//! Lexical scanner.
//!
//! [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/)
//!
//! Turns property value text into [`LexicalUnit`]s, the input the value
//! model is translated from.

mod scanner;
mod unit;

pub use scanner::{Scanner, parse_units};
pub use unit::{LexicalUnit, Operator, units_text, write_units};
