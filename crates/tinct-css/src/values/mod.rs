//! The value model.
//!
//! [CSS Values and Units Module Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! A [`Value`] is a CSS-wide keyword, a typed or proxy [`PrimitiveValue`], a
//! [`ValueList`], or a [`ShorthandValue`]. Values are created by translating
//! lexical units, validated with [`crate::syntax::matches`] and serialized
//! into a [`crate::sink::SimpleWriter`].

mod factory;
mod function;
mod keyword;
mod list;
mod primitive;
mod proxy;
mod substitute;
mod value;

pub use factory::{parse_value, value_from_units};
pub(crate) use factory::{Translated, ready, translate_unit};
pub use function::{CounterValue, FunctionValue};
pub use keyword::CssWideKeyword;
pub use list::{ListSeparator, ValueList};
pub use primitive::{NumberValue, PrimitiveType, PrimitiveValue, RatioValue};
pub use proxy::ProxyValue;
pub use substitute::SubstitutionContext;
pub use value::{CssKind, Provenance, ShorthandValue, Value, ValueKind};
