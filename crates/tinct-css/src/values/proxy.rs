use std::io;

use crate::lexer::{LexicalUnit, write_units};
use crate::sink::{SerializeMode, SimpleWriter};

use super::primitive::PrimitiveType;

/// A value whose type is only known after substitution.
///
/// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "If a property value contains one or more var() functions, and those
/// functions are syntactically valid, the entire property's grammar must be
/// assumed to be valid at parse time."
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyValue {
    /// A value that is exactly one `var()`.
    Var {
        /// The custom property name, including `--`.
        name: String,
        /// The fallback units after the comma.
        fallback: Option<Vec<LexicalUnit>>,
    },
    /// A value that is exactly one `attr()`.
    Attr {
        /// The attribute name.
        name: String,
        /// The attribute type or unit.
        type_or_unit: Option<String>,
        /// The fallback units after the comma.
        fallback: Option<Vec<LexicalUnit>>,
    },
    /// Any other value containing a substitution, kept as its units.
    Lexical(Vec<LexicalUnit>),
}

impl ProxyValue {
    /// The type tag.
    pub const fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Var { .. } => PrimitiveType::Var,
            Self::Attr { .. } => PrimitiveType::Attr,
            Self::Lexical(_) => PrimitiveType::Lexical,
        }
    }

    /// Build from a single `var()`/`attr()` unit.
    pub fn from_unit(unit: &LexicalUnit) -> Option<Self> {
        match unit {
            LexicalUnit::Var { name, fallback } => Some(Self::Var {
                name: name.clone(),
                fallback: fallback.clone(),
            }),
            LexicalUnit::Attr {
                name,
                type_or_unit,
                fallback,
            } => Some(Self::Attr {
                name: name.clone(),
                type_or_unit: type_or_unit.clone(),
                fallback: fallback.clone(),
            }),
            _ => None,
        }
    }

    /// The lexical units this proxy stands for.
    pub fn units(&self) -> Vec<LexicalUnit> {
        match self {
            Self::Var { name, fallback } => vec![LexicalUnit::Var {
                name: name.clone(),
                fallback: fallback.clone(),
            }],
            Self::Attr {
                name,
                type_or_unit,
                fallback,
            } => vec![LexicalUnit::Attr {
                name: name.clone(),
                type_or_unit: type_or_unit.clone(),
                fallback: fallback.clone(),
            }],
            Self::Lexical(units) => units.clone(),
        }
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        write_units(w, &self.units(), mode)
    }
}
