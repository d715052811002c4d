use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::values::PrimitiveType;

/// [CSS Cascade § 7.3 Explicit Defaulting](https://www.w3.org/TR/css-cascade-5/#defaulting-keywords)
///
/// "All CSS properties accept the CSS-wide keyword values as the entire
/// value of the property."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CssWideKeyword {
    /// `initial`
    Initial,
    /// `inherit`
    Inherit,
    /// `unset`
    Unset,
    /// `revert`
    Revert,
    /// `revert-layer`
    RevertLayer,
}

impl CssWideKeyword {
    /// Recognize a CSS-wide keyword (ASCII case-insensitive).
    pub fn from_ident(ident: &str) -> Option<Self> {
        ident.parse().ok()
    }

    /// The keyword text.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The primitive type tag reported for this keyword.
    pub const fn primitive_type(self) -> PrimitiveType {
        match self {
            Self::Initial => PrimitiveType::Initial,
            Self::Inherit => PrimitiveType::Inherit,
            Self::Unset => PrimitiveType::Unset,
            Self::Revert => PrimitiveType::Revert,
            Self::RevertLayer => PrimitiveType::RevertLayer,
        }
    }
}
