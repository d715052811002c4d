//! Grammar fragments used to validate values.
//!
//! [CSS Properties and Values API § 5 Syntax Strings](https://www.w3.org/TR/css-properties-values-api-1/#syntax-strings)
//!
//! A [`Syntax`] is a chain of alternatives (`|`), each a category plus a
//! multiplier. Matching a value against the chain yields a three-valued
//! [`Match`].

mod matching;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::error::{Result, ValueError};
use crate::values::CssWideKeyword;

pub use matching::matches;

/// [§ 5.1 Supported Names](https://www.w3.org/TR/css-properties-values-api-1/#supported-names)
///
/// The data type a syntax component accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum SyntaxCategory {
    /// `*`: any value.
    #[strum(serialize = "*")]
    Universal,
    /// A literal keyword; the keyword is stored on the [`Syntax`].
    Ident,
    /// `<length>`
    Length,
    /// `<percentage>`
    Percentage,
    /// `<length-percentage>`
    LengthPercentage,
    /// `<number>`
    Number,
    /// `<integer>`
    Integer,
    /// `<angle>`
    Angle,
    /// `<time>`
    Time,
    /// `<frequency>`
    Frequency,
    /// `<resolution>`
    Resolution,
    /// `<flex>`
    Flex,
    /// `<ratio>`
    Ratio,
    /// `<color>`
    Color,
    /// `<image>`
    Image,
    /// `<url>`
    Url,
    /// `<string>`
    String,
    /// `<custom-ident>`
    CustomIdent,
    /// `<counter>`
    Counter,
    /// `<basic-shape>`
    BasicShape,
    /// `<transform-function>`
    TransformFunction,
    /// `<transform-list>`
    TransformList,
    /// `<easing-function>`
    EasingFunction,
    /// `<unicode-range>`
    UnicodeRange,
}

/// [§ 5.3 Component Multipliers](https://www.w3.org/TR/css-properties-values-api-1/#multipliers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Multiplier {
    /// A single value.
    #[default]
    None,
    /// `+`: a space-separated list of one or more values.
    OneOrMore,
    /// `*`: a space-separated list of zero or more values.
    ZeroOrMore,
    /// `#`: a comma-separated list of one or more values.
    CommaSeparated,
}

impl Multiplier {
    const fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::OneOrMore => "+",
            Self::ZeroOrMore => "*",
            Self::CommaSeparated => "#",
        }
    }
}

/// Outcome of matching a value against a [`Syntax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Match {
    /// The value is accepted.
    True,
    /// The value is rejected. Not an error.
    False,
    /// The value contains a deferred substitution. Accept provisionally and
    /// re-validate once substitution has been resolved.
    Pending,
}

impl Match {
    /// Whether the value may be used for now (`True` or `Pending`).
    pub const fn is_acceptable(self) -> bool {
        !matches!(self, Self::False)
    }
}

impl From<bool> for Match {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

/// One alternative of a grammar, linked to the next alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syntax {
    category: SyntaxCategory,
    keyword: Option<String>,
    multiplier: Multiplier,
    next: Option<Box<Syntax>>,
}

impl Syntax {
    /// A single-value component of `category`.
    pub const fn new(category: SyntaxCategory) -> Self {
        Self {
            category,
            keyword: None,
            multiplier: Multiplier::None,
            next: None,
        }
    }

    /// The universal syntax `*`.
    pub const fn universal() -> Self {
        Self::new(SyntaxCategory::Universal)
    }

    /// A component accepting exactly the identifier `keyword`.
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::new(SyntaxCategory::Ident)
        }
    }

    /// Set this component's multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Append `alternative` to the end of the chain (`self | alternative`).
    #[must_use]
    pub fn or(mut self, alternative: Self) -> Self {
        self.push_alternative(alternative);
        self
    }

    fn push_alternative(&mut self, alternative: Self) {
        if let Some(next) = self.next.as_mut() {
            next.push_alternative(alternative);
        } else {
            self.next = Some(Box::new(alternative));
        }
    }

    /// The category this component accepts.
    pub const fn category(&self) -> SyntaxCategory {
        self.category
    }

    /// The literal keyword of an [`SyntaxCategory::Ident`] component.
    pub fn keyword_text(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// This component's multiplier.
    pub const fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// The next alternative, if any.
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }

    /// Iterate the alternatives in order, starting with this one.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |s| s.next())
    }

    /// [§ 5.4 Parsing The Syntax String](https://www.w3.org/TR/css-properties-values-api-1/#parsing-syntax)
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] for empty alternatives, unknown data type
    /// names, CSS-wide keywords used as literals and stray characters.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text == "*" {
            return Ok(Self::universal());
        }
        let mut components = text.split('|').map(parse_component);
        let first = components
            .next()
            .ok_or_else(|| ValueError::syntax("empty syntax string"))??;
        components.try_fold(first, |chain, component| Ok(chain.or(component?)))
    }
}

fn parse_component(text: &str) -> Result<Syntax> {
    let text = text.trim();
    let (body, multiplier) = match text.chars().last() {
        Some('+') if text.len() > 1 => (&text[..text.len() - 1], Multiplier::OneOrMore),
        Some('#') if text.len() > 1 => (&text[..text.len() - 1], Multiplier::CommaSeparated),
        Some('*') if text.len() > 1 => (&text[..text.len() - 1], Multiplier::ZeroOrMore),
        _ => (text, Multiplier::None),
    };

    if let Some(name) = body.strip_prefix('<').and_then(|b| b.strip_suffix('>')) {
        let category = SyntaxCategory::from_str(name)
            .ok()
            .filter(|c| !matches!(c, SyntaxCategory::Universal | SyntaxCategory::Ident))
            .ok_or_else(|| ValueError::syntax(format!("unknown data type <{name}>")))?;
        return Ok(Syntax::new(category).with_multiplier(multiplier));
    }

    let valid_ident = !body.is_empty()
        && !body.starts_with(|c: char| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii());
    if !valid_ident {
        return Err(ValueError::syntax(format!("invalid syntax component '{text}'")));
    }
    if CssWideKeyword::from_ident(body).is_some() || body.eq_ignore_ascii_case("default") {
        return Err(ValueError::syntax(format!(
            "'{body}' cannot be used as a literal keyword"
        )));
    }
    Ok(Syntax::keyword(body).with_multiplier(multiplier))
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            match (component.category, component.keyword.as_deref()) {
                (SyntaxCategory::Universal, _) => f.write_str("*")?,
                (SyntaxCategory::Ident, Some(keyword)) => f.write_str(keyword)?,
                (category, _) => write!(f, "<{category}>")?,
            }
            f.write_str(component.multiplier.suffix())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alternation_chain() {
        let syntax = Syntax::parse("<length> | <percentage>+ | auto").unwrap();
        let parts: Vec<_> = syntax
            .iter()
            .map(|s| (s.category(), s.multiplier()))
            .collect();
        assert_eq!(
            parts,
            vec![
                (SyntaxCategory::Length, Multiplier::None),
                (SyntaxCategory::Percentage, Multiplier::OneOrMore),
                (SyntaxCategory::Ident, Multiplier::None),
            ]
        );
        assert_eq!(syntax.iter().nth(2).unwrap().keyword_text(), Some("auto"));
        assert_eq!(syntax.to_string(), "<length> | <percentage>+ | auto");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Syntax::parse("").is_err());
        assert!(Syntax::parse("<length> |").is_err());
        assert!(Syntax::parse("<nonsense>").is_err());
        assert!(Syntax::parse("inherit").is_err());
        assert!(Syntax::parse("<length").is_err());
    }

    #[test]
    fn test_builder_matches_parser() {
        let built = Syntax::new(SyntaxCategory::Color)
            .or(Syntax::new(SyntaxCategory::Url).with_multiplier(Multiplier::CommaSeparated));
        assert_eq!(built, Syntax::parse("<color> | <url>#").unwrap());
    }
}
