use std::io;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};
use tracing::debug;

use crate::color::ColorValue;
use crate::error::{Result, ValueError};
use crate::lexer::{LexicalUnit, parse_units};
use crate::sink::{SerializeMode, SimpleWriter, to_text};
use crate::syntax::{Match, Syntax, matches};

use super::factory;
use super::keyword::CssWideKeyword;
use super::list::ValueList;
use super::primitive::{PrimitiveType, PrimitiveValue};
use super::substitute::SubstitutionContext;

/// The coarse discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum CssKind {
    /// A CSS-wide keyword.
    Keyword,
    /// A typed primitive value.
    Typed,
    /// A value whose type is only known after substitution.
    Proxy,
    /// A space-, comma- or slash-separated list.
    List,
    /// The value of a shorthand property, holding its longhands.
    Shorthand,
}

/// Where a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Provenance {
    /// Written directly in a declaration.
    #[default]
    Original,
    /// Produced by expanding a shorthand. Modify through the shorthand.
    Subproperty,
}

/// The variants a [`Value`] can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// `initial`, `inherit`, `unset`, `revert`, `revert-layer`
    Keyword(CssWideKeyword),
    /// A typed or proxy value.
    Primitive(PrimitiveValue),
    /// A list of values.
    List(ValueList),
    /// A shorthand's longhand values.
    Shorthand(ShorthandValue),
}

/// A parsed CSS property value.
///
/// Every value has a canonical and a minified text form, and reparsing
/// either form yields an equal value. A [`Provenance::Subproperty`] value
/// rejects direct mutation.
#[derive(Debug)]
pub struct Value {
    kind: ValueKind,
    provenance: Provenance,
}

impl Value {
    /// Wrap a value kind as an original value.
    pub const fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            provenance: Provenance::Original,
        }
    }

    /// A CSS-wide keyword value.
    pub const fn keyword(keyword: CssWideKeyword) -> Self {
        Self::new(ValueKind::Keyword(keyword))
    }

    /// A primitive value.
    pub const fn primitive(value: PrimitiveValue) -> Self {
        Self::new(ValueKind::Primitive(value))
    }

    /// Parse value text.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when the text is not a valid value.
    pub fn parse(text: &str) -> Result<Self> {
        factory::parse_value(text)
    }

    /// Translate a lexical unit sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when the units are not a valid value.
    pub fn from_units(units: &[LexicalUnit]) -> Result<Self> {
        factory::value_from_units(units)
    }

    /// The held variant.
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Consume the value, returning the held variant.
    pub fn into_kind(self) -> ValueKind {
        self.kind
    }

    /// The coarse discriminant.
    pub const fn css_kind(&self) -> CssKind {
        match &self.kind {
            ValueKind::Keyword(_) => CssKind::Keyword,
            ValueKind::Primitive(p) if p.is_proxy() => CssKind::Proxy,
            ValueKind::Primitive(_) => CssKind::Typed,
            ValueKind::List(_) => CssKind::List,
            ValueKind::Shorthand(_) => CssKind::Shorthand,
        }
    }

    /// The fine-grained type tag of a keyword, typed or proxy value.
    pub const fn primitive_type(&self) -> Option<PrimitiveType> {
        match &self.kind {
            ValueKind::Keyword(k) => Some(k.primitive_type()),
            ValueKind::Primitive(p) => Some(p.primitive_type()),
            ValueKind::List(_) | ValueKind::Shorthand(_) => None,
        }
    }

    /// The primitive, if this is a typed or proxy value.
    pub const fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match &self.kind {
            ValueKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// The list, if this is a list value.
    pub const fn as_list(&self) -> Option<&ValueList> {
        match &self.kind {
            ValueKind::List(list) => Some(list),
            _ => None,
        }
    }

    /// Where this value came from.
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Whether this value was produced by shorthand expansion.
    pub const fn is_subproperty(&self) -> bool {
        matches!(self.provenance, Provenance::Subproperty)
    }

    fn mark_subproperty(&mut self) {
        self.provenance = Provenance::Subproperty;
    }

    /// Whether any part of this value is a deferred substitution.
    pub fn contains_proxy(&self) -> bool {
        match &self.kind {
            ValueKind::Keyword(_) => false,
            ValueKind::Primitive(p) => p.contains_proxy(),
            ValueKind::List(list) => list.iter().any(Self::contains_proxy),
            ValueKind::Shorthand(s) => s.longhands.iter().any(|(_, v)| v.contains_proxy()),
        }
    }

    /// Match against a grammar.
    pub fn matches(&self, syntax: &Syntax) -> Match {
        matches(self, syntax)
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        match &self.kind {
            ValueKind::Keyword(k) => w.write_str(k.as_str()),
            ValueKind::Primitive(p) => p.write_css(w, mode),
            ValueKind::List(list) => list.write_css(w, mode),
            ValueKind::Shorthand(s) => s.write_css(w, mode),
        }
    }

    /// The canonical text form.
    pub fn css_text(&self) -> String {
        to_text(|buf| self.write_css(buf, SerializeMode::Canonical))
    }

    /// The minified text form.
    pub fn minified_text(&self) -> String {
        to_text(|buf| self.write_css(buf, SerializeMode::Minified))
    }

    fn check_mutable(&self) -> Result<()> {
        if self.is_subproperty() {
            return Err(ValueError::invalid_modification(
                "value was produced by a shorthand; modify the shorthand declaration instead",
            ));
        }
        Ok(())
    }

    /// Replace this value by parsing `text`.
    ///
    /// On error the value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidModification`] for a subproperty value and
    /// [`ValueError::Syntax`] when the text does not parse.
    pub fn set_css_text(&mut self, text: &str) -> Result<()> {
        self.check_mutable()?;
        self.kind = factory::parse_value(text)?.kind;
        Ok(())
    }

    /// Mutable access to the primitive.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidModification`] for a subproperty value and
    /// [`ValueError::TypeMismatch`] when this is not a primitive value.
    pub fn primitive_mut(&mut self) -> Result<&mut PrimitiveValue> {
        self.check_mutable()?;
        match &mut self.kind {
            ValueKind::Primitive(p) => Ok(p),
            _ => Err(ValueError::type_mismatch("not a primitive value")),
        }
    }

    /// Mutable access to the color.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidModification`] for a subproperty value and
    /// [`ValueError::TypeMismatch`] when this is not a color.
    pub fn color_mut(&mut self) -> Result<&mut ColorValue> {
        match self.primitive_mut()? {
            PrimitiveValue::Color(color) => Ok(color),
            _ => Err(ValueError::type_mismatch("not a color value")),
        }
    }

    /// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#substitute-a-var)
    ///
    /// Resolve every `var()` and `attr()` in this value and translate the
    /// result. Values without substitutions are returned as a copy.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when the value is invalid at
    /// computed-value time and [`ValueError::Syntax`] when the substituted
    /// units are not a valid value.
    pub fn substitute(&self, ctx: &SubstitutionContext) -> Result<Self> {
        if !self.contains_proxy() {
            return Ok(self.clone());
        }
        let units = parse_units(&self.css_text())?;
        let resolved = ctx.substitute_units(&units)?;
        debug!(
            from = %self.css_text(),
            units = resolved.len(),
            "substituted value"
        );
        Self::from_units(&resolved)
    }
}

/// A copy is always an original value, even if the source was a subproperty.
impl Clone for Value {
    fn clone(&self) -> Self {
        Self::new(self.kind.clone())
    }
}

/// Provenance does not take part in equality.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl From<PrimitiveValue> for Value {
    fn from(value: PrimitiveValue) -> Self {
        Self::primitive(value)
    }
}

impl From<ValueList> for Value {
    fn from(value: ValueList) -> Self {
        Self::new(ValueKind::List(value))
    }
}

impl From<CssWideKeyword> for Value {
    fn from(value: CssWideKeyword) -> Self {
        Self::keyword(value)
    }
}

/// The value of a shorthand property: one value per longhand, each marked as
/// a subproperty.
#[derive(Debug, PartialEq)]
pub struct ShorthandValue {
    property: String,
    longhands: Vec<(String, Value)>,
}

impl ShorthandValue {
    /// Group expanded longhand values under their shorthand.
    pub fn new(property: impl Into<String>, longhands: Vec<(String, Value)>) -> Self {
        let longhands = longhands
            .into_iter()
            .map(|(name, mut value)| {
                value.mark_subproperty();
                (name, value)
            })
            .collect();
        Self {
            property: property.into(),
            longhands,
        }
    }

    /// The shorthand property name.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The longhands in declaration order.
    pub fn longhands(&self) -> &[(String, Value)] {
        &self.longhands
    }

    /// The value of one longhand.
    pub fn longhand(&self, name: &str) -> Option<&Value> {
        self.longhands
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Mutable access to one longhand. The longhand is still a subproperty,
    /// so its mutators fail with [`ValueError::InvalidModification`].
    pub fn longhand_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.longhands
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Write the longhand values, space-separated.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        for (i, (_, value)) in self.longhands.iter().enumerate() {
            if i > 0 {
                w.write_char(' ')?;
            }
            value.write_css(w, mode)?;
        }
        Ok(())
    }
}

/// Longhands stay subproperties of the copied shorthand.
impl Clone for ShorthandValue {
    fn clone(&self) -> Self {
        Self::new(self.property.clone(), self.longhands.clone())
    }
}
