use std::io;

use serde::Serialize;
use strum_macros::Display;

use crate::sink::{SerializeMode, SimpleWriter};

use super::value::Value;

/// How the items of a [`ValueList`] are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum ListSeparator {
    /// Whitespace.
    Space,
    /// `,`
    Comma,
    /// `/`
    Slash,
}

/// A list of component values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    separator: ListSeparator,
    items: Vec<Value>,
}

impl ValueList {
    /// Create a list.
    pub const fn new(separator: ListSeparator, items: Vec<Value>) -> Self {
        Self { separator, items }
    }

    /// A whitespace-separated list.
    pub const fn space(items: Vec<Value>) -> Self {
        Self::new(ListSeparator::Space, items)
    }

    /// A comma-separated list.
    pub const fn comma(items: Vec<Value>) -> Self {
        Self::new(ListSeparator::Comma, items)
    }

    /// The separator.
    pub const fn separator(&self) -> ListSeparator {
        self.separator
    }

    /// The items.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Append an item.
    pub fn push(&mut self, item: Value) {
        self.items.push(item);
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        let separator = match (self.separator, mode) {
            (ListSeparator::Space, _) => " ",
            (ListSeparator::Comma, _) => mode.comma(),
            (ListSeparator::Slash, SerializeMode::Canonical) => " / ",
            (ListSeparator::Slash, SerializeMode::Minified) => "/",
        };
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                w.write_str(separator)?;
            }
            item.write_css(w, mode)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
