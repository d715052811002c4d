use std::io;

use crate::sink::{SerializeMode, SimpleWriter, write_ident, write_string};

use super::list::ValueList;

/// A function value: its name and comma-separated arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    /// The ASCII-lowercased name.
    pub name: String,
    /// The arguments, one item per comma-separated group.
    pub arguments: ValueList,
}

impl FunctionValue {
    /// Create a function value.
    pub fn new(name: impl Into<String>, arguments: ValueList) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        w.write_str(&self.name)?;
        w.write_char('(')?;
        self.arguments.write_css(w, mode)?;
        w.write_char(')')
    }
}

/// [CSS Lists § 4.2 Counter Functions](https://www.w3.org/TR/css-lists-3/#counter-functions)
///
/// `counter( <counter-name>, <counter-style>? )` and
/// `counters( <counter-name>, <string>, <counter-style>? )`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterValue {
    /// The counter name.
    pub name: String,
    /// The joining string; `Some` for `counters()`.
    pub separator: Option<String>,
    /// The counter style, if given.
    pub style: Option<String>,
}

impl CounterValue {
    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        w.write_str(if self.separator.is_some() {
            "counters("
        } else {
            "counter("
        })?;
        write_ident(w, &self.name)?;
        if let Some(separator) = &self.separator {
            w.write_str(mode.comma())?;
            write_string(w, separator, '"')?;
        }
        if let Some(style) = &self.style {
            w.write_str(mode.comma())?;
            write_ident(w, style)?;
        }
        w.write_char(')')
    }
}
