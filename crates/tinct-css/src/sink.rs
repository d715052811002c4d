//! Serialization sink.
//!
//! Values serialize themselves into a [`SimpleWriter`]. Writing into a
//! `String` cannot fail; writing through [`IoWriter`] propagates the
//! underlying I/O error to the caller.

use std::io;

/// Minimal scoped-write interface used by every serializer in the crate.
pub trait SimpleWriter {
    /// Write a piece of text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Write a single character.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    fn write_char(&mut self, c: char) -> io::Result<()>;
}

impl SimpleWriter for String {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }
}

/// Adapter that writes UTF-8 text into any [`io::Write`].
#[derive(Debug)]
pub struct IoWriter<W> {
    inner: W,
}

impl<W: io::Write> IoWriter<W> {
    /// Wrap a byte sink.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwrap the byte sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> SimpleWriter for IoWriter<W> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.inner.write_all(c.encode_utf8(&mut buf).as_bytes())
    }
}

/// Which of the two text forms a serializer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializeMode {
    /// Readable form with conventional spacing.
    #[default]
    Canonical,
    /// Shortest equivalent form.
    Minified,
}

impl SerializeMode {
    /// Whether this is [`SerializeMode::Minified`].
    pub const fn is_minified(self) -> bool {
        matches!(self, Self::Minified)
    }

    /// The separator placed after a comma.
    pub const fn comma(self) -> &'static str {
        match self {
            Self::Canonical => ", ",
            Self::Minified => ",",
        }
    }
}

/// Serialize into an in-memory buffer.
///
/// Writing into a `String` never fails, so the sink result is discarded here
/// and nowhere else.
pub fn to_text(write: impl FnOnce(&mut String) -> io::Result<()>) -> String {
    let mut buf = String::new();
    let _ = write(&mut buf);
    buf
}

/// Write a CSS number in its shortest round-trippable form.
///
/// Minified output drops the leading zero of fractions (`.5`, `-.25`).
///
/// # Errors
///
/// Returns the sink's I/O error.
pub fn write_number(w: &mut dyn SimpleWriter, value: f64, mode: SerializeMode) -> io::Result<()> {
    if value == 0.0 {
        return w.write_char('0');
    }
    if value.is_infinite() {
        return w.write_str(if value > 0.0 { "infinity" } else { "-infinity" });
    }
    if value.is_nan() {
        return w.write_str("NaN");
    }
    let text = value.to_string();
    if mode.is_minified() {
        if let Some(rest) = text.strip_prefix("0.") {
            w.write_char('.')?;
            return w.write_str(rest);
        }
        if let Some(rest) = text.strip_prefix("-0.") {
            w.write_str("-.")?;
            return w.write_str(rest);
        }
    }
    w.write_str(&text)
}

/// Format a number into a new `String`.
pub fn number_text(value: f64, mode: SerializeMode) -> String {
    to_text(|buf| write_number(buf, value, mode))
}

/// Write an identifier, escaping code points that cannot appear unescaped.
///
/// # Errors
///
/// Returns the sink's I/O error.
pub fn write_ident(w: &mut dyn SimpleWriter, ident: &str) -> io::Result<()> {
    for (i, c) in ident.chars().enumerate() {
        let plain = c.is_ascii_alphabetic()
            || c == '_'
            || c == '-'
            || !c.is_ascii()
            || (i > 0 && c.is_ascii_digit());
        if plain {
            w.write_char(c)?;
        } else if c.is_ascii_digit() {
            w.write_str(&format!("\\{:x} ", u32::from(c)))?;
        } else {
            w.write_char('\\')?;
            w.write_char(c)?;
        }
    }
    Ok(())
}

/// Write a quoted string in its original quote, escaping that quote,
/// backslashes and newlines.
///
/// # Errors
///
/// Returns the sink's I/O error.
pub fn write_string(w: &mut dyn SimpleWriter, value: &str, quote: char) -> io::Result<()> {
    w.write_char(quote)?;
    for c in value.chars() {
        match c {
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\a ")?,
            c if c == quote => {
                w.write_char('\\')?;
                w.write_char(c)?;
            }
            c => w.write_char(c)?,
        }
    }
    w.write_char(quote)
}
