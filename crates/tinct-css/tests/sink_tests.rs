//! Integration tests for serializing through a fallible byte sink.

use std::io;

use tinct_css::sink::IoWriter;
use tinct_css::{SerializeMode, SimpleWriter, Value, parse_color, parse_value};

/// Accepts `budget` bytes, then fails every write.
struct LimitedSink {
    written: Vec<u8>,
    budget: usize,
}

impl LimitedSink {
    fn new(budget: usize) -> Self {
        Self {
            written: Vec::new(),
            budget,
        }
    }
}

impl io::Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(io::Error::other("sink full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serialize with every possible budget short of the full text and check
/// that each failure reaches the caller.
fn assert_failures_propagate(
    expected: &str,
    write: impl Fn(&mut dyn SimpleWriter) -> io::Result<()>,
) {
    for budget in 0..expected.len() {
        let mut sink = IoWriter::new(LimitedSink::new(budget));
        match write(&mut sink) {
            Err(error) => assert_eq!(error.to_string(), "sink full"),
            Ok(()) => panic!("budget {budget} for {expected:?} should fail"),
        }
    }

    let mut sink = IoWriter::new(LimitedSink::new(expected.len()));
    write(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink.into_inner().written).unwrap(), expected);
}

#[test]
fn test_value_errors_propagate() {
    for text in ["1px 2px, 3px", "var(--gap, 1px)", "'quoted' url(a.png)", "inherit"] {
        let value = parse_value(text).unwrap();
        for mode in [SerializeMode::Canonical, SerializeMode::Minified] {
            let expected = if mode.is_minified() {
                value.minified_text()
            } else {
                value.css_text()
            };
            assert_failures_propagate(&expected, |w| value.write_css(w, mode));
        }
    }
}

#[test]
fn test_expression_errors_propagate() {
    for text in ["calc((1px + 2em) * 3 - 4px)", "clamp(none, 2vw, calc(1px / 2))"] {
        let value = parse_value(text).unwrap();
        let primitive = value.as_primitive().unwrap();
        for mode in [SerializeMode::Canonical, SerializeMode::Minified] {
            let expected = primitive.css_text(mode);
            assert_failures_propagate(&expected, |w| primitive.write_css(w, mode));
        }
    }
}

#[test]
fn test_color_errors_propagate() {
    for text in ["#336699", "white", "rgba(255, 0, 0, 0.5)", "color(display-p3 1 0.5 0 / 50%)"] {
        let color = parse_color(text).unwrap();
        for mode in [SerializeMode::Canonical, SerializeMode::Minified] {
            let expected = color.css_text(mode);
            assert_failures_propagate(&expected, |w| color.write_css(w, mode));
        }
    }
}

#[test]
fn test_io_writer_matches_buffer() {
    let value = Value::parse("1px solid red").unwrap();
    let mut sink = IoWriter::new(Vec::new());
    value.write_css(&mut sink, SerializeMode::Canonical).unwrap();
    assert_eq!(sink.into_inner(), value.css_text().into_bytes());
}
