use crate::error::{Result, ValueError};
use crate::expr::MathFunction;
use crate::units::CssUnit;

use super::unit::{LexicalUnit, Operator};

/// Scan a property value into lexical units.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for unbalanced parentheses or brackets,
/// malformed `var()`/`attr()`/`url()` notations, newlines inside strings and
/// delimiters that cannot appear in a value.
pub fn parse_units(text: &str) -> Result<Vec<LexicalUnit>> {
    Scanner::new(text).scan()
}

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Value scanner following the CSS Syntax tokenizer, building nested
/// lexical units instead of a flat token stream.
pub struct Scanner {
    /// The input being scanned
    input: Vec<char>,
    /// Current position in the input
    position: usize,
}

impl Scanner {
    /// Create a scanner over `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Scan the whole input.
    ///
    /// # Errors
    ///
    /// See [`parse_units`].
    pub fn scan(mut self) -> Result<Vec<LexicalUnit>> {
        self.consume_sequence(None, false)
    }

    /// Consume units until `closing` (or EOF when `closing` is `None`).
    ///
    /// In `math` mode a `+` or `-` that directly follows an operand is an
    /// operator even without surrounding whitespace.
    fn consume_sequence(&mut self, closing: Option<char>, math: bool) -> Result<Vec<LexicalUnit>> {
        let mut units = Vec::new();
        loop {
            self.consume_whitespace_and_comments();

            let Some(c) = self.peek() else {
                return match closing {
                    Some(expected) => Err(ValueError::syntax(format!(
                        "expected '{expected}' before end of input"
                    ))),
                    None => Ok(units),
                };
            };

            let unit = match c {
                ')' | ']' => {
                    if closing == Some(c) {
                        self.advance();
                        return Ok(units);
                    }
                    return Err(self.unexpected(c));
                }

                '+' | '-' if math && follows_operand(units.last()) => {
                    self.advance();
                    LexicalUnit::Operator(if c == '+' { Operator::Plus } else { Operator::Minus })
                }

                // "If the input stream starts with a number, reconsume the
                // current input code point, consume a numeric token, and return it."
                _ if self.would_start_number() => self.consume_numeric()?,

                '-' if self.would_start_ident_sequence() => self.consume_ident_like()?,
                '-' => self.operator(Operator::Minus),
                '+' => self.operator(Operator::Plus),

                // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
                '"' | '\'' => {
                    self.advance();
                    self.consume_string(c)?
                }

                // "U+0023 NUMBER SIGN (#)"
                '#' => {
                    if !self.peek_at(1).is_some_and(is_ident_code_point) {
                        return Err(self.unexpected('#'));
                    }
                    self.advance();
                    let value = self.consume_ident_sequence();
                    LexicalUnit::Hash(value)
                }

                ',' => self.operator(Operator::Comma),
                '/' => self.operator(Operator::Slash),
                '*' => self.operator(Operator::Multiply),
                '^' => self.operator(Operator::Exponent),
                '~' => self.operator(Operator::Tilde),
                '=' => self.operator(Operator::Equals),
                '<' | '>' => {
                    self.advance();
                    let or_equal = self.peek() == Some('=');
                    if or_equal {
                        self.advance();
                    }
                    LexicalUnit::Operator(match (c, or_equal) {
                        ('<', false) => Operator::Lt,
                        ('<', true) => Operator::LtEq,
                        (_, false) => Operator::Gt,
                        (_, true) => Operator::GtEq,
                    })
                }

                '(' => {
                    self.advance();
                    LexicalUnit::SubExpression(self.consume_sequence(Some(')'), math)?)
                }
                '[' => {
                    self.advance();
                    LexicalUnit::Brackets(self.consume_sequence(Some(']'), math)?)
                }

                // [CSS Syntax § 7.1](https://www.w3.org/TR/css-syntax-3/#urange-syntax)
                'u' | 'U' if self.would_start_unicode_range() => {
                    self.advance(); // u
                    self.advance(); // +
                    self.consume_unicode_range()?
                }

                c if is_ident_start_code_point(c) || self.is_valid_escape(Some(c), self.peek_at(1)) => {
                    self.consume_ident_like()?
                }

                c => return Err(self.unexpected(c)),
            };
            units.push(unit);
        }
    }

    fn operator(&mut self, op: Operator) -> LexicalUnit {
        self.advance();
        LexicalUnit::Operator(op)
    }

    fn unexpected(&self, c: char) -> ValueError {
        ValueError::syntax(format!("unexpected '{c}' at offset {}", self.position))
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_whitespace_and_comments(&mut self) {
        loop {
            if self.peek().is_some_and(is_whitespace) {
                self.advance();
            } else if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
                self.position += 2;
                while let Some(c) = self.consume() {
                    if c == '*' && self.peek() == Some('/') {
                        self.advance();
                        break;
                    }
                }
            } else {
                return;
            }
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string(&mut self, quote: char) -> Result<LexicalUnit> {
        let mut value = String::new();
        loop {
            match self.consume() {
                // "ending code point" / "EOF"
                Some(c) if c == quote => break,
                None => break,
                // "newline": "This is a parse error."
                Some('\n') => {
                    return Err(ValueError::syntax("newline inside a string"));
                }
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => self.advance(),
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(LexicalUnit::String { value, quote })
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric(&mut self) -> Result<LexicalUnit> {
        let (value, integer) = self.consume_number()?;

        // "If the next 3 input code points would start an ident sequence..."
        if self.would_start_ident_sequence() {
            let unit_text = self.consume_ident_sequence();
            return Ok(LexicalUnit::Dimension {
                value,
                unit: CssUnit::from_unit_text(&unit_text),
                unit_text,
            });
        }
        // "Otherwise, if the next input code point is U+0025 PERCENTAGE SIGN (%)..."
        if self.peek() == Some('%') {
            self.advance();
            return Ok(LexicalUnit::Percentage(value));
        }
        Ok(LexicalUnit::Number { value, integer })
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Result<(f64, bool)> {
        let mut integer = true;
        let mut repr = String::new();

        if matches!(self.peek(), Some('+' | '-')) {
            self.take_into(&mut repr);
        }
        self.take_digits_into(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.take_into(&mut repr);
            self.take_digits_into(&mut repr);
            integer = false;
        }

        // "If the next 2 or 3 input code points are U+0045 (E) or U+0065 (e),
        // optionally followed by U+002D (-) or U+002B (+), followed by a digit..."
        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.take_into(&mut repr);
                if has_sign {
                    self.take_into(&mut repr);
                }
                self.take_digits_into(&mut repr);
                integer = false;
            }
        }

        let value = repr
            .parse::<f64>()
            .map_err(|_| ValueError::syntax(format!("invalid number '{repr}'")))?;
        Ok((value, integer))
    }

    fn take_into(&mut self, repr: &mut String) {
        if let Some(c) = self.consume() {
            repr.push(c);
        }
    }

    fn take_digits_into(&mut self, repr: &mut String) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.take_into(repr);
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Functions are consumed together with their parameters.
    fn consume_ident_like(&mut self) -> Result<LexicalUnit> {
        let string = self.consume_ident_sequence();
        if self.peek() != Some('(') {
            return Ok(LexicalUnit::Ident(string));
        }
        self.advance();
        let name = string.to_ascii_lowercase();

        match name.as_str() {
            "url" => {
                self.consume_whitespace_and_comments();
                if matches!(self.peek(), Some('"' | '\'')) {
                    let params = self.consume_sequence(Some(')'), false)?;
                    match params.as_slice() {
                        [LexicalUnit::String { value, .. }] => Ok(LexicalUnit::Uri(value.clone())),
                        _ => Err(ValueError::syntax("url() expects a single string")),
                    }
                } else {
                    self.consume_url()
                }
            }
            "var" => {
                let params = self.consume_sequence(Some(')'), false)?;
                var_from_params(params)
            }
            "attr" => {
                let params = self.consume_sequence(Some(')'), false)?;
                attr_from_params(params)
            }
            _ => {
                let math = matches!(name.as_str(), "calc" | "-webkit-calc")
                    || MathFunction::from_name(&name).is_some();
                let params = self.consume_sequence(Some(')'), math)?;
                Ok(LexicalUnit::Function { name, params })
            }
        }
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url(&mut self) -> Result<LexicalUnit> {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(')') => return Ok(LexicalUnit::Uri(value)),
                None => return Err(ValueError::syntax("unterminated url()")),
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace_and_comments();
                    return match self.consume() {
                        Some(')') => Ok(LexicalUnit::Uri(value)),
                        _ => Err(ValueError::syntax("whitespace inside unquoted url()")),
                    };
                }
                Some('"' | '\'' | '(') => {
                    return Err(ValueError::syntax("invalid code point in unquoted url()"));
                }
                Some('\\') => {
                    if self.is_valid_escape(Some('\\'), self.peek()) {
                        value.push(self.consume_escaped_code_point());
                    } else {
                        return Err(ValueError::syntax("invalid escape in url()"));
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// [CSS Syntax § 7.1 The <urange> type](https://www.w3.org/TR/css-syntax-3/#urange-syntax)
    fn would_start_unicode_range(&self) -> bool {
        self.peek_at(1) == Some('+')
            && self
                .peek_at(2)
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '?')
    }

    fn consume_unicode_range(&mut self) -> Result<LexicalUnit> {
        let mut text = String::new();
        while text.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.take_into(&mut text);
        }
        if self.peek() == Some('?') {
            while text.len() < 6 && self.peek() == Some('?') {
                self.take_into(&mut text);
            }
            return Ok(LexicalUnit::UnicodeWildcard(text.to_ascii_uppercase()));
        }
        let start = parse_code_point(&text)?;
        let mut end = start;
        if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
            let mut end_text = String::new();
            while end_text.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.take_into(&mut end_text);
            }
            end = parse_code_point(&end_text)?;
        }
        if end < start {
            return Err(ValueError::syntax(format!(
                "empty unicode range U+{start:X}-{end:X}"
            )));
        }
        Ok(LexicalUnit::UnicodeRange { start, end })
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if is_ident_code_point(c) {
                self.advance();
                result.push(c);
            } else if self.is_valid_escape(Some(c), self.peek_at(1)) {
                self.advance();
                result.push(self.consume_escaped_code_point());
            } else {
                break;
            }
        }
        result
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                // "Consume as many hex digits as possible, but no more than 5."
                while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.take_into(&mut hex);
                }
                // "If the next input code point is whitespace, consume it."
                if self.peek().is_some_and(is_whitespace) {
                    self.advance();
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&cp| cp != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
            }
            // "EOF": "Return U+FFFD REPLACEMENT CHARACTER."
            None => '\u{FFFD}',
            Some(c) => c,
        }
    }

    /// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_valid_escape(&self, first: Option<char>, second: Option<char>) -> bool {
        first == Some('\\') && second.is_some_and(|c| c != '\n')
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        match self.peek() {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(|c| is_ident_start_code_point(c) || c == '-')
                    || self.is_valid_escape(second, self.peek_at(2))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            Some('\\') => self.is_valid_escape(Some('\\'), self.peek_at(1)),
            _ => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        let digit_at = |offset| self.peek_at(offset).is_some_and(|c: char| c.is_ascii_digit());
        match self.peek() {
            Some('+' | '-') => digit_at(1) || (self.peek_at(1) == Some('.') && digit_at(2)),
            Some('.') => digit_at(1),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// Whether a `+`/`-` after `last` is a binary operator.
fn follows_operand(last: Option<&LexicalUnit>) -> bool {
    last.is_some_and(|unit| !matches!(unit, LexicalUnit::Operator(_)))
}

fn parse_code_point(hex: &str) -> Result<u32> {
    u32::from_str_radix(hex, 16)
        .ok()
        .filter(|&cp| cp <= 0x10_FFFF)
        .ok_or_else(|| ValueError::syntax(format!("invalid code point U+{hex}")))
}

/// Split `name [, fallback]` parameters.
fn split_fallback(mut params: Vec<LexicalUnit>, at: usize) -> Result<Option<Vec<LexicalUnit>>> {
    if params.len() <= at {
        return Ok(None);
    }
    if !params[at].is_operator(Operator::Comma) {
        return Err(ValueError::syntax("expected ',' before fallback"));
    }
    Ok(Some(params.split_off(at + 1)))
}

fn var_from_params(params: Vec<LexicalUnit>) -> Result<LexicalUnit> {
    let name = match params.first() {
        Some(LexicalUnit::Ident(name)) if name.starts_with("--") => name.clone(),
        _ => return Err(ValueError::syntax("var() expects a custom property name")),
    };
    let fallback = split_fallback(params, 1)?;
    Ok(LexicalUnit::Var { name, fallback })
}

fn attr_from_params(params: Vec<LexicalUnit>) -> Result<LexicalUnit> {
    let name = match params.first() {
        Some(LexicalUnit::Ident(name)) => name.clone(),
        _ => return Err(ValueError::syntax("attr() expects an attribute name")),
    };
    let (type_or_unit, fallback_at) = match params.get(1) {
        Some(LexicalUnit::Ident(t)) => (Some(t.to_ascii_lowercase()), 2),
        Some(LexicalUnit::Function { name, .. }) if name == "type" => {
            (Some(params[1].css_text(crate::sink::SerializeMode::Canonical)), 2)
        }
        _ => (None, 1),
    };
    let fallback = split_fallback(params, fallback_at)?;
    Ok(LexicalUnit::Attr {
        name,
        type_or_unit,
        fallback,
    })
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
