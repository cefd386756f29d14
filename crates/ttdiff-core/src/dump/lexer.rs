//! Dump-format lexer: domain tokens and typed-value helpers
//!
//! Adds the `//` comment marker and the `<-` inheritance arrow as atomic
//! tokens, treats `{`/`}` as delimiters, and layers validation and integer
//! parsing over the raw tokenizer. Every helper fails fast with a
//! positioned [`DumpError`].

use ttdiff_core_types::SourcePosition;

use super::tokenizer::{Dialect, Tokenizer, DEFAULT_DELIMITERS};
use crate::errors::{DumpError, Result};

pub const COMMENT: &str = "//";
pub const INHERITANCE_ARROW: &str = "<-";

/// Delimiters and compound tokens of the dump grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpDialect;

impl Dialect for DumpDialect {
    fn is_delimiter(&self, c: char) -> bool {
        c == '{' || c == '}' || DEFAULT_DELIMITERS.contains(&c)
    }

    fn compound_token(&self, first: char, second: char) -> bool {
        matches!((first, second), ('/', '/') | ('<', '-'))
    }
}

pub struct DumpLexer<'a> {
    tokens: Tokenizer<'a, DumpDialect>,
}

impl<'a> DumpLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(text, DumpDialect),
        }
    }

    // ===== Delegation =====

    pub fn is_eof(&self) -> bool {
        self.tokens.is_eof()
    }

    pub fn position(&self) -> SourcePosition {
        self.tokens.position()
    }

    pub fn current_line(&self) -> &'a str {
        self.tokens.current_line()
    }

    pub fn read_word(&mut self) -> Result<String> {
        self.tokens.read_word()
    }

    pub fn peek_word(&mut self) -> Result<String> {
        self.tokens.peek_word()
    }

    pub fn find_content(&mut self) -> bool {
        self.tokens.find_content()
    }

    pub fn find_line_content(&mut self) -> bool {
        self.tokens.find_line_content()
    }

    pub fn find_next_line(&mut self) -> bool {
        self.tokens.find_next_line()
    }

    pub fn find_read_word(&mut self) -> Result<String> {
        self.tokens.find_read_word()
    }

    pub fn peek_indent(&self) -> usize {
        self.tokens.peek_indent()
    }

    /// Run `f` inside a lookahead scope, restoring the cursor afterwards
    ///
    /// # Errors
    ///
    /// Propagates the error of `f`, or [`DumpError::PeekDepthExceeded`].
    pub fn peeking<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.tokens.start_peeking()?;
        let result = f(self);
        self.tokens.finish_peeking();
        result
    }

    // ===== Diagnostics =====

    fn missing_content(&self, context: &str) -> DumpError {
        if self.is_eof() {
            return self.tokens.eof_error(context);
        }
        DumpError::MissingContent {
            context: context.to_string(),
            position: self.position(),
            line: self.current_line().to_string(),
        }
    }

    fn unexpected_word(&self, expected: &str, actual: String, position: SourcePosition) -> DumpError {
        DumpError::UnexpectedWord {
            expected: expected.to_string(),
            actual,
            position,
            line: self.current_line().to_string(),
        }
    }

    // ===== Line-bounded reads =====

    /// Skip to the next content on this line and read a word
    ///
    /// # Errors
    ///
    /// Fails if the line (or input) ends first.
    pub fn find_read_line_word(&mut self) -> Result<String> {
        if !self.find_line_content() {
            return Err(self.missing_content("reading a line word"));
        }
        self.read_word()
    }

    /// Skip to the next content on this line and peek a word
    ///
    /// # Errors
    ///
    /// Fails if the line (or input) ends first.
    pub fn find_peek_line_word(&mut self) -> Result<String> {
        if !self.find_line_content() {
            return Err(self.missing_content("peeking a line word"));
        }
        self.peek_word()
    }

    // ===== Validation =====

    /// Read a word and require it to equal `expected`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedWord`] on mismatch.
    pub fn validate_word(&mut self, expected: &str) -> Result<()> {
        let position = self.position();
        let word = self.read_word()?;
        if word.to_lowercase() != expected.to_lowercase() {
            return Err(self.unexpected_word(expected, word, position));
        }
        Ok(())
    }

    /// Skip to the next content anywhere and validate a word
    ///
    /// # Errors
    ///
    /// Fails at end of input or on mismatch.
    pub fn find_validate_word(&mut self, expected: &str) -> Result<()> {
        if !self.find_content() {
            return Err(self
                .tokens
                .eof_error(&format!("looking for '{}'", expected)));
        }
        self.validate_word(expected)
    }

    /// Skip to the next content on this line and validate a word
    ///
    /// # Errors
    ///
    /// Fails at end of line or on mismatch.
    pub fn find_validate_line_word(&mut self, expected: &str) -> Result<()> {
        if !self.find_line_content() {
            return Err(self.missing_content(&format!("looking for '{}'", expected)));
        }
        self.validate_word(expected)
    }

    /// Require that nothing but blanks remains on this line
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedContent`] if a word is found.
    pub fn find_validate_eol(&mut self) -> Result<()> {
        if self.find_line_content() {
            let position = self.position();
            let actual = self.peek_word()?;
            return Err(DumpError::UnexpectedContent {
                context: "expecting end of line".to_string(),
                actual,
                position,
                line: self.current_line().to_string(),
            });
        }
        Ok(())
    }

    // ===== Numbers =====

    fn parse_number(&self, word: &str, radix: u32, position: SourcePosition) -> Result<i64> {
        i64::from_str_radix(word, radix).map_err(|_| DumpError::InvalidNumber {
            value: word.to_string(),
            radix,
            position,
        })
    }

    /// Read a decimal `i32`
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::InvalidNumber`] if the word is not an `i32`.
    pub fn read_int(&mut self) -> Result<i32> {
        let position = self.position();
        let word = self.read_word()?;
        let value = self.parse_number(&word, 10, position)?;
        i32::try_from(value).map_err(|_| DumpError::InvalidNumber {
            value: word,
            radix: 10,
            position,
        })
    }

    /// Read a hexadecimal 32-bit pattern
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::InvalidNumber`] if the word is not hex or needs
    /// more than 32 bits.
    pub fn read_hex(&mut self) -> Result<u32> {
        let position = self.position();
        let word = self.read_word()?;
        let value = self.parse_number(&word, 16, position)?;
        u32::try_from(value).map_err(|_| DumpError::InvalidNumber {
            value: word,
            radix: 16,
            position,
        })
    }

    /// Skip to the next content on this line and read a decimal `i32`
    ///
    /// # Errors
    ///
    /// Fails at end of line or on a malformed number.
    pub fn find_read_line_int(&mut self) -> Result<i32> {
        if !self.find_line_content() {
            return Err(self.missing_content("reading an integer"));
        }
        self.read_int()
    }

    // ===== Parameters: Name{value} =====

    fn read_parameter_with<T>(
        &mut self,
        name: &str,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.find_validate_line_word(name)?;
        self.validate_word("{")?;
        let value = read(self)?;
        self.validate_word("}")?;
        Ok(value)
    }

    /// Read `name{value}` and return the raw value word
    ///
    /// # Errors
    ///
    /// Fails if the name or braces do not match.
    pub fn read_parameter(&mut self, name: &str) -> Result<String> {
        self.read_parameter_with(name, |lx| lx.read_word())
    }

    /// Read `name{decimal}`
    ///
    /// # Errors
    ///
    /// Fails on a structural mismatch or malformed number.
    pub fn read_int_parameter(&mut self, name: &str) -> Result<i32> {
        self.read_parameter_with(name, |lx| lx.read_int())
    }

    /// Read `name{hex}` as a 32-bit pattern
    ///
    /// # Errors
    ///
    /// Fails on a structural mismatch or malformed number.
    pub fn read_hex_parameter(&mut self, name: &str) -> Result<u32> {
        self.read_parameter_with(name, |lx| lx.read_hex())
    }

    /// Read `name{int}` as a flag, non-zero meaning set
    ///
    /// # Errors
    ///
    /// Fails on a structural mismatch or malformed number.
    pub fn read_bool_parameter(&mut self, name: &str) -> Result<bool> {
        Ok(self.read_int_parameter(name)? != 0)
    }
}
