//! Character-level word reader with line/column tracking and bounded lookahead
//!
//! The tokenizer walks a UTF-8 string by byte offset. Words are split on a
//! dialect-provided delimiter set; a delimiter is a word of its own, and a
//! dialect may glue two-character sequences into a single token.
//!
//! Lookahead is a stack of saved offsets. While the stack is non-empty the
//! externally observed line/column are frozen, so peeking never disturbs
//! diagnostics. Prefer [`Tokenizer::peeking`], which restores the offset on
//! every exit path, over manual start/finish pairs.

use ttdiff_core_types::SourcePosition;

use crate::errors::{DumpError, Result};

/// Maximum nesting of lookahead scopes
pub const MAX_PEEK_DEPTH: usize = 3;

const SPACE: char = ' ';
const TAB: char = '\t';
const CR: char = '\r';
const LF: char = '\n';

/// Delimiters shared by every dialect
pub const DEFAULT_DELIMITERS: &[char] = &[
    SPACE, TAB, CR, LF, '.', ',', ':', ';', '?', '!', '"', '(', ')', '/', '-', '&',
];

/// Word-splitting rules for a tokenizer
pub trait Dialect {
    /// Whether `c` ends a word (and forms a single-character word itself)
    fn is_delimiter(&self, c: char) -> bool {
        DEFAULT_DELIMITERS.contains(&c)
    }

    /// Whether `first` followed by `second` is read as one atomic token
    fn compound_token(&self, _first: char, _second: char) -> bool {
        false
    }
}

/// Default delimiter set, no compound tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDialect;

impl Dialect for PlainDialect {}

fn is_blank(c: char) -> bool {
    matches!(c, SPACE | TAB | CR | LF)
}

/// Word reader over a borrowed text
pub struct Tokenizer<'a, D: Dialect> {
    text: &'a str,
    pos: usize,
    peek_stack: Vec<usize>,
    line: u32,
    column: u32,
    line_start: usize,
    after_cr: bool,
    dialect: D,
}

impl<'a> Tokenizer<'a, PlainDialect> {
    pub fn plain(text: &'a str) -> Self {
        Self::new(text, PlainDialect)
    }
}

impl<'a, D: Dialect> Tokenizer<'a, D> {
    pub fn new(text: &'a str, dialect: D) -> Self {
        Self {
            text,
            pos: 0,
            peek_stack: Vec::with_capacity(MAX_PEEK_DEPTH),
            line: SourcePosition::START.line,
            column: SourcePosition::START.column,
            line_start: 0,
            after_cr: false,
            dialect,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Whether a lookahead scope is open
    pub fn is_peeking(&self) -> bool {
        !self.peek_stack.is_empty()
    }

    /// Position of the cursor outside any lookahead scope
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    /// Full text of the line the cursor is on
    pub fn current_line(&self) -> &'a str {
        let rest = &self.text[self.line_start..];
        let end = rest.find([CR, LF]).unwrap_or(rest.len());
        &rest[..end]
    }

    pub(crate) fn eof_error(&self, context: &str) -> DumpError {
        DumpError::UnexpectedEof {
            context: context.to_string(),
            position: self.position(),
        }
    }

    // ===== Lookahead =====

    /// Save the current offset
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::PeekDepthExceeded`] if more than
    /// [`MAX_PEEK_DEPTH`] scopes would be open.
    pub(crate) fn start_peeking(&mut self) -> Result<()> {
        if self.peek_stack.len() >= MAX_PEEK_DEPTH {
            return Err(DumpError::PeekDepthExceeded {
                depth: self.peek_stack.len() + 1,
            });
        }
        self.peek_stack.push(self.pos);
        Ok(())
    }

    /// Rewind to the most recently saved offset
    pub(crate) fn finish_peeking(&mut self) {
        let saved = self.peek_stack.pop();
        debug_assert!(saved.is_some(), "finish_peeking without start_peeking");
        if let Some(pos) = saved {
            self.pos = pos;
        }
    }

    /// Run `f` inside a lookahead scope; the offset is restored whether `f`
    /// succeeds or fails
    ///
    /// # Errors
    ///
    /// Propagates the error of `f`, or [`DumpError::PeekDepthExceeded`].
    pub fn peeking<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.start_peeking()?;
        let result = f(self);
        self.finish_peeking();
        result
    }

    // ===== Characters =====

    pub fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if self.is_peeking() {
            return Some(c);
        }
        match c {
            CR => {
                self.line += 1;
                self.column = SourcePosition::START.column;
                self.line_start = self.pos;
                self.after_cr = true;
            }
            LF => {
                if !self.after_cr {
                    self.line += 1;
                    self.column = SourcePosition::START.column;
                }
                self.line_start = self.pos;
                self.after_cr = false;
            }
            TAB => {
                self.column += 4 - (self.column - 1) % 4;
                self.after_cr = false;
            }
            _ => {
                self.column += 1;
                self.after_cr = false;
            }
        }
        Some(c)
    }

    /// Consume one character
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedEof`] at end of input.
    pub fn read_char(&mut self) -> Result<char> {
        self.advance()
            .ok_or_else(|| self.eof_error("reading a character"))
    }

    // ===== Words =====

    /// Consume one word
    ///
    /// Returns an empty word when the cursor sits on whitespace or a line
    /// break; the `find_*` variants skip those first.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedEof`] at end of input.
    pub fn read_word(&mut self) -> Result<String> {
        let first = match self.peek_char() {
            Some(c) => c,
            None => return Err(self.eof_error("reading a word")),
        };
        if is_blank(first) {
            return Ok(String::new());
        }

        let start = self.pos;
        let compound = self
            .peek_second_char()
            .is_some_and(|second| self.dialect.compound_token(first, second));
        if compound {
            self.advance();
            self.advance();
        } else if self.dialect.is_delimiter(first) {
            self.advance();
        } else {
            self.advance();
            while let Some(c) = self.peek_char() {
                if self.dialect.is_delimiter(c) {
                    break;
                }
                self.advance();
            }
        }
        Ok(self.text[start..self.pos].to_string())
    }

    /// Read the next word without consuming it
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedEof`] at end of input.
    pub fn peek_word(&mut self) -> Result<String> {
        self.peeking(|t| t.read_word())
    }

    /// Skip spaces, tabs and line breaks up to the next content character
    ///
    /// Returns `false` at end of input.
    pub fn find_content(&mut self) -> bool {
        self.skip_blanks(false)
    }

    /// Skip spaces and tabs up to the next content character on this line
    ///
    /// Returns `false` at end of line or end of input.
    pub fn find_line_content(&mut self) -> bool {
        self.skip_blanks(true)
    }

    fn skip_blanks(&mut self, within_line: bool) -> bool {
        while let Some(c) = self.peek_char() {
            match c {
                SPACE | TAB => {}
                CR | LF if !within_line => {}
                CR | LF => return false,
                _ => return true,
            }
            self.advance();
        }
        false
    }

    /// Advance past the next line terminator (`\r`, `\n`, or `\r\n`)
    ///
    /// Returns `false` if the input ends before another line begins.
    pub fn find_next_line(&mut self) -> bool {
        loop {
            let c = match self.advance() {
                Some(c) => c,
                None => return false,
            };
            if self.is_eof() {
                return false;
            }
            match c {
                CR => {
                    if self.peek_char() == Some(LF) {
                        self.advance();
                        return !self.is_eof();
                    }
                    return true;
                }
                LF => return true,
                _ => {}
            }
        }
    }

    /// Skip to the next content and read a word
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedEof`] if no content remains.
    pub fn find_read_word(&mut self) -> Result<String> {
        if !self.find_content() {
            return Err(self.eof_error("finding a word to read"));
        }
        self.read_word()
    }

    /// Skip to the next content and peek a word
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::UnexpectedEof`] if no content remains.
    pub fn find_peek_word(&mut self) -> Result<String> {
        if !self.find_content() {
            return Err(self.eof_error("finding a word to peek"));
        }
        self.peek_word()
    }

    /// Count the tab characters at the cursor without consuming them
    pub fn peek_indent(&self) -> usize {
        self.text[self.pos..].chars().take_while(|c| *c == TAB).count()
    }
}
