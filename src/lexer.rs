//! Character cursor consumed by grammar rules
//!
//! The [`Lexer`] owns its input text and a byte offset into it. Rules look
//! ahead with [`Lexer::peek`], consume with [`Lexer::advance`] / [`Lexer::take`],
//! and backtrack by restoring a [`LexerMark`] taken earlier. Every destructive
//! operation that fails leaves the offset where it was.
//!
//! Offsets are byte offsets into the UTF-8 input; the cursor only ever moves by
//! whole characters, so every offset it reports is a valid char boundary.

use std::fmt;

use crate::config::LexerConfig;

/// Whitespace recognized by the whitespace rule and by whitespace skipping:
/// space, tab, carriage return and line feed.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// A saved cursor position, restored with [`Lexer::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LexerMark {
    offset: usize,
}

impl LexerMark {
    pub fn offset(self) -> usize {
        self.offset
    }
}

/// Errors raised by the cursor's consuming primitives
#[derive(Debug, Clone, PartialEq)]
pub enum LexerError {
    UnexpectedEndOfInput { offset: usize },
    UnexpectedCharacter { found: char, offset: usize },
}

impl LexerError {
    pub fn offset(&self) -> usize {
        match self {
            LexerError::UnexpectedEndOfInput { offset }
            | LexerError::UnexpectedCharacter { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnexpectedEndOfInput { offset } => {
                write!(f, "Unexpected end of input at offset {}", offset)
            }
            LexerError::UnexpectedCharacter { found, offset } => {
                write!(f, "Unexpected character '{}' at offset {}", found, offset)
            }
        }
    }
}

impl std::error::Error for LexerError {}

/// Rewindable cursor over an input string
#[derive(Debug, Clone)]
pub struct Lexer {
    input: String,
    offset: usize,
    /// Offset at which whitespace skipping is suppressed, see [`Lexer::pin`].
    pinned: Option<usize>,
    config: LexerConfig,
}

impl Lexer {
    /// Create a lexer positioned at the start of `input`, using the default
    /// configuration.
    pub fn new(input: impl Into<String>) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    pub fn with_config(input: impl Into<String>, config: LexerConfig) -> Self {
        Lexer {
            input: input.into(),
            offset: 0,
            pinned: None,
            config,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Current byte offset into the input
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed part of the input
    pub fn remaining(&self) -> &str {
        &self.input[self.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Next character, without consuming it
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Character `n` positions ahead (`peek_at(0) == peek()`), without consuming
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// First non-whitespace character ahead, without consuming anything
    pub fn peek_whitespace_skipped(&self) -> Option<char> {
        self.remaining().chars().find(|c| !is_whitespace(*c))
    }

    /// Whether the unconsumed input begins with `text`
    pub fn starts_with(&self, text: &str) -> bool {
        self.remaining().starts_with(text)
    }

    pub fn mark(&self) -> LexerMark {
        LexerMark {
            offset: self.offset,
        }
    }

    /// Restore a position previously returned by [`Lexer::mark`].
    pub fn rewind(&mut self, mark: LexerMark) {
        debug_assert!(
            self.input.is_char_boundary(mark.offset),
            "mark does not belong to this input"
        );
        self.offset = mark.offset;
    }

    /// Text consumed since `from` was taken.
    pub fn slice(&self, from: LexerMark) -> &str {
        &self.input[from.offset..self.offset]
    }

    /// Advance by `count` characters. Fails without moving if fewer than
    /// `count` characters remain.
    pub fn advance(&mut self, count: usize) -> Result<(), LexerError> {
        let mut bytes = 0;
        let mut chars = self.remaining().chars();
        for _ in 0..count {
            match chars.next() {
                Some(c) => bytes += c.len_utf8(),
                None => {
                    return Err(LexerError::UnexpectedEndOfInput {
                        offset: self.input.len(),
                    })
                }
            }
        }
        self.offset += bytes;
        Ok(())
    }

    /// Consume and return the next character.
    pub fn next_char(&mut self) -> Result<char, LexerError> {
        self.take(|_| true)
    }

    /// Consume the next character if it satisfies `predicate`.
    pub fn take(&mut self, predicate: impl FnOnce(char) -> bool) -> Result<char, LexerError> {
        match self.peek() {
            None => Err(LexerError::UnexpectedEndOfInput {
                offset: self.offset,
            }),
            Some(c) if predicate(c) => {
                self.offset += c.len_utf8();
                Ok(c)
            }
            Some(found) => Err(LexerError::UnexpectedCharacter {
                found,
                offset: self.offset,
            }),
        }
    }

    /// Suppress whitespace skipping at the current offset, so that whatever is
    /// consumed next starts exactly here. Skipping resumes once the cursor has
    /// moved on. Returns the previous pin, to be handed back to [`Lexer::unpin`].
    pub fn pin(&mut self) -> Option<usize> {
        self.pinned.replace(self.offset)
    }

    pub fn unpin(&mut self, previous: Option<usize>) {
        self.pinned = previous;
    }

    /// Whether whitespace may be skipped at the current offset.
    pub fn can_skip(&self) -> bool {
        self.pinned != Some(self.offset)
    }

    /// Consume any run of whitespace, returning how many characters were skipped.
    /// Skips nothing while the current offset is pinned.
    pub fn skip_whitespace(&mut self) -> usize {
        if !self.can_skip() {
            return 0;
        }
        let mut skipped = 0;
        while self.take(is_whitespace).is_ok() {
            skipped += 1;
        }
        skipped
    }
}
