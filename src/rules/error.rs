//! Match failures reported by the rule engine

use std::fmt;

use crate::lexer::LexerError;

/// Why a rule failed to match.
///
/// Every variant except [`MatchError::IncompleteRecursiveCell`] is an ordinary,
/// recoverable match failure: the cursor has already been rolled back to where
/// the failing `consume` call started. `IncompleteRecursiveCell` describes a
/// malformed grammar and is raised as a panic by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    UnexpectedEndOfInput {
        expected: String,
        offset: usize,
    },
    UnexpectedCharacter {
        expected: String,
        found: char,
        offset: usize,
    },
    UnexpectedKeyword {
        expected: String,
        found: String,
        offset: usize,
    },
    ExpectedAtLeastOne {
        rule: String,
        offset: usize,
    },
    NoAlternativeMatched {
        tried: Vec<String>,
        offset: usize,
    },
    SequenceElementFailed {
        index: usize,
        cause: Box<MatchError>,
    },
    IncompleteRecursiveCell {
        name: String,
    },
}

impl MatchError {
    /// Convert a cursor failure, naming what the rule was looking for.
    pub fn from_lexer_error(error: LexerError, expected: impl Into<String>) -> Self {
        match error {
            LexerError::UnexpectedEndOfInput { offset } => MatchError::UnexpectedEndOfInput {
                expected: expected.into(),
                offset,
            },
            LexerError::UnexpectedCharacter { found, offset } => MatchError::UnexpectedCharacter {
                expected: expected.into(),
                found,
                offset,
            },
        }
    }

    /// Byte offset at which the failure was detected.
    pub fn offset(&self) -> Option<usize> {
        match self {
            MatchError::UnexpectedEndOfInput { offset, .. }
            | MatchError::UnexpectedCharacter { offset, .. }
            | MatchError::UnexpectedKeyword { offset, .. }
            | MatchError::ExpectedAtLeastOne { offset, .. }
            | MatchError::NoAlternativeMatched { offset, .. } => Some(*offset),
            MatchError::SequenceElementFailed { cause, .. } => cause.offset(),
            MatchError::IncompleteRecursiveCell { .. } => None,
        }
    }

    /// The innermost failure, looking through sequence wrappers.
    pub fn root_cause(&self) -> &MatchError {
        match self {
            MatchError::SequenceElementFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::UnexpectedEndOfInput { expected, offset } => write!(
                f,
                "Expected {} at offset {}, found end of input",
                expected, offset
            ),
            MatchError::UnexpectedCharacter {
                expected,
                found,
                offset,
            } => write!(
                f,
                "Expected {} at offset {}, found '{}'",
                expected, offset, found
            ),
            MatchError::UnexpectedKeyword {
                expected,
                found,
                offset,
            } => write!(
                f,
                "Expected keyword '{}' at offset {}, found '{}'",
                expected, offset, found
            ),
            MatchError::ExpectedAtLeastOne { rule, offset } => {
                write!(f, "Expected at least one {} at offset {}", rule, offset)
            }
            MatchError::NoAlternativeMatched { tried, offset } => write!(
                f,
                "No alternative matched at offset {} (tried {})",
                offset,
                tried.join(", ")
            ),
            MatchError::SequenceElementFailed { index, cause } => {
                write!(f, "Sequence element {} failed: {}", index, cause)
            }
            MatchError::IncompleteRecursiveCell { name } => write!(
                f,
                "Recursive rule '{}' was used before its definition was set",
                name
            ),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::SequenceElementFailed { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
