//! Rule evaluation
//!
//! Two operations are defined over every [`Rule`]:
//!
//! - [`Rule::can_consume`]: a lookahead verdict that never moves the cursor.
//! - [`Rule::consume`]: a match that advances the cursor on success and leaves
//!   it exactly where it started on failure.
//!
//! The rollback guarantee of `consume` is what every composite builds on:
//! an alternative, repetition or optional can always retry from the offset it
//! started at without doing any bookkeeping of its own.
//!
//! Left-recursive grammars (a recursive reference reachable without consuming
//! input) recurse until the stack is exhausted. They are not detected.

use super::error::MatchError;
use super::rule::Rule;
use crate::lexer::{is_whitespace, Lexer};

/// Whether a sequence may skip whitespace between its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    Skip,
    Adjacent,
}

impl Rule {
    /// Lookahead: whether `consume` is expected to succeed from the current
    /// offset. The cursor offset is the same before and after the call.
    ///
    /// Terminals answer exactly. Sequences only look at their leading element,
    /// so a sequence may be reported feasible and still fail to consume.
    pub fn can_consume(&self, lexer: &mut Lexer) -> bool {
        match self {
            Rule::Digit | Rule::Letter | Rule::Whitespace | Rule::Char(_) | Rule::Keyword(_) => {
                let start = lexer.mark();
                let feasible = self.consume_terminal(lexer).is_ok();
                lexer.rewind(start);
                feasible
            }
            Rule::Named { rule, .. } => rule.can_consume(lexer),
            Rule::OneOrMore(inner) => inner.can_consume(lexer),
            Rule::ZeroOrMore(_) | Rule::Optional(_) => true,
            Rule::Or(rules) => rules.iter().any(|rule| rule.can_consume(lexer)),
            Rule::Sequence(rules) | Rule::DirectSequence(rules) => rules
                .first()
                .map_or(true, |first| first.can_consume(lexer)),
            Rule::Recursive(cell) => cell.can_consume(lexer),
        }
    }

    /// Match this rule at the cursor, returning the matched text.
    ///
    /// On failure the cursor is rewound to where it was when the call started.
    ///
    /// # Panics
    ///
    /// If a [`Rule::Recursive`] reached during matching refers to a cell that
    /// was never completed.
    pub fn consume(&self, lexer: &mut Lexer) -> Result<String, MatchError> {
        let start = lexer.mark();
        let result = self.consume_at(lexer);
        if result.is_err() {
            lexer.rewind(start);
        }
        result
    }

    fn consume_at(&self, lexer: &mut Lexer) -> Result<String, MatchError> {
        match self {
            Rule::Digit | Rule::Letter | Rule::Whitespace | Rule::Char(_) | Rule::Keyword(_) => {
                self.consume_terminal(lexer)
            }
            Rule::Named { rule, .. } => rule.consume(lexer),
            Rule::OneOrMore(inner) => {
                let start = lexer.mark();
                if repeat(inner, lexer) == 0 {
                    return Err(MatchError::ExpectedAtLeastOne {
                        rule: inner.rule_description(),
                        offset: start.offset(),
                    });
                }
                Ok(lexer.slice(start).to_string())
            }
            Rule::ZeroOrMore(inner) => {
                let start = lexer.mark();
                repeat(inner, lexer);
                Ok(lexer.slice(start).to_string())
            }
            Rule::Optional(inner) => Ok(inner.consume(lexer).unwrap_or_default()),
            Rule::Or(rules) => consume_first(rules, lexer),
            Rule::Sequence(rules) => consume_sequence(rules, lexer, Spacing::Skip),
            Rule::DirectSequence(rules) => consume_sequence(rules, lexer, Spacing::Adjacent),
            Rule::Recursive(cell) => cell.consume(lexer),
        }
    }

    fn consume_terminal(&self, lexer: &mut Lexer) -> Result<String, MatchError> {
        match self {
            Rule::Digit => consume_class(lexer, "[0-9]", |c| c.is_ascii_digit()),
            Rule::Letter => consume_class(lexer, "[a-zA-Z]", |c| c.is_ascii_alphabetic()),
            Rule::Whitespace => consume_class(lexer, "[\\s\\t\\r\\n]", is_whitespace),
            Rule::Char(expected) => {
                lexer.skip_whitespace();
                lexer
                    .take(|c| c == *expected)
                    .map(String::from)
                    .map_err(|error| MatchError::from_lexer_error(error, format!("'{}'", expected)))
            }
            Rule::Keyword(keyword) => consume_keyword(keyword, lexer),
            _ => unreachable!("consume_terminal called on composite rule"),
        }
    }
}

fn consume_class(
    lexer: &mut Lexer,
    expected: &str,
    class: impl FnOnce(char) -> bool,
) -> Result<String, MatchError> {
    lexer
        .take(class)
        .map(String::from)
        .map_err(|error| MatchError::from_lexer_error(error, expected))
}

fn consume_keyword(keyword: &str, lexer: &mut Lexer) -> Result<String, MatchError> {
    lexer.skip_whitespace();
    let offset = lexer.offset();
    if !lexer.starts_with(keyword) {
        return Err(MatchError::UnexpectedKeyword {
            expected: keyword.to_string(),
            found: found_context(lexer, keyword.chars().count()),
            offset,
        });
    }

    let start = lexer.mark();
    lexer
        .advance(keyword.chars().count())
        .map_err(|error| MatchError::from_lexer_error(error, keyword))?;

    // A keyword ending in a word character must not run into another word
    // character, except where the rest of the word is the keyword repeated
    // ("testtest").
    let config = lexer.config();
    let runs_on = config.keywords.word_boundary
        && keyword.chars().last().is_some_and(|c| config.is_word_char(c))
        && lexer.peek().is_some_and(|c| config.is_word_char(c))
        && !is_repetition_of(rest_of_word(lexer), keyword);
    if runs_on {
        lexer.rewind(start);
        return Err(MatchError::UnexpectedKeyword {
            expected: keyword.to_string(),
            found: found_context(lexer, keyword.chars().count()),
            offset,
        });
    }

    Ok(keyword.to_string())
}

/// The run of word characters at the cursor.
fn rest_of_word(lexer: &Lexer) -> &str {
    let remaining = lexer.remaining();
    let config = lexer.config();
    let end = remaining
        .char_indices()
        .find(|(_, c)| !config.is_word_char(*c))
        .map_or(remaining.len(), |(i, _)| i);
    &remaining[..end]
}

/// Whether `word` is one or more back-to-back copies of a non-empty `keyword`.
fn is_repetition_of(word: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let mut tail = word;
    while let Some(rest) = tail.strip_prefix(keyword) {
        tail = rest;
    }
    tail.is_empty() && !word.is_empty()
}

/// The text at the cursor that a keyword was compared against: the next
/// whitespace-delimited chunk, at least `min_chars` long where input allows.
fn found_context(lexer: &Lexer, min_chars: usize) -> String {
    let remaining = lexer.remaining();
    if remaining.is_empty() {
        return "end of input".to_string();
    }
    remaining
        .chars()
        .enumerate()
        .take_while(|(i, c)| *i < min_chars || !is_whitespace(*c))
        .map(|(_, c)| c)
        .collect()
}

/// Consume `inner` greedily, stopping at the first failure. Returns the number
/// of successful repetitions. A repetition that consumes nothing ends the loop.
fn repeat(inner: &Rule, lexer: &mut Lexer) -> usize {
    let mut count = 0;
    loop {
        let before = lexer.mark();
        match inner.consume(lexer) {
            Ok(_) => {
                count += 1;
                if lexer.mark() == before {
                    break;
                }
            }
            Err(error) => {
                log::trace!(
                    "repetition of {} stopped at offset {}: {}",
                    inner,
                    before.offset(),
                    error
                );
                break;
            }
        }
    }
    count
}

fn consume_first(rules: &[Rule], lexer: &mut Lexer) -> Result<String, MatchError> {
    let offset = lexer.offset();
    for (index, rule) in rules.iter().enumerate() {
        match rule.consume(lexer) {
            Ok(matched) => return Ok(matched),
            Err(error) => log::trace!(
                "alternative {} ({}) failed at offset {}: {}",
                index,
                rule,
                offset,
                error
            ),
        }
    }
    log::debug!("no alternative matched at offset {}", offset);
    Err(MatchError::NoAlternativeMatched {
        tried: rules.iter().map(Rule::rule_description).collect(),
        offset,
    })
}

fn consume_sequence(
    rules: &[Rule],
    lexer: &mut Lexer,
    spacing: Spacing,
) -> Result<String, MatchError> {
    let start = lexer.mark();
    let mut text_start = start.offset();
    for (index, rule) in rules.iter().enumerate() {
        match consume_element(rule, index, lexer, spacing) {
            // Whitespace the leading element skipped before itself is not part
            // of the sequence's text; every result is a suffix of what it consumed.
            Ok(matched) if index == 0 => text_start = lexer.offset() - matched.len(),
            Ok(_) => {}
            Err(cause) => {
                log::trace!(
                    "sequence element {} ({}) failed, rewinding to offset {}",
                    index,
                    rule,
                    start.offset()
                );
                lexer.rewind(start);
                return Err(MatchError::SequenceElementFailed {
                    index,
                    cause: Box::new(cause),
                });
            }
        }
    }
    Ok(lexer.input()[text_start..lexer.offset()].to_string())
}

fn consume_element(
    rule: &Rule,
    index: usize,
    lexer: &mut Lexer,
    spacing: Spacing,
) -> Result<String, MatchError> {
    if index == 0 {
        return rule.consume(lexer);
    }
    match spacing {
        Spacing::Skip => {
            lexer.skip_whitespace();
            rule.consume(lexer)
        }
        Spacing::Adjacent => {
            let previous = lexer.pin();
            let result = rule.consume(lexer);
            lexer.unpin(previous);
            result
        }
    }
}
