//! Combinators for building grammars by composition
//!
//! Binary composition keeps lists flat, so chaining `a.or_else(b).or_else(c)`
//! yields a single `Or([a, b, c])` and never `Or([Or([a, b]), c])`. The same
//! holds for sequences. Operators are provided as shorthand:
//!
//! - `a | b` is [`Rule::or_else`]
//! - `a + b` is [`Rule::and_then`]
//!
//! Both accept anything convertible into a [`Rule`] on the right-hand side,
//! so `Rule::Letter | '_'` and `Rule::keyword("let") + Rule::Letter` work.

use std::ops::{Add, BitOr};

use super::rule::Rule;

impl Rule {
    /// `self | other`, splicing either operand if it is already an `Or`.
    pub fn or_else(self, other: impl Into<Rule>) -> Rule {
        Rule::or([self, other.into()])
    }

    /// `self other` with whitespace allowed in between, splicing either
    /// operand if it is already a `Sequence`.
    pub fn and_then(self, other: impl Into<Rule>) -> Rule {
        Rule::sequence([self, other.into()])
    }

    /// `self other` without skipping whitespace in between, splicing either
    /// operand if it is already a `DirectSequence`.
    pub fn direct_then(self, other: impl Into<Rule>) -> Rule {
        Rule::direct_sequence([self, other.into()])
    }

    /// `self*`
    pub fn many(self) -> Rule {
        Rule::zero_or_more(self)
    }

    /// `self+`
    pub fn many1(self) -> Rule {
        Rule::one_or_more(self)
    }

    /// `self?`
    pub fn opt(self) -> Rule {
        Rule::optional(self)
    }

    /// Give this rule a name; descriptions show only the name from now on.
    pub fn named_as(self, name: impl Into<String>) -> Rule {
        Rule::named(name, self)
    }
}

impl<R: Into<Rule>> BitOr<R> for Rule {
    type Output = Rule;

    fn bitor(self, other: R) -> Rule {
        self.or_else(other)
    }
}

impl<R: Into<Rule>> Add<R> for Rule {
    type Output = Rule;

    fn add(self, other: R) -> Rule {
        self.and_then(other)
    }
}
