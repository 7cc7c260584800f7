//! The grammar rule value
//!
//! A [`Rule`] is an immutable tree describing one production. Composite
//! variants own their children; self-reference goes through a shared
//! [`RuleCell`] held by [`Rule::Recursive`].
//!
//! The list constructors ([`Rule::or`], [`Rule::sequence`],
//! [`Rule::direct_sequence`]) keep their lists flat: an operand of the same
//! kind is spliced in rather than nested. [`Rule::Named`] is never spliced.

use super::cell::RuleCell;

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// One ASCII decimal digit
    Digit,
    /// One ASCII alphabetic character
    Letter,
    /// One of space, tab, carriage return, line feed
    Whitespace,
    /// Exactly this character, after skipping leading whitespace
    Char(char),
    /// This exact text as a whole word, after skipping leading whitespace
    Keyword(String),
    /// Matches like `rule`, described as `name`
    Named { name: String, rule: Box<Rule> },
    OneOrMore(Box<Rule>),
    ZeroOrMore(Box<Rule>),
    Optional(Box<Rule>),
    /// First alternative that matches, in list order
    Or(Vec<Rule>),
    /// Each rule in order, whitespace allowed between elements
    Sequence(Vec<Rule>),
    /// Each rule in order, textually adjacent
    DirectSequence(Vec<Rule>),
    /// Whatever the cell currently holds
    Recursive(RuleCell),
}

impl Rule {
    pub fn char(c: char) -> Rule {
        Rule::Char(c)
    }

    pub fn keyword(text: impl Into<String>) -> Rule {
        Rule::Keyword(text.into())
    }

    pub fn named(name: impl Into<String>, rule: impl Into<Rule>) -> Rule {
        Rule::Named {
            name: name.into(),
            rule: Box::new(rule.into()),
        }
    }

    pub fn one_or_more(rule: impl Into<Rule>) -> Rule {
        Rule::OneOrMore(Box::new(rule.into()))
    }

    pub fn zero_or_more(rule: impl Into<Rule>) -> Rule {
        Rule::ZeroOrMore(Box::new(rule.into()))
    }

    pub fn optional(rule: impl Into<Rule>) -> Rule {
        Rule::Optional(Box::new(rule.into()))
    }

    pub fn recursive(cell: &RuleCell) -> Rule {
        Rule::Recursive(cell.clone())
    }

    /// Alternation over `rules`; nested alternations are spliced in place.
    pub fn or<I>(rules: I) -> Rule
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let mut flat = Vec::new();
        for rule in rules {
            match rule.into() {
                Rule::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Rule::Or(flat)
    }

    /// Whitespace-tolerant sequence over `rules`; nested sequences are spliced.
    pub fn sequence<I>(rules: I) -> Rule
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let mut flat = Vec::new();
        for rule in rules {
            match rule.into() {
                Rule::Sequence(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Rule::Sequence(flat)
    }

    /// Adjacent sequence over `rules`; nested direct sequences are spliced.
    pub fn direct_sequence<I>(rules: I) -> Rule
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let mut flat = Vec::new();
        for rule in rules {
            match rule.into() {
                Rule::DirectSequence(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Rule::DirectSequence(flat)
    }

    /// Whether this rule is a terminal (matches characters directly).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Rule::Digit | Rule::Letter | Rule::Whitespace | Rule::Char(_) | Rule::Keyword(_)
        )
    }
}

impl From<char> for Rule {
    fn from(c: char) -> Self {
        Rule::Char(c)
    }
}

/// A one-character literal becomes [`Rule::Char`], anything else a
/// [`Rule::Keyword`].
impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rule::Char(c),
            _ => Rule::Keyword(text.to_string()),
        }
    }
}

impl From<String> for Rule {
    fn from(text: String) -> Self {
        Rule::from(text.as_str())
    }
}

impl From<Vec<Rule>> for Rule {
    fn from(rules: Vec<Rule>) -> Self {
        Rule::sequence(rules)
    }
}

impl From<RuleCell> for Rule {
    fn from(cell: RuleCell) -> Self {
        Rule::Recursive(cell)
    }
}

impl From<&RuleCell> for Rule {
    fn from(cell: &RuleCell) -> Self {
        Rule::Recursive(cell.clone())
    }
}
