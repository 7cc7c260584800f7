//! Single-assignment holder for recursive rules
//!
//! A [`Rule`] tree cannot contain itself by value. A [`RuleCell`] is a named,
//! shared slot that is filled exactly once; [`Rule::Recursive`] points at the
//! cell, so a production can refer to itself or to a rule defined later.
//!
//! ```text
//! argList: arg (',' argList)*
//! ```
//!
//! is written as
//!
//! ```text
//! let arg_list = RuleCell::create("argList", |rec| {
//!     Rule::sequence([arg, Rule::zero_or_more(Rule::sequence([",".into(), rec.into()]))])
//! });
//! ```
//!
//! Cells are reference counted. A cell whose definition refers back to it
//! forms a reference cycle and lives as long as the process; grammars are
//! expected to be built once and kept.

use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use super::error::MatchError;
use super::rule::Rule;
use crate::lexer::Lexer;

struct CellSlot {
    name: String,
    rule: OnceCell<Rule>,
}

/// Named, lazily-completed rule definition shared by reference
#[derive(Clone)]
pub struct RuleCell {
    slot: Rc<CellSlot>,
}

impl RuleCell {
    /// Create an empty cell. It must be completed with [`RuleCell::set_rule`]
    /// before any rule referencing it is evaluated.
    pub fn new(name: impl Into<String>) -> Self {
        RuleCell {
            slot: Rc::new(CellSlot {
                name: name.into(),
                rule: OnceCell::new(),
            }),
        }
    }

    /// Create a cell that is complete from the start.
    pub fn with_rule(name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        let cell = RuleCell::new(name);
        cell.set_rule(rule);
        cell
    }

    /// Create a cell and complete it with whatever `build` returns. `build`
    /// receives the still-empty cell so the definition can refer to itself.
    pub fn create<F, R>(name: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&RuleCell) -> R,
        R: Into<Rule>,
    {
        let cell = RuleCell::new(name);
        let rule = build(&cell);
        cell.set_rule(rule);
        cell
    }

    /// Complete the cell.
    ///
    /// # Panics
    ///
    /// If the cell already holds a definition.
    pub fn set_rule(&self, rule: impl Into<Rule>) {
        if self.slot.rule.set(rule.into()).is_err() {
            panic!("recursive rule '{}' already has a definition", self.name());
        }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    pub fn is_complete(&self) -> bool {
        self.slot.rule.get().is_some()
    }

    /// The stored definition, or `IncompleteRecursiveCell` if none was set.
    pub fn try_rule(&self) -> Result<&Rule, MatchError> {
        self.slot
            .rule
            .get()
            .ok_or_else(|| MatchError::IncompleteRecursiveCell {
                name: self.slot.name.clone(),
            })
    }

    /// The stored definition.
    ///
    /// # Panics
    ///
    /// If the cell was never completed; that is a malformed grammar, not a
    /// match failure.
    pub fn rule(&self) -> &Rule {
        match self.try_rule() {
            Ok(rule) => rule,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn can_consume(&self, lexer: &mut Lexer) -> bool {
        self.rule().can_consume(lexer)
    }

    pub fn consume(&self, lexer: &mut Lexer) -> Result<String, MatchError> {
        self.rule().consume(lexer)
    }

    /// Full description of the stored definition. References to this cell
    /// inside the definition render as the cell's name.
    pub fn rule_description(&self) -> String {
        self.rule().rule_description()
    }
}

/// Cells compare by identity.
impl PartialEq for RuleCell {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for RuleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCell")
            .field("name", &self.slot.name)
            .field("complete", &self.is_complete())
            .finish()
    }
}

impl fmt::Display for RuleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule_description())
    }
}
