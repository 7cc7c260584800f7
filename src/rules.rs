//! Grammar rule algebra
//!
//! Grammars are built from [`Rule`] values and evaluated against a
//! [`Lexer`](crate::Lexer):
//!
//! - `rule`: the [`Rule`] enum, its constructors and literal conversions
//! - `cell`: [`RuleCell`], the single-assignment slot behind recursive rules
//! - `compose`: flattening combinators and the `|` / `+` operators
//! - `engine`: `can_consume` / `consume`
//! - `describe`: EBNF-like rendering
//! - `error`: [`MatchError`]

mod cell;
mod compose;
mod describe;
mod engine;
mod error;
mod rule;

pub use cell::RuleCell;
pub use error::MatchError;
pub use rule::Rule;
