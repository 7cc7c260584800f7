//! # minilexer
//!
//! Composable grammar rules for writing lexers and small recursive-descent
//! parsers declaratively.
//!
//! A grammar is a tree of [`Rule`] values. Rules are matched against a
//! [`Lexer`], a rewindable character cursor; a successful match advances the
//! cursor and yields the matched text, a failed one leaves the cursor where it
//! was. Self-referential productions go through a [`RuleCell`].
//!
//! ```text
//! ident:        [a-zA-Z_] [a-zA-Z_0-9]*
//! modifierList: ident (',' modifierList)*
//! modifiers:    '(' modifierList ')'
//! ```
//!
//! ```text
//! let ident = ((Rule::Letter | '_') + (Rule::Letter | '_' | Rule::Digit).many()).named_as("ident");
//! let list = RuleCell::create("modifierList", |rec| ident + (Rule::Char(',') + rec).many());
//! let modifiers = Rule::Char('(') + list + ')';
//!
//! let mut lexer = Lexer::new("(mod1, mod2)");
//! assert_eq!(modifiers.consume(&mut lexer)?, "(mod1, mod2)");
//! ```
//!
//! Lexer behavior that is configurable (keyword word boundaries) is read from
//! [`config::LexerConfig`], loaded through [`config::Loader`].

pub mod config;
pub mod lexer;
pub mod rules;

pub use lexer::{Lexer, LexerError, LexerMark};
pub use rules::{MatchError, Rule, RuleCell};
