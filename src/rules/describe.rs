//! EBNF-like rendering of rules
//!
//! | rule                  | rendering         |
//! |-----------------------|-------------------|
//! | digit                 | `[0-9]`           |
//! | letter                | `[a-zA-Z]`        |
//! | whitespace            | `[\s\t\r\n]`      |
//! | char `c`              | `'c'`             |
//! | keyword `kw`          | `kw`              |
//! | named                 | its name          |
//! | repetition / optional | inner + `+ * ?`   |
//! | or                    | `a \| b`          |
//! | sequence              | `a b`             |
//! | direct sequence       | `ab`              |
//! | recursive             | the cell's name   |
//!
//! Repetition and optional wrap a list-valued inner rule in parentheses.
//! A recursive reference renders as a name only, which keeps descriptions of
//! self-referential grammars finite.

use std::fmt;

use super::rule::Rule;

impl Rule {
    pub fn rule_description(&self) -> String {
        match self {
            Rule::Digit => "[0-9]".to_string(),
            Rule::Letter => "[a-zA-Z]".to_string(),
            Rule::Whitespace => "[\\s\\t\\r\\n]".to_string(),
            Rule::Char(c) => format!("'{}'", c),
            Rule::Keyword(text) => text.clone(),
            Rule::Named { name, .. } => name.clone(),
            Rule::OneOrMore(inner) => format!("{}+", inner.grouped_description()),
            Rule::ZeroOrMore(inner) => format!("{}*", inner.grouped_description()),
            Rule::Optional(inner) => format!("{}?", inner.grouped_description()),
            Rule::Or(rules) => join_descriptions(rules, " | "),
            Rule::Sequence(rules) => join_descriptions(rules, " "),
            Rule::DirectSequence(rules) => join_descriptions(rules, ""),
            Rule::Recursive(cell) => cell.name().to_string(),
        }
    }

    /// Description as an operand of a postfix operator.
    fn grouped_description(&self) -> String {
        match self {
            Rule::Or(_) | Rule::Sequence(_) | Rule::DirectSequence(_) => {
                format!("({})", self.rule_description())
            }
            _ => self.rule_description(),
        }
    }
}

fn join_descriptions(rules: &[Rule], separator: &str) -> String {
    rules
        .iter()
        .map(Rule::rule_description)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule_description())
    }
}
