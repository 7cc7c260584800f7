//! End-to-end grammar tests
//!
//! Each test builds a small grammar out of rules and runs it against a fresh
//! lexer, checking matched text, cursor position and failures.

use minilexer::{Lexer, MatchError, Rule, RuleCell};

fn consume(rule: &Rule, input: &str) -> Result<String, MatchError> {
    rule.consume(&mut Lexer::new(input))
}

/// `'(' modifierList ')'` where `modifierList: modifier (',' modifierList)*`
/// and `modifier: [a-zA-Z_] [a-zA-Z_0-9]*`.
fn recursive_modifier_list() -> Rule {
    let ident = (Rule::Letter | '_') + (Rule::Letter | '_' | Rule::Digit).many();
    let modifier = Rule::named("modifier", ident);
    let modifier_list = RuleCell::create("modifierList", |rec| {
        Rule::sequence([modifier, (Rule::from(",") + rec).many()])
    });
    Rule::from("(") + modifier_list + ")"
}

#[test]
fn test_digit() {
    let mut lexer = Lexer::new("123");
    let mut other = Lexer::new("abc");

    assert!(Rule::Digit.can_consume(&mut lexer));
    assert!(!Rule::Digit.can_consume(&mut other));
    assert_eq!(Rule::Digit.consume(&mut lexer).unwrap(), "1");
    assert_eq!(lexer.offset(), 1);
    assert_eq!(Rule::Digit.rule_description(), "[0-9]");
}

#[test]
fn test_letter() {
    let mut lexer = Lexer::new("abc");
    let mut other = Lexer::new("1");

    assert!(Rule::Letter.can_consume(&mut lexer));
    assert!(!Rule::Letter.can_consume(&mut other));
    assert_eq!(Rule::Letter.consume(&mut lexer).unwrap(), "a");
}

#[test]
fn test_whitespace() {
    let mut lexer = Lexer::new(" ");
    let mut other = Lexer::new("1");

    assert!(Rule::Whitespace.can_consume(&mut lexer));
    assert!(!Rule::Whitespace.can_consume(&mut other));
    assert_eq!(Rule::Whitespace.consume(&mut lexer).unwrap(), " ");
}

#[test]
fn test_char() {
    let rule = Rule::Char('@');

    assert_eq!(consume(&rule, "@test").unwrap(), "@");
    assert_eq!(consume(&rule, " @test").unwrap(), "@");
    assert!(consume(&rule, "test").is_err());
    assert!(matches!(
        consume(&rule, ""),
        Err(MatchError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn test_keyword() {
    let rule = Rule::keyword("test");

    assert_eq!(consume(&rule, "test").unwrap(), "test");
    assert_eq!(consume(&rule, " test test").unwrap(), "test");
    assert_eq!(consume(&rule, "testtest").unwrap(), "test");

    let mut lexer = Lexer::new("tes");
    assert!(matches!(
        rule.consume(&mut lexer),
        Err(MatchError::UnexpectedKeyword { .. })
    ));
    assert_eq!(lexer.offset(), 0);
}

#[test]
fn test_named_rule() {
    let rule = Rule::named("number", Rule::Digit.many1());

    assert_eq!(consume(&rule, "123").unwrap(), "123");
    assert!(consume(&rule, "a").is_err());
    assert_eq!(rule.rule_description(), "number");
}

#[test]
fn test_one_or_more() {
    let rule = Rule::one_or_more(Rule::Digit);

    assert_eq!(consume(&rule, "123").unwrap(), "123");
    assert!(matches!(
        consume(&rule, "a"),
        Err(MatchError::ExpectedAtLeastOne { .. })
    ));
}

#[test]
fn test_zero_or_more() {
    let rule = Rule::zero_or_more(Rule::Digit);

    assert_eq!(consume(&rule, "123").unwrap(), "123");

    let mut lexer = Lexer::new("a");
    assert_eq!(rule.consume(&mut lexer).unwrap(), "");
    assert_eq!(lexer.offset(), 0);
}

#[test]
fn test_or() {
    let rule = Rule::or([Rule::Digit, Rule::Letter]);
    let mut lexer = Lexer::new("a1");

    assert_eq!(rule.consume(&mut lexer).unwrap(), "a");
    assert_eq!(rule.consume(&mut lexer).unwrap(), "1");
    assert_eq!(rule.rule_description(), "[0-9] | [a-zA-Z]");
}

#[test]
fn test_or_stops_at_first_match() {
    let test = (Rule::keyword("@keyword") + Rule::Digit.many1())
        | (Rule::keyword("@keyword") + Rule::keyword("abc"))
        | (Rule::keyword("@keyword") + "a");

    assert_eq!(consume(&test, "@keyword 123").unwrap(), "@keyword 123");
    assert_eq!(consume(&test, "@keyword abc").unwrap(), "@keyword abc");
    assert_eq!(consume(&test, "@keyword a").unwrap(), "@keyword a");
    assert!(matches!(
        consume(&test, "@keyword _abc"),
        Err(MatchError::NoAlternativeMatched { ref tried, offset: 0 }) if tried.len() == 3
    ));
}

#[test]
fn test_one_or_more_or() {
    let rule = Rule::one_or_more(Rule::or([Rule::Digit, Rule::Letter]));

    assert_eq!(consume(&rule, "ab123").unwrap(), "ab123");

    let mut lexer = Lexer::new("ab 123");
    assert_eq!(rule.consume(&mut lexer).unwrap(), "ab");
    assert_eq!(lexer.remaining(), " 123");
}

#[test]
fn test_optional() {
    let rule = Rule::optional(Rule::Digit);

    assert_eq!(consume(&rule, "12").unwrap(), "1");
    assert_eq!(consume(&rule, "").unwrap(), "");
}

#[test]
fn test_sequence() {
    let rule = Rule::sequence([Rule::Letter, Rule::Digit]);
    let mut lexer = Lexer::new("a 1");
    let mut other = Lexer::new("aa 2");

    assert!(rule.can_consume(&mut lexer));
    assert!(rule.can_consume(&mut other));
    assert_eq!(rule.consume(&mut lexer).unwrap(), "a 1");
    assert!(rule.consume(&mut other).is_err());
    assert_eq!(other.offset(), 0);
}

#[test]
fn test_direct_sequence() {
    let rule = Rule::direct_sequence([Rule::Letter, Rule::Digit]);
    let mut adjacent = Lexer::new("a1");
    let mut spaced = Lexer::new("a 1");
    let mut letters = Lexer::new("aa2");
    let mut leading = Lexer::new(" a2");

    assert!(rule.can_consume(&mut adjacent));
    // Feasibility only looks at the leading element.
    assert!(rule.can_consume(&mut spaced));
    assert!(rule.can_consume(&mut letters));
    assert!(!rule.can_consume(&mut leading));

    assert_eq!(rule.consume(&mut adjacent).unwrap(), "a1");
    assert!(rule.consume(&mut spaced).is_err());
    assert!(rule.consume(&mut letters).is_err());
    assert_eq!(spaced.offset(), 0);
    assert_eq!(letters.offset(), 0);
}

#[test]
fn test_recursive_arg_list() {
    let ident = Rule::named("ident", Rule::Letter.many1());
    let arg = Rule::named("arg", ident);

    let arg_list = RuleCell::new("argList");
    let rec_arg = Rule::recursive(&arg_list);
    arg_list.set_rule(vec![arg, Rule::from(vec![",".into(), rec_arg]).many()]);

    let mut lexer = Lexer::new("abc, def, ghi");
    assert_eq!(arg_list.consume(&mut lexer).unwrap(), "abc, def, ghi");
    assert!(lexer.is_eof());
    assert_eq!(arg_list.rule_description(), "arg (',' argList)*");
}

#[test]
fn test_recursive_trailing_separator_is_left_unconsumed() {
    let arg_list = RuleCell::create("argList", |rec| {
        Rule::Letter.many1() + (Rule::Char(',') + rec).many()
    });

    let mut lexer = Lexer::new("abc, def,");
    assert_eq!(arg_list.consume(&mut lexer).unwrap(), "abc, def");
    assert_eq!(lexer.remaining(), ",");
}

#[test]
fn test_rule_cell_create() {
    let rule = RuleCell::create("list", |rec| {
        Rule::sequence([Rule::Letter, Rule::sequence([Rule::from(","), rec.into()]).many()])
    });

    assert_eq!(rule.consume(&mut Lexer::new("a, b, c")).unwrap(), "a, b, c");
    assert!(rule.consume(&mut Lexer::new(", , b")).is_err());
}

#[test]
fn test_rule_cell_description() {
    let rule1 = RuleCell::with_rule("rule_rec1", Rule::Digit);
    let rule2 = RuleCell::with_rule("rule_rec2", Rule::recursive(&rule1));

    assert_eq!(rule1.rule_description(), "[0-9]");
    assert_eq!(rule2.rule_description(), "rule_rec1");
}

#[test]
fn test_complex_non_recursive() {
    let ident = Rule::from(vec![
        Rule::Letter | '_',
        (Rule::Letter | '_' | Rule::Digit).many(),
    ]);
    let modifier = Rule::named("modifier", ident);
    let modifier_list = modifier.clone() + (Rule::from(",") + modifier).many();
    let property_modifier_list = Rule::from(vec!["(".into(), modifier_list, ")".into()]);

    assert_eq!(
        consume(&property_modifier_list, "(mod1, mod2)").unwrap(),
        "(mod1, mod2)"
    );
    assert!(consume(&property_modifier_list, "(mod1, )").is_err());
}

#[test]
fn test_complex_recursive() {
    let property_modifier_list = recursive_modifier_list();

    assert_eq!(
        consume(&property_modifier_list, "(mod1, mod2)").unwrap(),
        "(mod1, mod2)"
    );
    for input in ["()", "(mod1, )", "(mod1, ", "( "] {
        let mut lexer = Lexer::new(input);
        assert!(property_modifier_list.consume(&mut lexer).is_err(), "{}", input);
        assert_eq!(lexer.offset(), 0, "{}", input);
    }
}

#[test]
fn test_complex_recursive_failure_reports_element() {
    let property_modifier_list = recursive_modifier_list();

    match consume(&property_modifier_list, "(mod1, )") {
        Err(MatchError::SequenceElementFailed { index, cause }) => {
            assert_eq!(index, 2);
            assert!(matches!(
                *cause,
                MatchError::UnexpectedCharacter { found: ',', .. }
            ));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_complex_recursive_with_lookahead_keyword() {
    let number = Rule::Digit.many1();
    let compound = (Rule::keyword("@keyword") + Rule::keyword("abc"))
        | (Rule::keyword("@keyword") + number)
        | (Rule::keyword("@keyword") + "a");
    let modifier = Rule::named("modifier", compound);
    let modifier_list =
        RuleCell::create("modifierList", |rec| modifier + (Rule::from(",") + rec).many());
    let property_modifier_list = Rule::from("(") + modifier_list + ")";

    assert_eq!(
        consume(
            &property_modifier_list,
            "(@keyword 123, @keyword abc, @keyword a)"
        )
        .unwrap(),
        "(@keyword 123, @keyword abc, @keyword a)"
    );
    for input in [
        "(@keyword mod, @keyword 123, @keyword a, @keyword abc)",
        "(@keyword ace)",
        "(@keyword b)",
        "(mod1, ",
        "( ",
    ] {
        assert!(consume(&property_modifier_list, input).is_err(), "{}", input);
    }
}

#[test]
fn test_lookahead() {
    let number = Rule::Digit.many1();
    let ident = Rule::Letter + (Rule::Letter | Rule::Digit).many();
    let test = (Rule::from("a") + ident)
        | (Rule::from("a") + number)
        | (Rule::from("a") + Rule::keyword("@keyword"));

    assert_eq!(consume(&test, "a 123").unwrap(), "a 123");
    assert_eq!(consume(&test, "a abc").unwrap(), "a abc");
    assert_eq!(consume(&test, "a @keyword").unwrap(), "a @keyword");
    assert!(consume(&test, "a _abc").is_err());
}

#[test]
fn test_lookahead_with_keyword() {
    let number = Rule::Digit.many1();
    let ident = Rule::Letter + (Rule::Letter | Rule::Digit).many();
    let test = (Rule::keyword("@keyword") + ident)
        | (Rule::keyword("@keyword") + number)
        | (Rule::keyword("@keyword") + "a");

    assert_eq!(consume(&test, "@keyword 123").unwrap(), "@keyword 123");
    assert_eq!(consume(&test, "@keyword abc").unwrap(), "@keyword abc");
    assert_eq!(consume(&test, "@keyword a").unwrap(), "@keyword a");
    assert!(consume(&test, "@keyword _abc").is_err());
}

#[test]
fn test_long_recursive_list() {
    let property_modifier_list = recursive_modifier_list();
    let input = "(mod1, mod2, mod3, mod4, mod5, mod6, mod7, mod8, mod9, mod10)";

    for _ in 0..100 {
        assert_eq!(consume(&property_modifier_list, input).unwrap(), input);
    }
}

#[test]
#[should_panic(expected = "used before its definition was set")]
fn test_incomplete_cell_is_fatal() {
    let pending = RuleCell::new("pending");
    let rule = Rule::Char('(') + &pending;
    let _ = consume(&rule, "(x");
}
