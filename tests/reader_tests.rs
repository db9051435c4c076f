//! Reader tests: tokenizing, structural parsing and the canonical printer

use lisplet::{parse, parse_atom, tokenize, Expression, Number, ParserError, SExprParser};
use proptest::prelude::*;

// ============================================================================
// Tokenizing
// ============================================================================

#[test]
fn test_tokenize_pads_parens_and_splits() {
    assert_eq!(tokenize("(+ 1 2)"), vec!["(", "+", "1", "2", ")"]);
    assert_eq!(
        tokenize("(first(rest x))"),
        vec!["(", "first", "(", "rest", "x", ")", ")"]
    );
}

#[test]
fn test_tokenize_drops_empty_tokens() {
    assert_eq!(tokenize("   "), Vec::<String>::new());
    assert_eq!(tokenize("()"), vec!["(", ")"]);
}

// ============================================================================
// Atom classification
// ============================================================================

#[test]
fn test_atom_precedence_first_match_wins() {
    // A quoted "42" is a string, not a number
    assert_eq!(parse_atom("\"42\""), Expression::Str("42".to_string()));
    assert_eq!(parse_atom("true"), Expression::Bool(true));
    assert_eq!(parse_atom("7"), Expression::Number(Number::Int(7)));
    assert_eq!(parse_atom("7.5"), Expression::Number(Number::Float(7.5)));
    assert_eq!(parse_atom("seven"), Expression::Symbol("seven".to_string()));
}

#[test]
fn test_atom_string_strips_only_the_surrounding_quotes() {
    assert_eq!(parse_atom("\"a b\""), Expression::Str("a b".to_string()));
}

// ============================================================================
// Structural parsing
// ============================================================================

#[test]
fn test_parse_preserves_element_order() {
    let expr = parse("(c a b)").unwrap();
    assert_eq!(expr.to_lisp_text(), "(c a b)");
}

#[test]
fn test_parse_empty_list() {
    assert_eq!(parse("()").unwrap(), Expression::List(Vec::new()));
}

#[test]
fn test_parse_deep_nesting() {
    let expr = parse("(a (b (c (d))))").unwrap();
    assert_eq!(expr.to_lisp_text(), "(a (b (c (d))))");
}

#[test]
fn test_unexpected_eof_inside_list() {
    assert_eq!(parse("(a (b c)").unwrap_err(), ParserError::UnexpectedEof);
}

#[test]
fn test_unexpected_close_paren() {
    assert!(matches!(
        parse(") (a)").unwrap_err(),
        ParserError::UnexpectedCloseParen { .. }
    ));
}

#[test]
fn test_quote_family_reader_expansion() {
    assert_eq!(parse("'(1 2 3)").unwrap().to_lisp_text(), "(quote (1 2 3))");
    assert_eq!(parse("'x").unwrap().to_lisp_text(), "(quote x)");
    assert_eq!(parse("`(a ,b)").unwrap().to_lisp_text(), "(quasiquote (a (unquote b)))");
    assert_eq!(parse(",@xs").unwrap().to_lisp_text(), "(unquotesplicing xs)");
}

#[test]
fn test_quote_at_eof_is_a_syntax_error() {
    assert_eq!(parse("'").unwrap_err(), ParserError::UnexpectedEof);
}

#[test]
fn test_comments_are_discarded() {
    let source = "; header comment\n(+ 1 ; inline\n 2)\n";
    assert_eq!(parse(source).unwrap().to_lisp_text(), "(+ 1 2)");
}

#[test]
fn test_incremental_reading_across_lines() {
    let source = "(def a\n  1)\n(def b 2)\n; done\n";
    let mut parser = SExprParser::from_text(source);
    let first = parser.read().unwrap().unwrap();
    let second = parser.read().unwrap().unwrap();
    assert_eq!(first.to_lisp_text(), "(def a 1)");
    assert_eq!(second.to_lisp_text(), "(def b 2)");
    assert!(parser.read().unwrap().is_none());
}

// ============================================================================
// Canonical printing
// ============================================================================

#[test]
fn test_round_trip_of_canonical_text() {
    for source in [
        "42",
        "-17",
        "1.5",
        "true",
        "false",
        "x",
        "\"hello\"",
        "()",
        "(+ 1 2)",
        "(+ (* 2 3) (- 10 5))",
        "(quote (1 2 3))",
        "(def f (lambda (x) (+ x 1)))",
    ] {
        let expr = parse(source).unwrap();
        assert_eq!(expr.to_lisp_text(), source, "round trip failed");
    }
}

#[test]
fn test_numbers_print_distinguishing_exactness() {
    assert_eq!(parse("4").unwrap().to_lisp_text(), "4");
    assert_eq!(parse("4.0").unwrap().to_lisp_text(), "4.0");
}

// ============================================================================
// Round-trip property: print then reparse is structural identity
// ============================================================================

fn atom_strategy() -> impl Strategy<Value = Expression> {
    prop_oneof![
        "[a-z][a-z0-9*?+-]{0,8}"
            .prop_filter("reserved or numeric-looking atoms", |s| {
                s != "true" && s != "false" && s.parse::<f64>().is_err()
            })
            .prop_map(Expression::Symbol),
        any::<i64>().prop_map(|n| Expression::Number(Number::Int(n))),
        (-1.0e6..1.0e6f64).prop_map(|x| Expression::Number(Number::Float(x))),
        any::<bool>().prop_map(Expression::Bool),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Expression::Str),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expression> {
    atom_strategy().prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Expression::List)
    })
}

proptest! {
    #[test]
    fn printed_form_reparses_to_the_same_tree(expr in expr_strategy()) {
        let text = expr.to_lisp_text();
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(reparsed, expr);
    }
}
