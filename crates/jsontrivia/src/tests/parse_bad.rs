use rstest::rstest;

use crate::{ErrorCategory, ParseError, parse};

fn assert_err(input: &str, expected_sub: &str, line: usize, column: usize) {
    let err: ParseError = parse(input).unwrap_err();
    let rendered = err.to_string();
    assert!(
        rendered.contains(expected_sub),
        "expected substring {expected_sub:?} in {rendered:?} for input {input:?}"
    );
    assert_eq!(
        (err.line, err.column),
        (line, column),
        "position mismatch for input {input:?}: {rendered}"
    );
}

#[test]
fn empty_document() {
    assert_err("", "unexpected end of input", 1, 1);
    assert_err("   \n  ", "unexpected end of input", 1, 1);
}

#[test]
fn comment_only_document() {
    // The comment is consumed; the document still has no value.
    assert_err("// nothing here", "unexpected end of input", 1, 16);
}

#[rstest]
#[case("{", 1, 2)]
#[case("[1,", 1, 4)]
#[case("{\"a\":", 1, 6)]
#[case("-", 1, 2)]
#[case("{\"a\":1 // comment", 1, 18)]
fn unclosed_structures(#[case] input: &str, #[case] line: usize, #[case] column: usize) {
    assert_err(input, "unexpected end of input", line, column);
}

#[test]
fn value_required_before_close() {
    // A member with no value is an error, not a silent hole.
    assert_err("{\"a\":}", "unexpected token '}'", 1, 6);
    assert_err("[1,,2]", "unexpected token ','", 1, 4);
}

#[test]
fn misplaced_tokens() {
    assert_err("{,}", "unexpected token ','", 1, 2);
    assert_err("[1 2]", "unexpected token '2'", 1, 4);
    assert_err("{\"a\" 1}", "unexpected token '1'", 1, 6);
    assert_err("{\"a\":1 \"b\":2}", "unexpected token '\"b\"'", 1, 8);
    assert_err("{1:2}", "unexpected token '1'", 1, 2);
    assert_err(":", "unexpected token ':'", 1, 1);
}

#[test]
fn trailing_content() {
    assert_err("1 2", "unexpected token '2'", 1, 3);
    assert_err("[1]]", "unexpected token ']'", 1, 4);
    assert_err("{} {}", "unexpected token '{'", 1, 4);
}

#[test]
fn minus_needs_a_number() {
    assert_err("-true", "unexpected token 'true'", 1, 2);
    assert_err("[-]", "unexpected token ']'", 1, 3);
}

#[test]
fn lexical_failures() {
    assert_err("[1, ?]", "invalid character '?'", 1, 5);
    assert_err("[01]", "invalid number", 1, 2);
    assert_err("\"abc", "unterminated string", 1, 1);
    assert_err("/* open", "unterminated block comment", 1, 1);
    assert_err("tru", "unexpected end of input", 1, 4);
}

#[test]
fn categories() {
    assert_eq!(
        parse("?").unwrap_err().category(),
        ErrorCategory::Lexical
    );
    assert_eq!(
        parse("{\"a\":}").unwrap_err().category(),
        ErrorCategory::Syntax
    );
    assert_eq!(
        parse("").unwrap_err().category(),
        ErrorCategory::UnexpectedEnd
    );
}

#[test]
fn no_partial_results() {
    // Failure anywhere rejects the whole document.
    assert!(parse("{\"good\": 1, \"bad\": }").is_err());
    assert!(parse("[1, 2, 3, ").is_err());
}
