//! Assertion helpers used throughout the test suite.

use std::fmt::Debug;

use crate::Parser;

#[track_caller]
pub fn assert_parse_eq<P, E>(parser: P, source: &str, expected: E)
where
    P: Parser,
    P::Output: PartialEq<E> + Debug,
    E: Debug,
{
    match parser.parse(source) {
        Ok(value) => assert_eq!(value, expected),
        Err(err) => panic!("parse failed: {}", err),
    }
}

#[track_caller]
pub fn assert_no_parse<P>(parser: P, source: &str)
where
    P: Parser,
    P::Output: Debug,
{
    if let Ok(value) = parser.parse(source) {
        panic!("expected no match, but parsed {:?}: {:?}", source, value);
    }
}

#[track_caller]
pub fn assert_parse_error<P>(parser: P, source: &str, expected_message: &str)
where
    P: Parser,
    P::Output: Debug,
{
    match parser.parse(source) {
        Ok(value) => panic!("expected no match, but parsed {:?}: {:?}", source, value),
        Err(err) => {
            let text = err.to_string();
            assert!(
                text.contains(expected_message),
                "error {:?} does not contain {:?}",
                text,
                expected_message,
            );
        }
    }
}
