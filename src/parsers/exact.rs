//! Parsers that match literal strings.

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`lit()`], [`lits()`], [`ilit()`], and
/// [`ilits()`].
#[derive(Clone)]
pub struct Literal {
    options: Vec<String>,
    fold_case: bool,
}

impl Literal {
    /// Try to match `option` at `start`; on success, return the byte
    /// position just past the matched text.
    fn match_at(&self, source: &str, start: usize, option: &str) -> Option<usize> {
        if !self.fold_case {
            return source[start..]
                .starts_with(option)
                .then(|| start + option.len());
        }
        let mut end = start;
        let mut source_chars = source[start..].chars();
        for wanted in option.chars() {
            let got = source_chars.next()?;
            if !got.to_lowercase().eq(wanted.to_lowercase()) {
                return None;
            }
            end += got.len_utf8();
        }
        Some(end)
    }
}

impl Parser for Literal {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        for option in &self.options {
            if let Some(end) = self.match_at(context.source(), start, option) {
                // Case-insensitive matches produce the listed spelling, so
                // downstream code sees one canonical form.
                return Ok(Match::new(option.clone(), end));
            }
        }
        Err(context.fail(start, || {
            if self.options.len() == 1 {
                format!("expected {:?}", self.options[0])
            } else {
                let list: Vec<String> = self.options.iter().map(|s| format!("{:?}", s)).collect();
                format!("expected one of {}", list.join(","))
            }
        }))
    }
}

/// Match the literal string `s` and produce it.
///
/// ```
/// use sprig::prelude::*;
///
/// assert_eq!(lit("null").parse("null").unwrap(), "null");
/// assert!(lit("null").parse("nul").is_err());
/// ```
pub fn lit(s: &str) -> Literal {
    Literal {
        options: vec![s.to_string()],
        fold_case: false,
    }
}

/// Match whichever of the listed literals comes first, trying them in
/// order, and produce the one that matched.
pub fn lits(options: &[&str]) -> Literal {
    Literal {
        options: options.iter().map(|s| s.to_string()).collect(),
        fold_case: false,
    }
}

/// Case-insensitive [`lit()`]. The produced string is the listed spelling,
/// not whatever casing the input used.
pub fn ilit(s: &str) -> Literal {
    Literal {
        options: vec![s.to_string()],
        fold_case: true,
    }
}

/// Case-insensitive [`lits()`].
pub fn ilits(options: &[&str]) -> Literal {
    Literal {
        options: options.iter().map(|s| s.to_string()).collect(),
        fold_case: true,
    }
}

/// A string literal is itself a parser, so sequences can be written
/// without wrapping every keyword in [`lit()`]. (The impl is on `str`;
/// `&str` parses through the blanket reference impl.)
impl Parser for str {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        if context.source()[start..].starts_with(self) {
            Ok(Match::new(self.to_string(), start + self.len()))
        } else {
            Err(context.fail(start, || format!("expected {:?}", self)))
        }
    }
}

/// A char literal matches exactly that character.
impl Parser for char {
    type Output = char;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<char>, Reported> {
        match context.source()[start..].chars().next() {
            Some(c) if c == *self => Ok(Match::new(c, start + c.len_utf8())),
            _ => Err(context.fail(start, || format!("expected {:?}", self))),
        }
    }
}
