//! Lazy parser handles, for self- and mutually recursive grammars.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// A handle to a parser that may not exist yet.
///
/// Recursive grammars need to mention a parser before it can be built;
/// the handle stands in for it and is pointed at the real parser later
/// with [`define`](LazyParser::define). Clones share the definition, so a
/// grammar can hand the handle to several combinators and define it once.
///
/// Parsing through a handle that was never defined fails with
/// "uninitialized lazy parser".
///
/// ```
/// use sprig::prelude::*;
///
/// // nested ::= "(" nested ")" | "x"
/// let nested = lazy::<String>();
/// nested.define(alt((
///     bracket(lit("("), nested.clone(), lit(")")),
///     lit("x"),
/// )));
/// assert_eq!(nested.parse("((x))").unwrap(), "x");
/// assert!(nested.parse("((x)").is_err());
/// ```
pub struct LazyParser<T: 'static> {
    target: Rc<OnceCell<Rc<dyn Parser<Output = T>>>>,
}

impl<T: 'static> Clone for LazyParser<T> {
    fn clone(&self) -> Self {
        LazyParser {
            target: Rc::clone(&self.target),
        }
    }
}

impl<T: 'static> LazyParser<T> {
    /// Point the handle (and every clone of it) at `parser`.
    ///
    /// # Panics
    ///
    /// If the handle was already defined.
    pub fn define<P>(&self, parser: P)
    where
        P: Parser<Output = T> + 'static,
    {
        let already_set = self.target.set(Rc::new(parser)).is_err();
        assert!(!already_set, "lazy parser defined twice");
    }

    /// The parser this handle resolves to, if it has been defined.
    /// Resolution happens once; afterwards the handle is transparent.
    pub fn get(&self) -> Option<&Rc<dyn Parser<Output = T>>> {
        self.target.get()
    }
}

impl<T: 'static> Parser for LazyParser<T> {
    type Output = T;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<T>, Reported> {
        match self.target.get() {
            Some(parser) => parser.parse_at(context, start),
            None => Err(context.fail(start, || "uninitialized lazy parser".to_string())),
        }
    }
}

/// Create an undefined lazy handle producing `T`.
pub fn lazy<T: 'static>() -> LazyParser<T> {
    LazyParser {
        target: Rc::new(OnceCell::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{alt, bracket, lit, map};
    use crate::testing::*;

    #[test]
    fn test_recursive_grammar() {
        // depth ::= "(" depth ")" | ""
        let depth = lazy::<usize>();
        depth.define(alt((
            map(bracket(lit("("), depth.clone(), lit(")")), |n| n + 1),
            map(lit(""), |_| 0),
        )));
        assert_parse_eq(depth.clone(), "", 0);
        assert_parse_eq(depth.clone(), "((()))", 3);
        assert_no_parse(depth.clone(), "(()");
    }

    #[test]
    fn test_uninitialized() {
        let p = lazy::<()>();
        assert_parse_error(&p, "x", "uninitialized lazy parser");
        assert!(p.get().is_none());
    }

    #[test]
    fn test_resolution_is_stable() {
        let p = lazy::<String>();
        p.define(lit("a"));
        let first = Rc::as_ptr(p.get().unwrap());
        let _ = p.parse("a");
        assert_eq!(Rc::as_ptr(p.get().unwrap()), first);
    }
}
