//! The `Parser` trait and the success cell it returns.

use std::rc::Rc;

use crate::context::{ParseContext, Reported};
use crate::error::{ParseError, Result};

/// A successful match: the produced value and the position just past the
/// matched text.
///
/// Returned by value; with a small struct this costs nothing and avoids
/// the aliasing questions an out-parameter would raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<T> {
    /// The value this parser produced.
    pub value: T,
    /// Byte position just past the matched text. For every built-in parser
    /// this is at or after the starting position.
    pub end: usize,
}

impl<T> Match<T> {
    /// Package a value with its end position.
    pub fn new(value: T, end: usize) -> Match<T> {
        Match { value, end }
    }
}

/// A parser: given the parse context and a starting position, either
/// produce a value and a new position, or record a failure in the context
/// and return `Reported`.
///
/// Parsers are plain values. They are built once, freely shared, and never
/// mutated by parsing; the same parser can be used from several grammars
/// or called at several positions during one parse.
pub trait Parser {
    /// The type of value this parser produces on a match.
    type Output;

    /// Try to match at `start`. On failure, the failure description lives
    /// in `context`, not in the returned `Reported`.
    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported>;

    /// Match `source` in its entirety and produce the value.
    ///
    /// This is the quick way to run a parser, with both detail bits on.
    /// For trimming, partial input, tree building, or the cheap
    /// no-diagnostics mode, use [`driver`](crate::driver::driver).
    ///
    /// ```
    /// use sprig::prelude::*;
    ///
    /// let p = seq((lit("fn "), read1("abcdefghijklmnopqrstuvwxyz")));
    /// assert_eq!(p.parse("fn main").unwrap().1, "main");
    /// assert!(p.parse("fn main()").is_err());
    /// ```
    fn parse(&self, source: &str) -> Result<Self::Output, ParseError>
    where
        Self: Sized,
    {
        let mut context = ParseContext::new(source);
        match self.parse_at(&mut context, 0) {
            Ok(m) if m.end == source.len() => Ok(m.value),
            Ok(m) => {
                let consumed = source[..m.end].chars().count();
                let Reported = context.fail(m.end, || {
                    format!(
                        "expected to consume all input, but only {} chars consumed",
                        consumed
                    )
                });
                Err(context.into_parse_error(1))
            }
            Err(Reported) => Err(context.into_parse_error(1)),
        }
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        (**self).parse_at(context, start)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        (**self).parse_at(context, start)
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        (**self).parse_at(context, start)
    }
}

/// A parser with its concrete type erased, sharable across grammars.
pub type SharedParser<T> = Rc<dyn Parser<Output = T>>;

/// Erase a parser's concrete type so differently shaped parsers can live
/// in one collection or be handed out to several grammars.
pub fn shared<P>(parser: P) -> SharedParser<P::Output>
where
    P: Parser + 'static,
    P::Output: 'static,
{
    Rc::new(parser)
}
