//! Value transformation: `map`, `try_map`, `verify`, and `chain`.

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`map()`].
#[derive(Clone)]
pub struct MapParser<P, F> {
    pub(crate) inner: P,
    pub(crate) mapper: F,
}

impl<P, T, F> Parser for MapParser<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> T,
{
    type Output = T;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<T>, Reported> {
        let m = self.inner.parse_at(context, start)?;
        Ok(Match::new((self.mapper)(m.value), m.end))
    }
}

/// The type of parser returned by [`try_map()`].
#[derive(Clone)]
pub struct TryMapParser<P, F> {
    inner: P,
    mapper: F,
}

impl<P, T, F> Parser for TryMapParser<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<T, String>,
{
    type Output = T;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<T>, Reported> {
        let mark = context.tree_mark();
        let m = self.inner.parse_at(context, start)?;
        match (self.mapper)(m.value) {
            Ok(value) => Ok(Match::new(value, m.end)),
            Err(message) => {
                context.tree_rollback(mark);
                // Rejection is reported at the end of the inner match, so
                // it wins the "farthest failure" contest against branches
                // that never got that far.
                Err(context.fail(m.end, || message))
            }
        }
    }
}

/// The type of parser returned by [`verify()`].
#[derive(Clone)]
pub struct VerifyParser<P, F> {
    inner: P,
    predicate: F,
}

impl<P, F> Parser for VerifyParser<P, F>
where
    P: Parser,
    F: Fn(&P::Output) -> Result<(), String>,
{
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mark = context.tree_mark();
        let m = self.inner.parse_at(context, start)?;
        match (self.predicate)(&m.value) {
            Ok(()) => Ok(m),
            Err(message) => {
                context.tree_rollback(mark);
                Err(context.fail(m.end, || message))
            }
        }
    }
}

/// The type of parser returned by [`chain()`].
#[derive(Clone)]
pub struct ChainParser<P, F> {
    inner: P,
    selector: F,
}

impl<P, Q, F> Parser for ChainParser<P, F>
where
    P: Parser,
    Q: Parser,
    F: Fn(&P::Output) -> Option<Q>,
{
    type Output = (P::Output, Q::Output);

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let entry = context.tree_mark();
        let m = self.inner.parse_at(context, start)?;
        let Some(next) = (self.selector)(&m.value) else {
            context.tree_rollback(entry);
            return Err(context.fail(m.end, || "chain selection failed".to_string()));
        };
        match next.parse_at(context, m.end) {
            Ok(n) => Ok(Match::new((m.value, n.value), n.end)),
            Err(Reported) => {
                context.tree_rollback(entry);
                Err(context.fail_wrap(start, || "in chained parser".to_string()))
            }
        }
    }
}

/// Produce a new parser that matches like `inner` but passes the value
/// through `mapper`.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = map(read1("0123456789"), |s| s.len());
/// assert_eq!(p.parse("12345").unwrap(), 5);
/// ```
pub fn map<P, T, F>(inner: P, mapper: F) -> MapParser<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> T,
{
    MapParser { inner, mapper }
}

/// Like [`map()`], but the mapper may reject the match by returning an
/// error message. The rejection is reported at the *end* of the matched
/// text.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = try_map(read1("0123456789"), |s| {
///     s.parse::<u8>().map_err(|e| e.to_string())
/// });
/// assert_eq!(p.parse("255").unwrap(), 255);
/// assert!(p.parse("1000").is_err());
/// ```
pub fn try_map<P, T, F>(inner: P, mapper: F) -> TryMapParser<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<T, String>,
{
    TryMapParser { inner, mapper }
}

/// Match like `inner`, then ask `predicate` whether the value is
/// acceptable; an `Err` message fails the parse at the end of the match.
pub fn verify<P, F>(inner: P, predicate: F) -> VerifyParser<P, F>
where
    P: Parser,
    F: Fn(&P::Output) -> Result<(), String>,
{
    VerifyParser { inner, predicate }
}

/// Match `inner`, let `selector` pick the parser to run next based on the
/// value, and run it immediately after. Produces both values. A `None`
/// selection fails with "chain selection failed".
pub fn chain<P, Q, F>(inner: P, selector: F) -> ChainParser<P, F>
where
    P: Parser,
    Q: Parser,
    F: Fn(&P::Output) -> Option<Q>,
{
    ChainParser { inner, selector }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{lit, read1, seq, take};
    use crate::testing::*;

    #[test]
    fn test_map() {
        let p = map(seq((lit("forward "), read1("0123456789"))), |(_, n)| n);
        assert_parse_eq(&p, "forward 1234", "1234".to_string());
    }

    #[test]
    fn test_try_map_reports_at_match_end() {
        let p = try_map(read1("0123456789"), |s| {
            if s.starts_with('0') {
                Err("cannot start with 0".to_string())
            } else {
                Ok(s)
            }
        });
        assert_parse_eq(&p, "123", "123".to_string());
        assert_parse_error(&p, "012", "cannot start with 0 at line 1 column 3");
    }

    #[test]
    fn test_verify() {
        let p = verify(read1("0123456789"), |s: &String| {
            if s.len() <= 3 {
                Ok(())
            } else {
                Err("number too long".to_string())
            }
        });
        assert_parse_eq(&p, "999", "999".to_string());
        assert_parse_error(&p, "12345", "number too long");
    }

    #[test]
    fn test_chain() {
        // The length digit says how many characters follow.
        let p = chain(read1("0123456789"), |n: &String| {
            n.parse::<usize>().ok().map(take)
        });
        assert_parse_eq(
            &p,
            "3abc",
            ("3".to_string(), "abc".to_string()),
        );
        assert_no_parse(&p, "3ab");
    }

    #[test]
    fn test_chain_selection_failed() {
        let p = chain(read1("abc"), |_: &String| None::<crate::parsers::Literal>);
        assert_parse_error(&p, "abc", "chain selection failed");
    }
}
