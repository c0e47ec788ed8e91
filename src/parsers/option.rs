//! Optional matching and negation: `opt`, `not`, `and_not`.

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`opt()`].
#[derive(Clone)]
pub struct OptionalParser<P> {
    inner: P,
}

impl<P: Parser> Parser for OptionalParser<P> {
    type Output = Option<P::Output>;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        match self.inner.parse_at(context, start) {
            Ok(m) => Ok(Match::new(Some(m.value), m.end)),
            // The recorded failure stays behind; if nothing downstream gets
            // farther, it is still the best story for the overall error.
            Err(Reported) => Ok(Match::new(None, start)),
        }
    }
}

/// The type of parser returned by [`not()`].
#[derive(Clone)]
pub struct NotParser<P> {
    inner: P,
}

impl<P: Parser> Parser for NotParser<P> {
    type Output = ();

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<()>, Reported> {
        let mark = context.tree_mark();
        match self.inner.parse_at(context, start) {
            Ok(m) => {
                context.tree_rollback(mark);
                let matched = &context.source()[start..m.end];
                Err(context.fail(start, || format!("unexpected {:?}", matched)))
            }
            Err(Reported) => Ok(Match::new((), start)),
        }
    }
}

/// The type of parser returned by [`and_not()`].
#[derive(Clone)]
pub struct AndNotParser<P, Q> {
    inner: P,
    reject: Q,
}

impl<P, Q> Parser for AndNotParser<P, Q>
where
    P: Parser,
    Q: Parser,
{
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let entry = context.tree_mark();
        let m = self.inner.parse_at(context, start)?;
        let reject_mark = context.tree_mark();
        match self.reject.parse_at(context, start) {
            Ok(r) => {
                context.tree_rollback(entry);
                let matched = &context.source()[start..r.end];
                Err(context.fail(start, || format!("unexpected {:?}", matched)))
            }
            Err(Reported) => {
                // The rejected branch may have probed the tree; its nodes
                // are not part of the match.
                context.tree_rollback(reject_mark);
                Ok(m)
            }
        }
    }
}

/// Match `inner` if it's there, producing `Some(value)`; otherwise match
/// nothing and produce `None`. Never fails.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = seq((opt(lit("-")), read1("0123456789")));
/// assert_eq!(p.parse("-7").unwrap().0, Some("-".to_string()));
/// assert_eq!(p.parse("7").unwrap().0, None);
/// ```
pub fn opt<P: Parser>(inner: P) -> OptionalParser<P> {
    OptionalParser { inner }
}

/// Succeed, consuming nothing, exactly when `inner` does *not* match here.
pub fn not<P: Parser>(inner: P) -> NotParser<P> {
    NotParser { inner }
}

/// Match `inner`, but only if `reject` does not also match at the same
/// starting position. The classic use is keywords: an identifier that is
/// not a reserved word.
pub fn and_not<P, Q>(inner: P, reject: Q) -> AndNotParser<P, Q>
where
    P: Parser,
    Q: Parser,
{
    AndNotParser { inner, reject }
}
