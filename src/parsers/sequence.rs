//! Matching patterns in sequence: `seq`, `check`, and the brackets.

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// Implemented for tuples of parsers that can run one after another.
pub trait Sequence {
    /// The tuple of the element parsers' outputs.
    type Output;

    /// Run each element in order, starting each at the previous end.
    fn parse_seq(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported>;
}

macro_rules! sequence_impl {
    ( $( $p:ident $v:ident ),+ ) => {
        impl<$($p,)+> Sequence for ($($p,)+)
        where
            $($p: Parser,)+
        {
            type Output = ($($p::Output,)+);

            fn parse_seq(
                &self,
                context: &mut ParseContext<'_>,
                start: usize,
            ) -> Result<Match<Self::Output>, Reported> {
                let ($($v,)+) = self;
                let mut pos = start;
                $(
                    let $v = $v.parse_at(context, pos)?;
                    pos = $v.end;
                )+
                Ok(Match::new(($($v.value,)+), pos))
            }
        }
    };
}

sequence_impl!(A a);
sequence_impl!(A a, B b);
sequence_impl!(A a, B b, C c);
sequence_impl!(A a, B b, C c, D d);
sequence_impl!(A a, B b, C c, D d, E e);
sequence_impl!(A a, B b, C c, D d, E e, F f);
sequence_impl!(A a, B b, C c, D d, E e, F f, G g);
sequence_impl!(A a, B b, C c, D d, E e, F f, G g, H h);
sequence_impl!(A a, B b, C c, D d, E e, F f, G g, H h, I i);

/// The type of parser returned by [`seq()`].
#[derive(Clone)]
pub struct SeqParser<T> {
    items: T,
}

impl<T: Sequence> Parser for SeqParser<T> {
    type Output = T::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mark = context.tree_mark();
        context.tree_open(start);
        match self.items.parse_seq(context, start) {
            Ok(m) => {
                context.tree_close(None, None, m.end);
                Ok(m)
            }
            Err(Reported) => {
                context.tree_rollback(mark);
                Err(context.fail_wrap(start, || "in sequence".to_string()))
            }
        }
    }
}

/// The type of parser returned by [`check()`].
#[derive(Clone)]
pub struct CheckParser<T> {
    items: T,
}

impl<T: Sequence> Parser for CheckParser<T> {
    type Output = ();

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<()>, Reported> {
        let mark = context.tree_mark();
        context.tree_open(start);
        match self.items.parse_seq(context, start) {
            Ok(m) => {
                context.tree_close(None, None, m.end);
                Ok(Match::new((), m.end))
            }
            Err(Reported) => {
                context.tree_rollback(mark);
                Err(context.fail_wrap(start, || "in sequence".to_string()))
            }
        }
    }
}

/// Match each parser of the tuple in order and produce the tuple of their
/// values.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = seq((read1("0123456789"), lit("x"), read1("0123456789")));
/// let (w, _, h) = p.parse("4x23").unwrap();
/// assert_eq!((w.as_str(), h.as_str()), ("4", "23"));
/// ```
pub fn seq<T: Sequence>(items: T) -> SeqParser<T> {
    SeqParser { items }
}

/// Match exactly like [`seq()`] but discard the values. Handy for
/// delimiters and keywords whose text doesn't matter.
pub fn check<T: Sequence>(items: T) -> CheckParser<T> {
    CheckParser { items }
}

/// The type of parser returned by [`bracket()`].
#[derive(Clone)]
pub struct BracketParser<L, C, R> {
    left: L,
    content: C,
    right: R,
}

impl<L, C, R> Parser for BracketParser<L, C, R>
where
    L: Parser,
    C: Parser,
    R: Parser,
{
    type Output = C::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mark = context.tree_mark();
        context.tree_open(start);
        let result: Result<Match<C::Output>, Reported> = (|| {
            let left = self.left.parse_at(context, start)?;
            let content = self.content.parse_at(context, left.end)?;
            let right = self.right.parse_at(context, content.end)?;
            Ok(Match::new(content.value, right.end))
        })();
        match result {
            Ok(m) => {
                context.tree_close(None, None, m.end);
                Ok(m)
            }
            Err(Reported) => {
                context.tree_rollback(mark);
                Err(context.fail_wrap(start, || "in bracketed group".to_string()))
            }
        }
    }
}

/// The type of parser returned by [`bracket_any()`].
#[derive(Clone)]
pub struct BracketAnyParser<E, C> {
    ends: Vec<E>,
    content: C,
}

impl<E, C> Parser for BracketAnyParser<E, C>
where
    E: Parser,
    C: Parser,
{
    type Output = C::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mark = context.tree_mark();
        context.tree_open(start);
        let result: Result<Match<C::Output>, Reported> = (|| {
            let mut open = None;
            for end in &self.ends {
                if let Ok(m) = end.parse_at(context, start) {
                    open = Some((end, m.end));
                    break;
                }
            }
            let Some((end_parser, after_open)) = open else {
                return Err(context.fail(start, || "expected opening bracket".to_string()));
            };
            let content = self.content.parse_at(context, after_open)?;
            // The same end that opened the group must close it.
            let close = end_parser.parse_at(context, content.end)?;
            Ok(Match::new(content.value, close.end))
        })();
        match result {
            Ok(m) => {
                context.tree_close(None, None, m.end);
                Ok(m)
            }
            Err(Reported) => {
                context.tree_rollback(mark);
                Err(context.fail_wrap(start, || "in bracketed group".to_string()))
            }
        }
    }
}

/// Match `left`, then `content`, then `right`, producing only the content
/// value.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = bracket(lit("("), read("abc"), lit(")"));
/// assert_eq!(p.parse("(abc)").unwrap(), "abc");
/// ```
pub fn bracket<L, C, R>(left: L, content: C, right: R) -> BracketParser<L, C, R>
where
    L: Parser,
    C: Parser,
    R: Parser,
{
    BracketParser {
        left,
        content,
        right,
    }
}

/// Match `content` between a pair of identical delimiters, trying each of
/// `ends` in turn for the opener; whichever matched must also close the
/// group. This is how a string literal can accept either quote style while
/// rejecting a mismatched pair.
pub fn bracket_any<E, C>(ends: Vec<E>, content: C) -> BracketAnyParser<E, C>
where
    E: Parser,
    C: Parser,
{
    BracketAnyParser { ends, content }
}
