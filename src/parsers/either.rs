//! Alternation: try each branch in order, first match wins.

use crate::{
    error::{Cause, Result},
    Match, ParseContext, Parser, Reported,
};

/// Implemented for tuples of parsers that all produce the same output.
pub trait Alternatives {
    /// The common output type of every branch.
    type Output;

    /// Try each branch at `start`. When cause capture is on, `siblings`
    /// collects a snapshot of each rejected branch's failure.
    fn parse_alt(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
        siblings: &mut Option<Vec<Cause>>,
    ) -> Result<Match<Self::Output>, Reported>;
}

macro_rules! alternatives_impl {
    ( $( $p:ident $v:ident ),+ ) => {
        impl<Out, $($p,)+> Alternatives for ($($p,)+)
        where
            $($p: Parser<Output = Out>,)+
        {
            type Output = Out;

            fn parse_alt(
                &self,
                context: &mut ParseContext<'_>,
                start: usize,
                siblings: &mut Option<Vec<Cause>>,
            ) -> Result<Match<Out>, Reported> {
                let ($($v,)+) = self;
                $(
                    match $v.parse_at(context, start) {
                        Ok(m) => return Ok(m),
                        Err(Reported) => {
                            if let Some(s) = siblings {
                                s.extend(context.failure_copy());
                            }
                        }
                    }
                )+
                Err(Reported)
            }
        }
    };
}

alternatives_impl!(A a, B b);
alternatives_impl!(A a, B b, C c);
alternatives_impl!(A a, B b, C c, D d);
alternatives_impl!(A a, B b, C c, D d, E e);
alternatives_impl!(A a, B b, C c, D d, E e, F f);
alternatives_impl!(A a, B b, C c, D d, E e, F f, G g);
alternatives_impl!(A a, B b, C c, D d, E e, F f, G g, H h);
alternatives_impl!(A a, B b, C c, D d, E e, F f, G g, H h, I i);

/// The type of parser returned by [`alt()`] and [`alt_named()`].
#[derive(Clone)]
pub struct AltParser<T> {
    options: T,
    name: Option<String>,
}

impl<T: Alternatives> Parser for AltParser<T> {
    type Output = T::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mut siblings = if context.causes() {
            Some(Vec::new())
        } else {
            None
        };
        match self.options.parse_alt(context, start, &mut siblings) {
            Ok(m) => Ok(m),
            Err(Reported) => {
                let message = || match &self.name {
                    Some(n) => format!("expected {}", n),
                    None => "no alternative matched".to_string(),
                };
                let outcome = match siblings {
                    Some(collected) => {
                        let mut outer = Cause::new(
                            start,
                            if context.messages() {
                                message()
                            } else {
                                String::new()
                            },
                        );
                        outer.name = self.name.clone();
                        Err(context.fail_cause(Cause::preferring_latest(collected, outer)))
                    }
                    None => Err(context.fail(start, message)),
                };
                // A failure that never got past our own starting point is
                // best described by our name, if it has none of its own.
                if let Some(n) = &self.name {
                    context.name_failure_at(start, n);
                }
                outcome
            }
        }
    }
}

/// Try each parser of the tuple in order at the same position and return
/// the first match. All branches must produce the same type.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = alt((
///     map(lit("<"), |_| -1),
///     map(lit("="), |_| 0),
///     map(lit(">"), |_| 1),
/// ));
/// assert_eq!(p.parse(">").unwrap(), 1);
/// ```
pub fn alt<T: Alternatives>(options: T) -> AltParser<T> {
    AltParser {
        options,
        name: None,
    }
}

/// Like [`alt()`], with a name used in diagnostics: an input that matches
/// no branch is reported as "expected `name`".
pub fn alt_named<T: Alternatives>(name: &str, options: T) -> AltParser<T> {
    AltParser {
        options,
        name: Some(name.to_string()),
    }
}
