//! Repetition, with and without separators.

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// Policy for a separator appearing after the last element of a separated
/// repetition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trail {
    /// A trailing separator is permitted and consumed.
    Allow,
    /// A trailing separator is not part of the match; the position is
    /// rewound to just after the last element.
    Disallow,
    /// Every element must be followed by a separator, the last included.
    Require,
}

/// A parser that matches the empty string. Used as the separator of the
/// plain repetitions, and occasionally useful as a branch of its own.
#[derive(Clone, Copy)]
pub struct EmptyParser;

impl Parser for EmptyParser {
    type Output = ();

    fn parse_at(
        &self,
        _context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<()>, Reported> {
        Ok(Match::new((), start))
    }
}

/// Match the empty string, successfully, producing `()`.
pub fn empty() -> EmptyParser {
    EmptyParser
}

/// The type of parser returned by the `rep` family.
#[derive(Clone)]
pub struct RepeatParser<P, S> {
    pattern: P,
    sep: S,
    min_one: bool,
    trail: Trail,
}

impl<P, S> Parser for RepeatParser<P, S>
where
    P: Parser,
    S: Parser,
{
    type Output = Vec<P::Output>;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let entry = context.tree_mark();
        let mut values = Vec::new();
        let mut pos = start;

        match self.pattern.parse_at(context, pos) {
            Ok(m) => {
                pos = m.end;
                values.push(m.value);
            }
            Err(Reported) => {
                if self.min_one {
                    context.tree_rollback(entry);
                    return Err(context.fail_wrap(start, || "expected at least one match".to_string()));
                }
                return Ok(Match::new(values, start));
            }
        }

        loop {
            let before = pos;
            let sep_mark = context.tree_mark();
            let sep_end = match self.sep.parse_at(context, pos) {
                Ok(sm) => sm.end,
                Err(Reported) => {
                    if self.trail == Trail::Require {
                        context.tree_rollback(entry);
                        return Err(context.fail_wrap(pos, || "expected trailing separator".to_string()));
                    }
                    return Ok(Match::new(values, pos));
                }
            };
            match self.pattern.parse_at(context, sep_end) {
                Ok(m) => {
                    if m.end == before {
                        // Neither separator nor element consumed anything;
                        // another round would loop forever.
                        context.tree_rollback(sep_mark);
                        return Ok(Match::new(values, before));
                    }
                    pos = m.end;
                    values.push(m.value);
                }
                Err(Reported) => {
                    return match self.trail {
                        Trail::Allow | Trail::Require => Ok(Match::new(values, sep_end)),
                        Trail::Disallow => {
                            // The separator we just consumed isn't part of
                            // the match; back out to the last element.
                            context.tree_rollback(sep_mark);
                            Ok(Match::new(values, pos))
                        }
                    };
                }
            }
        }
    }
}

/// Match `pattern` as many times as it will go, producing a `Vec` of the
/// values. Matching zero times is fine, so this parser never fails.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = rep(lit("ab"));
/// assert_eq!(p.parse("ababab").unwrap().len(), 3);
/// assert_eq!(p.parse("").unwrap().len(), 0);
/// ```
pub fn rep<P: Parser>(pattern: P) -> RepeatParser<P, EmptyParser> {
    RepeatParser {
        pattern,
        sep: EmptyParser,
        min_one: false,
        trail: Trail::Allow,
    }
}

/// Like [`rep()`], but at least one match is required.
pub fn rep1<P: Parser>(pattern: P) -> RepeatParser<P, EmptyParser> {
    RepeatParser {
        pattern,
        sep: EmptyParser,
        min_one: true,
        trail: Trail::Allow,
    }
}

/// Match `pattern` any number of times, separated by `sep`, with `trail`
/// saying what to make of a separator after the last element. Only the
/// pattern's values are kept.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = repsep(read1("0123456789"), lit(","), Trail::Disallow);
/// assert_eq!(p.parse("1,2,3").unwrap(), vec!["1", "2", "3"]);
/// ```
pub fn repsep<P, S>(pattern: P, sep: S, trail: Trail) -> RepeatParser<P, S>
where
    P: Parser,
    S: Parser,
{
    RepeatParser {
        pattern,
        sep,
        min_one: false,
        trail,
    }
}

/// Like [`repsep()`], but at least one element is required.
pub fn rep1sep<P, S>(pattern: P, sep: S, trail: Trail) -> RepeatParser<P, S>
where
    P: Parser,
    S: Parser,
{
    RepeatParser {
        pattern,
        sep,
        min_one: true,
        trail,
    }
}
