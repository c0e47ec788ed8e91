//! Primitives that scan ahead for a stop character: the `read_to` family
//! and `peek`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{charset::CharSet, error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`read_to()`] and [`read1_to()`].
#[derive(Clone)]
pub struct ReadTo {
    stop: CharSet,
    eof_ok: bool,
    min_one: bool,
}

/// Mutable stop-set shared with a [`read_to_dyn()`] parser.
///
/// The parser re-reads the set on every invocation, so a grammar built
/// once can scan to different separators on different runs.
pub struct StopState {
    stop: RefCell<CharSet>,
}

impl StopState {
    /// Create a stop state holding the characters of `chars`.
    pub fn new(chars: &str) -> Rc<StopState> {
        Rc::new(StopState {
            stop: RefCell::new(CharSet::new(chars)),
        })
    }

    /// Replace the stop set.
    pub fn set_stop(&self, chars: &str) {
        *self.stop.borrow_mut() = CharSet::new(chars);
    }
}

/// The type of parser returned by [`read_to_dyn()`].
#[derive(Clone)]
pub struct ReadToDyn {
    state: Rc<StopState>,
    eof_ok: bool,
}

/// The type of parser returned by [`peek()`].
#[derive(Clone, Copy)]
pub struct Peek {
    count: usize,
}

fn scan_to_stop(
    context: &mut ParseContext<'_>,
    start: usize,
    stop: &CharSet,
    eof_ok: bool,
    min_one: bool,
) -> Result<Match<String>, Reported> {
    let source = context.source();
    let end = stop.seek_until(source, start);
    if end == source.len() && !eof_ok {
        // Report just before the end of input, where a reader would look
        // for the missing terminator.
        let at = source
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let summary = stop.summary();
        return Err(context.fail(at, || {
            format!("expected one of {:?} before end of input", summary)
        }));
    }
    if min_one && end == start {
        let summary = stop.summary();
        return Err(context.fail(start, || {
            format!("expected at least one character before {:?}", summary)
        }));
    }
    Ok(Match::new(source[start..end].to_string(), end))
}

impl Parser for ReadTo {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        scan_to_stop(context, start, &self.stop, self.eof_ok, self.min_one)
    }
}

impl Parser for ReadToDyn {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        let stop = self.state.stop.borrow();
        scan_to_stop(context, start, &stop, self.eof_ok, false)
    }
}

impl Parser for Peek {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        let source = context.source();
        let mut end = start;
        let mut seen = 0;
        for c in source[start..].chars() {
            if seen == self.count {
                break;
            }
            end += c.len_utf8();
            seen += 1;
        }
        if seen < self.count {
            return Err(context.fail(start, || "unexpected end of input".to_string()));
        }
        Ok(Match::new(source[start..end].to_string(), start))
    }
}

/// Consume up to the first character in `stop` and produce the consumed
/// text, which may be empty. The stop character itself is not consumed.
///
/// With `eof_ok`, running out of input also counts as reaching a stop;
/// without it, a missing stop character is a failure.
///
/// ```
/// use sprig::prelude::*;
///
/// let key = seq((read_to("=", false), lit("="), read_to("", true)));
/// let (k, _, v) = key.parse("color=peach").unwrap();
/// assert_eq!((k.as_str(), v.as_str()), ("color", "peach"));
/// ```
pub fn read_to(stop: &str, eof_ok: bool) -> ReadTo {
    ReadTo {
        stop: CharSet::new(stop),
        eof_ok,
        min_one: false,
    }
}

/// Like [`read_to()`], but at least one character must be consumed.
pub fn read1_to(stop: &str, eof_ok: bool) -> ReadTo {
    ReadTo {
        stop: CharSet::new(stop),
        eof_ok,
        min_one: true,
    }
}

/// Case-insensitive [`read_to()`].
pub fn iread_to(stop: &str, eof_ok: bool) -> ReadTo {
    ReadTo {
        stop: CharSet::case_insensitive(stop),
        eof_ok,
        min_one: false,
    }
}

/// Case-insensitive [`read1_to()`].
pub fn iread1_to(stop: &str, eof_ok: bool) -> ReadTo {
    ReadTo {
        stop: CharSet::case_insensitive(stop),
        eof_ok,
        min_one: true,
    }
}

/// Like [`read_to()`], but the stop set lives in `state` and is re-read on
/// every invocation, so it can be changed between parses.
pub fn read_to_dyn(state: Rc<StopState>, eof_ok: bool) -> ReadToDyn {
    ReadToDyn { state, eof_ok }
}

/// Produce the next `count` characters without consuming anything.
pub fn peek(count: usize) -> Peek {
    Peek { count }
}
