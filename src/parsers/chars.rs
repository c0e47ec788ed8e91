//! Character-class primitives: the `skip`, `read`, and `take` families.

use crate::{charset::CharSet, error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`skip()`] and [`skip1()`].
#[derive(Clone)]
pub struct SkipChars {
    set: CharSet,
    min_one: bool,
}

/// The type of parser returned by [`read()`] and [`read1()`].
#[derive(Clone)]
pub struct ReadChars {
    set: CharSet,
    min_one: bool,
}

/// The type of parser returned by [`take()`], [`take_in()`], and
/// [`take_not_in()`].
#[derive(Clone)]
pub struct TakeChars {
    count: usize,
    set: Option<CharSet>,
    negated: bool,
}

impl Parser for SkipChars {
    type Output = ();

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<()>, Reported> {
        let end = self.set.seek_while(context.source(), start);
        if self.min_one && end == start {
            let summary = self.set.summary();
            return Err(context.fail(start, || format!("expected one of {:?}", summary)));
        }
        Ok(Match::new((), end))
    }
}

impl Parser for ReadChars {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        let source = context.source();
        let end = self.set.seek_while(source, start);
        if self.min_one && end == start {
            let summary = self.set.summary();
            return Err(context.fail(start, || format!("expected at least one of {:?}", summary)));
        }
        Ok(Match::new(source[start..end].to_string(), end))
    }
}

impl Parser for TakeChars {
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
            if let Some(set) = &self.set {
                if set.contains(c) == self.negated {
                    return Err(context.fail(end, || "unexpected char".to_string()));
                }
            }
            end += c.len_utf8();
            seen += 1;
        }
        if seen < self.count {
            return Err(context.fail(start, || "unexpected end of input".to_string()));
        }
        Ok(Match::new(source[start..end].to_string(), end))
    }
}

/// Match zero or more characters from `chars`, producing nothing.
///
/// Never fails; matching no characters at all is fine.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = seq((skip(" \t"), lit("x")));
/// assert!(p.parse("   x").is_ok());
/// assert!(p.parse("x").is_ok());
/// ```
pub fn skip(chars: &str) -> SkipChars {
    SkipChars {
        set: CharSet::new(chars),
        min_one: false,
    }
}

/// Like [`skip()`], but at least one character must match.
pub fn skip1(chars: &str) -> SkipChars {
    SkipChars {
        set: CharSet::new(chars),
        min_one: true,
    }
}

/// Case-insensitive [`skip()`].
pub fn iskip(chars: &str) -> SkipChars {
    SkipChars {
        set: CharSet::case_insensitive(chars),
        min_one: false,
    }
}

/// Case-insensitive [`skip1()`].
pub fn iskip1(chars: &str) -> SkipChars {
    SkipChars {
        set: CharSet::case_insensitive(chars),
        min_one: true,
    }
}

/// Match zero or more characters from `chars` and produce the matched text.
pub fn read(chars: &str) -> ReadChars {
    ReadChars {
        set: CharSet::new(chars),
        min_one: false,
    }
}

/// Like [`read()`], but at least one character must match.
///
/// ```
/// use sprig::prelude::*;
///
/// assert_eq!(read1("0123456789").parse("2024").unwrap(), "2024");
/// assert!(read1("0123456789").parse("").is_err());
/// ```
pub fn read1(chars: &str) -> ReadChars {
    ReadChars {
        set: CharSet::new(chars),
        min_one: true,
    }
}

/// Case-insensitive [`read()`].
pub fn iread(chars: &str) -> ReadChars {
    ReadChars {
        set: CharSet::case_insensitive(chars),
        min_one: false,
    }
}

/// Case-insensitive [`read1()`].
pub fn iread1(chars: &str) -> ReadChars {
    ReadChars {
        set: CharSet::case_insensitive(chars),
        min_one: true,
    }
}

/// Match exactly `count` characters, whatever they are.
pub fn take(count: usize) -> TakeChars {
    TakeChars {
        count,
        set: None,
        negated: false,
    }
}

/// Match exactly `count` characters, each of which must be in `chars`.
pub fn take_in(count: usize, chars: &str) -> TakeChars {
    TakeChars {
        count,
        set: Some(CharSet::new(chars)),
        negated: false,
    }
}

/// Match exactly `count` characters, none of which may be in `chars`.
pub fn take_not_in(count: usize, chars: &str) -> TakeChars {
    TakeChars {
        count,
        set: Some(CharSet::new(chars)),
        negated: true,
    }
}

/// Case-insensitive [`take_in()`].
pub fn itake_in(count: usize, chars: &str) -> TakeChars {
    TakeChars {
        count,
        set: Some(CharSet::case_insensitive(chars)),
        negated: false,
    }
}

/// Case-insensitive [`take_not_in()`].
pub fn itake_not_in(count: usize, chars: &str) -> TakeChars {
    TakeChars {
        count,
        set: Some(CharSet::case_insensitive(chars)),
        negated: true,
    }
}
