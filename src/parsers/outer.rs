//! Parsers that produce or scan by the *span* of a match rather than its
//! value: `outer`, `read_to_parser`, `read1_to_parser`.

use crate::{charset::CharSet, error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`outer()`].
#[derive(Clone)]
pub struct OuterParser<P> {
    inner: P,
}

impl<P: Parser> Parser for OuterParser<P> {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        let m = self.inner.parse_at(context, start)?;
        let text = context.source()[start..m.end].to_string();
        Ok(Match::new(text, m.end))
    }
}

/// The type of parser returned by [`read_to_parser()`] and
/// [`read1_to_parser()`].
#[derive(Clone)]
pub struct ReadToParser<Q> {
    sigils: CharSet,
    terminator: Q,
    min_one: bool,
}

impl<Q: Parser> Parser for ReadToParser<Q> {
    type Output = String;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<String>, Reported> {
        let source = context.source();
        let mut pos = start;
        loop {
            pos = self.sigils.seek_until(source, pos);
            if pos >= source.len() {
                let at = source
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let summary = self.sigils.summary();
                return Err(context.fail(at, || {
                    format!("expected one of {:?} before end of input", summary)
                }));
            }
            let mark = context.tree_mark();
            match self.terminator.parse_at(context, pos) {
                Ok(_) => {
                    // Pure lookahead: the terminator is left for whatever
                    // parser comes next, and its probe nodes are dropped.
                    context.tree_rollback(mark);
                    if self.min_one && pos == start {
                        return Err(context.fail(start, || {
                            "expected at least one character".to_string()
                        }));
                    }
                    return Ok(Match::new(source[start..pos].to_string(), pos));
                }
                Err(Reported) => {
                    // Not a real terminator; step past this sigil and keep
                    // scanning.
                    match source[pos..].chars().next() {
                        Some(c) => pos += c.len_utf8(),
                        None => pos = source.len(),
                    }
                }
            }
        }
    }
}

/// Match like `inner`, but produce the matched text itself instead of the
/// value `inner` built from it.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = outer(seq((read1("0123456789"), lit("x"), read1("0123456789"))));
/// assert_eq!(p.parse("4x23").unwrap(), "4x23");
/// ```
pub fn outer<P: Parser>(inner: P) -> OuterParser<P> {
    OuterParser { inner }
}

/// Consume forward to the first place where `terminator` matches, and
/// produce the consumed text. The terminator itself is not consumed.
///
/// Only positions holding one of the `sigils` characters are tried, so the
/// terminator parser runs rarely rather than at every offset.
pub fn read_to_parser<Q: Parser>(sigils: &str, terminator: Q) -> ReadToParser<Q> {
    ReadToParser {
        sigils: CharSet::new(sigils),
        terminator,
        min_one: false,
    }
}

/// Like [`read_to_parser()`], but at least one character must be consumed
/// before the terminator.
pub fn read1_to_parser<Q: Parser>(sigils: &str, terminator: Q) -> ReadToParser<Q> {
    ReadToParser {
        sigils: CharSet::new(sigils),
        terminator,
        min_one: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{check, lit, read1, seq};
    use crate::testing::*;

    #[test]
    fn test_outer() {
        let p = outer(check((lit("a"), lit("b"))));
        assert_parse_eq(&p, "ab", "ab".to_string());
    }

    #[test]
    fn test_read_to_parser() {
        // Scan to a "--" comment marker; a lone "-" is not a terminator.
        let marker = seq((lit("--"), read1("abc")));
        let p = seq((read_to_parser("-", &marker), &marker));
        let (head, _) = p.parse("x-y--abc").unwrap();
        assert_eq!(head, "x-y");

        assert_no_parse(read_to_parser("-", lit("--")), "xyz");
        assert_no_parse(read_to_parser("-", lit("--")), "x-y-z");
    }

    #[test]
    fn test_read1_to_parser() {
        let p = seq((read1_to_parser(";", lit(";")), lit(";")));
        assert_parse_eq(&p, "ab;", ("ab".to_string(), ";".to_string()));
        assert_no_parse(&p, ";");
    }
}
