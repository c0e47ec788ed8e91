//! The driver: a parser plus options, packaged as a reusable entry point.

use lazy_static::lazy_static;

use crate::charset::CharSet;
use crate::context::{Detail, ParseContext, Reported};
use crate::error::{ParseError, Result};
use crate::traits::Parser;
use crate::tree::ParseNode;

lazy_static! {
    /// The whitespace stripped by the `trim` option.
    static ref WHITESPACE: CharSet = CharSet::new(" \t\r\n");
}

/// Options recognized by a [`Driver`].
///
/// Build one with the chainable setters:
///
/// ```
/// use sprig::prelude::*;
///
/// let options = Options::new().trim(true).detailed(true).context_lines(2);
/// # let _ = options;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    trim: bool,
    consume_all: bool,
    detailed: bool,
    causes: bool,
    context_lines: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            trim: false,
            consume_all: true,
            detailed: false,
            causes: false,
            context_lines: 1,
        }
    }
}

impl Options {
    /// The default options: consume the whole input, no trimming, cheap
    /// errors, one line of context.
    pub fn new() -> Options {
        Options::default()
    }

    /// Strip leading and trailing whitespace around the root parse.
    pub fn trim(mut self, on: bool) -> Options {
        self.trim = on;
        self
    }

    /// Fail if the parse does not consume the entire input. On by default.
    pub fn consume_all(mut self, on: bool) -> Options {
        self.consume_all = on;
        self
    }

    /// Build human-readable failure messages. Costs string formatting on
    /// every failure, including failures later recovered from.
    pub fn detailed(mut self, on: bool) -> Options {
        self.detailed = on;
        self
    }

    /// Keep the full cause-chain tree. More expensive than `detailed`;
    /// implies nothing about it, the two are independent.
    pub fn causes(mut self, on: bool) -> Options {
        self.causes = on;
        self
    }

    /// How many lines above and below the failing line to include in the
    /// rendered error.
    pub fn context_lines(mut self, n: usize) -> Options {
        self.context_lines = n;
        self
    }
}

/// A root parser bundled with default options.
///
/// The driver owns the ceremony around a parse: trimming, the
/// consume-all check, detail flags, error rendering, and tree building.
///
/// ```
/// use sprig::prelude::*;
///
/// let p = driver(
///     repsep(read1("0123456789"), lit(","), Trail::Disallow),
///     Options::new().trim(true).detailed(true),
/// );
/// assert_eq!(p.parse(" 1,2,3 ").unwrap(), vec!["1", "2", "3"]);
/// assert!(p.parse("1,2,").is_err());
/// ```
pub struct Driver<P> {
    root: P,
    defaults: Options,
}

/// Bundle `root` with `defaults` into a [`Driver`].
pub fn driver<P: Parser>(root: P, defaults: Options) -> Driver<P> {
    Driver { root, defaults }
}

impl<P: Parser> Driver<P> {
    /// Parse `source` with the default options.
    pub fn parse(&self, source: &str) -> Result<P::Output, ParseError> {
        self.run(source, &self.defaults, false).map(|(v, _)| v)
    }

    /// Parse `source` with one-off options.
    pub fn parse_with(&self, source: &str, options: &Options) -> Result<P::Output, ParseError> {
        self.run(source, options, false).map(|(v, _)| v)
    }

    /// Parse `source`, reporting only success or failure. Diagnostics are
    /// switched off entirely, so this is the cheapest way to ask "does it
    /// match?".
    pub fn parse_opt(&self, source: &str) -> Option<P::Output> {
        let options = self.defaults.clone().detailed(false).causes(false);
        self.run(source, &options, false).ok().map(|(v, _)| v)
    }

    /// Parse `source` and also record the parse tree.
    pub fn parse_tree(&self, source: &str) -> Result<(P::Output, ParseNode), ParseError> {
        let (value, node) = self.run(source, &self.defaults, true)?;
        let node = node.unwrap_or_else(|| ParseNode::open(0));
        Ok((value, node))
    }

    fn run(
        &self,
        source: &str,
        options: &Options,
        tree: bool,
    ) -> Result<(P::Output, Option<ParseNode>), ParseError> {
        let detail = Detail {
            messages: options.detailed,
            causes: options.causes,
        };
        let mut context = ParseContext::with_detail(source, detail);
        if tree {
            context.enable_tree();
        }

        let start = if options.trim {
            WHITESPACE.seek_while(source, 0)
        } else {
            0
        };

        match self.root.parse_at(&mut context, start) {
            Ok(m) => {
                let mut end = m.end;
                if options.trim {
                    end = WHITESPACE.seek_while(source, end);
                }
                if options.consume_all && end < source.len() {
                    let consumed = source[..end].chars().count();
                    let Reported = context.fail(end, || {
                        format!(
                            "expected to consume all input, but only {} chars consumed",
                            consumed
                        )
                    });
                    tracing::trace!(end, "incomplete parse");
                    return Err(context.into_parse_error(options.context_lines));
                }
                let node = context.finish_tree(end);
                Ok((m.value, node))
            }
            Err(Reported) => {
                tracing::trace!("parse failed");
                Err(context.into_parse_error(options.context_lines))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{lit, name, read1, rep, seq, skip};

    #[test]
    fn test_consume_all() {
        let p = driver(read1("abc"), Options::new().detailed(true));
        assert_eq!(p.parse("abc").unwrap(), "abc");

        let err = p.parse("abcd").unwrap_err();
        assert_eq!(err.position, 3);
        assert_eq!(
            err.message,
            "expected to consume all input, but only 3 chars consumed"
        );

        let p = driver(read1("abc"), Options::new().consume_all(false));
        assert_eq!(p.parse("abcd").unwrap(), "abc");
    }

    #[test]
    fn test_trim() {
        let p = driver(read1("abc"), Options::new().trim(true));
        assert_eq!(p.parse("  abc \n").unwrap(), "abc");
        assert!(p.parse("  ab c").is_err());

        // trim is equivalent to wrapping the root in whitespace skips
        let wrapped = driver(
            seq((skip(" \t\r\n"), read1("abc"), skip(" \t\r\n"))),
            Options::new(),
        );
        assert_eq!(wrapped.parse("  abc \n").unwrap().1, "abc");
    }

    #[test]
    fn test_parse_opt() {
        let p = driver(read1("abc"), Options::new());
        assert_eq!(p.parse_opt("abc"), Some("abc".to_string()));
        assert_eq!(p.parse_opt("xyz"), None);
    }

    #[test]
    fn test_fast_path_has_no_message() {
        let p = driver(read1("abc"), Options::new());
        let err = p.parse("xyz").unwrap_err();
        assert_eq!(err.message, "parse error");
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_detail_is_per_call() {
        let p = driver(lit("a"), Options::new());
        let plain = p.parse("b").unwrap_err();
        assert_eq!(plain.message, "parse error");
        let detailed = p
            .parse_with("b", &Options::new().detailed(true))
            .unwrap_err();
        assert_eq!(detailed.message, "expected \"a\"");
    }

    #[test]
    fn test_context_lines() {
        let p = driver(rep(seq((lit("ok\n"),))), Options::new().detailed(true));
        let err = p
            .parse_with("ok\nok\nnope\nok\n", &Options::new().detailed(true).context_lines(1))
            .unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.marked, "ok\nnope\n^--\nok");
    }

    #[test]
    fn test_repeated_calls_are_equal() {
        let p = driver(read1("abc"), Options::new().detailed(true));
        assert_eq!(p.parse("abc"), p.parse("abc"));
        assert_eq!(p.parse("x"), p.parse("x"));
    }

    #[test]
    fn test_parse_tree() {
        let p = driver(
            seq((name(lit("a"), "first"), name(lit("b"), "second"))),
            Options::new(),
        );
        let (value, root) = p.parse_tree("ab").unwrap();
        assert_eq!(value.0, "a");
        assert_eq!(root.start, 0);
        assert_eq!(root.end, 2);
        // The seq contributes one structural node holding both named ones.
        assert_eq!(root.children.len(), 1);
        let seq_node = &root.children[0];
        assert!(seq_node.name.is_none());
        let names: Vec<_> = seq_node
            .children
            .iter()
            .map(|n| n.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(
            seq_node.children[0].value_as::<String>(),
            Some(&"a".to_string())
        );
    }
}
