//! Naming parsers for diagnostics and tree labels, plus `debug`.

use std::any::Any;
use std::rc::Rc;

use crate::{error::Result, Match, ParseContext, Parser, Reported};

/// The type of parser returned by [`name()`].
#[derive(Clone)]
pub struct NamedParser<P> {
    inner: P,
    name: String,
}

impl<P> Parser for NamedParser<P>
where
    P: Parser,
    P::Output: Clone + 'static,
{
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        let mark = context.tree_mark();
        context.tree_open(start);
        match self.inner.parse_at(context, start) {
            Ok(m) => {
                let value: Option<Rc<dyn Any>> = if context.tree_enabled() {
                    Some(Rc::new(m.value.clone()))
                } else {
                    None
                };
                context.tree_close(Some(self.name.clone()), value, m.end);
                Ok(m)
            }
            Err(Reported) => {
                context.tree_rollback(mark);
                // First name wins; an inner parser that already claimed the
                // failure knows the story better than we do.
                context.set_failure_name(&self.name);
                Err(Reported)
            }
        }
    }
}

/// The type of parser returned by [`debug()`].
#[derive(Clone)]
pub struct DebugParser<P> {
    inner: P,
    label: String,
}

impl<P: Parser> Parser for DebugParser<P> {
    type Output = P::Output;

    fn parse_at(
        &self,
        context: &mut ParseContext<'_>,
        start: usize,
    ) -> Result<Match<Self::Output>, Reported> {
        tracing::debug!(label = %self.label, start, "parse attempt");
        let result = self.inner.parse_at(context, start);
        match &result {
            Ok(m) => tracing::debug!(label = %self.label, end = m.end, "matched"),
            Err(Reported) => {
                let position = context.failure_copy().map(|c| c.position);
                tracing::debug!(label = %self.label, ?position, "no match");
            }
        }
        result
    }
}

/// Give `inner` a name.
///
/// The name labels failures that no inner parser has already claimed, and
/// in tree mode it labels the node recorded for this match, along with a
/// snapshot of the produced value.
pub fn name<P>(inner: P, name: &str) -> NamedParser<P>
where
    P: Parser,
    P::Output: Clone + 'static,
{
    NamedParser {
        inner,
        name: name.to_string(),
    }
}

/// Wrap `inner` so every attempt, match, and miss is logged through
/// [`tracing`] at debug level. A diagnostic aid while developing a
/// grammar; pointless in production.
pub fn debug<P: Parser>(inner: P, label: &str) -> DebugParser<P> {
    DebugParser {
        inner,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{alt, lit, map};
    use crate::testing::*;

    #[test]
    fn test_name_labels_failure() {
        let p = name(lit("0x"), "hex prefix");
        let err = p.parse("0b").unwrap_err();
        assert_eq!(err.parser_name.as_deref(), Some("hex prefix"));
    }

    #[test]
    fn test_first_name_wins() {
        let p = name(name(lit("a"), "inner"), "outer");
        let err = p.parse("b").unwrap_err();
        assert_eq!(err.parser_name.as_deref(), Some("inner"));
    }

    #[test]
    fn test_debug_passes_through() {
        let p = debug(alt((map(lit("a"), |_| 1), map(lit("b"), |_| 2))), "ab");
        assert_parse_eq(&p, "b", 2);
        assert_no_parse(&p, "c");
    }
}
