//! Failure causes and the user-facing `ParseError`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Why a particular parse failure happened.
///
/// Causes form a tree: `inner` is the chain of "this failed because…"
/// context one layer down, and `siblings` are peer failures, such as every
/// branch of an alternation that was tried and rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// Byte position at which the parser gave up.
    pub position: usize,
    /// Human-readable description. Empty when message capture is off.
    pub message: String,
    /// Name of the enclosing named parser, if one claimed this failure.
    pub name: Option<String>,
    /// The failure one level down that led to this one.
    pub inner: Option<Box<Cause>>,
    /// Peer failures at the same level.
    pub siblings: Vec<Cause>,
}

impl Cause {
    /// A cause with just a position and message.
    pub fn new(position: usize, message: String) -> Cause {
        Cause {
            position,
            message,
            name: None,
            inner: None,
            siblings: Vec::new(),
        }
    }

    /// Attach `siblings` to `outer`, then pick the cause to report: if some
    /// sibling failed farther into the input than `outer` itself, that
    /// sibling is usually the more informative story, so it becomes the
    /// reported cause and `outer` is kept as its enclosing context.
    pub fn preferring_latest(siblings: Vec<Cause>, mut outer: Cause) -> Cause {
        outer.siblings.extend(siblings);
        let best = outer
            .siblings
            .iter()
            .enumerate()
            .filter(|(_, s)| s.position > outer.position)
            .max_by_key(|(_, s)| s.position)
            .map(|(i, _)| i);
        match best {
            None => outer,
            Some(i) => {
                let mut reported = outer.siblings[i].clone();
                reported.innermost_mut().inner = Some(Box::new(outer));
                reported
            }
        }
    }

    /// The deepest cause in the tree whose position is farthest into the
    /// input. Walks both `inner` chains and `siblings`.
    pub fn latest(&self) -> &Cause {
        let mut best = self;
        let nested = self
            .inner
            .iter()
            .map(|b| b.as_ref())
            .chain(self.siblings.iter());
        for cause in nested {
            let candidate = cause.latest();
            if candidate.position > best.position {
                best = candidate;
            }
        }
        best
    }

    fn innermost_mut(&mut self) -> &mut Cause {
        match self.inner {
            Some(ref mut inner) => inner.innermost_mut(),
            None => self,
        }
    }
}

/// An error that occurred during parsing, located in the source text and
/// rendered with a context snippet.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message} at line {line} column {column}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Byte offset into the source where the failure was reported.
    pub position: usize,
    /// 1-based line number of `position`.
    pub line: usize,
    /// 0-based character offset of `position` from the start of its line.
    pub column: usize,
    /// The full text of the line containing the failure.
    pub source_line: String,
    /// The failing line and its surrounding context lines.
    pub context: Vec<String>,
    /// The context lines with an indicator line (`^--`) inserted under the
    /// failure column. Tabs before the column are preserved so the marker
    /// stays aligned in tab-indented source.
    pub marked: String,
    /// The full cause tree, when cause capture was on.
    pub cause: Option<Cause>,
    /// The failure observed farthest into the input, when it differs from
    /// the reported one.
    pub latest: Option<Cause>,
    /// Name of the named parser that claimed the failure, if any.
    pub parser_name: Option<String>,
}

impl ParseError {
    /// Render `cause` against `source`, with `context_lines` lines of
    /// surrounding context above and below the failing line.
    pub fn from_cause(cause: &Cause, source: &str, context_lines: usize) -> ParseError {
        let position = floor_char_boundary(source, cause.position.min(source.len()));
        let (line, column) = line_col(source, position);

        let lines: Vec<&str> = source.split('\n').collect();
        let idx = line - 1;
        let lo = idx.saturating_sub(context_lines);
        let hi = (idx + context_lines).min(lines.len() - 1);

        let line_start = source[..position].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let mut indicator = String::new();
        for c in source[line_start..position].chars() {
            indicator.push(if c == '\t' { '\t' } else { ' ' });
        }
        indicator.push_str("^--");

        let context: Vec<String> = lines[lo..=hi].iter().map(|s| s.to_string()).collect();
        let mut marked_lines: Vec<String> = Vec::with_capacity(context.len() + 1);
        for (i, text) in lines[lo..=hi].iter().enumerate() {
            marked_lines.push(text.to_string());
            if lo + i == idx {
                marked_lines.push(indicator.clone());
            }
        }

        ParseError {
            message: if cause.message.is_empty() {
                "parse error".to_string()
            } else {
                cause.message.clone()
            },
            position,
            line,
            column,
            source_line: lines[idx].to_string(),
            context,
            marked: marked_lines.join("\n"),
            cause: Some(cause.clone()),
            latest: None,
            parser_name: cause.name.clone(),
        }
    }
}

/// 1-based line and 0-based column (in characters) of a byte position.
pub fn line_col(source: &str, position: usize) -> (usize, usize) {
    let position = position.min(source.len());
    let before = &source[..position];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count();
    (line, column)
}

fn floor_char_boundary(source: &str, mut position: usize) -> usize {
    while position > 0 && !source.is_char_boundary(position) {
        position -= 1;
    }
    position
}
