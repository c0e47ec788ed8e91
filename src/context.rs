//! Per-parse state: failure tracking, detail bits, and tree hooks.

use std::any::Any;
use std::rc::Rc;

use crate::error::{Cause, ParseError};
use crate::tree::ParseNode;

/// Error type for when a failure has been recorded in the `ParseContext`.
///
/// It's OK to discard this kind of error and return success; the recorded
/// failure then simply stays behind as diagnostic material. See
/// `ParseContext` for why failures are tracked out-of-band.
pub struct Reported;

/// The two independently toggled diagnostic levels.
///
/// *Messages* controls whether human-readable failure strings are built at
/// all; *causes* additionally maintains the full cause-chain tree. Each has
/// its own cost, and with both off the failure path allocates nothing but
/// a position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Detail {
    /// Build failure message strings.
    pub messages: bool,
    /// Maintain the cause-chain tree (implies extra cloning on failure).
    pub causes: bool,
}

/// Contains the source text being parsed and tracks failures.
///
/// Failures are tracked in the context, not in `Result`s, because a parser
/// often produces both a successful match *and* the failure that later
/// proves to be the best description of why the overall parse stopped. An
/// alternation that rejects a branch three tokens in has better positional
/// information than the enclosing combinator that reports "expected value"
/// at the branch's start; by keeping the farthest failure out-of-band, the
/// final error can point at it even after every intermediate combinator
/// has recovered and moved on.
///
/// A context lives for exactly one parse, so the library has no shared
/// mutable state and is re-entrant.
pub struct ParseContext<'parse> {
    source: &'parse str,
    detail: Detail,
    failure: Option<Cause>,
    latest: Option<Cause>,
    tree: Option<TreeBuilder>,
}

struct TreeBuilder {
    stack: Vec<ParseNode>,
}

/// Snapshot of the tree-builder state, used to discard nodes recorded by a
/// branch that later failed.
#[derive(Clone, Copy)]
pub struct TreeMark {
    depth: usize,
    children: usize,
}

impl<'parse> ParseContext<'parse> {
    /// Create a context with both detail bits on, the right default for
    /// direct `Parser::parse` calls.
    pub fn new(source: &'parse str) -> Self {
        ParseContext::with_detail(
            source,
            Detail {
                messages: true,
                causes: true,
            },
        )
    }

    /// Create a context with explicit detail bits.
    pub fn with_detail(source: &'parse str, detail: Detail) -> Self {
        ParseContext {
            source,
            detail,
            failure: None,
            latest: None,
            tree: None,
        }
    }

    /// The text being parsed.
    pub fn source(&self) -> &'parse str {
        self.source
    }

    /// True if failure messages are being built.
    pub fn messages(&self) -> bool {
        self.detail.messages
    }

    /// True if the cause-chain tree is being maintained.
    pub fn causes(&self) -> bool {
        self.detail.causes
    }

    /// Record a failure at `position`. The message closure runs only when
    /// the *messages* bit is set; with it off, the failure is just a
    /// position.
    pub fn fail(&mut self, position: usize, message: impl FnOnce() -> String) -> Reported {
        let message = if self.detail.messages {
            message()
        } else {
            String::new()
        };
        self.fail_cause(Cause::new(position, message))
    }

    /// Record a fully built cause as the current failure.
    pub fn fail_cause(&mut self, cause: Cause) -> Reported {
        if self.detail.messages
            && self
                .latest
                .as_ref()
                .map_or(true, |l| cause.position >= l.position)
        {
            self.latest = Some(cause.clone());
        }
        self.failure = Some(cause);
        Reported
    }

    /// Propagate the current failure, adding one causal layer on top of it
    /// when the *causes* bit is set. With causes off the record is left
    /// untouched, so the deepest description survives unchanged.
    pub fn fail_wrap(&mut self, position: usize, message: impl FnOnce() -> String) -> Reported {
        if !self.detail.causes {
            return Reported;
        }
        let text = if self.detail.messages {
            message()
        } else {
            String::new()
        };
        let outer = Cause::new(position, text);
        let cause = match self.failure.take() {
            Some(prev) => Cause::preferring_latest(vec![prev], outer),
            None => outer,
        };
        self.fail_cause(cause)
    }

    /// Snapshot the current failure record. The record is overwritten on
    /// every failure, so a caller that wants to keep one must copy it.
    pub fn failure_copy(&self) -> Option<Cause> {
        self.failure.clone()
    }

    /// Label the current failure record, if it doesn't carry a name yet.
    pub fn set_failure_name(&mut self, name: &str) {
        if let Some(f) = &mut self.failure {
            if f.name.is_none() {
                f.name = Some(name.to_string());
            }
        }
    }

    /// Label the current failure record if it sits exactly at `position`
    /// and is unnamed. Used by alternations to claim failures that never
    /// got past their own starting point.
    pub fn name_failure_at(&mut self, position: usize, name: &str) {
        if let Some(f) = &mut self.failure {
            if f.position == position && f.name.is_none() {
                f.name = Some(name.to_string());
            }
        }
    }

    /// Forget the farthest failure observed so far.
    pub fn reset_latest(&mut self) {
        self.latest = None;
    }

    /// Turn the recorded failure into a rendered `ParseError`.
    pub fn into_parse_error(self, context_lines: usize) -> ParseError {
        let mut record = self
            .failure
            .unwrap_or_else(|| Cause::new(0, "parse error".to_string()));
        let siblings = std::mem::take(&mut record.siblings);
        let reported = Cause::preferring_latest(siblings, record);
        let mut error = ParseError::from_cause(&reported, self.source, context_lines);
        error.latest = match self.latest {
            Some(l) if l.position > reported.position => Some(l),
            _ => {
                let deep = reported.latest();
                if deep.position > reported.position {
                    Some(deep.clone())
                } else {
                    None
                }
            }
        };
        error
    }

    // --- Tree hooks. All of these are no-ops unless tree mode is on.

    /// Start recording a parse tree, rooted at position 0.
    pub(crate) fn enable_tree(&mut self) {
        self.tree = Some(TreeBuilder {
            stack: vec![ParseNode::open(0)],
        });
    }

    /// Close the root node and hand the finished tree back.
    pub(crate) fn finish_tree(&mut self, end: usize) -> Option<ParseNode> {
        let builder = self.tree.take()?;
        let mut stack = builder.stack;
        debug_assert_eq!(stack.len(), 1, "unbalanced tree nodes");
        let mut root = stack.pop()?;
        root.end = end;
        Some(root)
    }

    pub(crate) fn tree_enabled(&self) -> bool {
        self.tree.is_some()
    }

    /// Remember the tree state so a failing branch can be unwound.
    pub(crate) fn tree_mark(&self) -> Option<TreeMark> {
        let builder = self.tree.as_ref()?;
        Some(TreeMark {
            depth: builder.stack.len(),
            children: builder.stack.last().map_or(0, |n| n.children.len()),
        })
    }

    /// Discard every node opened or attached since `mark` was taken.
    pub(crate) fn tree_rollback(&mut self, mark: Option<TreeMark>) {
        let (Some(builder), Some(mark)) = (self.tree.as_mut(), mark) else {
            return;
        };
        builder.stack.truncate(mark.depth);
        if let Some(top) = builder.stack.last_mut() {
            top.children.truncate(mark.children);
        }
    }

    /// Open a node; its children are whatever sub-parsers record until the
    /// matching `tree_close`.
    pub(crate) fn tree_open(&mut self, start: usize) {
        if let Some(builder) = self.tree.as_mut() {
            builder.stack.push(ParseNode::open(start));
        }
    }

    /// Close the innermost open node and attach it to its parent.
    pub(crate) fn tree_close(
        &mut self,
        name: Option<String>,
        value: Option<Rc<dyn Any>>,
        end: usize,
    ) {
        let Some(builder) = self.tree.as_mut() else {
            return;
        };
        let Some(mut node) = builder.stack.pop() else {
            return;
        };
        node.name = name;
        node.value = value;
        node.end = end;
        if let Some(parent) = builder.stack.last_mut() {
            parent.children.push(node);
        }
    }
}
