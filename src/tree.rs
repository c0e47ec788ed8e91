//! Parse-tree nodes recorded during a tree-mode parse.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// One node of the tree built when tree mode is on.
///
/// Named parsers contribute named nodes carrying a snapshot of their value;
/// sequences and brackets contribute unnamed structural nodes. Spans nest:
/// every child's span lies within its parent's.
pub struct ParseNode {
    /// Label attached by a named parser, if any.
    pub name: Option<String>,
    /// Snapshot of the produced value, for named nodes.
    pub value: Option<Rc<dyn Any>>,
    /// Byte position where the match began.
    pub start: usize,
    /// Byte position just past the match.
    pub end: usize,
    /// Nodes recorded by sub-parsers, in match order.
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub(crate) fn open(start: usize) -> ParseNode {
        ParseNode {
            name: None,
            value: None,
            start,
            end: start,
            children: Vec::new(),
        }
    }

    /// Downcast the value snapshot.
    pub fn value_as<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }

    /// The chain of nodes whose spans contain `position`, innermost first.
    /// With `named_only`, unnamed structural nodes are left out.
    pub fn path_to(&self, position: usize, named_only: bool) -> Vec<&ParseNode> {
        let mut path = Vec::new();
        self.collect_path(position, named_only, &mut path);
        path
    }

    fn collect_path<'n>(&'n self, position: usize, named_only: bool, out: &mut Vec<&'n ParseNode>) {
        if position < self.start || position >= self.end {
            return;
        }
        for child in &self.children {
            child.collect_path(position, named_only, out);
        }
        if !named_only || self.name.is_some() {
            out.push(self);
        }
    }
}

impl fmt::Debug for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ParseNode");
        if let Some(name) = &self.name {
            s.field("name", name);
        }
        s.field("start", &self.start)
            .field("end", &self.end)
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: Option<&str>, start: usize, end: usize, children: Vec<ParseNode>) -> ParseNode {
        ParseNode {
            name: name.map(|s| s.to_string()),
            value: None,
            start,
            end,
            children,
        }
    }

    #[test]
    fn test_path_to() {
        let root = node(
            None,
            0,
            10,
            vec![
                node(Some("a"), 0, 4, vec![node(None, 1, 3, vec![])]),
                node(Some("b"), 4, 10, vec![]),
            ],
        );

        let path = root.path_to(2, false);
        let spans: Vec<(usize, usize)> = path.iter().map(|n| (n.start, n.end)).collect();
        assert_eq!(spans, vec![(1, 3), (0, 4), (0, 10)]);

        let path = root.path_to(2, true);
        let names: Vec<&str> = path.iter().map(|n| n.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["a"]);

        assert!(root.path_to(10, false).is_empty());
    }

    #[test]
    fn test_value_as() {
        let mut n = node(Some("n"), 0, 2, vec![]);
        n.value = Some(Rc::new(69i64));
        assert_eq!(n.value_as::<i64>(), Some(&69));
        assert_eq!(n.value_as::<u8>(), None);
    }
}
