//! Small composable string parsers with rich positional error diagnostics.
//!
//! A parser here is a plain value: give it an input string and it either
//! produces a typed Rust value or an error that points at a line and
//! column, with a context snippet and a marker under the offending spot.
//! Big parsers are built by feeding small parsers to combinators, and any
//! parser can be an input to any combinator.
//!
//! # A taste
//!
//! ```
//! use sprig::prelude::*;
//!
//! // 4x23x21, one box per line
//! let dims = map(
//!     seq((read1("0123456789"), lit("x"), read1("0123456789"), lit("x"), read1("0123456789"))),
//!     |(w, _, h, _, d)| (w, h, d),
//! );
//! let p = driver(
//!     repsep(dims, lit("\n"), Trail::Allow),
//!     Options::new().trim(true),
//! );
//!
//! let boxes = p.parse("4x23x21\n22x29x19\n").unwrap();
//! assert_eq!(boxes.len(), 2);
//! assert_eq!(boxes[0].0, "4");
//! ```
//!
//! # The pieces
//!
//! **Primitives** match runs of characters: [`skip`]/[`read`] and their
//! at-least-one variants consume characters from a set, [`take`] grabs an
//! exact count, [`read_to`] scans ahead for a stop character, [`lit`]
//! matches literal text, [`peek`] looks without consuming. Each has a
//! case-insensitive sibling (`iskip`, `iread`, `ilit`, …). Character sets
//! are normalized once, at construction.
//!
//! **Combinators** build structure: [`seq`] and [`check`] for
//! concatenation, [`alt`] for ordered choice, [`rep`]/[`repsep`] for
//! repetition (with a [`Trail`] policy for trailing separators),
//! [`opt`]/[`not`]/[`and_not`] for optionality and negation, [`bracket`]
//! for delimited content, [`map`]/[`try_map`]/[`verify`]/[`chain`] for
//! transforming and vetting values, [`outer`] for grabbing the matched
//! text, and [`lazy`] for recursive grammars:
//!
//! ```
//! use sprig::prelude::*;
//!
//! // list ::= "[" list* "]"
//! let list = lazy::<usize>();
//! list.define(map(
//!     bracket(lit("["), rep(list.clone()), lit("]")),
//!     |items| items.len(),
//! ));
//! assert_eq!(list.parse("[[][[]]]").unwrap(), 2);
//! ```
//!
//! # Errors that point somewhere useful
//!
//! When a grammar with alternatives fails, the most useful description is
//! rarely the outermost "expected expression" but the branch that got
//! farthest before giving up. Failures are tracked out-of-band in a
//! per-parse [`ParseContext`], which keeps both the current failure and
//! the farthest one observed; the rendered [`ParseError`] reports the
//! deep story and keeps the rest as a [`Cause`] chain.
//!
//! Diagnostics have two independently priced levels: *detailed* turns on
//! message strings, *causes* additionally keeps the full cause tree. Both
//! off is the fast path: failures then carry nothing but a position.
//!
//! # Drivers
//!
//! [`driver`] bundles a root parser with [`Options`] (trimming,
//! consume-all, detail levels, context lines) into the thing you hand to
//! the rest of your program. Tree mode records a [`ParseNode`] hierarchy
//! of named matches alongside the value, for tooling that wants to know
//! *where* things were found:
//!
//! ```
//! use sprig::prelude::*;
//!
//! let word = name(read1("abcdefghijklmnopqrstuvwxyz"), "word");
//! let p = driver(repsep(word, lit(" "), Trail::Disallow), Options::new());
//! let (words, tree) = p.parse_tree("hello world").unwrap();
//! assert_eq!(words.len(), 2);
//! let node = tree.path_to(7, true)[0];
//! assert_eq!(node.value_as::<String>().unwrap(), "world");
//! ```
//!
//! # Bundled grammars
//!
//! The [`grammars`] module ships three worked examples built entirely on
//! the public API: a forgiving JSON dialect, CSV with configurable
//! separators, and dotted/bracketed key paths.

#![deny(missing_docs)]

mod charset;
mod context;
mod driver;
mod error;
pub mod grammars;
mod parsers;
#[cfg(test)]
mod testing;
mod traits;
mod tree;

pub use charset::CharSet;
pub use context::{Detail, ParseContext, Reported};
pub use driver::{driver, Driver, Options};
pub use error::{line_col, Cause, ParseError, Result};
pub use traits::{shared, Match, Parser, SharedParser};
pub use tree::ParseNode;

pub use parsers::*;

/// Everything needed to write a grammar, importable in one line.
pub mod prelude {
    pub use crate::driver::{driver, Driver, Options};
    pub use crate::traits::{shared, Match, Parser, SharedParser};

    pub use crate::parsers::{
        alt, alt_named, and_not, bracket, bracket_any, chain, check, debug, empty, ilit, ilits,
        iread, iread1, iread1_to, iread_to, iskip, iskip1, itake_in, itake_not_in, lazy, lit, lits,
        map, name, not, opt, outer, peek, read, read1, read1_to, read1_to_parser, read_to,
        read_to_dyn, read_to_parser, rep, rep1, rep1sep, repsep, seq, skip, skip1, take, take_in,
        take_not_in, try_map, verify, StopState, Trail,
    };
}
