//! Worked grammars built entirely on the public API: a forgiving JSON
//! dialect, CSV with configurable separators, and key paths.

pub mod csv;
pub mod json;
pub mod keypath;
