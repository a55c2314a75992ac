//! `mudargs`: MUX-style argument tokenizer for player command lines.
//!
//! A command body like `/loud /slow Bob, Eve = hello there` decomposes into
//! switches (`loud`, `slow`), a left-hand side (`Bob, Eve`), a right-hand
//! side (`hello there`) and comma lists of each. The tokenizer is total:
//! any input string produces a `ParsedArgs`, case and interior whitespace
//! are never altered.

pub mod mux;

pub use mux::{parse, ParsedArgs};
