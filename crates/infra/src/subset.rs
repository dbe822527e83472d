// crates/infra/src/subset.rs
//! Subset strings: the host's textual feature filter.
//!
//! The accepted grammar is the QGIS-like subset dialect: double-quoted or bare
//! field names, numeric and single-quoted string literals, `= != <> < <= > >=`,
//! `AND OR NOT` (any case), `TRUE FALSE` and parentheses. An expression is parsed
//! into a small tree, rewritten into `evalexpr` syntax with every field bound to a
//! generated variable, and evaluated once per feature.

mod compiled;
mod lexer;
mod parser;

pub use compiled::{CompiledSubset, Verdict};
