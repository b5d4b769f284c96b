//! # XREFGRAPH
//!
//! Static cross-reference graphs for Python codebases.
//!
//! XREFGRAPH walks a source tree, extracts imports, functions and classes from
//! every file, and assembles a graph of who imports, calls and uses what. The
//! graph is meant to be consulted before a rename or move, to find every file
//! that would be left with a stale reference.
//!
//! ## Pipeline
//!
//! - **Scan**: collect `.py` files, pruning VCS, virtualenv and cache dirs
//! - **Analyze**: one tree-sitter pass per file, in parallel
//! - **Resolve**: map module identifiers (and package prefixes) to files
//! - **Assemble**: import edges, function and class registries with
//!   collision-safe keys, heuristic call resolution, file-level class usage
//!
//! Call resolution is name based. It does not follow scopes, types or
//! dynamic dispatch, and a name defined in several files is attributed to
//! the first registered definition only.

pub mod core;
pub mod formatters;
pub mod parsers;
