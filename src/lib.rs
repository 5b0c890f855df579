//! coauthor-pr library
//!
//! One-shot GitHub automation: create a branch off a base branch, commit a
//! small file attributed to a co-author via a `Co-authored-by:` trailer,
//! open a pull request, attempt an immediate merge, and optionally delete
//! the source branch. Fails loudly at the first API error.

pub mod config;
pub mod error;
pub mod forge;
pub mod types;
pub mod workflow;
