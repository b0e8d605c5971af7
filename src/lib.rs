//! # pairsort - order values by their keys
//!
//! Reads a flat `"k1 v1 k2 v2 ..."` token list, stable-sorts the pairs by key
//! and returns the values in that order.
//!
//! ## Quick Start
//!
//! ```rust
//! use pairsort::second_ordered_by_first;
//!
//! assert_eq!(second_ordered_by_first("a3 n3 a2 n2 a1 n1").unwrap(), "n1 n2 n3");
//! assert!(second_ordered_by_first("a1").is_err());
//! ```
//!
//! ## Module Organization
//!
//! - [`sorter`] - Tokenizing, pairing and sorting
//! - [`error`] - Malformed input errors
//! - [`batch`] - Parallel line-by-line processing
//! - [`config`] - Configuration parsing (`pairsort.toml`)
//! - [`ui`] - Terminal table output

/// Parallel processing of whole files.
pub mod batch;

/// Configuration file parsing (`pairsort.toml`).
pub mod config;

/// Malformed input errors.
pub mod error;

/// Pair parsing and sorting.
pub mod sorter;

/// Terminal UI utilities (tables).
pub mod ui;

pub use error::{Malformed, SortError};
pub use sorter::{Pair, second_ordered_by_first};
