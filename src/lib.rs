//! # Succinct rank/select bit vectors
//!
//! Ranksel provides [rank and select queries](https://en.wikipedia.org/wiki/Succinct_data_structure)
//! over immutable bit sequences: `rank1(i)` counts the set bits before
//! position `i`, and `select1(k)` / `select0(k)` locate the `k`-th
//! (0-indexed) set or unset bit. These primitives underlie compressed
//! indexes, columnar bitmaps, and compact membership structures.
//!
//! ## Design policy
//!
//! - **Maintain interface consistency:**
//!   Both engines implement one query capability
//!   ([`NumBits`](bit_vectors::NumBits), [`Access`](bit_vectors::Access),
//!   [`Rank`](bit_vectors::Rank), [`Select`](bit_vectors::Select)),
//!   so a caller selects a representation purely as a space/time tradeoff.
//!
//! - **Fail with values, not faults:**
//!   Invalid construction inputs and out-of-domain queries are reported
//!   through [`Error`], never through panics, so callers can branch locally.
//!
//! - **Stay immutable:**
//!   Construction runs to completion before a vector is exposed; afterwards
//!   every query is a pure read, safe for unrestricted concurrent access.
//!
//! ## Data structures
//!
//! - [`DenseBitVector`]: stores every bit verbatim with a cumulative block
//!   index for constant-time rank.
//! - [`SparseBitVector`]: stores only set-bit positions through a two-level
//!   bucket index, for vectors where ones are infrequent.
//!
//! The shared contract is described in the [`bit_vectors`] module.
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod bit_vectors;
pub mod broadword;
pub mod builder;
pub mod error;

pub use bit_vectors::{DenseBitVector, SparseBitVector};
pub use error::{Error, Result};
