//! # Repository Implementations
//!
//! One repository per aggregate: medicines (catalog) and purchases (ledger).
//! Repositories are cheap to construct — they clone the pool handle.

pub mod medicine;
pub mod purchase;
