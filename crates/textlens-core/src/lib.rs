//! textlens-core
//!
//! Pure domain types and text statistics.
//! No storage or HTTP dependency — this is the shared vocabulary of textlens.

pub mod models;
pub mod stats;
