//! textlens-storage
//!
//! Cosmos DB access over the REST API. Thin wrapper around `reqwest`,
//! plus the [`store::AnalysisStore`] seam the HTTP handlers depend on.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod store;
