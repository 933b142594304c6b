//! Domain models and shared infrastructure for Liftlog.
//!
//! Defines the CSV dialect table, the normalized lifting-set record, the
//! aggregated per-exercise data points, the crate-wide error type and the
//! CLI settings shared by the other Liftlog crates.

pub mod error;
pub mod models;
pub mod settings;
