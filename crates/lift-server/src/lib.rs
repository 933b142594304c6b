//! Thin HTTP serving layer for Liftlog.
//!
//! Everything here is an I/O wrapper around [`lift_data::store::DataStore`]:
//! the JSON data endpoints read store snapshots, the upload endpoint saves
//! the posted export and triggers a full reload, and the rest is static
//! asset plumbing. No parsing or aggregation logic lives in this crate.

pub mod handlers;
pub mod server;

pub use server::{build_router, AppContext};
