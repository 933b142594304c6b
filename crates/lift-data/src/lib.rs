//! Data ingestion layer for Liftlog.
//!
//! Responsible for reading Strong workout exports from the storage
//! directory, detecting which vendor CSV dialect each file uses,
//! normalizing rows into [`lift_core::models::LiftingSet`] records,
//! folding them into per-exercise time series and holding the result in
//! the per-user [`store::DataStore`].

pub mod aggregator;
pub mod normalizer;
pub mod reader;
pub mod store;

pub use lift_core as core;
