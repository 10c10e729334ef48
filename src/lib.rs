//! Zenbox — email ingestion and classification service.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod ingest;
pub mod source;
pub mod state;
