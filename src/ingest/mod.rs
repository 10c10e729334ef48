//! Email ingestion pipeline.
//!
//! Every refresh cycle flows through:
//! 1. `MailSource::fetch()` — pull the raw batch from the mail backend
//! 2. `Classifier::classify()` — concurrent per-email categorization
//! 3. Order-stable merge into `DisplayEmail` records
//! 4. Wholesale snapshot replacement via the `Refresher`
//!
//! **No partial updates exist.** A cycle either replaces the whole
//! snapshot or (when skipped) leaves it untouched.

pub mod pipeline;
pub mod refresher;
pub mod types;
