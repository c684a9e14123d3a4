// Pedantic lint configuration for the crate.
// - missing_errors_doc: Error handling is self-evident from Result types
// - module_name_repetitions: BatchSummary/BatchOutcome read better qualified
// - must_use_candidate: Pervasive #[must_use] adds noise on small accessors
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod schema;
pub mod table;
