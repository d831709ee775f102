//! # Trimbook Core
//!
//! Domain types for the Trimbook appointment booking engine: the appointment
//! lifecycle, the windowed listing protocol, the error taxonomy, and the
//! traits the scheduling engine consumes from its collaborators (directory
//! lookups, appointment persistence, audit sink).
//!
//! This crate holds no I/O of its own; the sqlx implementations live in
//! `trimbook-db` and the orchestration in `trimbook-scheduling`.

/// Audit sink trait and the tracing-backed default implementation
pub mod audit;
/// Error taxonomy shared across all crates
pub mod errors;
/// Domain models: appointments, directory entities, listing windows
pub mod models;
/// Collaborator traits consumed by the scheduling engine
pub mod store;
