//! # Trimbook Scheduling
//!
//! The scheduling engine of the Trimbook booking service. It owns the two
//! pieces of the system with real invariants:
//!
//! - **Lifecycle management**: appointment creation with cross-entity
//!   validation and time-conflict detection, updates, and soft-delete
//!   cancellation.
//! - **Windowed queries**: role-scoped filtering and cursor-style pagination,
//!   shared by every list operation in the system.
//!
//! The engine is generic over its collaborators ([`trimbook_core::store`]
//! traits plus the audit sink), so the sqlx implementations in `trimbook-db`
//! and the mockall doubles used in tests plug in interchangeably.

/// Windowed listing operations
pub mod query;
/// Appointment lifecycle operations
pub mod scheduler;

pub use scheduler::Scheduler;
