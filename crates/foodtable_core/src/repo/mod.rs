//! Repository layer: the concurrent in-memory table.
//!
//! # Responsibility
//! - Define the table access contract used by services.
//! - Keep locking and row ordering details inside the store.
//!
//! # Invariants
//! - Every read returns owned snapshots.
//! - Missing rows are reported as values, not errors.

pub mod record_store;
