//! Table row and payload types.
//!
//! # Responsibility
//! - Define the record shape stored by the in-memory table.
//! - Define the food payload and its string-typed form input.
//!
//! # Invariants
//! - A record id is assigned by the store and never changes afterwards.
//! - Records handed to callers are owned snapshots, never live rows.

pub mod food;
pub mod record;
