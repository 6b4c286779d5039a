//! Record wrapper shared by every table payload.
//!
//! # Responsibility
//! - Pair a store-assigned id with a caller-owned payload by composition.
//! - Expose the id read-only so snapshots cannot be re-keyed.
//!
//! # Invariants
//! - `id` is set once by the store at creation time.
//! - Payload fields may be replaced as a whole, the id never.

use serde::Serialize;

/// Primary key assigned by the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = u64;

/// Payloads that can be filtered by a name field.
pub trait Named {
    /// Name used by name-filtered counts and pages.
    fn name(&self) -> &str;
}

/// One table row: immutable id plus mutable payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<P> {
    id: RecordId,
    /// Mutable payload. Changing it on a snapshot never touches the store.
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Record<P> {
    pub(crate) fn new(id: RecordId, payload: P) -> Self {
        Self { id, payload }
    }

    /// Returns the store-assigned id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub(crate) fn replace_payload(&mut self, payload: P) {
        self.payload = payload;
    }
}
