//! Wire models for the linearization engine's typed results.
//!
//! Only the node descriptor has a shape this client commits to; snapshot,
//! health, and confirmation payloads are engine-defined and passed through
//! as raw JSON values.

use serde::{Deserialize, Serialize};

/// One DAG node descriptor as the engine reports it: an opaque identifier
/// plus its ordering (blue) score.
///
/// Returned by the frontier query, the total-order snapshot, and range
/// queries, always as an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredNode {
    /// Engine-assigned node identifier; opaque to this client.
    pub id: String,
    /// Ordering score assigned by the engine; treated as an opaque integer.
    pub score: u64,
}
