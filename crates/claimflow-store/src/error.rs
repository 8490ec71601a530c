//! Error types for the record store

use std::fmt;

/// Entity collections the store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customer,
    Policy,
    Surveyor,
    Claim,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Customer => "customer",
            EntityKind::Policy => "policy",
            EntityKind::Surveyor => "surveyor",
            EntityKind::Claim => "claim",
        };
        write!(f, "{label}")
    }
}

/// Store-level failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record absent from its collection
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Which collection was queried
        kind: EntityKind,
        /// The id or secondary key used
        id: String,
    },

    /// Surveyor selection produced no candidate with capacity
    #[error("no eligible surveyor")]
    NoEligibleSurveyor,

    /// Policy number already present in the collection
    #[error("policy number already in use: {number}")]
    PolicyNumberTaken {
        /// The colliding number
        number: String,
    },

    /// Policy number generation kept colliding
    #[error("could not generate a unique policy number after {attempts} attempts")]
    PolicyNumberExhausted {
        /// How many numbers were tried
        attempts: u32,
    },

    /// Backing file could not be read or written
    #[error("persistence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file held malformed JSON
    #[error("persistence encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StoreError {
    /// Missing-record constructor
    #[inline]
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether retrying the same call could succeed without intervention.
    /// Reads may be retried; read-modify-write cycles are already
    /// serialized by the collection locks and are not retried blindly.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
