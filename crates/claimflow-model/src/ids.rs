//! Identifier newtypes for workflow entities
//!
//! Claim ids stay human-facing (`CLM007`) because they are quoted in
//! notifications and support calls; the remaining ids are opaque strings
//! assigned at record creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing claim identifier, `CLM{seq:03}`.
///
/// The sequence is a monotonic counter owned by the store, never derived
/// from collection length, so ids stay unique across deletions and
/// concurrent inserts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(pub String);

impl ClaimId {
    /// Build a claim id from a sequence number
    #[inline]
    #[must_use]
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("CLM{seq:03}"))
    }

    /// Recover the sequence number, if the id follows the canonical format
    #[must_use]
    pub fn seq(&self) -> Option<u64> {
        self.0.strip_prefix("CLM").and_then(|s| s.parse().ok())
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh id
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "_{}"), uuid::Uuid::new_v4().simple()))
            }

            /// View as a string slice
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Policy record identifier
    PolicyId,
    "POL"
);
string_id!(
    /// Customer record identifier
    CustomerId,
    "CUST"
);
string_id!(
    /// Surveyor record identifier
    SurveyorId,
    "SUR"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_id_from_seq_pads_to_three_digits() {
        assert_eq!(ClaimId::from_seq(7).as_str(), "CLM007");
        assert_eq!(ClaimId::from_seq(42).as_str(), "CLM042");
        assert_eq!(ClaimId::from_seq(1234).as_str(), "CLM1234");
    }

    #[test]
    fn claim_id_seq_round_trip() {
        assert_eq!(ClaimId::from_seq(99).seq(), Some(99));
        assert_eq!(ClaimId::from("not-a-claim").seq(), None);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = SurveyorId::generate();
        let b = SurveyorId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("SUR_"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ClaimId::from_seq(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CLM003\"");
    }
}
