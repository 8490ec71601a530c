//! Policy records
//!
//! Policy numbers follow the human-facing `{TYPE}/{YEAR}/{RAND4}` format
//! of the issuing office. Uniqueness is enforced at creation by the store,
//! which regenerates on conflict.

use crate::ids::{CustomerId, PolicyId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line of business a policy covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Motor,
    Health,
    Home,
    Travel,
    Life,
}

impl PolicyType {
    /// Three-letter code used in policy numbers
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            PolicyType::Motor => "MOT",
            PolicyType::Health => "HLT",
            PolicyType::Home => "HOM",
            PolicyType::Travel => "TRV",
            PolicyType::Life => "LIF",
        }
    }

    /// Annual base premium for the line, in whole rupees
    #[inline]
    #[must_use]
    pub fn base_premium(self) -> u64 {
        match self {
            PolicyType::Motor => 8_000,
            PolicyType::Health => 5_000,
            PolicyType::Home => 3_000,
            PolicyType::Travel => 2_000,
            PolicyType::Life => 15_000,
        }
    }

    /// Parse the lowercase form used in registration requests
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "motor" => Some(PolicyType::Motor),
            "health" => Some(PolicyType::Health),
            "home" => Some(PolicyType::Home),
            "travel" => Some(PolicyType::Travel),
            "life" => Some(PolicyType::Life),
            _ => None,
        }
    }
}

/// Human-facing policy number, `{TYPE}/{YEAR}/{RAND4}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyNumber(pub String);

impl PolicyNumber {
    /// Format a policy number from its parts
    #[inline]
    #[must_use]
    pub fn format(policy_type: PolicyType, year: i32, rand4: u16) -> Self {
        Self(format!("{}/{}/{}", policy_type.code(), year, rand4))
    }

    /// View as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PolicyNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Policy lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Pending,
    Approved,
    Active,
    Expired,
    Cancelled,
}

/// An issued (or pending) policy. Referenced by claims, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub policy_number: PolicyNumber,
    pub customer_id: CustomerId,
    pub policy_type: PolicyType,
    /// Annual premium in whole rupees
    pub premium: u64,
    /// Sum insured in whole rupees
    pub coverage_amount: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Policy {
    /// Whether claims may be raised against this policy
    #[inline]
    #[must_use]
    pub fn is_claimable(&self) -> bool {
        matches!(self.status, PolicyStatus::Approved | PolicyStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_number_format() {
        let number = PolicyNumber::format(PolicyType::Health, 2024, 4821);
        assert_eq!(number.as_str(), "HLT/2024/4821");
    }

    #[test]
    fn policy_type_codes_are_distinct() {
        let codes = [
            PolicyType::Motor,
            PolicyType::Health,
            PolicyType::Home,
            PolicyType::Travel,
            PolicyType::Life,
        ]
        .map(PolicyType::code);
        let mut dedup = codes.to_vec();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), codes.len());
    }

    #[test]
    fn policy_type_parse_round_trip() {
        assert_eq!(PolicyType::parse("health"), Some(PolicyType::Health));
        assert_eq!(PolicyType::parse("MOTOR"), Some(PolicyType::Motor));
        assert_eq!(PolicyType::parse("pet"), None);
    }
}
