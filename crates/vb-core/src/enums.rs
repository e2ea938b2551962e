//! Entity kinds, constrained text columns, and security policy enums.
//!
//! Enums stored in SQL serialize to the exact text written to the column.
//! Capitalized spellings from older databases are accepted on read.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Every record kind the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Password,
    Revenue,
    Expense,
    Provision,
    Advance,
    Liability,
    Client,
    Project,
}

impl EntityKind {
    /// All kinds, password vault first, then business records.
    pub const ALL: [Self; 8] = [
        Self::Password,
        Self::Revenue,
        Self::Expense,
        Self::Provision,
        Self::Advance,
        Self::Liability,
        Self::Client,
        Self::Project,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Provision => "provision",
            Self::Advance => "advance",
            Self::Liability => "liability",
            Self::Client => "client",
            Self::Project => "project",
        }
    }

    /// Whether this kind belongs to the business-records side.
    #[must_use]
    pub const fn is_business(self) -> bool {
        !matches!(self, Self::Password)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdvanceType
// ---------------------------------------------------------------------------

/// Direction of an advance payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceType {
    #[serde(alias = "Received")]
    Received,
    #[serde(alias = "Paid")]
    Paid,
}

impl AdvanceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for AdvanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LiabilityType
// ---------------------------------------------------------------------------

/// Horizon of a liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiabilityType {
    #[serde(alias = "Short-term")]
    ShortTerm,
    #[serde(alias = "Long-term")]
    LongTerm,
}

impl LiabilityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortTerm => "short-term",
            Self::LongTerm => "long-term",
        }
    }
}

impl fmt::Display for LiabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Delivery status of a project.
///
/// ```text
/// planning → in-progress → completed
///                        ↔ on-hold
/// ```
///
/// Transitions are not enforced; any status may be written by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UnavailablePolicy
// ---------------------------------------------------------------------------

/// What the session guard does when the platform cannot run a challenge
/// (no credential backend, or nothing enrolled).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnavailablePolicy {
    /// Stay locked and surface a security recommendation.
    #[default]
    Deny,
    /// Grant access without a challenge.
    Allow,
}

impl UnavailablePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "deny",
            Self::Allow => "allow",
        }
    }
}

impl fmt::Display for UnavailablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_display_matches_serde() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn only_password_is_not_business() {
        let non_business: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|k| !k.is_business())
            .collect();
        assert_eq!(non_business, vec![EntityKind::Password]);
    }

    #[test]
    fn project_status_kebab_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: ProjectStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(back, ProjectStatus::OnHold);
    }

    #[test]
    fn legacy_capitalized_values_accepted() {
        let adv: AdvanceType = serde_json::from_str("\"Received\"").unwrap();
        assert_eq!(adv, AdvanceType::Received);
        let lia: LiabilityType = serde_json::from_str("\"Long-term\"").unwrap();
        assert_eq!(lia, LiabilityType::LongTerm);
        assert_eq!(serde_json::to_string(&lia).unwrap(), "\"long-term\"");
    }

    #[test]
    fn unavailable_policy_defaults_to_deny() {
        assert_eq!(UnavailablePolicy::default(), UnavailablePolicy::Deny);
        assert_eq!(UnavailablePolicy::Allow.to_string(), "allow");
    }
}
