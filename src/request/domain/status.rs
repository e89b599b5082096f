//! Workflow status enumeration and its transition graph.

use super::ParseRequestStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted and awaiting an administrator decision.
    Pending,
    /// Accepted; fulfillment may begin.
    Approved,
    /// Rejected by an administrator.
    Refused,
    /// Devices reserved and identifiers recorded; the official document
    /// is generated on first entry.
    Prepared,
    /// Beneficiary has been contacted for handover.
    Contacted,
    /// Equipment handed over; the workflow is finished.
    Completed,
}

impl RequestStatus {
    /// Every status, in workflow order. Dashboards enumerate this to
    /// aggregate counts per status.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Refused,
        Self::Prepared,
        Self::Contacted,
        Self::Completed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Refused => "refused",
            Self::Prepared => "prepared",
            Self::Contacted => "contacted",
            Self::Completed => "completed",
        }
    }

    /// Returns true when the status permits no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Refused | Self::Completed)
    }

    /// Returns true when the workflow graph has an edge from `self` to
    /// `target`.
    ///
    /// Same-state notes-only updates are admitted by the lifecycle engine
    /// directly and deliberately do not appear in this graph.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Refused)
                | (Self::Approved, Self::Prepared)
                | (Self::Prepared, Self::Contacted)
                | (Self::Contacted, Self::Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ParseRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "refused" => Ok(Self::Refused),
            "prepared" => Ok(Self::Prepared),
            "contacted" => Ok(Self::Contacted),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseRequestStatusError(value.to_owned())),
        }
    }
}
