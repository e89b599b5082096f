//! Actor roles presented to administrative operations.
//!
//! Authentication happens outside the core; callers pass the role their
//! session already resolved to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the authenticated account invoking an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Regular member who may submit and view their own requests.
    Requester,
    /// Administrator who may transition requests through the workflow.
    Administrator,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Administrator => "administrator",
        }
    }

    /// Returns true when the role carries the administrator capability.
    #[must_use]
    pub const fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
