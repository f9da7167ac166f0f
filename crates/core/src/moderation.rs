//! Moderation status ledger shared by achievements, blogs and
//! registration requests.
//!
//! Every moderated record carries exactly one of three statuses. Records
//! start `pending`; only an administrator moves them, one step at a time,
//! and there are no sub-states. Any status may be reached from any other
//! (an admin can re-open a denied record by setting it back to pending).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status of every new submission.
pub const STATUS_PENDING: &str = "pending";
/// Visible publicly.
pub const STATUS_APPROVED: &str = "approved";
/// Rejected by an administrator.
pub const STATUS_DENIED: &str = "denied";

/// All valid moderation statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_DENIED];

/// Filter keyword meaning "no status filter".
pub const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ModerationStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Denied => STATUS_DENIED,
        }
    }

    /// Parse a status string, rejecting anything outside the three-state set.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_DENIED => Ok(Self::Denied),
            other => Err(CoreError::Validation(format!(
                "Invalid moderation status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether records in this status are publicly visible.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filters and transitions
// ---------------------------------------------------------------------------

/// Parse an optional `?status=` list filter.
///
/// `None`, empty, and `"all"` mean no filter; anything else must be a
/// valid status.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<ModerationStatus>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") | Some(FILTER_ALL) => Ok(None),
        Some(s) => ModerationStatus::parse(s).map(Some),
    }
}

/// Outcome of applying a requested status to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The record already has the requested status; nothing is written.
    Unchanged,
    /// The record moves from one status to another.
    Changed {
        from: ModerationStatus,
        to: ModerationStatus,
    },
}

/// Decide what a status request does to a record currently in `current`.
pub fn plan_transition(current: ModerationStatus, requested: ModerationStatus) -> Transition {
    if current == requested {
        Transition::Unchanged
    } else {
        Transition::Changed {
            from: current,
            to: requested,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
