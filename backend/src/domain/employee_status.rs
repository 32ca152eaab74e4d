//! Employee hiring status workflow.
//!
//! ```text
//! Application Received ──► Interview Scheduled ──► Hired
//!          │                        │
//!          └──────► Not Accepted ◄──┘
//! ```
//!
//! `Hired` and `Not Accepted` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Hiring status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[serde(rename = "Application Received")]
    ApplicationReceived,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    #[serde(rename = "Hired")]
    Hired,
    #[serde(rename = "Not Accepted")]
    NotAccepted,
}

impl EmployeeStatus {
    /// Every status in workflow order.
    pub const ALL: [Self; 4] = [
        Self::ApplicationReceived,
        Self::InterviewScheduled,
        Self::Hired,
        Self::NotAccepted,
    ];

    /// Wire label, e.g. `"Interview Scheduled"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationReceived => "Application Received",
            Self::InterviewScheduled => "Interview Scheduled",
            Self::Hired => "Hired",
            Self::NotAccepted => "Not Accepted",
        }
    }

    /// Statuses reachable in one step from `self`.
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::ApplicationReceived => &[Self::InterviewScheduled, Self::NotAccepted],
            Self::InterviewScheduled => &[Self::Hired, Self::NotAccepted],
            Self::Hired | Self::NotAccepted => &[],
        }
    }

    /// Whether no further transition is possible.
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Whether `next` is reachable in one step.
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Parse a client-supplied label, reporting unknown values as validation
    /// failures on `field`.
    pub fn parse_field(field: &'static str, value: &str) -> Result<Self, Error> {
        value.parse().map_err(|err: UnknownEmployeeStatus| {
            let allowed: Vec<&str> = Self::ALL.iter().map(|status| status.as_str()).collect();
            Error::validation(err.to_string()).with_details(json!({
                "field": field,
                "value": value,
                "code": "unknown_status",
                "allowed": allowed,
            }))
        })
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a label is not one of the four workflow states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employee status: {0}")]
pub struct UnknownEmployeeStatus(String);

impl FromStr for EmployeeStatus {
    type Err = UnknownEmployeeStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownEmployeeStatus(s.to_owned()))
    }
}

/// Outcome of checking a requested status against the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// No status requested, or the same status requested again.
    Unchanged,
    /// A permitted move to a new status.
    Transition {
        from: EmployeeStatus,
        to: EmployeeStatus,
    },
}

impl StatusChange {
    /// Whether this change enters `Hired`.
    pub fn enters_hired(self) -> bool {
        matches!(
            self,
            Self::Transition {
                to: EmployeeStatus::Hired,
                ..
            }
        )
    }
}

/// Decide whether `requested` may replace `current`.
///
/// Requesting the current status is a no-op and skips the transition table.
///
/// # Examples
/// ```
/// use roster_backend::domain::{EmployeeStatus, ErrorCode, StatusChange, plan_status_change};
///
/// let change = plan_status_change(
///     EmployeeStatus::ApplicationReceived,
///     Some(EmployeeStatus::InterviewScheduled),
/// )
/// .expect("allowed");
/// assert!(matches!(change, StatusChange::Transition { .. }));
///
/// let err = plan_status_change(EmployeeStatus::Hired, Some(EmployeeStatus::NotAccepted))
///     .expect_err("terminal");
/// assert_eq!(err.code(), ErrorCode::InvalidTransition);
/// ```
pub fn plan_status_change(
    current: EmployeeStatus,
    requested: Option<EmployeeStatus>,
) -> Result<StatusChange, Error> {
    match requested {
        None => Ok(StatusChange::Unchanged),
        Some(next) if next == current => Ok(StatusChange::Unchanged),
        Some(next) if current.can_transition_to(next) => Ok(StatusChange::Transition {
            from: current,
            to: next,
        }),
        Some(next) => Err(Error::invalid_transition(format!(
            "Invalid status transition from {current} to {next}"
        ))
        .with_details(json!({
            "from": current.as_str(),
            "to": next.as_str(),
            "allowed": current
                .allowed_transitions()
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>(),
        }))),
    }
}
