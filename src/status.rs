//! Lifecycle status derived from elapsed time since submission
use super::application::TimeStamp;
use chrono::{TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

/// Elapsed time below which an application is still pending.
pub const UNDER_REVIEW_AFTER: TimeDelta = TimeDelta::seconds(30);
/// Elapsed time from which an application counts as approved.
pub const APPROVED_AFTER: TimeDelta = TimeDelta::seconds(60);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApplicationStatus {
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Approved => "Approved",
        })
    }
}

/// Resolve the status of an application submitted at `submitted_at` as seen
/// at `now`. Never stored; recompute on every read.
pub fn resolve_status(submitted_at: &TimeStamp<Utc>, now: &TimeStamp<Utc>) -> ApplicationStatus {
    let elapsed = now.to_datetime_utc() - submitted_at.to_datetime_utc();

    if elapsed < UNDER_REVIEW_AFTER {
        ApplicationStatus::Pending
    } else if elapsed < APPROVED_AFTER {
        ApplicationStatus::UnderReview
    } else {
        ApplicationStatus::Approved
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub state: StepState,
}

/// The Submitted / Under Review / Approved tracker shown beside a status.
pub fn progress_steps(status: ApplicationStatus) -> [ProgressStep; 3] {
    let review = match status {
        ApplicationStatus::Pending => StepState::Pending,
        ApplicationStatus::UnderReview => StepState::Active,
        ApplicationStatus::Approved => StepState::Completed,
    };
    let approved = if status == ApplicationStatus::Approved {
        StepState::Completed
    } else {
        StepState::Pending
    };

    [
        ProgressStep {
            label: "Submitted",
            state: StepState::Completed,
        },
        ProgressStep {
            label: "Under Review",
            state: review,
        },
        ProgressStep {
            label: "Approved",
            state: approved,
        },
    ]
}
