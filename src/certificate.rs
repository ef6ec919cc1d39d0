//! Certificates derived from approved applications
use super::application::{ApplicationRecord, TimeStamp};
use super::status::ApplicationStatus;
use super::utils::APPLICATION_ID_PREFIX;
use chrono::{TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

pub const CERTIFICATE_PREFIX: &str = "BC-";

/// Delay between submission and the recorded issue date.
pub const ISSUE_DELAY: TimeDelta = TimeDelta::minutes(1);

/// A birth certificate. Derived on every read and never stored.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub certificate_number: String,
    pub issue_date: TimeStamp<Utc>,
    pub record: ApplicationRecord,
}

/// `BR-…` becomes `BC-…`; only the first occurrence is replaced.
pub fn certificate_number(application_id: &str) -> String {
    application_id.replacen(APPLICATION_ID_PREFIX, CERTIFICATE_PREFIX, 1)
}

pub fn issue_date(submitted_at: &TimeStamp<Utc>) -> TimeStamp<Utc> {
    (submitted_at.to_datetime_utc() + ISSUE_DELAY).into()
}

impl Certificate {
    /// Returns `None` unless `status` is approved.
    pub fn issue(record: &ApplicationRecord, status: ApplicationStatus) -> Option<Self> {
        if status != ApplicationStatus::Approved {
            return None;
        }

        Some(Self {
            certificate_number: certificate_number(&record.application_id),
            issue_date: issue_date(&record.submitted_at),
            record: record.clone(),
        })
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let child = &self.record.child_info;

        writeln!(f, "BIRTH CERTIFICATE")?;
        writeln!(f, "Certificate No.:  {}", self.certificate_number)?;
        writeln!(f, "Application ID:   {}", self.record.application_id)?;
        writeln!(
            f,
            "Issue Date:       {}",
            self.issue_date.to_datetime_utc().format("%B %-d, %Y %H:%M UTC")
        )?;
        writeln!(f)?;
        writeln!(f, "Child:            {}", child.full_name)?;
        writeln!(f, "Gender:           {}", child.gender)?;
        writeln!(
            f,
            "Date of Birth:    {}",
            child.date_of_birth.format("%B %-d, %Y")
        )?;
        writeln!(f, "Place of Birth:   {}", child.place_of_birth)?;
        writeln!(f)?;
        writeln!(
            f,
            "Father:           {} (ID {})",
            self.record.father_info.full_name, self.record.father_info.national_id
        )?;
        write!(
            f,
            "Mother:           {} (ID {})",
            self.record.mother_info.full_name, self.record.mother_info.national_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_prefix_is_replaced() {
        assert_eq!(certificate_number("BR-ABC-BR-123"), "BC-ABC-BR-123");
        assert_eq!(certificate_number("XBR-ABC-123456"), "XBC-ABC-123456");
        assert_eq!(certificate_number("NOPREFIX"), "NOPREFIX");
    }

    #[test]
    fn issued_one_minute_after_submission() {
        let submitted = TimeStamp::new_with(2026, 10, 18, 23, 59, 30).unwrap();
        let issued = issue_date(&submitted);

        assert_eq!(issued, TimeStamp::new_with(2026, 10, 19, 0, 0, 30).unwrap());
    }
}
