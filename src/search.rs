//! Lookups over the unindexed record collection
//!
//! Every lookup is a linear scan; the first record in store order that
//! matches wins.
use super::application::ApplicationRecord;
use super::certificate::{CERTIFICATE_PREFIX, certificate_number};
use super::utils::APPLICATION_ID_PREFIX;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    lowered: String,
}

impl SearchQuery {
    /// Returns `None` when the input is empty once trimmed.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        })
    }
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Exact, case-insensitive match on the application id.
pub fn find_by_application_id<'a>(
    records: &'a [ApplicationRecord],
    query: &SearchQuery,
) -> Option<&'a ApplicationRecord> {
    records
        .iter()
        .find(|record| record.application_id.to_lowercase() == query.lowered)
}

/// Case-insensitive substring match on the child's full name.
pub fn find_by_child_name<'a>(
    records: &'a [ApplicationRecord],
    query: &SearchQuery,
) -> Option<&'a ApplicationRecord> {
    records
        .iter()
        .find(|record| record.child_info.full_name.to_lowercase().contains(&query.lowered))
}

/// Match a certificate number against either the derived certificate number
/// or, with `BC-` turned back into `BR-`, the application id itself.
///
/// The prefix swap on the query is case-sensitive while both comparisons are
/// not, so `bc-…` queries only match through the derived number.
pub fn find_by_certificate_number<'a>(
    records: &'a [ApplicationRecord],
    query: &SearchQuery,
) -> Option<&'a ApplicationRecord> {
    let as_application_id = query
        .raw
        .replacen(CERTIFICATE_PREFIX, APPLICATION_ID_PREFIX, 1)
        .to_lowercase();

    records.iter().find(|record| {
        certificate_number(&record.application_id).to_lowercase() == query.lowered
            || record.application_id.to_lowercase() == as_application_id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ChildInfo, Gender, ParentInfo, TimeStamp};
    use chrono::NaiveDate;

    fn record(id: &str, child: &str) -> ApplicationRecord {
        ApplicationRecord {
            application_id: id.to_string(),
            child_info: ChildInfo {
                full_name: child.to_string(),
                gender: Gender::Other,
                date_of_birth: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
                place_of_birth: "Riverside".into(),
            },
            father_info: ParentInfo::new("F", "1", "F-1"),
            mother_info: ParentInfo::new("M", "2", "M-1"),
            submitted_at: TimeStamp::new(),
        }
    }

    fn query(input: &str) -> SearchQuery {
        SearchQuery::parse(input).unwrap()
    }

    #[test]
    fn blank_queries_are_rejected() {
        assert!(SearchQuery::parse("").is_none());
        assert!(SearchQuery::parse(" \t\n").is_none());
        assert_eq!(query("  BR-1-X  ").as_str(), "BR-1-X");
    }

    #[test]
    fn id_match_is_exact_not_prefix() {
        let records = [record("BR-ABC123-DEF456", "Anna Smith")];

        assert!(find_by_application_id(&records, &query("br-abc123-def456")).is_some());
        assert!(find_by_application_id(&records, &query("BR-ABC123")).is_none());
    }

    #[test]
    fn name_match_returns_first_in_store_order() {
        let records = [
            record("BR-1-AAAAAA", "Joanna Lee"),
            record("BR-2-BBBBBB", "Anna Smith"),
        ];

        let found = find_by_child_name(&records, &query("ANN")).unwrap();
        assert_eq!(found.application_id, "BR-1-AAAAAA");
    }

    #[test]
    fn certificate_number_both_paths() {
        let records = [record("BR-ABC123-DEF456", "Anna Smith")];

        // derived certificate number, any case
        assert!(find_by_certificate_number(&records, &query("BC-ABC123-DEF456")).is_some());
        assert!(find_by_certificate_number(&records, &query("bc-abc123-def456")).is_some());
        // application id passes straight through the reverse path
        assert!(find_by_certificate_number(&records, &query("br-abc123-def456")).is_some());
        assert!(find_by_certificate_number(&records, &query("BC-ABC123")).is_none());
    }
}
