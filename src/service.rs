//! Service layer API for registration workflow operations
use super::application::{ApplicationDetails, ApplicationRecord, TimeStamp};
use super::certificate::Certificate;
use super::error::RegistryError;
use super::search::{self, SearchQuery};
use super::status::{ApplicationStatus, ProgressStep, progress_steps, resolve_status};
use super::store::RecordStore;
use super::utils::new_application_id;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// How a status query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    ApplicationId,
    ChildName,
}

/// How a certificate query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateQuery {
    CertificateNumber,
    ChildName,
}

/// An application together with everything derived from it at query time.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub record: ApplicationRecord,
    pub status: ApplicationStatus,
    pub progress: [ProgressStep; 3],
    pub certificate: Option<Certificate>,
}

impl StatusReport {
    pub fn resolve(record: ApplicationRecord, now: &TimeStamp<Utc>) -> Self {
        let status = resolve_status(&record.submitted_at, now);

        Self {
            certificate: Certificate::issue(&record, status),
            progress: progress_steps(status),
            status,
            record,
        }
    }
}

pub struct RegistryService {
    store: RecordStore,
}

impl RegistryService {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self::with_store(RecordStore::new(instance))
    }

    pub fn with_store(store: RecordStore) -> Self {
        Self { store }
    }

    /// Validate and store a new application submitted at `now`.
    pub fn submit_application(
        &self,
        details: ApplicationDetails,
        now: TimeStamp<Utc>,
    ) -> Result<ApplicationRecord, RegistryError> {
        let application = details.validate_and_finalise(now.date())?;

        let application_id = new_application_id(&now);
        let record = ApplicationRecord::new(application_id, application, now);

        self.store.append(&record)?;
        info!(application_id = %record.application_id, "application submitted");

        Ok(record)
    }

    /// Every application with its status as of `now`, in submission order.
    pub fn applications(&self, now: &TimeStamp<Utc>) -> Result<Vec<StatusReport>, RegistryError> {
        Ok(self
            .store
            .all()?
            .into_iter()
            .map(|record| StatusReport::resolve(record, now))
            .collect())
    }

    /// Look up an application and resolve its status as of `now`.
    pub fn check_status(
        &self,
        query: &str,
        by: StatusQuery,
        now: &TimeStamp<Utc>,
    ) -> Result<StatusReport, RegistryError> {
        let query = SearchQuery::parse(query).ok_or(RegistryError::EmptyQuery)?;
        let records = self.store.all()?;

        let found = match by {
            StatusQuery::ApplicationId => search::find_by_application_id(&records, &query),
            StatusQuery::ChildName => search::find_by_child_name(&records, &query),
        };
        let record = found.cloned().ok_or_else(|| not_found(&query))?;

        let report = StatusReport::resolve(record, now);
        debug!(
            application_id = %report.record.application_id,
            status = %report.status,
            "status resolved"
        );

        Ok(report)
    }

    /// Look up an issued certificate. A matching application that is not yet
    /// approved is reported as [`RegistryError::NotYetIssued`], distinct from
    /// [`RegistryError::NotFound`].
    pub fn find_certificate(
        &self,
        query: &str,
        by: CertificateQuery,
        now: &TimeStamp<Utc>,
    ) -> Result<Certificate, RegistryError> {
        let query = SearchQuery::parse(query).ok_or(RegistryError::EmptyQuery)?;
        let records = self.store.all()?;

        let found = match by {
            CertificateQuery::CertificateNumber => {
                search::find_by_certificate_number(&records, &query)
            }
            CertificateQuery::ChildName => search::find_by_child_name(&records, &query),
        };
        let record = found.ok_or_else(|| not_found(&query))?;

        let status = resolve_status(&record.submitted_at, now);
        let Some(certificate) = Certificate::issue(record, status) else {
            debug!(application_id = %record.application_id, %status, "certificate not yet issued");
            return Err(RegistryError::NotYetIssued {
                application_id: record.application_id.clone(),
                status,
            });
        };

        Ok(certificate)
    }
}

fn not_found(query: &SearchQuery) -> RegistryError {
    debug!(query = query.as_str(), "no matching application");
    RegistryError::NotFound {
        query: query.as_str().to_string(),
    }
}
