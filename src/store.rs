//! Append-only record store kept under a single named database entry
use super::application::ApplicationRecord;
use super::error::StoreError;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_RECORDS_KEY: &str = "birthRegistrations";

/// Every application lives in one JSON array under `key`, in submission
/// order. Records are never edited or removed.
#[derive(Debug, Clone)]
pub struct RecordStore {
    instance: Arc<sled::Db>,
    key: String,
}

impl RecordStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self::with_key(instance, DEFAULT_RECORDS_KEY)
    }

    pub fn with_key(instance: Arc<sled::Db>, key: impl Into<String>) -> Self {
        Self {
            instance,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a record after the existing ones.
    ///
    /// An unreadable entry is left untouched and reported, it is never
    /// replaced by a fresh collection.
    pub fn append(&self, record: &ApplicationRecord) -> Result<(), StoreError> {
        let key = self.key.as_str();

        let outcome = self.instance.transaction(|tx| {
            let mut records = match tx.get(key)? {
                Some(bytes) => decode(key, &bytes).map_err(ConflictableTransactionError::Abort)?,
                None => Vec::new(),
            };
            records.push(record.clone());

            let encoded = serde_json::to_vec(&records).map_err(|source| {
                ConflictableTransactionError::Abort(StoreError::Encode {
                    key: key.to_string(),
                    source,
                })
            })?;
            tx.insert(key, encoded)?;

            Ok(records.len())
        });

        let count = match outcome {
            Ok(count) => count,
            Err(TransactionError::Abort(err)) => return Err(err),
            Err(TransactionError::Storage(err)) => return Err(err.into()),
        };
        self.instance.flush()?;

        debug!(key, count, application_id = %record.application_id, "appended record");
        Ok(())
    }

    /// Every stored record in insertion order. A missing entry is an empty
    /// store; a malformed one is an error.
    pub fn all(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        let Some(bytes) = self.instance.get(&self.key)? else {
            debug!(key = %self.key, "no records stored yet");
            return Ok(Vec::new());
        };

        let records = decode(&self.key, &bytes).inspect_err(|err| {
            warn!(key = %self.key, error = %err, "stored records are unreadable");
        })?;
        debug!(key = %self.key, count = records.len(), "loaded records");

        Ok(records)
    }
}

fn decode(key: &str, bytes: &[u8]) -> Result<Vec<ApplicationRecord>, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Unreadable {
        key: key.to_string(),
        source,
    })
}
