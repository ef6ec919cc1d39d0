//! Error types for the registry
use super::status::ApplicationStatus;
use chrono::NaiveDate;
use std::fmt;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ChildFullName,
    ChildGender,
    ChildDateOfBirth,
    ChildPlaceOfBirth,
    FatherFullName,
    FatherPhoneNumber,
    FatherNationalId,
    MotherFullName,
    MotherPhoneNumber,
    MotherNationalId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ChildFullName => "childInfo.fullName",
            Field::ChildGender => "childInfo.gender",
            Field::ChildDateOfBirth => "childInfo.dateOfBirth",
            Field::ChildPlaceOfBirth => "childInfo.placeOfBirth",
            Field::FatherFullName => "fatherInfo.fullName",
            Field::FatherPhoneNumber => "fatherInfo.phoneNumber",
            Field::FatherNationalId => "fatherInfo.nationalId",
            Field::MotherFullName => "motherInfo.fullName",
            Field::MotherPhoneNumber => "motherInfo.phoneNumber",
            Field::MotherNationalId => "motherInfo.nationalId",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: Field },
    #[error("date of birth {date} cannot be in the future")]
    DateOfBirthInFuture { date: NaiveDate },
    #[error("{field} must be numeric")]
    PhoneNotNumeric { field: Field },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field } | ValidationError::PhoneNotNumeric { field } => {
                *field
            }
            ValidationError::DateOfBirthInFuture { .. } => Field::ChildDateOfBirth,
        }
    }
}

/// Every field error found in a single form, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
    pub fn has_error_for(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("stored entry '{key}' is unreadable: {source}")]
    Unreadable {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode entry '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
}

/// Errors surfaced to callers of [`crate::service::RegistryService`].
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("application rejected: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("search query is empty")]
    EmptyQuery,
    #[error("no application matches '{query}'")]
    NotFound { query: String },
    #[error("certificate for {application_id} not yet issued (status: {status})")]
    NotYetIssued {
        application_id: String,
        status: ApplicationStatus,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
