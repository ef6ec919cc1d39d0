//! Application records and the form builder that produces them
use super::error::{Field, ValidationError, ValidationErrors};
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChildInfo {
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParentInfo {
    pub full_name: String,
    pub phone_number: String, // kept as entered, separators included
    pub national_id: String,
}

/// A submitted application as persisted in the record store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: String,
    pub child_info: ChildInfo,
    pub father_info: ParentInfo,
    pub mother_info: ParentInfo,
    pub submitted_at: TimeStamp<Utc>, // set once on submission
}

/// Output of [`ApplicationDetails::validate_and_finalise`]; the only input
/// accepted for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplication {
    pub child_info: ChildInfo,
    pub father_info: ParentInfo,
    pub mother_info: ParentInfo,
}

// Used for collecting form input before validation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplicationDetails {
    child_full_name: String,
    child_gender: Option<Gender>,
    child_date_of_birth: Option<NaiveDate>,
    child_place_of_birth: String,
    father: ParentInfo,
    mother: ParentInfo,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct TimeStamp<T: TimeZone>(DateTime<T>);

impl TimeStamp<Utc> {
    pub fn new() -> Self {
        Utc::now().into()
    }
    pub fn new_with(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Into::into)
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Default for TimeStamp<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

// Stored timestamps carry millisecond precision, so truncate on the way in
// to keep a record equal to itself after a store round trip.
impl From<DateTime<Utc>> for TimeStamp<Utc> {
    fn from(value: DateTime<Utc>) -> Self {
        TimeStamp(value.trunc_subsecs(3))
    }
}

impl Serialize for TimeStamp<Utc> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<'de> Deserialize<'de> for TimeStamp<Utc> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc).into())
            .map_err(serde::de::Error::custom)
    }
}

impl ParentInfo {
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        national_id: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            national_id: national_id.into(),
        }
    }
}

impl ApplicationRecord {
    pub fn new(
        application_id: String,
        application: ValidatedApplication,
        submitted_at: TimeStamp<Utc>,
    ) -> Self {
        Self {
            application_id,
            child_info: application.child_info,
            father_info: application.father_info,
            mother_info: application.mother_info,
            submitted_at,
        }
    }
}

impl ApplicationDetails {
    /// Construct an empty form
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_child_full_name(mut self, name: impl Into<String>) -> Self {
        self.child_full_name = name.into();
        self
    }
    pub fn set_child_gender(mut self, gender: Gender) -> Self {
        self.child_gender = Some(gender);
        self
    }
    pub fn set_child_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.child_date_of_birth = Some(date);
        self
    }
    pub fn set_child_place_of_birth(mut self, place: impl Into<String>) -> Self {
        self.child_place_of_birth = place.into();
        self
    }
    pub fn set_father(mut self, father: ParentInfo) -> Self {
        self.father = father;
        self
    }
    pub fn set_mother(mut self, mother: ParentInfo) -> Self {
        self.mother = mother;
        self
    }

    /// Checks every field against the form rules, reporting all failures at
    /// once. `today` bounds the date of birth (inclusive).
    pub fn validate_and_finalise(
        self,
        today: NaiveDate,
    ) -> Result<ValidatedApplication, ValidationErrors> {
        let mut errors = Vec::new();

        require(&self.child_full_name, Field::ChildFullName, &mut errors);
        if self.child_gender.is_none() {
            errors.push(ValidationError::Required {
                field: Field::ChildGender,
            });
        }
        match self.child_date_of_birth {
            None => errors.push(ValidationError::Required {
                field: Field::ChildDateOfBirth,
            }),
            Some(date) if date > today => {
                errors.push(ValidationError::DateOfBirthInFuture { date })
            }
            Some(_) => {}
        }
        require(&self.child_place_of_birth, Field::ChildPlaceOfBirth, &mut errors);

        validate_parent(
            &self.father,
            [
                Field::FatherFullName,
                Field::FatherPhoneNumber,
                Field::FatherNationalId,
            ],
            &mut errors,
        );
        validate_parent(
            &self.mother,
            [
                Field::MotherFullName,
                Field::MotherPhoneNumber,
                Field::MotherNationalId,
            ],
            &mut errors,
        );

        match (self.child_gender, self.child_date_of_birth) {
            (Some(gender), Some(date_of_birth)) if errors.is_empty() => Ok(ValidatedApplication {
                child_info: ChildInfo {
                    full_name: self.child_full_name,
                    gender,
                    date_of_birth,
                    place_of_birth: self.child_place_of_birth,
                },
                father_info: self.father,
                mother_info: self.mother,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn require(value: &str, field: Field, errors: &mut Vec<ValidationError>) -> bool {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required { field });
        return false;
    }
    true
}

fn validate_parent(parent: &ParentInfo, fields: [Field; 3], errors: &mut Vec<ValidationError>) {
    let [name, phone, national_id] = fields;

    require(&parent.full_name, name, errors);
    if require(&parent.phone_number, phone, errors) && !is_numeric_phone(&parent.phone_number) {
        errors.push(ValidationError::PhoneNotNumeric { field: phone });
    }
    require(&parent.national_id, national_id, errors);
}

/// True when the number is one or more digits once spaces, dashes and
/// parentheses are removed.
pub fn is_numeric_phone(phone: &str) -> bool {
    let mut digits = phone
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .peekable();

    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ApplicationDetails {
        ApplicationDetails::new()
            .set_child_full_name("Anna Smith")
            .set_child_gender(Gender::Female)
            .set_child_date_of_birth(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
            .set_child_place_of_birth("City Hospital")
            .set_father(ParentInfo::new("John Smith", "(555) 123-4567", "F-1"))
            .set_mother(ParentInfo::new("Jane Smith", "5559876543", "M-1"))
    }

    #[test]
    fn timestamp_json_encoding() {
        let original = TimeStamp::new();

        let encoding = serde_json::to_string(&original).unwrap();
        let decode: TimeStamp<Utc> = serde_json::from_str(&encoding).unwrap();

        assert_eq!(original, decode);
    }

    #[test]
    fn timestamp_serialises_like_iso_string() {
        let ts = TimeStamp::new_with(2026, 10, 18, 9, 30, 0).unwrap();

        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2026-10-18T09:30:00.000Z\""
        );
    }

    #[test]
    fn phone_separators_are_ignored() {
        assert!(is_numeric_phone("(555) 123-4567"));
        assert!(is_numeric_phone("5551234567"));
        assert!(!is_numeric_phone("555-CALL-NOW"));
        assert!(!is_numeric_phone("+15551234567"));
        assert!(!is_numeric_phone(" - ( ) "));
        assert!(!is_numeric_phone(""));
    }

    #[test]
    fn complete_form_validates() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let validated = complete_form().validate_and_finalise(today).unwrap();

        assert_eq!(validated.child_info.full_name, "Anna Smith");
        assert_eq!(validated.father_info.phone_number, "(555) 123-4567");
    }

    #[test]
    fn birth_today_is_accepted() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

        assert!(complete_form().validate_and_finalise(today).is_ok());
    }

    #[test]
    fn empty_form_reports_every_field() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let errors = ApplicationDetails::new()
            .validate_and_finalise(today)
            .unwrap_err();

        assert_eq!(errors.errors().len(), 10);
        assert!(
            errors
                .errors()
                .iter()
                .all(|e| matches!(e, ValidationError::Required { .. }))
        );
    }
}
