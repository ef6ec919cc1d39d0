//! CLI subcommand definitions.

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::application::{ApplicationDetails, Gender, ParentInfo};
use crate::service::{CertificateQuery, StatusQuery};
use crate::theme::Theme;

/// Registration form fields. Left empty, a field fails validation with the
/// same message the form would show.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    #[arg(long, default_value = "")]
    pub child_name: String,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    pub place_of_birth: String,

    #[arg(long, default_value = "")]
    pub father_name: String,
    #[arg(long, default_value = "")]
    pub father_phone: String,
    #[arg(long, default_value = "")]
    pub father_national_id: String,

    #[arg(long, default_value = "")]
    pub mother_name: String,
    #[arg(long, default_value = "")]
    pub mother_phone: String,
    #[arg(long, default_value = "")]
    pub mother_national_id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl SubmitCommand {
    pub fn to_details(&self) -> ApplicationDetails {
        let mut details = ApplicationDetails::new()
            .set_child_full_name(&self.child_name)
            .set_child_place_of_birth(&self.place_of_birth)
            .set_father(ParentInfo::new(
                &self.father_name,
                &self.father_phone,
                &self.father_national_id,
            ))
            .set_mother(ParentInfo::new(
                &self.mother_name,
                &self.mother_phone,
                &self.mother_national_id,
            ));

        if let Some(gender) = self.gender {
            details = details.set_child_gender(gender.into());
        }
        if let Some(dob) = self.dob {
            details = details.set_child_date_of_birth(dob);
        }
        details
    }
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Application id or part of the child's name
    pub query: String,

    #[arg(short, long, value_enum, default_value = "id")]
    pub by: StatusByArg,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CertificateCommand {
    /// Certificate number or part of the child's name
    pub query: String,

    #[arg(short, long, value_enum, default_value = "number")]
    pub by: CertificateByArg,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    /// Show the saved theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Save a specific theme
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show the configuration file path
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusByArg {
    /// Exact application id
    Id,
    /// Part of the child's full name
    Name,
}

impl From<StatusByArg> for StatusQuery {
    fn from(arg: StatusByArg) -> Self {
        match arg {
            StatusByArg::Id => Self::ApplicationId,
            StatusByArg::Name => Self::ChildName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CertificateByArg {
    /// Certificate number (or application id)
    Number,
    /// Part of the child's full name
    Name,
}

impl From<CertificateByArg> for CertificateQuery {
    fn from(arg: CertificateByArg) -> Self {
        match arg {
            CertificateByArg::Number => Self::CertificateNumber,
            CertificateByArg::Name => Self::ChildName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}
