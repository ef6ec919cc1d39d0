//! Command-line interface for the `birthreg` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    CertificateByArg, CertificateCommand, ConfigCommand, GenderArg, ListCommand, StatusByArg,
    StatusCommand, SubmitCommand, ThemeArg, ThemeCommand,
};

/// birthreg - register births and look up certificates
#[derive(Debug, Parser)]
#[command(name = "birthreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a birth registration application
    Submit(SubmitCommand),

    /// Check the status of an application
    Status(StatusCommand),

    /// Find an issued birth certificate
    Certificate(CertificateCommand),

    /// List every application with its current status
    List(ListCommand),

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_status_by_name() {
        let cli = Cli::try_parse_from(["birthreg", "status", "anna", "--by", "name"]).unwrap();

        match cli.command {
            Command::Status(cmd) => {
                assert_eq!(cmd.query, "anna");
                assert_eq!(cmd.by, StatusByArg::Name);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn certificate_defaults_to_number() {
        let cli = Cli::try_parse_from(["birthreg", "certificate", "BC-1-ABCDEF"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Certificate(CertificateCommand {
                by: CertificateByArg::Number,
                ..
            })
        ));
    }

    #[test]
    fn parse_submit_form() {
        let cli = Cli::try_parse_from([
            "birthreg",
            "submit",
            "--child-name",
            "Anna Smith",
            "--gender",
            "female",
            "--dob",
            "2026-10-01",
            "--father-phone",
            "(555) 123-4567",
        ])
        .unwrap();

        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.gender, Some(GenderArg::Female));
        assert_eq!(cmd.dob.map(|d| d.to_string()).as_deref(), Some("2026-10-01"));
        assert_eq!(cmd.mother_name, "");
    }

    #[test]
    fn theme_action_is_optional() {
        let cli = Cli::try_parse_from(["birthreg", "theme"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { action: None }));

        let cli = Cli::try_parse_from(["birthreg", "theme", "set", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: Some(ThemeCommand::Set {
                    theme: ThemeArg::Dark
                })
            }
        ));
    }

    #[test]
    fn verbosity_flags() {
        let cli = Cli::try_parse_from(["birthreg", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["birthreg", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
