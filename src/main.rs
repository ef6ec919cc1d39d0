//! `birthreg` - command-line front end for the birth registry

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use birth_registry::application::TimeStamp;
use birth_registry::cli::{
    CertificateCommand, Cli, Command, ConfigCommand, ListCommand, StatusCommand, SubmitCommand,
    ThemeCommand,
};
use birth_registry::error::RegistryError;
use birth_registry::service::{RegistryService, StatusReport};
use birth_registry::status::StepState;
use birth_registry::store::RecordStore;
use birth_registry::theme::ThemeStore;
use birth_registry::{Config, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Submit(cmd) => handle_submit(&open_service(&config)?, &cmd),
        Command::Status(cmd) => handle_status(&open_service(&config)?, &cmd),
        Command::Certificate(cmd) => handle_certificate(&open_service(&config)?, &cmd),
        Command::List(cmd) => handle_list(&open_service(&config)?, &cmd),
        Command::Theme { action } => {
            let store = ThemeStore::with_key(open_database(&config)?, &config.storage.theme_key);
            handle_theme(&store, action.unwrap_or(ThemeCommand::Show))
        }
        Command::Config(cmd) => handle_config(&config, &cmd, cli.config),
    }
}

fn open_database(config: &Config) -> anyhow::Result<Arc<sled::Db>> {
    let path = config.database_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    let db = sled::open(&path).with_context(|| format!("opening database {}", path.display()))?;
    Ok(Arc::new(db))
}

fn open_service(config: &Config) -> anyhow::Result<RegistryService> {
    let db = open_database(config)?;
    Ok(RegistryService::with_store(RecordStore::with_key(
        db,
        &config.storage.records_key,
    )))
}

fn handle_submit(service: &RegistryService, cmd: &SubmitCommand) -> anyhow::Result<()> {
    match service.submit_application(cmd.to_details(), TimeStamp::new()) {
        Ok(record) if cmd.json => println!("{}", serde_json::to_string_pretty(&record)?),
        Ok(record) => {
            println!("Application submitted successfully.");
            println!("Application ID: {}", record.application_id);
            println!("Keep this ID to check your application status.");
        }
        Err(RegistryError::Validation(errors)) => {
            eprintln!("The application could not be submitted:");
            for error in errors.errors() {
                eprintln!("  - {error}");
            }
            anyhow::bail!("{} field(s) need attention", errors.errors().len());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn handle_status(service: &RegistryService, cmd: &StatusCommand) -> anyhow::Result<()> {
    let report = service.check_status(&cmd.query, cmd.by.into(), &TimeStamp::new())?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    if let Some(certificate) = &report.certificate {
        println!();
        println!("{certificate}");
    }
    Ok(())
}

fn handle_certificate(service: &RegistryService, cmd: &CertificateCommand) -> anyhow::Result<()> {
    let certificate = match service.find_certificate(&cmd.query, cmd.by.into(), &TimeStamp::new()) {
        Ok(certificate) => certificate,
        Err(RegistryError::NotYetIssued {
            application_id,
            status,
        }) => {
            println!(
                "Application {application_id} is {status}; the certificate has not been issued yet."
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&certificate)?);
    } else {
        println!("{certificate}");
    }
    Ok(())
}

fn handle_list(service: &RegistryService, cmd: &ListCommand) -> anyhow::Result<()> {
    let reports = service.applications(&TimeStamp::new())?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    if reports.is_empty() {
        println!("No applications submitted yet.");
        return Ok(());
    }

    for report in &reports {
        println!(
            "{:<24} {:<13} {}",
            report.record.application_id, report.status, report.record.child_info.full_name
        );
    }
    Ok(())
}

fn handle_theme(store: &ThemeStore, action: ThemeCommand) -> anyhow::Result<()> {
    let theme = match action {
        ThemeCommand::Show => store.load(),
        ThemeCommand::Toggle => store.toggle()?,
        ThemeCommand::Set { theme } => {
            store.save(theme.into())?;
            theme.into()
        }
    };
    println!("{theme}");
    Ok(())
}

fn handle_config(
    config: &Config,
    cmd: &ConfigCommand,
    custom_path: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json: true } => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommand::Show { json: false } => {
            println!("database_path = {}", config.database_path().display());
            println!("records_key   = {}", config.storage.records_key);
            println!("theme_key     = {}", config.storage.theme_key);
        }
        ConfigCommand::Path => {
            let path = custom_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_report(report: &StatusReport) {
    let record = &report.record;

    println!("Application ID: {}", record.application_id);
    println!("Status:         {}", report.status);
    println!(
        "Submitted:      {}",
        record.submitted_at.to_datetime_utc().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Child:          {}", record.child_info.full_name);
    println!();
    for step in &report.progress {
        let marker = match step.state {
            StepState::Completed => "[x]",
            StepState::Active => "[~]",
            StepState::Pending => "[ ]",
        };
        println!("  {marker} {}", step.label);
    }
}
