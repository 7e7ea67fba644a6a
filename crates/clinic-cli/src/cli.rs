//! CLI argument definitions for the clinic record service.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clinic",
    version,
    about = "Clinic record service - ingest and query patient/appointment exports",
    long_about = "Ingest combined patient/appointment CSV exports into a local database.\n\n\
                  Rows are cleaned and validated, patients are deduplicated on their\n\
                  external id, and appointments are linked to the patients created in\n\
                  the same run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values (names, emails, phone numbers) in log output.
    ///
    /// By default row-level values are redacted from logs. Only enable this
    /// when debugging with data you are allowed to expose.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest a patient/appointment CSV export.
    Ingest(IngestArgs),

    /// List stored patients with their appointments.
    Patients(StoreArgs),

    /// List stored appointments.
    Appointments(StoreArgs),

    /// Show a single patient by external patient id.
    Patient(PatientArgs),
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Path to the CSV export to ingest.
    #[arg(value_name = "FILE", required_unless_present = "demo")]
    pub input: Option<PathBuf>,

    /// Ingest the bundled demo export instead of a file.
    #[arg(long = "demo", conflicts_with = "input")]
    pub demo: bool,

    /// Validate and report without writing to the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the full ingest report as JSON instead of a summary table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser)]
pub struct PatientArgs {
    /// External patient id of the patient to show.
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Print the patient as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Path to the SQLite database file.
    #[arg(long = "db", value_name = "PATH", default_value = "clinic.db")]
    pub db: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
