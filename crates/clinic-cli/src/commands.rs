//! Command implementations wired between the CLI arguments and the pipeline.

use anyhow::Context;
use clinic_model::IngestReport;
use clinic_store::{MemoryStore, RecordStore, SqliteStore};
use tracing::{error, info};

use clinic_cli::pipeline::{self, IngestSource};

use crate::cli::{IngestArgs, PatientArgs, StoreArgs};
use crate::summary::{print_appointments, print_ingest_summary, print_patient, print_patients};

/// Run the ingest subcommand.
///
/// Fatal problems (unreadable input, database failures) are folded into a
/// failure report so callers always get the same report shape; the returned
/// flag mirrors `report.success`.
pub fn run_ingest(args: &IngestArgs) -> anyhow::Result<bool> {
    let source = match &args.input {
        Some(path) => IngestSource::Path(path.clone()),
        None => IngestSource::Demo,
    };
    let report = match ingest_into_store(args, &source) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "ingestion failed");
            IngestReport {
                success: false,
                message: format!("{err:#}"),
                ..IngestReport::default()
            }
        }
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.success {
        print_ingest_summary(&report);
    } else {
        eprintln!("error: {}", report.message);
    }
    Ok(report.success)
}

fn ingest_into_store(args: &IngestArgs, source: &IngestSource) -> anyhow::Result<IngestReport> {
    if args.dry_run {
        info!("dry run, records will not be persisted");
        let mut store = MemoryStore::new();
        pipeline::run_ingest(source, &mut store)
    } else {
        let mut store = open_store(&args.store)?;
        pipeline::run_ingest(source, &mut store)
    }
}

/// Run the patients subcommand.
pub fn run_patients(args: &StoreArgs) -> anyhow::Result<()> {
    let store = open_store(args)?;
    let patients = store.patients()?;
    if patients.is_empty() {
        println!("No patients stored.");
        return Ok(());
    }
    print_patients(&patients);
    Ok(())
}

/// Run the appointments subcommand.
pub fn run_appointments(args: &StoreArgs) -> anyhow::Result<()> {
    let store = open_store(args)?;
    let appointments = store.appointments()?;
    if appointments.is_empty() {
        println!("No appointments stored.");
        return Ok(());
    }
    print_appointments(&appointments);
    Ok(())
}

/// Run the patient detail subcommand. A missing id is reported, not an error.
pub fn run_patient(args: &PatientArgs) -> anyhow::Result<()> {
    let store = open_store(&args.store)?;
    match store.patient(args.id)? {
        Some(entry) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                print_patient(&entry);
            }
        }
        None => println!("No patient with id {}.", args.id),
    }
    Ok(())
}

fn open_store(args: &StoreArgs) -> anyhow::Result<SqliteStore> {
    SqliteStore::open(&args.db)
        .with_context(|| format!("failed to open database {}", args.db.display()))
}
