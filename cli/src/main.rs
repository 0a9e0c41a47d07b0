//! MediBuddy command-line interface.
//!
//! Every command opens the runtime from configuration, performs one
//! operation, and prints the result as pretty JSON on stdout.
//!
//! Usage:
//!   medibuddy status
//!   medibuddy patient upsert --file patient.json
//!   medibuddy run p1 full_check
//!   medibuddy run p1 log_symptom --data '{"symptom": "Dizziness", "severity": 7}'
//!   medibuddy dose p1 --medication Aspirin --missed

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use medibuddy_contracts::error::{MediError, MediResult};
use medibuddy_runtime::{MediBuddy, MediConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// MediBuddy: medication tracking, interaction checks, and symptom triage.
#[derive(Parser)]
#[command(
    name = "medibuddy",
    version,
    about = "MediBuddy medication and symptom tracking runtime"
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the patient/event store file.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Override the notification log file.
    #[arg(long, global = true)]
    notifications_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Service name, version, and patient count.
    Status,
    /// Manage patient records.
    Patient {
        #[command(subcommand)]
        command: PatientCommand,
    },
    /// Run an action (check_interactions, schedule_reminders, log_symptom, full_check).
    Run {
        patient_id: String,
        action: String,
        /// Action data as a JSON object.
        #[arg(long)]
        data: Option<String>,
    },
    /// Adherence, interactions, recent symptoms, and alerts for a patient.
    Summary { patient_id: String },
    /// Every recorded event for a patient.
    Events { patient_id: String },
    /// Record a scheduled dose as taken (or missed).
    Dose {
        patient_id: String,
        #[arg(long)]
        medication: String,
        #[arg(long)]
        missed: bool,
    },
    /// Caregiver notifications, optionally for one patient.
    Notifications {
        #[arg(long)]
        patient: Option<String>,
    },
}

#[derive(Subcommand)]
enum PatientCommand {
    /// Insert or replace a patient record.
    Upsert {
        /// Read the record from a JSON file.
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        file: Option<PathBuf>,
        /// The record as an inline JSON string.
        #[arg(long)]
        json: Option<String>,
    },
    Get { patient_id: String },
    List,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=info (or debug) to see runtime activity on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("medibuddy error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> MediResult<MediConfig> {
    let mut config = match &cli.config {
        Some(path) => MediConfig::from_file(path)?,
        None => MediConfig::default(),
    };
    if let Some(path) = &cli.data_file {
        config.storage.data_file = path.clone();
    }
    if let Some(path) = &cli.notifications_file {
        config.storage.notifications_file = path.clone();
    }
    debug!(?config, "resolved configuration");
    Ok(config)
}

fn run(cli: Cli) -> MediResult<()> {
    let app = MediBuddy::open(load_config(&cli)?)?;

    match cli.command {
        Command::Status => print_json(&app.status()?),
        Command::Patient { command } => match command {
            PatientCommand::Upsert { file, json } => {
                let raw = match (file, json) {
                    (Some(path), _) => std::fs::read_to_string(&path).map_err(|e| {
                        MediError::Validation {
                            reason: format!("failed to read '{}': {}", path.display(), e),
                        }
                    })?,
                    (None, Some(json)) => json,
                    (None, None) => {
                        return Err(MediError::Validation {
                            reason: "either --file or --json is required".to_string(),
                        })
                    }
                };
                let patient = app.upsert_patient_json(&parse_json(&raw)?)?;
                print_json(&patient)
            }
            PatientCommand::Get { patient_id } => match app.get_patient(&patient_id)? {
                Some(patient) => print_json(&patient),
                None => Err(MediError::PatientNotFound { patient_id }),
            },
            PatientCommand::List => print_json(&app.list_patients()?),
        },
        Command::Run { patient_id, action, data } => {
            let data = data.as_deref().map(parse_json).transpose()?;
            let outcome = app.orchestrate(&patient_id, &action, data.as_ref())?;
            print_json(&outcome)
        }
        Command::Summary { patient_id } => print_json(&app.summary(&patient_id)?),
        Command::Events { patient_id } => print_json(&app.events(&patient_id)?),
        Command::Dose { patient_id, medication, missed } => {
            print_json(&app.record_dose(&patient_id, &medication, !missed)?)
        }
        Command::Notifications { patient } => {
            print_json(&app.notifications(patient.as_deref())?)
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_json(raw: &str) -> MediResult<Value> {
    serde_json::from_str(raw).map_err(|e| MediError::Validation {
        reason: format!("invalid JSON input: {}", e),
    })
}

fn print_json<T: Serialize>(value: &T) -> MediResult<()> {
    let body = serde_json::to_string_pretty(value).map_err(|e| MediError::StorageFailed {
        reason: format!("failed to render output: {}", e),
    })?;
    println!("{}", body);
    Ok(())
}
