//! Pharos — command-line tool for the register core.
//!
//! ## Commands
//!
//! - `validate`: parse a register JSON file, print per-record/per-field
//!   report statuses, exit non-zero if any FAIL reports exist.
//! - `release-report`: parse one or more register/page files, compute and
//!   fold their release reports, print the aggregate.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pharos_register::{Record, Register, ReportScore, StaticAliasMap, Vocabularies};
use pharos_store::{InMemoryRegisterPageStore, RegisterPageStore};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pharos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and summarise Pharos registers", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a register and print per-record, per-field report statuses
    Validate {
        /// Path to a register JSON file (record_id -> UI-keyed record object)
        #[arg(short, long)]
        register: PathBuf,

        /// Print machine-readable JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Compute and fold the release report across one or more register files
    ReleaseReport {
        /// Path to a register JSON file; may be repeated for paginated shards
        #[arg(short, long, required = true)]
        register: Vec<PathBuf>,
    },
}

fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Validate { register, json } => cmd_validate(&register, json),
        Commands::ReleaseReport { register } => cmd_release_report(&register).await,
    }
}

fn load_register(path: &PathBuf) -> Result<Register> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading register file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    let object = value
        .as_object()
        .with_context(|| format!("{} must be a JSON object of record_id -> record", path.display()))?;

    let aliases = StaticAliasMap;
    let vocab = Vocabularies::default();
    let mut register = Register::new();
    for (record_id, record_value) in object {
        let record = Record::from_ui_json(record_value, &aliases, &vocab).map_err(|err| {
            warn!(record_id, %err, "structural parse error");
            err
        })?;
        register.insert(record_id.clone(), record);
    }
    info!(records = register.register_data.len(), file = %path.display(), "parsed register");
    Ok(register)
}

#[derive(Serialize)]
struct FieldStatus {
    field: String,
    status: String,
    message: String,
}

fn cmd_validate(path: &PathBuf, json: bool) -> Result<()> {
    let register = load_register(path)?;
    let aliases = StaticAliasMap;

    let mut any_fail = false;
    let mut table: BTreeMap<String, Vec<FieldStatus>> = BTreeMap::new();

    for (record_id, record) in &register.register_data {
        let mut statuses = Vec::new();
        let extras_as_fields = record
            .extras
            .iter()
            .map(|(name, dp)| (name.as_str(), Some(dp)));

        for (field, datapoint) in record.recognised_fields().into_iter().chain(extras_as_fields) {
            let Some(dp) = datapoint else { continue };
            let Some(report) = &dp.report else { continue };
            if report.status == ReportScore::Fail {
                any_fail = true;
            }
            statuses.push(FieldStatus {
                field: pharos_register::FieldAliasMap::ui_name(&aliases, field).to_string(),
                status: format!("{:?}", report.status).to_uppercase(),
                message: report.message.clone(),
            });
        }
        table.insert(record_id.clone(), statuses);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        for (record_id, statuses) in &table {
            println!("{record_id}");
            for status in statuses {
                println!("  {:<32} {:<8} {}", status.field, status.status, status.message);
            }
        }
    }

    if any_fail {
        anyhow::bail!("one or more datapoints failed validation");
    }
    Ok(())
}

/// Stages each input file as a page of one dataset's register in an
/// in-memory `RegisterPageStore`, then folds every page's release report
/// through the store contract — the same path a real paginated backend
/// would take, without requiring one.
async fn cmd_release_report(paths: &[PathBuf]) -> Result<()> {
    let aliases = StaticAliasMap;
    let page_store = InMemoryRegisterPageStore::new();

    for (index, path) in paths.iter().enumerate() {
        let register = load_register(path)?;
        let page_key = format!("page-{index}");
        page_store
            .put_page("cli", "register-report", &page_key, register)
            .await
            .context("staging register page")?;
    }

    let page_keys = page_store
        .list_pages("cli", "register-report")
        .await
        .context("listing staged register pages")?;

    let mut aggregate = pharos_register::ReleaseReport::default();
    for page_key in page_keys {
        let register = page_store
            .get_page("cli", "register-report", &page_key)
            .await
            .context("fetching staged register page")?
            .context("staged register page vanished")?;
        let page_report = register.release_report(&aliases);
        aggregate = pharos_register::ReleaseReport::merge(aggregate, page_report);
    }

    println!("release_status: {:?}", aggregate.release_status);
    println!("success_count:  {}", aggregate.success_count);
    println!("warning_count:  {}", aggregate.warning_count);
    println!("fail_count:     {}", aggregate.fail_count);
    println!("missing_count:  {}", aggregate.missing_count);

    if !aggregate.missing_fields.is_empty() {
        println!("missing_fields:");
        for (record_id, fields) in &aggregate.missing_fields {
            println!("  {record_id}: {}", fields.join(", "));
        }
    }
    if !aggregate.fail_fields.is_empty() {
        println!("fail_fields:");
        for (record_id, fields) in &aggregate.fail_fields {
            println!("  {record_id}: {}", fields.join(", "));
        }
    }

    Ok(())
}
