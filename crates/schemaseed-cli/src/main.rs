//! Schemaseed CLI
//!
//! Seeds a graph server with schemas:
//! - `vocab`: translate a vocabulary published as type/property tables
//!   (schema.org's `all-layers-*.csv`) into class and property definitions
//! - `planes`: the airline tutorial schema plus a few airport instances
//!
//! Either command can `--dry-run` to print the queries instead of sending them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use schemaseed_client::{
    ensure_database, execute_batches, DatabaseRef, DatabaseSpec, EnsureOutcome, GraphClient,
    HttpGraphClient, RunReport, ServerConfig, ServerOverrides,
};
use schemaseed_ingest_vocab::{lower_plan, plan_vocabulary_files, PrimitiveTypeMap, VocabularyPlan};
use schemaseed_woql::NamedQuery;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod planes;

#[derive(Parser)]
#[command(name = "schemaseed")]
#[command(
    author,
    version,
    about = "Schemaseed: seed graph databases with vocabulary schemas"
)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `schemaseed_client=debug`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

/// Connection flags. Unset flags fall back to `SCHEMASEED_*` env vars, then
/// local-server defaults.
#[derive(Args, Debug, Clone, Default)]
struct ServerArgs {
    /// Server base URL (env: SCHEMASEED_SERVER).
    #[arg(long, global = true)]
    server: Option<String>,
    /// Account that owns the database (env: SCHEMASEED_ACCOUNT).
    #[arg(long, global = true)]
    account: Option<String>,
    /// User to authenticate as (env: SCHEMASEED_USER).
    #[arg(long, global = true)]
    user: Option<String>,
    /// API key (env: SCHEMASEED_KEY; prefer the env var over the flag).
    #[arg(long, global = true)]
    key: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Accept self-signed TLS certificates.
    #[arg(long, global = true)]
    insecure: bool,
}

impl ServerArgs {
    fn overrides(&self) -> ServerOverrides {
        ServerOverrides {
            server_url: self.server.clone(),
            account: self.account.clone(),
            user: self.user.clone(),
            key: self.key.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            accept_invalid_certs: self.insecure,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// Print the queries as JSON instead of executing them.
    #[arg(long)]
    dry_run: bool,
    /// With `--dry-run`, write the queries here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a vocabulary from its types and properties tables.
    Vocab {
        /// Types table (columns: id,label,comment,subTypes,subTypeOf).
        #[arg(long)]
        types: PathBuf,
        /// Properties table (columns: id,label,comment,domainIncludes,rangeIncludes).
        #[arg(long)]
        properties: PathBuf,
        #[arg(long, default_value = "schema_tutorial")]
        db: String,
        #[arg(long, default_value = "Schema Tutorial")]
        label: String,
        #[arg(long, default_value = "Create a graph with Schema.org data")]
        description: String,
        /// Also write the translated operations, grouped by batch, as JSON.
        #[arg(long)]
        plan_out: Option<PathBuf>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Load the airline tutorial schema and sample airports.
    Planes {
        #[arg(long, default_value = planes::DEFAULT_DB)]
        db: String,
        #[arg(long, default_value = planes::DEFAULT_LABEL)]
        label: String,
        #[command(flatten)]
        target: TargetArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Vocab {
            types,
            properties,
            db,
            label,
            description,
            plan_out,
            target,
        } => cmd_vocab(
            &cli.server,
            &types,
            &properties,
            plan_out.as_deref(),
            DatabaseTarget {
                db,
                label,
                description: Some(description),
            },
            &target,
        ),
        Commands::Planes { db, label, target } => cmd_planes(
            &cli.server,
            DatabaseTarget {
                db,
                label,
                description: None,
            },
            &target,
        ),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct DatabaseTarget {
    db: String,
    label: String,
    description: Option<String>,
}

impl DatabaseTarget {
    /// The configured account owns the database; `--user` only authenticates.
    fn spec(&self, config: &ServerConfig) -> DatabaseSpec {
        let spec = DatabaseSpec::new(
            DatabaseRef::new(config.account.clone(), self.db.clone()),
            self.label.clone(),
        );
        match &self.description {
            Some(description) => spec.with_description(description.clone()),
            None => spec,
        }
    }
}

fn cmd_vocab(
    server: &ServerArgs,
    types: &Path,
    properties: &Path,
    plan_out: Option<&Path>,
    target: DatabaseTarget,
    args: &TargetArgs,
) -> Result<()> {
    eprintln!(
        "{} vocabulary {} + {}",
        "Translating".green().bold(),
        types.display(),
        properties.display()
    );
    let plan = plan_vocabulary_files(types, properties, &PrimitiveTypeMap::schema_org())
        .context("failed to read vocabulary tables")?;
    for batch in plan.summary() {
        eprintln!(
            "  {} {} ({} groups, {} operations)",
            "→".cyan(),
            batch.name,
            batch.groups,
            batch.operations
        );
    }
    if let Some(path) = plan_out {
        write_json(path, &plan_json(&plan)?)?;
    }
    let batches = lower_plan(&plan);
    deliver(server, &target, &batches, args)
}

fn cmd_planes(server: &ServerArgs, target: DatabaseTarget, args: &TargetArgs) -> Result<()> {
    eprintln!("{} airline tutorial", "Building".green().bold());
    deliver(server, &target, &planes::batches(), args)
}

fn deliver(
    server: &ServerArgs,
    target: &DatabaseTarget,
    batches: &[NamedQuery],
    args: &TargetArgs,
) -> Result<()> {
    if args.dry_run {
        return write_batches(batches, args.out.as_deref());
    }

    let config = ServerConfig::resolve(server.overrides());
    let spec = target.spec(&config);
    let client = HttpGraphClient::connect(config.clone())
        .with_context(|| format!("failed to connect to {}", config.server_url))?;
    eprintln!("{} connected to {}", "ok".green().bold(), config.server_url);

    let run = import(&client, &spec, batches)?;
    eprintln!(
        "{} {} batches executed, {} skipped, {} inserts",
        "ok".green().bold(),
        run.executed.len(),
        run.skipped.len(),
        run.inserts()
    );
    Ok(())
}

/// Ensure the database, then run every batch in order.
fn import<C: GraphClient>(
    client: &C,
    spec: &DatabaseSpec,
    batches: &[NamedQuery],
) -> Result<RunReport> {
    match ensure_database(client, spec)
        .with_context(|| format!("failed to prepare database {}", spec.db.path()))?
    {
        EnsureOutcome::Created => {
            eprintln!("{} created database {}", "ok".green().bold(), spec.db.path())
        }
        EnsureOutcome::AlreadyExisted => eprintln!(
            "{} database {} already exists; adding to it",
            "warning:".yellow().bold(),
            spec.db.path()
        ),
    }

    let run = execute_batches(client, &spec.db, batches)?;
    for batch in &run.executed {
        eprintln!(
            "  {} {} (inserts={})",
            "→".cyan(),
            batch.name,
            batch.report.inserts
        );
    }
    Ok(run)
}

fn batches_json(batches: &[NamedQuery]) -> serde_json::Value {
    serde_json::Value::Array(
        batches
            .iter()
            .map(|b| serde_json::json!({ "name": b.name, "query": b.query.to_json() }))
            .collect(),
    )
}

/// Per-batch counts followed by the operations themselves.
fn plan_json(plan: &VocabularyPlan) -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "summary": serde_json::to_value(plan.summary())?,
        "plan": serde_json::to_value(plan)?,
    }))
}

fn write_batches(batches: &[NamedQuery], out: Option<&Path>) -> Result<()> {
    let json = batches_json(batches);
    match out {
        Some(path) => write_json(path, &json),
        None => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
    }
}

fn write_json(path: &Path, json: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(json)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
    Ok(())
}
