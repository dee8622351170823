//! boxlog CLI
//!
//! Thin wrapper around boxlog-core for drawing records from the shell.
//!
//! ## Usage
//!
//! ```bash
//! # Draw an error record with two fields
//! boxlog emit --name deploy --level error "boom" "retry=3"
//!
//! # Structured fields, carried context, saved to ./logs
//! boxlog emit --name api.request --json --context req=42 --save --save-dir logs '{"status":500}'
//!
//! # Forward a record to Telegram
//! BOXLOG_TELEGRAM_TOKEN=... BOXLOG_TELEGRAM_CHAT=... boxlog emit --name cron --remote "nightly done"
//!
//! # Show every record kind
//! boxlog demo
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use boxlog_core::{
    EngineConfig, Field, Level, Logger, LoggerConfig, Record, RemoteCredentials, Scope, Writer,
};
use clap::{Parser, Subcommand};
use serde_json::json;

/// boxlog - box-bordered console logging
#[derive(Parser)]
#[command(name = "boxlog")]
#[command(version = "0.1.0")]
#[command(about = "boxlog - box-bordered, color-coded console logging")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON engine configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content width of the box, in chars
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Narrow preset without context or remote delivery
    #[arg(long, global = true)]
    compact: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Disable line timestamps
    #[arg(long, global = true)]
    no_timestamps: bool,

    /// Prefix every line with `| NS |`
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Print the logo first
    #[arg(long, global = true)]
    banner: bool,

    /// Telegram bot token
    #[arg(long, env = "BOXLOG_TELEGRAM_TOKEN", global = true, hide_env_values = true)]
    telegram_token: Option<String>,

    /// Telegram chat that receives forwarded records
    #[arg(long, env = "BOXLOG_TELEGRAM_CHAT", global = true)]
    telegram_chat: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one record
    Emit {
        /// Writer name shown on the START/END lines
        #[arg(short, long)]
        name: String,

        /// info, error, message, success, debug, warning, data or notify
        #[arg(short, long, default_value = "message")]
        level: Level,

        /// Write the rendered record to a file on close
        #[arg(long)]
        save: bool,

        /// Directory for saved files
        #[arg(long, default_value = ".")]
        save_dir: PathBuf,

        /// Context fragment carried into the record (repeatable)
        #[arg(long = "context")]
        context: Vec<String>,

        /// Parse each field as JSON
        #[arg(long)]
        json: bool,

        /// Also forward the record to the remote sink
        #[arg(long)]
        remote: bool,

        /// Field values, one per box section
        fields: Vec<String>,
    },

    /// Draw a sample of every record kind
    Demo {
        /// Write the rendered records to a file on close
        #[arg(long)]
        save: bool,

        /// Directory for saved files
        #[arg(long, default_value = ".")]
        save_dir: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Engine settings from the config file, the preset and the flags, in that order.
fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    let mut engine = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            EngineConfig::from_json(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None if cli.compact => EngineConfig::compact(),
        None => EngineConfig::default(),
    };

    if let Some(width) = cli.width {
        engine = engine.with_width(width);
    }
    if cli.no_color {
        engine.color = false;
    }
    if cli.no_timestamps {
        engine.timestamps = false;
    }
    Ok(engine)
}

fn remote_credentials(cli: &Cli) -> Result<Option<RemoteCredentials>> {
    match (&cli.telegram_token, cli.telegram_chat) {
        (Some(token), Some(recipient)) => Ok(Some(RemoteCredentials {
            token: token.clone(),
            recipient,
        })),
        (None, None) => Ok(None),
        _ => anyhow::bail!("--telegram-token and --telegram-chat must be given together"),
    }
}

fn build_logger(cli: &Cli, save_dir: PathBuf) -> Result<Logger> {
    let config = LoggerConfig {
        namespace: cli.namespace.clone(),
        banner: cli.banner,
        remote: remote_credentials(cli)?,
        engine: engine_config(cli)?,
        save_dir,
    };
    let logger = Logger::new(config).context("Failed to set up logger")?;
    tracing::debug!(
        width = logger.engine().width,
        remote = logger.has_remote(),
        "logger ready"
    );
    Ok(logger)
}

fn parse_fields(raw: &[String], as_json: bool) -> Result<Vec<Field>> {
    raw.iter()
        .map(|s| {
            if as_json {
                let value: serde_json::Value = serde_json::from_str(s)
                    .with_context(|| format!("Field is not valid JSON: {}", s))?;
                Ok(Field::value(&value)?)
            } else {
                Ok(Field::from(s))
            }
        })
        .collect()
}

fn finish(writer: Writer) {
    if let Some(path) = writer.close() {
        println!("Saved: {}", path.display());
    }
}

fn run_demo(logger: &Logger, save: bool) -> Result<()> {
    let mut w = logger.writer("boxlog.demo", save);

    w.info(["Starting demo", "every level draws its own color"])?;
    w.success(["Connected"])?;
    w.debug(["cache hit ratio", "0.93"])?;
    w.message(["A value can span lines\n\nand keep blank rows between them"])?;
    w.warning([
        "A long field is cut at the box width and continues on the next row with a blank label",
    ])?;
    w.data([Field::from(json!({
        "user": "ada",
        "roles": ["admin", "ops"],
        "quota": { "used": 7, "max": 10 },
    }))])?;

    let err = anyhow::anyhow!("disk full").context("upload failed");
    w.error([Field::from("upload aborted"), Field::error(&*err)])?;

    let scope = Scope::new().attach(["req=42"]).attach(["user=ada"]);
    w.from_scope(&scope);
    w.info(["Records drawn after from_scope carry the context"])?;

    if logger.has_remote() {
        w.send(["boxlog demo finished"])?;
    }

    finish(w);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Emit {
            name,
            level,
            save,
            save_dir,
            context,
            json,
            remote,
            fields,
        } => {
            let logger = build_logger(&cli, save_dir.clone())?;
            let fields = parse_fields(fields, *json)?;

            let mut w = logger.writer(name.clone(), *save);
            if !context.is_empty() {
                w.from_scope(&Scope::new().attach(context));
            }

            let mut record = Record::new(*level, fields);
            if *remote || *level == Level::Notify {
                record = record.remote();
            }
            w.emit(record).context("Failed to draw record")?;
            finish(w);
        }

        Commands::Demo { save, save_dir } => {
            let logger = build_logger(&cli, save_dir.clone())?;
            run_demo(&logger, *save)?;
        }
    }

    Ok(())
}
