use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use illimity_core::batch::build_transactions;
use illimity_core::{
    LedgerSink, NotificationEngine, NotificationSource, RawNotification, TransactionBuilder,
    run_batch,
};
use illimity_ingest::{FileSource, NotificationFile, SourceFormat, StdinSource, read_notification};
use illimity_ledger::{CsvFileSink, JsonFileSink};

mod config;
mod state;

use config::{Config, Overrides};

#[derive(Parser, Debug)]
#[command(
    name = "illimity-ynab",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ILLIMITY_BUILD_SHA"), ")"),
    about = "Turn illimity notification emails into YNAB transactions"
)]
struct Cli {
    /// Ledger account id (overrides ynab.account_id)
    #[arg(long, global = true)]
    account_id: Option<String>,

    /// Cash-account transfer payee id (overrides ynab.cash_account_transfer_payee_id)
    #[arg(long, global = true)]
    cash_payee_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print which notification template a file matches
    Classify {
        /// .eml or .txt file, `-` for stdin
        file: PathBuf,
    },

    /// Print date, amount and payee extracted from a notification as JSON
    Extract {
        /// .eml or .txt file, `-` for stdin
        file: PathBuf,
    },

    /// Convert every pending notification into one YNAB import
    Sync {
        /// File or directory of notifications (defaults to source.inbox)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file, `-` for stdout (defaults to ~/.illimity/exports/ynab-<timestamp>.<ext>)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Move processed files into source.archive once the output is written
        #[arg(long)]
        archive: bool,

        /// Only print what would be written; nothing is moved
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage ~/.illimity/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with empty ids
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        account_id: cli.account_id,
        cash_payee_id: cli.cash_payee_id,
    };

    match cli.command {
        Command::Classify { file } => {
            let cfg = config::load_config()?;
            let engine = NotificationEngine::new(&cfg.engine_config(&overrides))?;
            let raw = read_input(&file)?;
            match engine.classify(&raw) {
                Ok(shape) => println!("{shape}"),
                Err(e) => println!("unrecognized ({e})"),
            }
        }

        Command::Extract { file } => {
            let cfg = config::load_config()?;
            let engine = NotificationEngine::new(&cfg.engine_config(&overrides))?;
            let raw = read_input(&file)?;
            let result = engine.extract(&raw);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Sync {
            input,
            out,
            format,
            archive,
            dry_run,
        } => {
            let cfg = config::load_config()?;
            sync(&cfg, &overrides, input, out, format, archive, dry_run)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_input(file: &Path) -> Result<RawNotification> {
    if file.as_os_str() == "-" {
        let mut source = StdinSource::new(false);
        return Ok(source
            .fetch()?
            .into_iter()
            .next()
            .unwrap_or_else(|| RawNotification::new("")));
    }

    let format = SourceFormat::from_path(file).unwrap_or(SourceFormat::Text);
    read_notification(&NotificationFile {
        path: file.to_path_buf(),
        format,
    })
}

fn sync(
    cfg: &Config,
    overrides: &Overrides,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    format: Format,
    archive: bool,
    dry_run: bool,
) -> Result<()> {
    let engine_cfg = cfg.sync_engine_config(overrides)?;
    let engine = NotificationEngine::new(&engine_cfg)?;
    let builder = TransactionBuilder::new(&engine_cfg);

    let home = state::illimity_home()?;
    let input = input.unwrap_or_else(|| state::resolve_in_home(&home, &cfg.source.inbox));
    let mut source = FileSource::new(&input);

    if dry_run {
        let notifications = source.fetch()?;
        let (records, skipped) = build_transactions(&engine, &builder, &notifications);
        print_records(format, &records)?;
        println!(
            "\n{} notifications, {} transactions, {} skipped (dry run)",
            notifications.len(),
            records.len(),
            skipped
        );
        return Ok(());
    }

    if archive {
        source = source.with_archive(state::resolve_in_home(&home, &cfg.source.archive));
    }

    let out = match out {
        Some(p) if p.as_os_str() == "-" => None,
        Some(p) => Some(p),
        None => Some(state::exports_dir()?.join(format!(
            "ynab-{}.{}",
            Local::now().format("%Y%m%d-%H%M%S"),
            format.extension()
        ))),
    };

    let mut sink: Box<dyn LedgerSink> = match format {
        Format::Json => Box::new(JsonFileSink::new(out.clone())),
        Format::Csv => Box::new(CsvFileSink::new(out.clone())),
    };

    let report = run_batch(&engine, &builder, &mut source, sink.as_mut())?;

    if report.submitted == 0 {
        println!(
            "No transactions to import ({} notifications, {} skipped).",
            report.fetched, report.skipped
        );
        return Ok(());
    }

    println!(
        "Processed {} transactions ({} notifications, {} skipped).",
        report.submitted, report.fetched, report.skipped
    );
    if let Some(p) = out {
        println!("Wrote {}", p.display());
    }
    if report.acknowledged && archive {
        println!("Archived processed notifications.");
    }
    Ok(())
}

fn print_records(format: Format, records: &[illimity_core::TransactionRecord]) -> Result<()> {
    match format {
        Format::Json => JsonFileSink::new(None).submit(records),
        Format::Csv => CsvFileSink::new(None).submit(records),
    }
}
