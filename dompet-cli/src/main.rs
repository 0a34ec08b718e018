use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use dompet_core::{TransactionType, format_date_long, parse_reference, reference_now_in_tz};
use dompet_parse::{classify_scored, parse_amount, parse_date};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod batch;
mod chat;
mod config;
mod ledger;
mod messages;
mod state;

use config::{Config, config_path, init_config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "dompet",
    version,
    about = "Catat keuangan dari pesan bahasa Indonesia"
)]
struct Cli {
    /// Config file (default: ~/.dompet/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Handle one message: extract, check limits, classify
    Parse {
        text: String,

        /// Reference time "YYYY-MM-DD[ HH:MM]" instead of the clock
        #[arg(long)]
        now: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse an amount like "1.5jt" or "Rp 50.000"
    Amount { text: String },

    /// Parse a date expression like "kemarin" or "tgl 15"
    Date {
        text: String,

        #[arg(long)]
        now: Option<String>,
    },

    /// Pick a category for a description
    Classify {
        description: String,

        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionType,
    },

    /// Interactive session over stdin
    Chat {
        #[arg(long)]
        now: Option<String>,
    },

    /// One message per line from a file, written out as a CSV ledger
    Batch {
        #[arg(long)]
        input: PathBuf,

        /// Output CSV (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        now: Option<String>,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false).compact())
        .init();

    let cfg_path = config_path(cli.config.as_deref())?;

    let load = || load_config(&cfg_path);

    match cli.command {
        Command::Parse { text, now, json } => {
            let cfg = load()?;
            let now = reference_now(&cfg, now.as_deref())?;
            let reply = messages::handle_message(&text, &cfg, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", messages::render(&reply, &cfg));
            }
        }

        Command::Amount { text } => match parse_amount(&text) {
            Some(v) => println!("{v}"),
            None => bail!("no amount in {text:?}"),
        },

        Command::Date { text, now } => {
            let cfg = load()?;
            let now = reference_now(&cfg, now.as_deref())?;
            match parse_date(&text, now) {
                Some(d) => println!("{d} ({})", format_date_long(d)),
                None => bail!("no date in {text:?}"),
            }
        }

        Command::Classify { description, kind } => {
            let cfg = load()?;
            let m = classify_scored(&description, kind, &cfg.categories);
            println!("{} (score {})", m.name, m.score);
        }

        Command::Chat { now } => {
            let cfg = load()?;
            let fixed = now.as_deref().map(parse_reference).transpose()?;
            let stdin = io::stdin();
            let ledger = chat::run_chat(stdin.lock(), io::stdout(), &cfg, || match fixed {
                Some(t) => Ok(t),
                None => reference_now(&cfg, None),
            })?;
            info!(transactions = ledger.len(), balance = ledger.balance(), "chat session ended");
        }

        Command::Batch { input, output, now } => {
            let cfg = load()?;
            if !input.exists() {
                bail!("input not found: {}", input.display());
            }
            let now = reference_now(&cfg, now.as_deref())?;
            let file = File::open(&input).with_context(|| format!("open {}", input.display()))?;
            let report = batch::run_batch(BufReader::new(file), &cfg, now)
                .with_context(|| format!("process {}", input.display()))?;

            match &output {
                Some(path) => {
                    let out =
                        File::create(path).with_context(|| format!("create {}", path.display()))?;
                    report.ledger.write_csv(out)?;
                }
                None => report.ledger.write_csv(io::stdout().lock())?,
            }

            info!(
                recorded = report.ledger.len(),
                skipped = report.skipped.len(),
                balance = report.ledger.balance(),
                "batch done"
            );
            for s in &report.skipped {
                eprintln!("line {}: {:?} ({})", s.line, s.text, skip_reason(&s.reply));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if init_config(&cfg_path)? {
                    println!("Wrote {}", cfg_path.display());
                } else {
                    println!("Config already exists: {}", cfg_path.display());
                }
            }
            ConfigCommand::Show => {
                let cfg = load()?;
                println!("# {}", cfg_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Explicit `--now`, or the clock in the configured timezone
fn reference_now(cfg: &Config, explicit: Option<&str>) -> Result<NaiveDateTime> {
    match explicit {
        Some(s) => parse_reference(s).context("invalid --now"),
        None => reference_now_in_tz(Utc::now(), &cfg.locale.timezone),
    }
}

fn skip_reason(reply: &messages::Reply) -> &'static str {
    match reply {
        messages::Reply::Recorded { .. } => "recorded",
        messages::Reply::FutureDate { .. } => "date too far ahead",
        messages::Reply::AmountOutOfRange { .. } => "amount out of range",
        messages::Reply::NotUnderstood => "no transaction",
    }
}
