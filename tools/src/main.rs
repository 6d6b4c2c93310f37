use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use qrwallet_tools::{
    encode_entries, entries_from_payloads, entry_views, format_entries_pretty,
    format_report_pretty, inspect_input, load_config,
};
use tracing_subscriber::EnvFilter;
use urlstate::UrlStateManager;

#[derive(Parser)]
#[command(
    name = "qrwallet-tools",
    version,
    about = "qrwallet URL token encoding and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode payloads into a wallet token or URL.
    Encode {
        /// Payloads, in wallet order.
        entries: Vec<String>,
        /// Read additional payloads from stdin, one per line.
        #[arg(long)]
        stdin: bool,
        /// Write the token into this URL's query string.
        #[arg(long)]
        base_url: Option<String>,
        /// Wallet config JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Decode a wallet URL or token into its entries.
    Decode {
        /// Wallet URL, `?token` or bare token.
        input: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Wallet config JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Report token structure and stage sizes.
    Inspect {
        /// Wallet URL, `?token` or bare token.
        input: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        /// Wallet config JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            entries,
            stdin,
            base_url,
            config,
        } => {
            let manager = build_manager(config)?;
            let mut payloads = entries;
            if stdin {
                payloads.extend(read_stdin_lines()?);
            }
            if payloads.is_empty() && base_url.is_none() {
                bail!("nothing to encode: pass payloads or --stdin");
            }
            let entries = entries_from_payloads(payloads, manager.codec().schema());
            let output = encode_entries(&manager, &entries, base_url.as_deref())?;
            println!("{output}");
        }
        Command::Decode {
            input,
            format,
            config,
        } => {
            let manager = build_manager(config)?;
            let decoded = inspect_input(&manager, &input)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&entry_views(&decoded.entries))
                        .context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    println!("{}", format_entries_pretty(&decoded.entries));
                }
            }
        }
        Command::Inspect {
            input,
            format,
            config,
        } => {
            let manager = build_manager(config)?;
            let decoded = inspect_input(&manager, &input)?;
            match format {
                OutputFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&decoded.report).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    println!("{}", format_report_pretty(&decoded.report));
                }
            }
        }
    }
    Ok(())
}

fn build_manager(config: Option<PathBuf>) -> Result<UrlStateManager> {
    let config = load_config(config.as_deref())?;
    UrlStateManager::new(&config).context("build url state manager")
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("read stdin")?;
    Ok(input.lines().map(str::to_string).collect())
}
