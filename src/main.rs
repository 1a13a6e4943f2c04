//! Command line front end for QR code statistics.
//!
//! # Usage
//!
//! ```bash
//! # Interactive: prompts for token, date range and export
//! cargo run
//!
//! # Non-interactive run for August 2023, exporting to the default directory
//! cargo run -- --token "$TOKEN" --from 2023-08-01 --to 2023-08-31 --export --no-input
//!
//! # Summary as JSON
//! cargo run -- --json --no-export
//! ```
//!
//! # Environment Variables
//!
//! See [`qrcg_stats::config`]. `QRCG_ACCESS_TOKEN` replaces `--token`.

use qrcg_stats::application::services::{InventoryService, StatsReport, StatsService, Termination};
use qrcg_stats::config::{self, Config};
use qrcg_stats::domain::date_window::{self, ALL_TIME, DateWindow};
use qrcg_stats::infrastructure::export::{CsvExporter, default_export_path};
use qrcg_stats::infrastructure::http::ReqwestTransport;
use qrcg_stats::report::render_report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Bulk QR code statistics for a QR Code Generator account.
#[derive(Parser)]
#[command(name = "qrcg-stats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API access token
    #[arg(short, long)]
    token: Option<String>,

    /// Count only codes created from this date (YYYY-MM-DD or "all time")
    #[arg(long)]
    from: Option<String>,

    /// Count only codes created until this date (YYYY-MM-DD or "all time")
    #[arg(long)]
    to: Option<String>,

    /// Export the included codes as CSV without asking
    #[arg(long, conflicts_with = "no_export")]
    export: bool,

    /// Never export
    #[arg(long)]
    no_export: bool,

    /// Export destination (default: timestamped file in QRCG_EXPORT_DIR)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the summary as JSON instead of the formatted report
    #[arg(long)]
    json: bool,

    /// Never prompt; missing answers take their defaults
    #[arg(long)]
    no_input: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let interactive = !cli.no_input && std::io::stdin().is_terminal();

    if !cli.json {
        println!("{}", "📱 QRCG API: Bulk QR Code Statistics".bright_cyan().bold());
    }

    let token = resolve_token(&cli, &config, interactive)?;
    let window = resolve_window(&cli, interactive)?;

    let transport = ReqwestTransport::new(config.http_timeout())?;
    let inventory = InventoryService::new(Arc::new(transport), config.api_url.clone())
        .with_page_size(config.page_size)
        .with_max_pages(config.max_pages);
    let stats = StatsService::new(inventory);

    let report = stats.collect(&token, window.as_ref()).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.aggregate)?);
    } else {
        println!();
        println!("{}", render_report(&report));
        println!();
    }

    if should_export(&cli, &report, interactive)? {
        export(&cli, &config, &report);
    }

    Ok(())
}

/// Initializes the tracing subscriber on stderr.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Token from `--token`, then `QRCG_ACCESS_TOKEN`, then a hidden prompt.
fn resolve_token(cli: &Cli, config: &Config, interactive: bool) -> Result<String> {
    if let Some(token) = cli.token.clone().or_else(|| config.access_token.clone()) {
        return Ok(token);
    }

    if !interactive {
        anyhow::bail!("No access token: pass --token or set QRCG_ACCESS_TOKEN");
    }

    let token = Password::new()
        .with_prompt("🔑 Enter your API access token")
        .interact()?;
    Ok(token)
}

/// Window from `--from`/`--to`, else asked interactively. `None` means all time.
fn resolve_window(cli: &Cli, interactive: bool) -> Result<Option<DateWindow>> {
    if cli.from.is_some() || cli.to.is_some() {
        let start = cli.from.as_deref().unwrap_or(ALL_TIME);
        let end = cli.to.as_deref().unwrap_or(ALL_TIME);
        return Ok(DateWindow::parse(start, end)?);
    }

    if !interactive {
        return Ok(None);
    }

    let specify = Confirm::new()
        .with_prompt("📅 Would you like to specify date ranges?")
        .default(false)
        .interact()?;
    if !specify {
        return Ok(None);
    }

    loop {
        let start = prompt_date("⏩ Search for QR Codes created from (YYYY-MM-DD)")?;
        let end = prompt_date("⏪ Search for QR Codes created until (YYYY-MM-DD)")?;
        match DateWindow::parse(&start, &end) {
            Ok(window) => return Ok(window),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

fn prompt_date(prompt: &str) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            date_window::parse_bound(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(input)
}

fn should_export(cli: &Cli, report: &StatsReport, interactive: bool) -> Result<bool> {
    if cli.no_export || matches!(report.termination, Termination::Empty) {
        return Ok(false);
    }
    if cli.export {
        return Ok(true);
    }
    if !interactive {
        return Ok(false);
    }

    let answer = Confirm::new()
        .with_prompt("📥 Do you want to download the data as CSV?")
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Writes the export. Failures are reported and do not change the exit status.
fn export(cli: &Cli, config: &Config, report: &StatsReport) {
    let destination = cli.output.clone().unwrap_or_else(|| {
        default_export_path(&config.export_dir, chrono::Local::now().naive_local())
    });

    let exporter = CsvExporter::new(config.export_schema());
    match exporter.export(&report.aggregate.records, &destination) {
        Ok(bytes) => println!(
            "{}",
            format!(
                "✅ CSV file '{}' has been successfully saved! ({} bytes)",
                destination.display(),
                bytes
            )
            .green()
            .bold()
        ),
        Err(e) => eprintln!("{}", format!("❌ Export failed: {}", e).red().bold()),
    }
}
