// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

mod cli;
mod core;
mod logging;
mod report;
mod stats;

use crate::cli::{Cli, Command};
use crate::core::config::ScanConfig;
use crate::core::validation;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let args = Cli::parse();
    let config = ScanConfig::default();

    match args.command {
        Some(Command::Stats { file, suffix, limit, delay_secs }) => {
            stats::run(
                &config,
                &file,
                suffix.as_deref(),
                limit,
                Duration::from_secs(delay_secs),
            )
            .await
        }
        None => evaluate_single(&config, args).await,
    }
}

async fn evaluate_single(config: &ScanConfig, args: Cli) -> Result<()> {
    // A domain given on the command line must be valid as-is; only the
    // interactive prompt retries.
    let (domain, interactive) = match args.domain {
        Some(input) => (validation::validate(&input)?, false),
        None => {
            report::console::print_banner();
            (cli::prompt_domain()?, true)
        }
    };

    if !args.json {
        println!("Evaluating {} ...", domain);
    }
    let evaluation = crate::core::evaluate(config, &domain).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        report::console::print_report(&evaluation);
    }

    let want_pdf = args.pdf || (interactive && !args.json && cli::confirm_pdf()?);
    if want_pdf {
        let path = PathBuf::from(format!("report_{}.pdf", domain.replace('.', "_")));
        // A failed PDF write never invalidates the computed report.
        match report::pdf::write_report(&path, &evaluation) {
            Ok(()) => println!("PDF report written to {}", path.display()),
            Err(e) => {
                warn!(error = %e, "PDF generation failed.");
                eprintln!("{} could not write PDF report: {}", "warning:".yellow().bold(), e);
            }
        }
    }

    Ok(())
}
