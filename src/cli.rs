// src/cli.rs

use crate::core::validation;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mailvet", version, about = "Email security posture checker: DMARC, SPF, DKIM, TLS and WHOIS in one score.")]
pub struct Cli {
    /// Domain to evaluate; prompted for interactively when omitted.
    pub domain: Option<String>,

    /// Write a PDF report without asking.
    #[arg(long)]
    pub pdf: bool,

    /// Print the full evaluation as JSON instead of the console report.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a list of domains and print deployment statistics.
    Stats {
        /// File with one domain per line; blank lines and '#' comments are skipped.
        #[arg(long)]
        file: PathBuf,

        /// Only keep domains ending with this suffix (e.g. ".fr").
        #[arg(long)]
        suffix: Option<String>,

        /// Stop after this many domains.
        #[arg(long)]
        limit: Option<usize>,

        /// Pause between domains, in seconds, to avoid hammering upstream services.
        #[arg(long, default_value_t = 2)]
        delay_secs: u64,
    },
}

/// Prompts for a domain until the input passes syntax validation.
/// The validator itself is pure; only the retry loop lives here.
pub fn prompt_domain() -> Result<String> {
    let stdin = io::stdin();
    loop {
        print!("Domain to check: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(eyre!("stdin closed before a valid domain was entered"));
        }
        match validation::validate(&line) {
            Ok(domain) => return Ok(domain),
            Err(e) => eprintln!("{}. Please try again.", e),
        }
    }
}

/// Asks whether a PDF report should be written. Defaults to no.
pub fn confirm_pdf() -> Result<bool> {
    print!("Generate a detailed PDF report? (y/N): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_plain_domain_argument() {
        let cli = Cli::parse_from(["mailvet", "example.com"]);
        assert_eq!(cli.domain.as_deref(), Some("example.com"));
        assert!(!cli.pdf);
        assert!(!cli.json);
    }

    #[test]
    fn parses_the_stats_subcommand() {
        let cli = Cli::parse_from([
            "mailvet", "stats", "--file", "domains.txt", "--suffix", ".fr", "--limit", "100",
        ]);
        match cli.command {
            Some(Command::Stats { file, suffix, limit, delay_secs }) => {
                assert_eq!(file, PathBuf::from("domains.txt"));
                assert_eq!(suffix.as_deref(), Some(".fr"));
                assert_eq!(limit, Some(100));
                assert_eq!(delay_secs, 2);
            }
            _ => panic!("expected stats subcommand"),
        }
    }
}
