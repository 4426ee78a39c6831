// src/report/console.rs

//! Console rendering of an evaluation: banner, result table, score
//! and the remediation list. Pure consumer of the core's output.

use crate::core::knowledge_base;
use crate::core::models::{Evaluation, ScanResult, Severity};
use crate::report::whois_fields;
use colored::Colorize;

const BANNER: &str = r#"
                  _ _            _
  _ __ ___   __ _(_) |_   _____ | |_
 | '_ ` _ \ / _` | | \ \ / / _ \| __|
 | | | | | | (_| | | |\ V / (_) | |_
 |_| |_| |_|\__,_|_|_| \_/ \___/ \__|
"#;

pub fn print_banner() {
    println!("{}", BANNER.cyan().bold());
    println!("{}", "Email security posture checker".dimmed());
}

/// Renders the full per-domain report to stdout.
pub fn print_report(evaluation: &Evaluation) {
    let facts = &evaluation.facts;

    println!();
    println!("{}", format!("Analysis of {}", evaluation.domain).bold().underline());
    println!();

    print_row("MX", &describe_bool(facts.mx_present, "mail server found", "no mail server"));
    print_row("DMARC", &describe_record(&facts.dmarc));
    print_row("SPF", &describe_record(&facts.spf));
    print_row(
        "DKIM",
        &match &facts.dkim {
            Ok(Some(dkim)) => format!(
                "{} (selector: {})",
                "found".green(),
                dkim.selector
            ),
            _ => "not found".yellow().to_string(),
        },
    );
    print_row(
        "TLS",
        &match &facts.certificate {
            Ok(Some(cert)) => format!(
                "{} issued by {} on port {}, expires {}",
                "certificate".green(),
                cert.issuer,
                cert.port,
                cert.not_after.format("%Y-%m-%d")
            ),
            _ => "no valid certificate".yellow().to_string(),
        },
    );
    print_whois(&facts.whois);

    println!();
    let score_text = format!("Score: {} / 100", evaluation.report.score);
    let colored_score = match evaluation.report.score {
        80.. => score_text.green().bold(),
        50..=79 => score_text.yellow().bold(),
        _ => score_text.red().bold(),
    };
    println!("  {}", colored_score);

    print_findings(evaluation);
}

fn print_row(label: &str, value: &str) {
    // Pad before coloring: ANSI escapes would throw the width off.
    let padded = format!("{:<6}", format!("{}:", label));
    println!("  {} {}", padded.cyan(), value);
}

fn describe_bool(value: bool, yes: &str, no: &str) -> String {
    if value {
        yes.green().to_string()
    } else {
        no.yellow().to_string()
    }
}

fn describe_record(result: &ScanResult<String>) -> String {
    match result {
        Ok(Some(record)) => record.clone(),
        Ok(None) => "not found".yellow().to_string(),
        Err(e) => format!("{} ({})", "lookup failed".red(), e),
    }
}

fn print_whois(result: &ScanResult<String>) {
    match result {
        Ok(Some(raw)) => {
            let summary = whois_fields::extract(raw);
            if summary.is_empty() {
                print_row("WHOIS", &"no recognizable fields".yellow().to_string());
            } else {
                print_row("WHOIS", "");
                for line in summary.lines() {
                    println!("          {}", line);
                }
            }
        }
        Ok(None) => print_row("WHOIS", &"unavailable".yellow().to_string()),
        Err(e) => print_row("WHOIS", &format!("{} ({})", "unavailable".red(), e)),
    }
}

fn print_findings(evaluation: &Evaluation) {
    if evaluation.report.findings.is_empty() {
        println!();
        println!("  {}", "All checks at their strongest tier. Nothing to fix.".green());
        return;
    }

    println!();
    println!("{}", "Remediation suggestions".bold().underline());
    for finding in &evaluation.report.findings {
        let Some(detail) = knowledge_base::get_finding_detail(&finding.code) else {
            continue;
        };
        let marker = match finding.severity {
            Severity::Warning => "!".yellow().bold(),
            Severity::Info => "i".blue().bold(),
        };
        println!();
        println!("  [{}] {}: {}", marker, finding.control, detail.title.bold());
        println!("      {}", detail.remediation);
        println!("      {}", detail.reference_url.dimmed());
    }
    println!();
}
