// src/core/mod.rs

/// Typed policy classification of gathered facts.
pub mod classifier;

/// Scan configuration: timeouts, selector list, port list.
pub mod config;

/// Remediation catalog and the advisory engine built on it.
pub mod knowledge_base;

/// Data structures shared across the pipeline: raw facts,
/// classifications, findings and the score report.
pub mod models;

/// Fact gathering: DNS, TLS and WHOIS probes.
pub mod scanner;

/// The fixed weight table turning a classification into a score.
pub mod scoring;

/// Domain name syntax validation.
pub mod validation;

use crate::core::config::ScanConfig;
use crate::core::models::{Evaluation, ScoreReport};

/// Runs one full evaluation: gather facts, classify them, then derive
/// the score and the remediation findings from the same classification.
pub async fn evaluate(config: &ScanConfig, domain: &str) -> Evaluation {
    let facts = scanner::gather(config, domain).await;
    let classification = classifier::classify(&facts);
    let report = ScoreReport {
        score: scoring::score(&classification),
        findings: knowledge_base::advise(&classification),
    };
    Evaluation {
        domain: domain.to_string(),
        facts,
        classification,
        report,
    }
}
