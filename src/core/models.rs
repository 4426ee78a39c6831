// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single external lookup: `Ok(Some)` = fact found,
/// `Ok(None)` = definitively absent, `Err` = the lookup itself failed
/// (timeout, network error). The classifier treats `Ok(None)` and `Err`
/// the same way; the error string is kept for display and logs only.
pub type ScanResult<T> = Result<Option<T>, String>;

// --- Raw facts ---

/// A DKIM record found under one of the probed selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DkimRecord {
    pub selector: String,
    pub record: String,
}

/// Certificate details from the first successful TLS handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub issuer: String,
    pub port: u16,
    pub not_after: DateTime<Utc>,
}

/// Raw, unclassified evidence for one domain. Built once per evaluation
/// by the fact gatherer and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainFacts {
    pub mx_present: bool,
    pub dmarc: ScanResult<String>,
    pub spf: ScanResult<String>,
    pub dkim: ScanResult<DkimRecord>,
    pub certificate: ScanResult<CertificateInfo>,
    pub whois: ScanResult<String>,
}

impl Default for DomainFacts {
    fn default() -> Self {
        Self {
            mx_present: false,
            dmarc: Ok(None),
            spf: Ok(None),
            dkim: Ok(None),
            certificate: Ok(None),
            whois: Ok(None),
        }
    }
}

// --- Classification ---

/// DMARC policy level taken from the `p=` tag. `Missing` (no record at
/// all) and `None` (record published with `p=none`) are distinct states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmarcPolicy {
    Missing,
    None,
    Quarantine,
    Reject,
    Unknown,
}

/// SPF policy level derived from the terminal qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpfPolicy {
    Missing,
    Strict,
    Softfail,
    Dangerous,
    Unspecified,
}

/// Typed judgment over one domain's facts. Each field is a pure function
/// of the corresponding `DomainFacts` field; the checks are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyClassification {
    pub dmarc_policy: DmarcPolicy,
    pub spf_policy: SpfPolicy,
    pub dkim_present: bool,
    pub certificate_valid: bool,
    pub whois_complete: bool,
}

// --- Score report ---

/// The control families the checker evaluates, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Dmarc,
    Spf,
    Dkim,
    Tls,
    Whois,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Dmarc => write!(f, "DMARC"),
            Control::Spf => write!(f, "SPF"),
            Control::Dkim => write!(f, "DKIM"),
            Control::Tls => write!(f, "TLS"),
            Control::Whois => write!(f, "WHOIS"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Info,
}

/// One advisory finding for a control that did not reach its strongest
/// tier. The `code` keys into the knowledge base for the human-readable
/// title, remediation text and reference URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub control: Control,
    pub severity: Severity,
    pub code: String,
}

impl Finding {
    pub fn new(control: Control, severity: Severity, code: &str) -> Self {
        Self {
            control,
            severity,
            code: code.to_string(),
        }
    }
}

/// Composite score plus the ordered remediation findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u8,
    pub findings: Vec<Finding>,
}

/// Everything one evaluation produced, kept together for the report
/// sinks (console, PDF, JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub domain: String,
    pub facts: DomainFacts,
    pub classification: PolicyClassification,
    pub report: ScoreReport,
}
