// src/core/classifier.rs

//! Turns raw domain facts into typed policy classifications.
//!
//! Every function here is pure and total: a lookup that failed or came
//! back empty classifies as missing/invalid, never as an error. Ordered
//! rule tables make the tie-break order auditable.

use crate::core::models::{
    DmarcPolicy, DomainFacts, PolicyClassification, ScanResult, SpfPolicy,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DMARC_POLICY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)p=([a-zA-Z]+)").expect("DMARC policy regex is valid"));

/// SPF terminal-qualifier rules, first match wins. A record containing
/// both `~all` and `-all` therefore classifies as softfail.
const SPF_QUALIFIER_RULES: &[(&str, SpfPolicy)] = &[
    ("~all", SpfPolicy::Softfail),
    ("-all", SpfPolicy::Strict),
    ("+all", SpfPolicy::Dangerous),
];

/// Classifies a full set of gathered facts. Checks are independent: no
/// field of the output depends on another check's outcome.
pub fn classify(facts: &DomainFacts) -> PolicyClassification {
    let classification = PolicyClassification {
        dmarc_policy: classify_dmarc(&facts.dmarc),
        spf_policy: classify_spf(&facts.spf),
        dkim_present: matches!(&facts.dkim, Ok(Some(_))),
        certificate_valid: matches!(&facts.certificate, Ok(Some(_))),
        whois_complete: classify_whois(&facts.whois),
    };
    debug!(?classification, "Classified domain facts.");
    classification
}

/// Extracts the `p=` tag from a DMARC record. No record means
/// `Missing`; a record without the tag means `None` (the record is
/// published but states no policy); an unrecognized token is `Unknown`.
fn classify_dmarc(raw: &ScanResult<String>) -> DmarcPolicy {
    let record = match raw {
        Ok(Some(record)) => record,
        _ => return DmarcPolicy::Missing,
    };
    let token = match DMARC_POLICY_RE.captures(record) {
        Some(captures) => captures[1].to_ascii_lowercase(),
        None => return DmarcPolicy::None,
    };
    match token.as_str() {
        "none" => DmarcPolicy::None,
        "quarantine" => DmarcPolicy::Quarantine,
        "reject" => DmarcPolicy::Reject,
        other => {
            debug!(token = other, "Unrecognized DMARC policy token.");
            DmarcPolicy::Unknown
        }
    }
}

/// Walks the qualifier rule table in order and reports the first
/// qualifier found in the record.
fn classify_spf(raw: &ScanResult<String>) -> SpfPolicy {
    let record = match raw {
        Ok(Some(record)) => record,
        _ => return SpfPolicy::Missing,
    };
    SPF_QUALIFIER_RULES
        .iter()
        .find(|(qualifier, _)| record.contains(qualifier))
        .map(|&(_, policy)| policy)
        .unwrap_or(SpfPolicy::Unspecified)
}

// Known-weak heuristic: registrar field formatting varies by registry,
// but a bare "Registrar" substring is the best signal a raw dump gives.
fn classify_whois(raw: &ScanResult<String>) -> bool {
    matches!(raw, Ok(Some(text)) if text.contains("Registrar"))
}
