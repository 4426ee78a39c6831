// src/report/whois_fields.rs

//! Per-field extraction from raw WHOIS text.
//!
//! Presentation convenience only: the classifier looks at the raw text,
//! this module just pulls out the fields worth showing. Registries
//! format their output loosely, so every field is optional and an
//! unmatched pattern is simply skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FIELD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Domain Name", r"(?i)Domain Name\s*:\s*(.+)"),
        ("Registrar", r"(?i)Registrar\s*:\s*(.+)"),
        ("Creation Date", r"(?i)(?:Creation Date|Created On)\s*:\s*(.+)"),
        (
            "Expiry Date",
            r"(?i)(?:Registry Expiry Date|Expiration Date|Expires On)\s*:\s*(.+)",
        ),
        ("DNSSEC", r"(?i)DNSSEC\s*:\s*(.+)"),
        (
            "Registrant Organization",
            r"(?i)Registrant Organization\s*:\s*(.+)",
        ),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("whois field regex is valid")))
    .collect()
});

/// Labeled fields extracted from a raw WHOIS dump, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhoisSummary {
    pub fields: Vec<(String, String)>,
}

impl WhoisSummary {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One "Label: value" line per extracted field.
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect()
    }
}

/// Extracts the displayable fields from raw WHOIS text. Any subset of
/// fields may be absent; the first match per pattern wins.
pub fn extract(raw: &str) -> WhoisSummary {
    let fields = FIELD_PATTERNS
        .iter()
        .filter_map(|(label, pattern)| {
            pattern
                .captures(raw)
                .map(|captures| (label.to_string(), captures[1].trim().to_string()))
        })
        .collect();
    WhoisSummary { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Domain Name: EXAMPLE.COM
Registrar: Example Registrar, Inc.
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2026-08-13T04:00:00Z
DNSSEC: signedDelegation
Registrant Organization: Example Corp
";

    #[test]
    fn extracts_all_known_fields() {
        let summary = extract(SAMPLE);
        assert_eq!(summary.fields.len(), 6);
        assert_eq!(summary.fields[0].0, "Domain Name");
        assert_eq!(summary.fields[1].1, "Example Registrar, Inc.");
        assert_eq!(summary.fields[4].1, "signedDelegation");
    }

    #[test]
    fn tolerates_any_subset_of_fields() {
        let summary = extract("registrar: lowercase corp\n");
        assert_eq!(summary.fields.len(), 1);
        assert_eq!(summary.fields[0], ("Registrar".to_string(), "lowercase corp".to_string()));

        assert!(extract("no recognizable fields here").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn accepts_alternate_date_labels() {
        let summary = extract("Created On: 2001-01-01\nExpires On: 2030-01-01\n");
        let lines = summary.lines();
        assert_eq!(lines[0], "Creation Date: 2001-01-01");
        assert_eq!(lines[1], "Expiry Date: 2030-01-01");
    }

    #[test]
    fn values_are_trimmed() {
        let summary = extract("Registrar:    Spacey Corp   \r\n");
        assert_eq!(summary.fields[0].1, "Spacey Corp");
    }
}
