// src/core/scoring.rs

//! Maps a classification to the composite 0-100 score.
//!
//! Fixed weight table, integer arithmetic only:
//!
//! | Control | Condition                  | Points |
//! |---------|----------------------------|--------|
//! | DMARC   | present, policy != none    | 20     |
//! | DMARC   | present, policy = none     | 10     |
//! | SPF     | present, strict            | 20     |
//! | SPF     | present, not strict        | 10     |
//! | DKIM    | present                    | 20     |
//! | TLS     | valid certificate          | 20     |
//! | WHOIS   | registrar data available   | 10     |
//!
//! Missing controls contribute nothing.

use crate::core::models::{DmarcPolicy, PolicyClassification, SpfPolicy};

pub fn score(classification: &PolicyClassification) -> u8 {
    let mut total: u8 = 0;

    total += match classification.dmarc_policy {
        DmarcPolicy::Missing => 0,
        DmarcPolicy::None => 10,
        DmarcPolicy::Quarantine | DmarcPolicy::Reject | DmarcPolicy::Unknown => 20,
    };

    total += match classification.spf_policy {
        SpfPolicy::Missing => 0,
        SpfPolicy::Strict => 20,
        SpfPolicy::Softfail | SpfPolicy::Dangerous | SpfPolicy::Unspecified => 10,
    };

    if classification.dkim_present {
        total += 20;
    }
    if classification.certificate_valid {
        total += 20;
    }
    if classification.whois_complete {
        total += 10;
    }

    total
}
