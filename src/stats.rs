// src/stats.rs

//! Bulk statistics driver: runs the DNS-only probes over a domain list
//! and prints deployment counts. The fixed inter-domain delay is a rate
//! limit toward upstream DNS resolvers, not a correctness requirement;
//! every domain's evaluation is independent.

use crate::core::config::ScanConfig;
use crate::core::models::{DmarcPolicy, PolicyClassification, SpfPolicy};
use crate::core::{classifier, scanner, validation};
use color_eyre::eyre::{Result, WrapErr};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct Tally {
    total: usize,
    with_mx: usize,
    with_dmarc: usize,
    with_spf: usize,
    with_dkim: usize,
}

impl Tally {
    /// Counts a classified mail-capable domain into the census.
    fn record(&mut self, classification: &PolicyClassification) {
        self.with_mx += 1;
        if classification.dmarc_policy != DmarcPolicy::Missing {
            self.with_dmarc += 1;
        }
        if classification.spf_policy != SpfPolicy::Missing {
            self.with_spf += 1;
        }
        if classification.dkim_present {
            self.with_dkim += 1;
        }
    }
}

/// Parses a domain-list file's contents: skips blank lines and '#'
/// comments, applies the optional suffix filter and the optional limit.
fn parse_domain_list(content: &str, suffix: Option<&str>, limit: Option<usize>) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| suffix.is_none_or(|s| line.ends_with(s)))
        .take(limit.unwrap_or(usize::MAX))
        .map(str::to_string)
        .collect()
}

/// Runs the census over every domain in the list file.
pub async fn run(
    config: &ScanConfig,
    file: &Path,
    suffix: Option<&str>,
    limit: Option<usize>,
    delay: Duration,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read domain list {}", file.display()))?;
    let domains = parse_domain_list(&content, suffix, limit);
    info!(count = domains.len(), "Starting domain census.");
    println!("Scanning {} domains...\n", domains.len());

    let mut tally = Tally::default();
    for domain in &domains {
        let domain = match validation::validate(domain) {
            Ok(domain) => domain,
            Err(e) => {
                warn!(%e, "Skipping invalid list entry.");
                println!("{}: skipped ({})", domain, e);
                continue;
            }
        };

        tally.total += 1;
        println!("Checking {} ...", domain);
        // The tally only counts DNS-backed controls, so the census skips
        // the TLS and WHOIS probes entirely.
        let facts = scanner::gather_dns(config, &domain).await;

        if !facts.mx_present {
            println!("  no MX record, domain has no mail server");
            tokio::time::sleep(delay).await;
            continue;
        }

        let classification = classifier::classify(&facts);
        tally.record(&classification);

        println!(
            "  DMARC: {:?} | SPF: {:?} | DKIM: {}",
            classification.dmarc_policy,
            classification.spf_policy,
            if classification.dkim_present { "present" } else { "absent" }
        );
        tokio::time::sleep(delay).await;
    }

    println!("\n=== Statistics ===");
    println!("Domains checked: {}", tally.total);
    println!("Domains with a mail server (MX): {}", tally.with_mx);
    println!("Domains protected by DMARC: {}", tally.with_dmarc);
    println!("Domains protected by SPF: {}", tally.with_spf);
    println!("Domains protected by DKIM: {}", tally.with_dkim);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "\
# seed list
example.fr
example.com

  spaced.fr
other.org
second.fr
";

    #[test]
    fn skips_blanks_and_comments() {
        let domains = parse_domain_list(LIST, None, None);
        assert_eq!(
            domains,
            vec!["example.fr", "example.com", "spaced.fr", "other.org", "second.fr"]
        );
    }

    #[test]
    fn applies_the_suffix_filter() {
        let domains = parse_domain_list(LIST, Some(".fr"), None);
        assert_eq!(domains, vec!["example.fr", "spaced.fr", "second.fr"]);
    }

    #[test]
    fn applies_the_limit_after_filtering() {
        let domains = parse_domain_list(LIST, Some(".fr"), Some(2));
        assert_eq!(domains, vec!["example.fr", "spaced.fr"]);
    }

    #[test]
    fn empty_input_yields_no_domains() {
        assert!(parse_domain_list("", None, None).is_empty());
        assert!(parse_domain_list("# only a comment\n", None, None).is_empty());
    }

    #[test]
    fn tally_counts_only_present_dns_controls() {
        let mut tally = Tally::default();
        tally.record(&PolicyClassification {
            dmarc_policy: DmarcPolicy::Reject,
            spf_policy: SpfPolicy::Missing,
            dkim_present: true,
            certificate_valid: false,
            whois_complete: false,
        });
        tally.record(&PolicyClassification {
            dmarc_policy: DmarcPolicy::Missing,
            spf_policy: SpfPolicy::Strict,
            dkim_present: false,
            certificate_valid: true,
            whois_complete: true,
        });

        assert_eq!(tally.with_mx, 2);
        assert_eq!(tally.with_dmarc, 1);
        assert_eq!(tally.with_spf, 1);
        assert_eq!(tally.with_dkim, 1);
    }
}
