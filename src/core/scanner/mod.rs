// src/core/scanner/mod.rs

pub mod dns_scanner;
pub mod ssl_scanner;
pub mod whois_scanner;

use crate::core::config::ScanConfig;
use crate::core::models::DomainFacts;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use tracing::info;

/// Gathers all raw facts about a domain.
///
/// The six probes are independent and run concurrently, each bounded by
/// its own timeout from the config. This function never fails: every
/// probe degrades to an absent value on error, so a partial-failure
/// domain still yields a complete `DomainFacts`.
pub async fn gather(config: &ScanConfig, domain: &str) -> DomainFacts {
    info!(domain, "Gathering domain facts.");

    let (mut facts, certificate, whois) = tokio::join!(
        gather_dns(config, domain),
        ssl_scanner::probe_certificate(config, domain),
        whois_scanner::query(config, domain),
    );
    facts.certificate = certificate;
    facts.whois = whois;

    info!(domain, mx_present = facts.mx_present, "Fact gathering finished.");
    facts
}

/// Gathers only the DNS-backed facts (MX, DMARC, SPF, DKIM), leaving
/// TLS and WHOIS absent. The bulk census runs on this path: its tally
/// never looks at TLS or WHOIS, and skipping them keeps a long domain
/// list from hammering rate-limited WHOIS servers.
pub async fn gather_dns(config: &ScanConfig, domain: &str) -> DomainFacts {
    let mut opts = ResolverOpts::default();
    opts.timeout = config.dns_timeout;
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);

    let (mx_present, dmarc, spf, dkim) = tokio::join!(
        dns_scanner::lookup_mx(&resolver, domain),
        dns_scanner::lookup_dmarc(&resolver, domain),
        dns_scanner::lookup_spf(&resolver, domain),
        dns_scanner::lookup_dkim(&resolver, &config.dkim_selectors, domain),
    );

    DomainFacts {
        mx_present,
        dmarc,
        spf,
        dkim,
        ..DomainFacts::default()
    }
}
