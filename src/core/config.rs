// src/core/config.rs

use std::time::Duration;

/// Everything the fact gatherer needs to know about how to probe,
/// constructed once per process and passed by reference. There is no
/// process-wide resolver or client singleton.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// DNS resolver timeout, applied to every TXT/MX lookup.
    pub dns_timeout: Duration,
    /// Per-port budget for the TCP connect plus TLS handshake.
    pub tls_timeout: Duration,
    /// Budget for the external WHOIS query.
    pub whois_timeout: Duration,
    /// DKIM selectors, tried in order; the first hit wins.
    pub dkim_selectors: Vec<String>,
    /// TLS ports, tried in order; the first successful handshake wins.
    pub tls_ports: Vec<u16>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(10),
            tls_timeout: Duration::from_secs(5),
            whois_timeout: Duration::from_secs(20),
            dkim_selectors: ["default", "google", "microsoft", "mail", "selector1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tls_ports: vec![443, 465, 587],
        }
    }
}
