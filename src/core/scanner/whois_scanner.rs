// src/core/scanner/whois_scanner.rs

use crate::core::config::ScanConfig;
use crate::core::models::ScanResult;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs one external `whois` query for the domain, bounded by the
/// configured timeout. Captures stdout, falling back to stderr (some
/// whois servers write their answer there). Timeouts, spawn failures
/// and empty output all degrade to an absent/error value.
pub async fn query(config: &ScanConfig, domain: &str) -> ScanResult<String> {
    debug!(domain, timeout = ?config.whois_timeout, "Running whois query.");

    let mut command = Command::new("whois");
    command.arg(domain).kill_on_drop(true);

    match tokio::time::timeout(config.whois_timeout, command.output()).await {
        Ok(Ok(output)) => {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let text = if stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).trim().to_string()
            } else {
                stdout
            };
            if text.is_empty() {
                debug!(domain, "whois returned no output.");
                Ok(None)
            } else {
                debug!(domain, bytes = text.len(), "whois query succeeded.");
                Ok(Some(text))
            }
        }
        Ok(Err(e)) => {
            warn!(domain, error = %e, "Failed to run whois.");
            Err(format!("whois unavailable: {}", e))
        }
        Err(_) => {
            warn!(domain, "whois query timed out.");
            Err(format!(
                "whois timed out after {}s",
                config.whois_timeout.as_secs()
            ))
        }
    }
}
