// src/core/scanner/dns_scanner.rs

use crate::core::models::{DkimRecord, ScanResult};
use hickory_resolver::TokioAsyncResolver;
use tracing::{debug, warn};

/// Checks whether the domain has any MX record. Resolution failures
/// count as "no mail server" rather than aborting the evaluation.
pub async fn lookup_mx(resolver: &TokioAsyncResolver, domain: &str) -> bool {
    debug!(domain, "Looking up MX records.");
    match resolver.mx_lookup(domain).await {
        Ok(mx_records) => mx_records.iter().next().is_some(),
        Err(e) => {
            warn!(domain, error = %e, "MX lookup failed.");
            false
        }
    }
}

/// Looks up the DMARC record at `_dmarc.<domain>`. Only records whose
/// text starts with "v=DMARC1" count; the first match is returned raw.
pub async fn lookup_dmarc(resolver: &TokioAsyncResolver, domain: &str) -> ScanResult<String> {
    let dmarc_name = format!("_dmarc.{}", domain);
    debug!(name = %dmarc_name, "Looking up DMARC record.");
    match resolver.txt_lookup(&dmarc_name).await {
        Ok(txt_records) => {
            for record in txt_records.iter() {
                let record_str = record.to_string();
                if record_str.starts_with("v=DMARC1") {
                    debug!(record = %record_str, "DMARC record found.");
                    return Ok(Some(record_str));
                }
            }
            debug!(name = %dmarc_name, "No DMARC record among TXT records.");
            Ok(None)
        }
        Err(e) => {
            warn!(name = %dmarc_name, error = %e, "DMARC lookup failed.");
            Err(format!("DNS Error: {}", e))
        }
    }
}

/// Looks up the SPF record in the domain's apex TXT records. Only
/// records starting with "v=spf1" count; the first match is returned.
pub async fn lookup_spf(resolver: &TokioAsyncResolver, domain: &str) -> ScanResult<String> {
    debug!(domain, "Looking up SPF record.");
    match resolver.txt_lookup(domain).await {
        Ok(txt_records) => {
            for record in txt_records.iter() {
                let record_str = record.to_string();
                if record_str.starts_with("v=spf1") {
                    debug!(record = %record_str, "SPF record found.");
                    return Ok(Some(record_str));
                }
            }
            debug!(domain, "No SPF record among TXT records.");
            Ok(None)
        }
        Err(e) => {
            warn!(domain, error = %e, "SPF lookup failed.");
            Err(format!("DNS Error: {}", e))
        }
    }
}

/// Tries each DKIM selector in order and returns the first selector
/// whose TXT records contain a "v=DKIM1" record. Records are never
/// merged across selectors; the search stops at the first hit.
pub async fn lookup_dkim(
    resolver: &TokioAsyncResolver,
    selectors: &[String],
    domain: &str,
) -> ScanResult<DkimRecord> {
    lookup_dkim_with(selectors, domain, |name| async move {
        match resolver.txt_lookup(name.as_str()).await {
            Ok(txt_records) => Ok(txt_records.iter().map(|r| r.to_string()).collect()),
            Err(e) => Err(format!("DNS Error: {}", e)),
        }
    })
    .await
}

/// Selector-priority walk, generic over the TXT lookup so the ordering
/// contract is testable without a live resolver. Per-selector failures
/// are logged and skipped; a domain where every selector misses or
/// fails yields `Ok(None)`.
async fn lookup_dkim_with<F, Fut>(
    selectors: &[String],
    domain: &str,
    lookup_txt: F,
) -> ScanResult<DkimRecord>
where
    F: Fn(String) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<String>, String>>,
{
    for selector in selectors {
        let dkim_name = format!("{}._domainkey.{}", selector, domain);
        debug!(selector, name = %dkim_name, "Checking DKIM selector.");
        match lookup_txt(dkim_name.clone()).await {
            Ok(records) => {
                if let Some(record) = records.into_iter().find(|r| r.starts_with("v=DKIM1")) {
                    debug!(selector, "DKIM record found.");
                    return Ok(Some(DkimRecord {
                        selector: selector.clone(),
                        record,
                    }));
                }
            }
            Err(e) => {
                // Most selectors simply do not exist; keep walking.
                warn!(selector, name = %dkim_name, error = %e, "DKIM selector lookup failed.");
            }
        }
    }
    debug!(domain, "No DKIM record under any probed selector.");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn dkim_walk_prefers_the_first_selector_that_resolves() {
        // Both "default" and "google" would resolve; "default" must win.
        let result = lookup_dkim_with(
            &selectors(&["default", "google"]),
            "example.com",
            |name| async move {
                assert!(name.ends_with("._domainkey.example.com"));
                Ok(vec!["v=DKIM1; k=rsa; p=abc".to_string()])
            },
        )
        .await;
        let record = result.unwrap().unwrap();
        assert_eq!(record.selector, "default");
    }

    #[tokio::test]
    async fn dkim_walk_skips_failing_selectors() {
        let result = lookup_dkim_with(
            &selectors(&["default", "google"]),
            "example.com",
            |name| async move {
                if name.starts_with("default.") {
                    Err("DNS Error: timeout".to_string())
                } else {
                    Ok(vec!["v=DKIM1; k=rsa; p=xyz".to_string()])
                }
            },
        )
        .await;
        assert_eq!(result.unwrap().unwrap().selector, "google");
    }

    #[tokio::test]
    async fn dkim_walk_ignores_unrelated_txt_records() {
        let result = lookup_dkim_with(
            &selectors(&["default"]),
            "example.com",
            |_| async move { Ok(vec!["v=spf1 -all".to_string()]) },
        )
        .await;
        assert_eq!(result.unwrap().as_ref().map(|r| r.selector.clone()), None);
    }

    #[tokio::test]
    async fn dkim_walk_reports_absence_when_everything_fails() {
        let result = lookup_dkim_with(
            &selectors(&["default", "google", "mail"]),
            "example.com",
            |_| async move { Err("DNS Error: refused".to_string()) },
        )
        .await;
        assert!(matches!(result, Ok(None)));
    }
}
