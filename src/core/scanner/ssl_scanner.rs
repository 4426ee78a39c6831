// src/core/scanner/ssl_scanner.rs

use crate::core::config::ScanConfig;
use crate::core::models::{CertificateInfo, ScanResult};
use chrono::{DateTime, Utc};
use native_tls::TlsConnector;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};
use x509_parser::prelude::*;

/// Probes the configured TLS ports in order and returns the certificate
/// from the first successful handshake. The handshake is blocking work,
/// so it runs off the async runtime.
pub async fn probe_certificate(config: &ScanConfig, domain: &str) -> ScanResult<CertificateInfo> {
    info!(domain, "Starting TLS certificate probe.");
    let domain_owned = domain.to_string();
    let ports = config.tls_ports.clone();
    let timeout = config.tls_timeout;

    let result = spawn_blocking(move || {
        probe_ports(&domain_owned, &ports, timeout, |port| {
            probe_port(&domain_owned, port, timeout)
        })
    })
    .await
    .unwrap_or_else(|e| {
        error!(panic = %e, "Blocking TLS probe task panicked!");
        Err(format!("Task panicked: {}", e))
    });

    info!(domain, found = matches!(result, Ok(Some(_))), "TLS probe finished.");
    result
}

/// Port-priority walk, generic over the per-port prober so the ordering
/// contract is testable without sockets. First success wins; if every
/// port fails the last error is surfaced.
fn probe_ports<F>(
    domain: &str,
    ports: &[u16],
    timeout: Duration,
    probe: F,
) -> ScanResult<CertificateInfo>
where
    F: Fn(u16) -> Result<CertificateInfo, String>,
{
    let mut last_error = None;
    for &port in ports {
        debug!(domain, port, ?timeout, "Probing TLS port.");
        match probe(port) {
            Ok(info) => {
                debug!(domain, port, issuer = %info.issuer, "TLS handshake succeeded.");
                return Ok(Some(info));
            }
            Err(e) => {
                debug!(domain, port, error = %e, "TLS probe failed on this port.");
                last_error = Some(e);
            }
        }
    }
    match last_error {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

/// Connects, completes a TLS handshake and extracts issuer common name
/// and expiry from the peer certificate.
fn probe_port(domain: &str, port: u16, timeout: Duration) -> Result<CertificateInfo, String> {
    let connector = TlsConnector::new().map_err(|e| format!("TlsConnector Error: {}", e))?;

    let addr = (domain, port)
        .to_socket_addrs()
        .map_err(|e| format!("Address resolution failed: {}", e))?
        .next()
        .ok_or_else(|| format!("No address for {}:{}", domain, port))?;

    let stream = TcpStream::connect_timeout(&addr, timeout)
        .map_err(|e| format!("TCP Connection Error: {}", e))?;
    stream
        .set_read_timeout(Some(timeout))
        .map_err(|e| format!("Socket Error: {}", e))?;
    stream
        .set_write_timeout(Some(timeout))
        .map_err(|e| format!("Socket Error: {}", e))?;

    let stream = connector
        .connect(domain, stream)
        .map_err(|e| format!("TLS Handshake Error: {}", e))?;

    let cert = stream
        .peer_certificate()
        .map_err(|e| format!("Could not get peer certificate: {}", e))?
        .ok_or_else(|| "Server did not provide a certificate.".to_string())?;

    let cert_der = cert
        .to_der()
        .map_err(|e| format!("Could not convert certificate to DER: {}", e))?;
    let (_, x509) = parse_x509_certificate(&cert_der)
        .map_err(|e| format!("X.509 Parse Error: {}", e))?;

    let issuer = x509
        .issuer()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| x509.issuer().to_string());

    Ok(CertificateInfo {
        issuer,
        port,
        not_after: asn1_time_to_chrono_utc(&x509.validity().not_after),
    })
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert(port: u16) -> CertificateInfo {
        CertificateInfo {
            issuer: format!("issuer-{}", port),
            port,
            not_after: Utc::now(),
        }
    }

    #[test]
    fn port_walk_returns_the_first_success() {
        // Both 443 and 465 would succeed; 443 must win.
        let result = probe_ports("example.com", &[443, 465, 587], Duration::from_secs(5), |p| {
            Ok(cert(p))
        });
        assert_eq!(result.unwrap().unwrap().port, 443);
    }

    #[test]
    fn port_walk_falls_through_failures() {
        let result = probe_ports("example.com", &[443, 465, 587], Duration::from_secs(5), |p| {
            if p == 465 {
                Ok(cert(p))
            } else {
                Err("TCP Connection Error: refused".to_string())
            }
        });
        assert_eq!(result.unwrap().unwrap().port, 465);
    }

    #[test]
    fn port_walk_surfaces_the_last_error_when_all_fail() {
        let result = probe_ports("example.com", &[443, 465], Duration::from_secs(5), |p| {
            Err(format!("port {} refused", p))
        });
        assert_eq!(result.unwrap_err(), "port 465 refused");
    }

    #[test]
    fn empty_port_list_means_absent() {
        let result = probe_ports("example.com", &[], Duration::from_secs(5), |p| Ok(cert(p)));
        assert!(matches!(result, Ok(None)));
    }
}
