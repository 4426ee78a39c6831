//! Remediation catalog and advisory engine.
//!
//! A static, read-only table describes every finding the checker can
//! emit: severity, plain-language description, remediation advice and a
//! reference URL. `advise` walks the classification in fixed control
//! order (DMARC, SPF, DKIM, TLS, WHOIS) and emits one finding per
//! control that sits below its strongest tier.

use crate::core::models::{
    Control, DmarcPolicy, Finding, PolicyClassification, Severity, SpfPolicy,
};

/// All the human-readable context behind a finding code.
pub struct FindingDetail {
    /// Machine-readable identifier, e.g. "DMARC_POLICY_NONE".
    pub code: &'static str,
    /// Short title for report headings.
    pub title: &'static str,
    pub control: Control,
    pub severity: Severity,
    /// What the finding means and why it matters.
    pub description: &'static str,
    /// Actionable fix.
    pub remediation: &'static str,
    /// External guide backing the advice.
    pub reference_url: &'static str,
}

static FINDINGS: &[FindingDetail] = &[
    FindingDetail {
        code: "DMARC_MISSING",
        title: "DMARC Record Missing",
        control: Control::Dmarc,
        severity: Severity::Warning,
        description: "DMARC tells receiving mail servers how to handle messages that fail authentication checks. Without it, nothing stops attackers from spoofing mail from this domain.",
        remediation: "Publish a DMARC TXT record at _dmarc.<domain>. Start with 'v=DMARC1; p=none;' to monitor, then move to 'p=quarantine' or 'p=reject'.",
        reference_url: "https://dmarcian.com/dmarc-record-wizard/",
    },
    FindingDetail {
        code: "DMARC_POLICY_NONE",
        title: "DMARC Policy is 'none'",
        control: Control::Dmarc,
        severity: Severity::Warning,
        description: "The DMARC record is in monitoring-only mode. Failing messages are reported but still delivered, so the record offers no active protection against spoofing.",
        remediation: "Once legitimate mail passes SPF/DKIM, raise the policy to 'p=quarantine' or 'p=reject'.",
        reference_url: "https://dmarcian.com/dmarc-record-wizard/",
    },
    FindingDetail {
        code: "SPF_MISSING",
        title: "SPF Record Missing",
        control: Control::Spf,
        severity: Severity::Warning,
        description: "SPF lists the servers allowed to send mail for the domain. Without it, receivers have no way to reject forged senders.",
        remediation: "Publish a TXT record starting with 'v=spf1' that names your mail sources and ends with '-all'.",
        reference_url: "https://www.spfwizard.net/",
    },
    FindingDetail {
        code: "SPF_POLICY_LAX",
        title: "SPF Policy is Lax",
        control: Control::Spf,
        severity: Severity::Warning,
        description: "The SPF record ends with '~all' (softfail) or '+all' (pass-everything). Receivers will accept or merely flag mail from unauthorized servers.",
        remediation: "Use '-all' as the terminal qualifier so unauthorized senders are rejected outright.",
        reference_url: "https://www.spfwizard.net/",
    },
    FindingDetail {
        code: "DKIM_MISSING",
        title: "DKIM Record Missing",
        control: Control::Dkim,
        severity: Severity::Warning,
        description: "No DKIM public key was found under the common selectors. Unsigned mail cannot be verified for integrity or origin.",
        remediation: "Enable DKIM signing with your mail provider and publish the public key at <selector>._domainkey.<domain>.",
        reference_url: "https://www.mailgun.com/blog/email-security/what-is-dkim/",
    },
    FindingDetail {
        code: "TLS_NO_CERTIFICATE",
        title: "No Valid TLS Certificate",
        control: Control::Tls,
        severity: Severity::Warning,
        description: "No TLS handshake succeeded on the common web and mail ports, so clients cannot establish an authenticated encrypted channel with this domain.",
        remediation: "Install a certificate from a trusted CA on the web and mail services, and automate renewal.",
        reference_url: "https://letsencrypt.org/getting-started/",
    },
    FindingDetail {
        code: "WHOIS_INCOMPLETE",
        title: "WHOIS Data Incomplete",
        control: Control::Whois,
        severity: Severity::Info,
        description: "The WHOIS response carried no recognizable registrar field. Registration data could not be confirmed.",
        remediation: "Check the registration data with your registrar and make sure the public WHOIS entry is up to date.",
        reference_url: "https://www.icann.org/resources/pages/whois-2012-02-25-en",
    },
];

/// Looks a finding code up in the catalog.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|f| f.code == code)
}

/// Derives the remediation findings for a classification.
///
/// Exactly one finding per weak or missing control, in the fixed order
/// DMARC, SPF, DKIM, TLS, WHOIS. Controls at their strongest tier emit
/// nothing.
pub fn advise(classification: &PolicyClassification) -> Vec<Finding> {
    let mut findings = Vec::new();

    match classification.dmarc_policy {
        DmarcPolicy::Missing => {
            findings.push(Finding::new(Control::Dmarc, Severity::Warning, "DMARC_MISSING"));
        }
        DmarcPolicy::None => {
            findings.push(Finding::new(Control::Dmarc, Severity::Warning, "DMARC_POLICY_NONE"));
        }
        DmarcPolicy::Quarantine | DmarcPolicy::Reject | DmarcPolicy::Unknown => {}
    }

    match classification.spf_policy {
        SpfPolicy::Missing => {
            findings.push(Finding::new(Control::Spf, Severity::Warning, "SPF_MISSING"));
        }
        SpfPolicy::Softfail | SpfPolicy::Dangerous => {
            findings.push(Finding::new(Control::Spf, Severity::Warning, "SPF_POLICY_LAX"));
        }
        SpfPolicy::Strict | SpfPolicy::Unspecified => {}
    }

    if !classification.dkim_present {
        findings.push(Finding::new(Control::Dkim, Severity::Warning, "DKIM_MISSING"));
    }
    if !classification.certificate_valid {
        findings.push(Finding::new(Control::Tls, Severity::Warning, "TLS_NO_CERTIFICATE"));
    }
    if !classification.whois_complete {
        findings.push(Finding::new(Control::Whois, Severity::Info, "WHOIS_INCOMPLETE"));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_missing() -> PolicyClassification {
        PolicyClassification {
            dmarc_policy: DmarcPolicy::Missing,
            spf_policy: SpfPolicy::Missing,
            dkim_present: false,
            certificate_valid: false,
            whois_complete: false,
        }
    }

    fn fully_hardened() -> PolicyClassification {
        PolicyClassification {
            dmarc_policy: DmarcPolicy::Reject,
            spf_policy: SpfPolicy::Strict,
            dkim_present: true,
            certificate_valid: true,
            whois_complete: true,
        }
    }

    #[test]
    fn every_control_missing_yields_exactly_five_findings() {
        let findings = advise(&all_missing());
        assert_eq!(findings.len(), 5);
        let controls: Vec<Control> = findings.iter().map(|f| f.control).collect();
        assert_eq!(
            controls,
            vec![Control::Dmarc, Control::Spf, Control::Dkim, Control::Tls, Control::Whois]
        );
    }

    #[test]
    fn hardened_domain_yields_no_findings() {
        assert!(advise(&fully_hardened()).is_empty());
    }

    #[test]
    fn dmarc_none_yields_the_policy_finding_not_the_missing_one() {
        let classification = PolicyClassification {
            dmarc_policy: DmarcPolicy::None,
            ..fully_hardened()
        };
        let findings = advise(&classification);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "DMARC_POLICY_NONE");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn lax_spf_covers_softfail_and_dangerous() {
        for policy in [SpfPolicy::Softfail, SpfPolicy::Dangerous] {
            let classification = PolicyClassification {
                spf_policy: policy,
                ..fully_hardened()
            };
            let findings = advise(&classification);
            assert_eq!(findings.len(), 1);
            assert_eq!(findings[0].code, "SPF_POLICY_LAX");
        }
    }

    #[test]
    fn whois_finding_is_informational() {
        let classification = PolicyClassification {
            whois_complete: false,
            ..fully_hardened()
        };
        let findings = advise(&classification);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn every_emitted_code_resolves_in_the_catalog() {
        for finding in advise(&all_missing()) {
            let detail = get_finding_detail(&finding.code)
                .unwrap_or_else(|| panic!("missing catalog entry for {}", finding.code));
            assert_eq!(detail.control, finding.control);
            assert_eq!(detail.severity, finding.severity);
            assert!(detail.reference_url.starts_with("https://"));
        }
    }
}
