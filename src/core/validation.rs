// src/core/validation.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Labels are 1-63 chars of [A-Za-z0-9-] with no leading or trailing
// hyphen; the final label must be at least two alphabetic characters.
static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,63}$",
    )
    .expect("domain syntax regex is valid")
});

/// The input did not look like a domain name. Evaluation never starts
/// on syntactically invalid input; the retry loop lives in the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDomainSyntax(pub String);

impl fmt::Display for InvalidDomainSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid domain name: {:?}", self.0)
    }
}

impl std::error::Error for InvalidDomainSyntax {}

/// Validates and normalizes a candidate domain name.
///
/// Trims surrounding whitespace and lowercases the input before
/// matching, so `Example.COM ` comes back as `example.com`.
pub fn validate(input: &str) -> Result<String, InvalidDomainSyntax> {
    let candidate = input.trim().to_ascii_lowercase();
    if DOMAIN_RE.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(InvalidDomainSyntax(input.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert_eq!(validate("example.com").unwrap(), "example.com");
        assert_eq!(validate("sub.example.co.uk").unwrap(), "sub.example.co.uk");
        assert_eq!(validate("xn--bcher-kva.de").unwrap(), "xn--bcher-kva.de");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(validate("  Example.COM \n").unwrap(), "example.com");
    }

    #[test]
    fn rejects_single_labels_and_empty_input() {
        assert!(validate("localhost").is_err());
        assert!(validate("").is_err());
        assert!(validate("   ").is_err());
    }

    #[test]
    fn rejects_bad_hyphen_placement() {
        assert!(validate("-example.com").is_err());
        assert!(validate("example-.com").is_err());
        assert!(validate("ex-ample.com").is_ok());
    }

    #[test]
    fn rejects_non_alphabetic_tld() {
        assert!(validate("example.123").is_err());
        assert!(validate("example.c").is_err());
        assert!(validate("192.168.0.1").is_err());
    }

    #[test]
    fn enforces_the_63_char_label_bound() {
        let label_63 = "a".repeat(63);
        let label_64 = "a".repeat(64);
        assert!(validate(&format!("{}.com", label_63)).is_ok());
        assert!(validate(&format!("{}.com", label_64)).is_err());
        // The final label is bounded too.
        assert!(validate(&format!("example.{}", label_63)).is_ok());
        assert!(validate(&format!("example.{}", label_64)).is_err());
    }

    #[test]
    fn error_keeps_the_offending_input() {
        let err = validate(" not a domain ").unwrap_err();
        assert_eq!(err.0, "not a domain");
    }
}
