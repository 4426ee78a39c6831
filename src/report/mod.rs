// src/report/mod.rs

// Report sinks: pure consumers of the core's output. None of these
// impose a contract back on the evaluation pipeline.

/// Console banner, result table and remediation list.
pub mod console;

/// PDF report document.
pub mod pdf;

/// Field-level extraction from raw WHOIS text.
pub mod whois_fields;
