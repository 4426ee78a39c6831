// src/report/pdf.rs

//! PDF rendering of an evaluation.
//!
//! A failure here is a `ReportGenerationFailure`: the caller reports it
//! as a warning and keeps the already-computed score report.

use crate::core::knowledge_base;
use crate::core::models::Evaluation;
use crate::report::whois_fields;
use color_eyre::eyre::{Result, WrapErr};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

// printpdf's Mm wraps an f32, so the whole layout works in f32.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 5.5;
const WRAP_COLUMNS: usize = 95;

const BACKGROUND: &[&str] = &[
    "DMARC (Domain-based Message Authentication, Reporting, and Conformance) lets a domain state how receivers should treat mail that fails authentication checks.",
    "SPF (Sender Policy Framework) lists the servers authorized to send mail on behalf of a domain.",
    "DKIM (DomainKeys Identified Mail) adds a digital signature to outgoing mail so receivers can verify integrity and origin.",
    "TLS certificates secure the encrypted channels used by web and mail services.",
    "WHOIS data documents who owns and manages a domain registration.",
];

/// Simple top-down text cursor that adds pages as it runs out of room.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .wrap_err("failed to register PDF font")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .wrap_err("failed to register PDF font")?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn advance(&mut self, height: f32) {
        if self.y - height < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        } else {
            self.y -= height;
        }
    }

    fn heading(&mut self, text: &str) {
        self.advance(LINE_HEIGHT_MM * 2.0);
        self.layer
            .use_text(text, 13.0, Mm(MARGIN_MM), Mm(self.y), &self.bold);
        self.advance(LINE_HEIGHT_MM);
    }

    fn paragraph(&mut self, text: &str) {
        for raw_line in text.lines() {
            for line in wrap(raw_line, WRAP_COLUMNS) {
                self.advance(LINE_HEIGHT_MM);
                self.layer
                    .use_text(line, 10.0, Mm(MARGIN_MM), Mm(self.y), &self.regular);
            }
        }
    }

    fn blank_line(&mut self) {
        self.advance(LINE_HEIGHT_MM);
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create {}", path.display()))?;
        self.doc
            .save(&mut BufWriter::new(file))
            .wrap_err("failed to write PDF document")?;
        Ok(())
    }
}

/// Greedy word wrap; long unbreakable tokens are split hard.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > columns {
            let split_at = word
                .char_indices()
                .nth(columns)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes the detailed PDF report for one evaluation.
pub fn write_report(path: &Path, evaluation: &Evaluation) -> Result<()> {
    let title = format!("Security analysis report for {}", evaluation.domain);
    let mut writer = PdfWriter::new(&title)?;
    let facts = &evaluation.facts;

    writer.heading(&title);
    writer.blank_line();

    writer.heading("Configuration summary");
    writer.paragraph(&format!("DMARC: {}", describe(&facts.dmarc)));
    writer.paragraph(&format!("SPF: {}", describe(&facts.spf)));
    writer.paragraph(&format!(
        "DKIM: {}",
        match &facts.dkim {
            Ok(Some(dkim)) => format!("found under selector '{}'", dkim.selector),
            _ => "not found".to_string(),
        }
    ));
    writer.paragraph(&format!(
        "TLS: {}",
        match &facts.certificate {
            Ok(Some(cert)) => format!(
                "certificate issued by {} on port {}, expires {}",
                cert.issuer,
                cert.port,
                cert.not_after.format("%Y-%m-%d")
            ),
            _ => "no valid certificate".to_string(),
        }
    ));
    match &facts.whois {
        Ok(Some(raw)) => {
            let summary = whois_fields::extract(raw);
            if summary.is_empty() {
                writer.paragraph("WHOIS: no recognizable fields");
            } else {
                writer.paragraph("WHOIS:");
                for line in summary.lines() {
                    writer.paragraph(&format!("  {}", line));
                }
            }
        }
        _ => writer.paragraph("WHOIS: unavailable"),
    }
    writer.blank_line();
    writer.paragraph(&format!("Overall score: {} / 100", evaluation.report.score));

    writer.heading("Background");
    for item in BACKGROUND {
        writer.paragraph(item);
        writer.blank_line();
    }

    writer.heading("Suggested remediations");
    if evaluation.report.findings.is_empty() {
        writer.paragraph("All checks are at their strongest tier; no remediation needed.");
    }
    for finding in &evaluation.report.findings {
        if let Some(detail) = knowledge_base::get_finding_detail(&finding.code) {
            writer.paragraph(&format!("- {}: {}", detail.title, detail.remediation));
            writer.paragraph(&format!("  Guide: {}", detail.reference_url));
            writer.blank_line();
        }
    }

    if let Ok(Some(raw)) = &facts.whois {
        writer.heading("Full WHOIS record");
        writer.paragraph(raw);
    }

    writer.save(path)?;
    info!(path = %path.display(), "PDF report written.");
    Ok(())
}

fn describe(result: &crate::core::models::ScanResult<String>) -> String {
    match result {
        Ok(Some(record)) => record.clone(),
        Ok(None) => "not found".to_string(),
        Err(e) => format!("lookup failed ({})", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier;
    use crate::core::knowledge_base;
    use crate::core::models::{DomainFacts, ScoreReport};
    use crate::core::scoring;

    fn sample_evaluation() -> Evaluation {
        let facts = DomainFacts {
            mx_present: true,
            dmarc: Ok(Some("v=DMARC1; p=none".into())),
            spf: Ok(Some("v=spf1 ~all".into())),
            whois: Ok(Some("Registrar: Example Registrar\n".into())),
            ..DomainFacts::default()
        };
        let classification = classifier::classify(&facts);
        Evaluation {
            domain: "example.com".into(),
            report: ScoreReport {
                score: scoring::score(&classification),
                findings: knowledge_base::advise(&classification),
            },
            facts,
            classification,
        }
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_hard_splits_long_tokens() {
        let lines = wrap(&"x".repeat(25), 10);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_keeps_empty_lines() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn writes_a_nonempty_pdf_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report_example_com.pdf");
        write_report(&path, &sample_evaluation()).expect("pdf generation");
        let metadata = std::fs::metadata(&path).expect("pdf exists");
        assert!(metadata.len() > 0);
    }
}
