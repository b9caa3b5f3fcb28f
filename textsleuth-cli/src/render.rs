//! Human-readable report rendering for the analysis results.

use textsleuth_core::authorship::AuthorshipAssessment;
use textsleuth_core::cipher::DecodeOutcome;
use textsleuth_core::metrics::WritingMetrics;
use textsleuth_core::plagiarism::PlagiarismAssessment;
use textsleuth_core::stego::{AnomalyScan, HiddenMessageScan};

const RULE_WIDTH: usize = 72;
const BAR_WIDTH: usize = 20;

/// Candidates shown in full in the decode report; the rest are summarized.
const MAX_LISTED_CANDIDATES: usize = 5;

pub fn decode_report(outcome: &DecodeOutcome) -> String {
    let mut report = String::new();
    push_header(&mut report, "CIPHER ANALYSIS");

    match &outcome.best {
        Some(best) => {
            report.push_str(&format!("Best candidate: {}\n", best.label));
            report.push_str(&format!(
                "Confidence:     {:.3}  {}\n",
                best.confidence,
                format_metric_bar(best.confidence, 0.0, 1.0, BAR_WIDTH)
            ));
            report.push_str(&format!("Decoded text:   {}\n\n", preview(&best.decoded)));
        }
        None => report.push_str("No candidates produced.\n\n"),
    }

    push_rule(&mut report, "ALL CANDIDATES");
    for candidate in outcome.candidates.iter().take(MAX_LISTED_CANDIDATES) {
        report.push_str(&format!(
            "{:<12} {:.3}  {}  {}\n",
            candidate.label,
            candidate.confidence,
            format_metric_bar(candidate.confidence, 0.0, 1.0, BAR_WIDTH),
            preview(&candidate.decoded)
        ));
    }
    if outcome.candidates.len() > MAX_LISTED_CANDIDATES {
        report.push_str(&format!(
            "... and {} more\n",
            outcome.candidates.len() - MAX_LISTED_CANDIDATES
        ));
    }

    report
}

pub fn hidden_report(scan: &HiddenMessageScan) -> String {
    let mut report = String::new();
    push_header(&mut report, "HIDDEN MESSAGE SCAN");

    report.push_str(&format!("Secrets found:  {}\n", scan.secrets_found));
    report.push_str(&format!(
        "Overall:        {:.3}  {}\n\n",
        scan.overall_confidence,
        format_metric_bar(scan.overall_confidence, 0.0, 1.0, BAR_WIDTH)
    ));

    for (i, secret) in scan.found.iter().enumerate() {
        report.push_str(&format!(
            "{}. [{}] ({:.2}) {}\n",
            i + 1,
            secret.method(),
            secret.confidence(),
            preview(secret.message())
        ));
    }
    if scan.found.is_empty() {
        report.push_str("No hidden messages detected.\n");
    }

    report
}

pub fn anomaly_report(scan: &AnomalyScan) -> String {
    let mut report = String::new();
    push_header(&mut report, "STEGANOGRAPHY ANOMALY SCAN");

    report.push_str(&format!("Suspicion:      {}\n\n", scan.suspicion_level));

    for (i, finding) in scan.findings.iter().enumerate() {
        report.push_str(&format!(
            "{}. ({:.2}) {}\n",
            i + 1,
            finding.confidence(),
            finding.description()
        ));
    }
    if scan.findings.is_empty() {
        report.push_str("No anomalies detected.\n");
    }

    if !scan.recommendations.is_empty() {
        push_rule(&mut report, "RECOMMENDATIONS");
        for recommendation in &scan.recommendations {
            report.push_str(&format!("- {recommendation}\n"));
        }
    }

    report
}

pub fn plagiarism_report(assessment: &PlagiarismAssessment) -> String {
    let mut report = String::new();
    push_header(&mut report, "PLAGIARISM CHECK");

    report.push_str(&format!(
        "Overall similarity: {:.2}%  {}\n",
        assessment.overall_similarity_pct,
        format_metric_bar(assessment.overall_similarity_pct, 0.0, 100.0, BAR_WIDTH)
    ));
    report.push_str(&format!("Risk level:         {}\n", assessment.risk_level));
    report.push_str(&format!(
        "Verdict:            {}\n\n",
        if assessment.is_plagiarism {
            "PLAGIARISM SUSPECTED"
        } else {
            "no plagiarism flagged"
        }
    ));

    let similarity = &assessment.report;
    push_rule(&mut report, "COMPONENTS");
    report.push_str(&format!(
        "Exact word overlap:   {:.2}%\n",
        similarity.exact_word_overlap_pct
    ));
    report.push_str(&format!(
        "Cosine similarity:    {:.3}\n",
        similarity.cosine_similarity
    ));
    report.push_str(&format!(
        "Structural:           {:.3}\n",
        similarity.structural_similarity
    ));

    if !similarity.phrase_matches.is_empty() {
        push_rule(&mut report, "MATCHED PHRASES");
        for (i, phrase) in similarity.phrase_matches.iter().enumerate() {
            report.push_str(&format!("{}. {:.2}% match\n", i + 1, phrase.similarity_pct));
            report.push_str(&format!("   A: {}\n", phrase.excerpt_a));
            report.push_str(&format!("   B: {}\n", phrase.excerpt_b));
        }
    }

    if !assessment.recommendations.is_empty() {
        push_rule(&mut report, "RECOMMENDATIONS");
        for recommendation in &assessment.recommendations {
            report.push_str(&format!("- {recommendation}\n"));
        }
    }

    report
}

pub fn authorship_report(assessment: &AuthorshipAssessment) -> String {
    let mut report = String::new();
    push_header(&mut report, "AUTHORSHIP ANALYSIS");

    report.push_str(&format!(
        "Style similarity:   {:.2}%  {}\n",
        assessment.similarity_pct,
        format_metric_bar(assessment.similarity_pct, 0.0, 100.0, BAR_WIDTH)
    ));
    report.push_str(&format!(
        "Verdict:            {}\n",
        assessment.verdict.description()
    ));
    report.push_str(&format!(
        "Confidence:         {:?} ({})\n\n",
        assessment.confidence_level,
        assessment.confidence_level.description()
    ));

    push_rule(&mut report, "STYLE COMPONENTS");
    let c = &assessment.components;
    for (name, value) in [
        ("Words per sentence", c.avg_words_per_sentence),
        ("Word length", c.avg_word_length),
        ("Vocabulary richness", c.vocabulary_richness),
        ("Sentence complexity", c.sentence_complexity),
        ("Punctuation density", c.punctuation_density),
        ("Short words", c.short_words),
        ("Long words", c.long_words),
    ] {
        report.push_str(&format!(
            "{:<22} {:.3}  {}\n",
            name,
            value,
            format_metric_bar(value, 0.0, 1.0, BAR_WIDTH)
        ));
    }

    push_rule(&mut report, "TEXT METRICS");
    report.push_str(&format!(
        "{:<22} {:>10} {:>10}\n",
        "", "first", "second"
    ));
    for (name, a, b) in metric_rows(&assessment.metrics_a, &assessment.metrics_b) {
        report.push_str(&format!("{name:<22} {a:>10} {b:>10}\n"));
    }

    report
}

fn metric_rows(a: &WritingMetrics, b: &WritingMetrics) -> Vec<(&'static str, String, String)> {
    vec![
        ("Words", a.word_count.to_string(), b.word_count.to_string()),
        (
            "Sentences",
            a.sentence_count.to_string(),
            b.sentence_count.to_string(),
        ),
        (
            "Paragraphs",
            a.paragraph_count.to_string(),
            b.paragraph_count.to_string(),
        ),
        (
            "Words/sentence",
            format!("{:.2}", a.avg_words_per_sentence),
            format!("{:.2}", b.avg_words_per_sentence),
        ),
        (
            "Avg word length",
            format!("{:.2}", a.avg_word_length),
            format!("{:.2}", b.avg_word_length),
        ),
        (
            "Vocabulary richness",
            format!("{:.3}", a.vocabulary_richness),
            format!("{:.3}", b.vocabulary_richness),
        ),
    ]
}

fn push_header(report: &mut String, title: &str) {
    report.push_str(&"=".repeat(RULE_WIDTH));
    report.push('\n');
    report.push_str(&format!("{:^RULE_WIDTH$}\n", title));
    report.push_str(&"=".repeat(RULE_WIDTH));
    report.push_str("\n\n");
}

fn push_rule(report: &mut String, title: &str) {
    report.push_str(&"-".repeat(RULE_WIDTH));
    report.push_str(&format!("\n{title}\n"));
    report.push_str(&"-".repeat(RULE_WIDTH));
    report.push_str("\n\n");
}

/// Formats a metric bar for visualization.
fn format_metric_bar(value: f64, min: f64, max: f64, width: usize) -> String {
    if width == 0 || max <= min {
        return "-".repeat(width);
    }

    let normalized = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = ((normalized * width as f64) as usize).min(width);

    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Single-line preview of decoded content, truncated for terminal output.
fn preview(text: &str) -> String {
    let line = text.replace(['\n', '\r'], " ");
    if line.chars().count() <= 60 {
        return line;
    }
    let truncated: String = line.chars().take(57).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_bar_endpoints() {
        assert_eq!(format_metric_bar(0.0, 0.0, 1.0, 4), "[----]");
        assert_eq!(format_metric_bar(1.0, 0.0, 1.0, 4), "[####]");
        assert_eq!(format_metric_bar(0.5, 0.0, 1.0, 4), "[##--]");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(200);
        let rendered = preview(&long);
        assert!(rendered.chars().count() <= 60);
        assert!(rendered.ends_with("..."));
    }
}
