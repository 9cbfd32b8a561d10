//! Experiment reporting
//!
//! Gantree: L6_Experiment → Reporter
//!
//! Renders an experiment report as Markdown, JSON, CSV or plain text.

use crate::pipeline::{CircuitComparison, ExperimentReport};
use fte_core::stats;
use std::fmt::{self, Write};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON
    Json,
    /// CSV
    Csv,
    /// Plain text summary
    Text,
}

/// Experiment reporter
/// Gantree: Reporter // 결과 리포팅
pub struct Reporter;

impl Reporter {
    // ========================================================================
    // Format Converters
    // ========================================================================

    /// Generate report in specified format
    pub fn report(report: &ExperimentReport, format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => Self::to_markdown(report),
            ReportFormat::Json => Self::to_json(report),
            ReportFormat::Csv => Self::to_csv(&report.comparisons),
            ReportFormat::Text => Self::to_text(report),
        }
    }

    /// Convert report to Markdown tables
    pub fn to_markdown(report: &ExperimentReport) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = write_markdown(&mut output, report);
        output
    }

    /// Convert report to JSON
    pub fn to_json(report: &ExperimentReport) -> String {
        let json = serde_json::json!({
            "summary": report.summary(),
            "report": report,
        });
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }

    /// Convert comparisons to CSV
    pub fn to_csv(comparisons: &[CircuitComparison]) -> String {
        let mut output = String::new();
        let _ = write_csv(&mut output, comparisons);
        output
    }

    /// Convert report to plain text summary
    pub fn to_text(report: &ExperimentReport) -> String {
        let mut output = String::new();
        let _ = write_text(&mut output, report);
        output
    }
}

// ============================================================================
// Writers
// ============================================================================

fn write_markdown(out: &mut String, report: &ExperimentReport) -> fmt::Result {
    let summary = report.summary();
    let confidence = report.config.confidence * 100.0;

    writeln!(out, "# Bare vs Encoded Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Backend**: {}", report.backend)?;
    writeln!(out, "- **Test cases**: {}", summary.count)?;
    writeln!(
        out,
        "- **Runs x shots**: {} x {}",
        report.config.runs, report.config.shots
    )?;
    writeln!(out, "- **Encoded better**: {}", summary.encoded_better)?;
    writeln!(out, "- **Bare better**: {}", summary.bare_better)?;
    writeln!(out, "- **Inconclusive**: {}", summary.inconclusive())?;
    writeln!(out, "- **Mean difference**: {:+.4}", summary.mean_difference)?;
    writeln!(
        out,
        "- **Mean post-selection**: {:.1}%\n",
        summary.mean_post_selection * 100.0
    )?;

    writeln!(out, "## Comparisons ({:.0}% CI)\n", confidence)?;
    writeln!(
        out,
        "| Circuit | Pair | Version | Ideal | Bare gates | Encoded gates | Bare | Encoded | Diff | Post-sel |"
    )?;
    writeln!(
        out,
        "|---------|------|---------|-------|------------|---------------|------|---------|------|----------|"
    )?;

    for c in &report.comparisons {
        writeln!(
            out,
            "| `{}` | {} | {} | {} | {} | {} | {:.4} ± {:.4} | {:.4} ± {:.4} | {:+.4} ± {:.4} | {:.1}% |",
            c.label,
            c.pair,
            c.version,
            ideal_text(c),
            c.bare_count,
            c.encoded_count,
            c.bare.mean,
            c.bare.half_width,
            c.encoded.mean,
            c.encoded.half_width,
            c.difference(),
            c.difference_half_width(),
            c.post_selection_ratio * 100.0
        )?;
    }

    Ok(())
}

fn write_csv(out: &mut String, comparisons: &[CircuitComparison]) -> fmt::Result {
    writeln!(
        out,
        "label,input,pair,version,parity,bare_1q,bare_2q,encoded_1q,encoded_2q,bare_mean,bare_half_width,encoded_mean,encoded_half_width,difference,difference_half_width,post_selection_ratio,dropped_trials"
    )?;

    for c in comparisons {
        writeln!(
            out,
            "{},{},\"{}\",{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            c.label,
            c.input,
            c.pair,
            c.version,
            u8::from(c.parity),
            c.bare_count.one_qubit,
            c.bare_count.two_qubit,
            c.encoded_count.one_qubit,
            c.encoded_count.two_qubit,
            c.bare.mean,
            c.bare.half_width,
            c.encoded.mean,
            c.encoded.half_width,
            c.difference(),
            c.difference_half_width(),
            c.post_selection_ratio,
            c.dropped_trials
        )?;
    }

    Ok(())
}

fn write_text(out: &mut String, report: &ExperimentReport) -> fmt::Result {
    let summary = report.summary();

    writeln!(out, "Bare vs Encoded Results")?;
    writeln!(out, "=======================\n")?;

    writeln!(out, "Summary:")?;
    writeln!(out, "  Backend: {}", report.backend)?;
    writeln!(out, "  Test cases: {}", summary.count)?;
    writeln!(out, "  Encoded better: {}", summary.encoded_better)?;
    writeln!(out, "  Bare better: {}", summary.bare_better)?;
    writeln!(out, "  Inconclusive: {}", summary.inconclusive())?;
    writeln!(out, "  Mean difference: {:+.4}", summary.mean_difference)?;
    writeln!(
        out,
        "  Mean post-selection: {:.1}%\n",
        summary.mean_post_selection * 100.0
    )?;

    writeln!(out, "Individual Results:")?;
    for c in &report.comparisons {
        let verdict = if c.encoded_better() {
            "encoded better"
        } else if c.bare_better() {
            "bare better"
        } else {
            "inconclusive"
        };
        writeln!(out, "  {} -> {}", c, verdict)?;
    }

    Ok(())
}

/// Ideal distribution as `00:p 01:p ...`, zero buckets omitted
fn ideal_text(c: &CircuitComparison) -> String {
    stats::BUCKET_LABELS
        .iter()
        .zip(c.ideal.iter())
        .filter(|(_, p)| **p > 0.0)
        .map(|(label, p)| format!("{}:{}", label, p))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;
    use fte_analysis::AggregatedStatistics;
    use fte_core::{GateCount, QubitPair};
    use fte_synth::{EncodingVersion, InputState};

    fn comparison(label: &str, bare: &[f64], encoded: &[f64]) -> CircuitComparison {
        CircuitComparison {
            label: label.to_string(),
            input: InputState::Zero,
            ideal: [0.0, 0.0, 1.0, 0.0],
            pair: QubitPair::default(),
            version: EncodingVersion::Standard,
            bare_program: format!("b{}[0,1]", label),
            encoded_program: format!("e{}", label),
            parity: false,
            bare_count: GateCount::new(1, 0),
            encoded_count: GateCount::new(13, 8),
            bare: AggregatedStatistics::from_distances(bare, 0.95).unwrap(),
            encoded: AggregatedStatistics::from_distances(encoded, 0.95).unwrap(),
            post_selection_ratio: 0.9,
            dropped_trials: 0,
        }
    }

    fn make_report() -> ExperimentReport {
        ExperimentReport {
            backend: "ibmqx2".to_string(),
            config: ExperimentConfig::quick(),
            comparisons: vec![
                comparison("X1|00>", &[0.05, 0.055, 0.06], &[0.01, 0.015, 0.02]),
                comparison("X2|00>", &[0.02, 0.03, 0.025], &[0.02, 0.04, 0.03]),
            ],
        }
    }

    #[test]
    fn test_markdown() {
        let md = Reporter::to_markdown(&make_report());
        assert!(md.contains("# Bare vs Encoded Results"));
        assert!(md.contains("| `X1|00>` | [0,1] | Standard | 10:1 | (1, 0) | (13, 8) |"));
        assert!(md.contains("**Encoded better**: 1"));
    }

    #[test]
    fn test_json() {
        let json = Reporter::to_json(&make_report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["count"], 2);
        assert_eq!(value["report"]["comparisons"][0]["label"], "X1|00>");
    }

    #[test]
    fn test_csv() {
        let csv = Reporter::to_csv(&make_report().comparisons);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("label,input,pair"));
        assert!(lines[1].starts_with("X1|00>,|00>,\"[0,1]\",Standard,0,1,0,13,8,"));
    }

    #[test]
    fn test_text() {
        let text = Reporter::report(&make_report(), ReportFormat::Text);
        assert!(text.contains("Test cases: 2"));
        assert!(text.contains("-> encoded better"));
        assert!(text.contains("-> inconclusive"));
    }
}
