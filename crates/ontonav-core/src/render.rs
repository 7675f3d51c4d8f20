//! Report sink: persistence and presentation of an assembled report. Both
//! renderings are pure projections of the report document; neither
//! re-derives a score.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::ReadinessReport;

pub trait ReportSink {
    fn write(&self, report: &ReadinessReport) -> Result<()>;
}

/// Field-for-field JSON serialization of the report.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, report: &ReadinessReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Human-readable rendering of the same report.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for TextFileSink {
    fn write(&self, report: &ReadinessReport) -> Result<()> {
        fs::write(&self.path, render_text(report))?;
        Ok(())
    }
}

#[must_use]
pub fn render_text(report: &ReadinessReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Taxonomy readiness assessment {}", report.run_id);
    let _ = writeln!(out, "generated at: {}", report.generated_at.to_rfc3339());
    let _ = writeln!(
        out,
        "overall: {:.1} ({}){}",
        report.overall_score,
        report.level,
        if report.incomplete { " [incomplete coverage]" } else { "" }
    );

    let _ = writeln!(out, "\ncomponents:");
    for component in &report.components {
        let _ = writeln!(
            out,
            "  {:<28} {:>6.1}  (weight {:.0}%)",
            component.name, component.score, component.weight
        );
    }

    let _ = writeln!(
        out,
        "\ncatalog: {} scheme(s), {} concept(s), {} hierarchical and {} related link(s), max depth {}",
        report.metrics.scheme_count,
        report.metrics.concept_count,
        report.metrics.hierarchical_relationships,
        report.metrics.related_relationships,
        report.metrics.max_hierarchy_depth,
    );

    if !report.validations.is_empty() {
        let _ = writeln!(out, "\nconsistency checks:");
        for validation in &report.validations {
            let _ = writeln!(
                out,
                "  [{}] {:<24} {:>6.1}  {}",
                if validation.passed { "pass" } else { "FAIL" },
                validation.check,
                validation.score,
                validation.message
            );
        }
    }

    if !report.query_results.is_empty() {
        let _ = writeln!(
            out,
            "\nnavigation scenarios (catalog {}):",
            report.scenario_catalog_version
        );
        for result in &report.query_results {
            let status = if !result.succeeded {
                "FAIL"
            } else if result.meets_expectation {
                "pass"
            } else {
                "low "
            };
            let _ = writeln!(
                out,
                "  [{status}] {:<28} {:>4} result(s)  {}",
                result.scenario, result.result_count, result.error
            );
        }
    }

    if !report.critical_issues.is_empty() {
        let _ = writeln!(out, "\ncritical issues:");
        for issue in &report.critical_issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    if !report.recommendations.is_empty() {
        let _ = writeln!(out, "\nrecommendations:");
        for recommendation in &report.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }

    let lambda = &report.lambda;
    let _ = writeln!(
        out,
        "\nlambda readiness: development {:.1} ({}), deployment {:.1} ({}), user experience {:.1} ({})",
        lambda.development.score,
        gate(lambda.development.ready),
        lambda.deployment.score,
        gate(lambda.deployment.ready),
        lambda.user_experience.score,
        gate(lambda.user_experience.ready),
    );
    let _ = writeln!(
        out,
        "next validation due: {}",
        report.next_validation.to_rfc3339()
    );
    out
}

const fn gate(ready: bool) -> &'static str {
    if ready { "ready" } else { "not ready" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::load_failure_report;

    #[test]
    fn text_rendering_reflects_the_failure_path() {
        let report = load_failure_report("no such file");
        let text = render_text(&report);
        assert!(text.contains("not_ready"));
        assert!(text.contains("no such file"));
        assert!(text.contains("[incomplete coverage]"));
    }

    #[test]
    fn json_sink_round_trips_the_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let report = load_failure_report("boom");
        JsonFileSink::new(&path).write(&report).expect("write");
        let raw = fs::read_to_string(&path).expect("read");
        let parsed: ReadinessReport = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed.run_id, report.run_id);
        assert_eq!(parsed.overall_score, report.overall_score);
    }

    #[test]
    fn text_sink_writes_the_rendering() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.txt");
        let report = load_failure_report("boom");
        TextFileSink::new(&path).write(&report).expect("write");
        let raw = fs::read_to_string(&path).expect("read");
        assert_eq!(raw, render_text(&report));
    }
}
