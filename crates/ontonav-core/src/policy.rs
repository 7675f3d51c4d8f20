//! Scoring policy: every empirically chosen threshold, cap, and keyword set
//! in one place, overridable from TOML. The defaults are the documented
//! operating point, not derived values.

use serde::{Deserialize, Serialize};

use crate::error::{OntoNavError, Result};

/// Readiness keywords an example must mention to count as
/// implementation-ready. Configured, not hard-coded at the match site.
pub const DEFAULT_READINESS_KEYWORDS: &[&str] = &[
    "lambda",
    "api",
    "endpoint",
    "function",
    "handler",
    "integration",
    "implementation",
    "code",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringPolicy {
    /// Scheme Navigation pass threshold (percent of clean schemes).
    pub scheme_pass_threshold: f64,
    /// Hierarchical Browsing pass threshold.
    pub hierarchy_pass_threshold: f64,
    /// Non-bidirectional issues tolerated before the hierarchy check fails.
    pub hierarchy_max_issues: usize,
    /// Penalty per orphan concept and the total penalty cap.
    pub orphan_penalty: f64,
    pub orphan_penalty_cap: f64,
    /// Related Concept Discovery pass threshold and dangling tolerance.
    pub related_pass_threshold: f64,
    pub related_max_dangling: usize,
    /// Bonus per cross-scheme related edge and its cap.
    pub cross_scheme_bonus: f64,
    pub cross_scheme_bonus_cap: f64,
    /// Examples & Scope Notes sub-thresholds (all must hold to pass).
    pub example_coverage_threshold: f64,
    pub scope_note_coverage_threshold: f64,
    pub detail_quality_threshold: f64,
    pub implementation_readiness_threshold: f64,
    /// A scope note below this length does not count as detailed.
    pub scope_note_detail_length: usize,
    /// Keyword set used for implementation-readiness matching.
    pub readiness_keywords: Vec<String>,
    /// Counts at which each completeness dimension saturates.
    pub sufficient_schemes: usize,
    pub sufficient_concepts: usize,
    pub sufficient_hierarchy_links: usize,
    pub sufficient_related_links: usize,
    /// Failed scenarios tolerated before a critical issue is raised.
    pub max_failed_scenarios: usize,
    /// Recommendation list cap on the final report.
    pub max_recommendations: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            scheme_pass_threshold: 80.0,
            hierarchy_pass_threshold: 70.0,
            hierarchy_max_issues: 5,
            orphan_penalty: 10.0,
            orphan_penalty_cap: 50.0,
            related_pass_threshold: 60.0,
            related_max_dangling: 3,
            cross_scheme_bonus: 2.0,
            cross_scheme_bonus_cap: 30.0,
            example_coverage_threshold: 40.0,
            scope_note_coverage_threshold: 30.0,
            detail_quality_threshold: 50.0,
            implementation_readiness_threshold: 30.0,
            scope_note_detail_length: 200,
            readiness_keywords: DEFAULT_READINESS_KEYWORDS
                .iter()
                .map(|keyword| (*keyword).to_string())
                .collect(),
            sufficient_schemes: 3,
            sufficient_concepts: 30,
            sufficient_hierarchy_links: 20,
            sufficient_related_links: 10,
            max_failed_scenarios: 2,
            max_recommendations: 10,
        }
    }
}

impl ScoringPolicy {
    /// Parse a TOML override document. Unknown keys are rejected so a typo
    /// cannot silently fall back to a default.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let policy: Self = toml::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let percentages = [
            ("scheme_pass_threshold", self.scheme_pass_threshold),
            ("hierarchy_pass_threshold", self.hierarchy_pass_threshold),
            ("related_pass_threshold", self.related_pass_threshold),
            ("example_coverage_threshold", self.example_coverage_threshold),
            (
                "scope_note_coverage_threshold",
                self.scope_note_coverage_threshold,
            ),
            ("detail_quality_threshold", self.detail_quality_threshold),
            (
                "implementation_readiness_threshold",
                self.implementation_readiness_threshold,
            ),
            ("orphan_penalty_cap", self.orphan_penalty_cap),
            ("cross_scheme_bonus_cap", self.cross_scheme_bonus_cap),
        ];
        for (name, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(OntoNavError::Policy(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if self.readiness_keywords.is_empty() {
            return Err(OntoNavError::Policy(
                "readiness_keywords must not be empty".to_string(),
            ));
        }
        if self.max_recommendations == 0 {
            return Err(OntoNavError::Policy(
                "max_recommendations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Case-insensitive containment against the configured keyword set.
    #[must_use]
    pub fn matches_readiness_keyword(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.readiness_keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }
}
