//! Report and catalog documents. Every field is always present and
//! serialized; absent data is an empty string, empty collection, or zero.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OntoNavError;
use crate::graph::PatternQuery;

/// A named grouping of concepts (one taxonomy or vocabulary document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptScheme {
    pub uri: String,
    pub label: String,
    pub comment: String,
    pub description: String,
    /// Member concept URIs, kept sorted; insertion order carries no meaning.
    pub concepts: BTreeSet<String>,
    /// Outbound cross-reference URIs (see-also style links).
    pub cross_references: BTreeSet<String>,
}

/// One node of the taxonomy. Keyed by URI; rediscovery merges attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uri: String,
    pub label: String,
    pub comment: String,
    /// Owning scheme URI; a concept declares membership in at most one.
    pub scheme: String,
    pub broader: BTreeSet<String>,
    pub narrower: BTreeSet<String>,
    pub related: BTreeSet<String>,
    pub scope_note: String,
    pub examples: BTreeSet<String>,
}

impl Concept {
    #[must_use]
    pub fn has_examples(&self) -> bool {
        !self.examples.is_empty()
    }

    #[must_use]
    pub fn has_scope_note(&self) -> bool {
        !self.scope_note.is_empty()
    }

    /// A concept with neither broader nor narrower links sits outside the
    /// hierarchy entirely.
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.broader.is_empty() && self.narrower.is_empty()
    }
}

/// Outcome of one structural consistency check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub check: String,
    pub passed: bool,
    pub message: String,
    /// 0..=100.
    pub score: f64,
    pub details: BTreeMap<String, serde_json::Value>,
    /// URIs of the entities each recorded issue points at.
    pub affected: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// A check that could not run at all still yields a result object; the
    /// failure is data, never an error crossing the component boundary.
    #[must_use]
    pub fn from_failure(check: &str, reason: &str) -> Self {
        Self {
            check: check.to_string(),
            passed: false,
            message: format!("check did not run: {reason}"),
            score: 0.0,
            details: BTreeMap::new(),
            affected: Vec::new(),
            recommendations: vec![format!("investigate failed check '{check}'")],
        }
    }
}

/// Aggregate counts and derived composites over the discovered catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyMetrics {
    pub scheme_count: usize,
    pub concept_count: usize,
    pub hierarchical_relationships: usize,
    pub related_relationships: usize,
    pub concepts_with_examples: usize,
    pub concepts_with_scope_notes: usize,
    pub max_hierarchy_depth: usize,
    pub avg_hierarchy_depth: f64,
    /// 0..=100, capped per-dimension combination of the counts above.
    pub completeness_score: f64,
    /// 0..=100, derived from depth and relationship density.
    pub navigation_readiness_score: f64,
}

/// Style of traversal a navigation scenario exercises.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Forward,
    Backward,
    CrossReference,
    MultiHop,
    CrossOntology,
    Bidirectional,
    Inference,
}

impl PatternCategory {
    pub const ALL: [Self; 7] = [
        Self::Forward,
        Self::Backward,
        Self::CrossReference,
        Self::MultiHop,
        Self::CrossOntology,
        Self::Bidirectional,
        Self::Inference,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::CrossReference => "cross_reference",
            Self::MultiHop => "multi_hop",
            Self::CrossOntology => "cross_ontology",
            Self::Bidirectional => "bidirectional",
            Self::Inference => "inference",
        }
    }
}

impl Display for PatternCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the static navigation-scenario catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationQueryScenario {
    pub name: String,
    pub description: String,
    pub query: PatternQuery,
    pub expected_min_results: usize,
    pub hops: usize,
    pub category: PatternCategory,
}

/// Outcome of executing one navigation scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExecutionResult {
    pub scenario: String,
    pub category: String,
    pub succeeded: bool,
    pub result_count: usize,
    /// First few solution rows, rendered for diagnostics.
    pub sample: Vec<String>,
    pub meets_expectation: bool,
    pub error: String,
}

/// The four named components of the overall readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessScoreComponent {
    TaxonomyCompleteness,
    NavigationEffectiveness,
    ImplementationGuidance,
    QueryReadiness,
}

impl ReadinessScoreComponent {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TaxonomyCompleteness => "taxonomy_completeness",
            Self::NavigationEffectiveness => "navigation_effectiveness",
            Self::ImplementationGuidance => "implementation_guidance",
            Self::QueryReadiness => "query_readiness",
        }
    }
}

/// One weighted component of the overall readiness score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub name: String,
    pub score: f64,
    /// Documented constant weight, serialized for transparency.
    pub weight: f64,
}

/// Step function of the overall score. Ordering follows variant order, so
/// `level >= ReadinessLevel::NeedsMinorImprovements` reads as intended.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    #[default]
    NotReady,
    NeedsMajorImprovements,
    NeedsMinorImprovements,
    ProductionReady,
}

impl ReadinessLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::NeedsMajorImprovements => "needs_major_improvements",
            Self::NeedsMinorImprovements => "needs_minor_improvements",
            Self::ProductionReady => "production_ready",
        }
    }
}

impl Display for ReadinessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadinessLevel {
    type Err = OntoNavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_ready" => Ok(Self::NotReady),
            "needs_major_improvements" => Ok(Self::NeedsMajorImprovements),
            "needs_minor_improvements" => Ok(Self::NeedsMinorImprovements),
            "production_ready" => Ok(Self::ProductionReady),
            _ => Err(OntoNavError::Aggregation(format!(
                "unknown readiness level: {s}"
            ))),
        }
    }
}

/// One boolean-gated Lambda sub-assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LambdaAssessment {
    pub score: f64,
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LambdaReadiness {
    pub development: LambdaAssessment,
    pub deployment: LambdaAssessment,
    pub user_experience: LambdaAssessment,
}

/// Top-level output artifact of one validation run. Assembled once, never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub overall_score: f64,
    pub level: ReadinessLevel,
    pub components: Vec<ReadinessScore>,
    pub metrics: TaxonomyMetrics,
    pub validations: Vec<ValidationResult>,
    pub query_results: Vec<QueryExecutionResult>,
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_validation: DateTime<Utc>,
    pub lambda: LambdaReadiness,
    pub scenario_catalog_version: String,
    /// Set when the run deadline expired before every check/scenario ran.
    pub incomplete: bool,
}
