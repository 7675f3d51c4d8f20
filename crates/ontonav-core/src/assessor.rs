//! Pipeline orchestrator: Discovery → Metrics → Checks → Harness →
//! Aggregation, executed as one sequential pass over a shared read-only
//! graph, bounded by an optional caller-supplied timeout.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use crate::catalog::Catalog;
use crate::checks;
use crate::discovery;
use crate::error::{OntoNavError, Result};
use crate::graph::{GraphStore, MemoryGraphStore};
use crate::harness;
use crate::metrics;
use crate::models::{QueryExecutionResult, ReadinessReport, TaxonomyMetrics};
use crate::policy::ScoringPolicy;
use crate::readiness;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Whole-run budget. On expiry, completed results are still aggregated
    /// and the report carries an incomplete-coverage critical issue.
    pub timeout: Option<Duration>,
}

impl RunOptions {
    fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|timeout| Instant::now() + timeout)
    }
}

#[derive(Debug, Clone)]
pub struct Assessor {
    policy: ScoringPolicy,
}

impl Assessor {
    pub fn new(policy: ScoringPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    #[must_use]
    pub fn with_default_policy() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Full assessment of an already loaded graph.
    pub fn assess(&self, graph: &dyn GraphStore, options: &RunOptions) -> Result<ReadinessReport> {
        let deadline = options.deadline();

        let catalog = discovery::discover(graph)?;
        info!(
            schemes = catalog.scheme_count(),
            concepts = catalog.concept_count(),
            triples = graph.triple_count(),
            "discovery complete"
        );
        let metrics = metrics::compute(&catalog, &self.policy);

        let (validations, checks_timed_out) = checks::run_all(&catalog, &self.policy, deadline);
        let (query_results, harness_timed_out) = if checks_timed_out {
            (Vec::new(), true)
        } else {
            harness::execute_all(graph, &harness::catalog(), deadline)
        };

        readiness::aggregate(
            metrics,
            validations,
            query_results,
            &self.policy,
            checks_timed_out || harness_timed_out,
        )
    }

    /// Load the sources and assess them. A load failure is not an error at
    /// this level: it becomes a failure-only, Not Ready report.
    pub fn assess_sources<P: AsRef<Path>>(
        &self,
        sources: &[P],
        options: &RunOptions,
    ) -> Result<ReadinessReport> {
        match MemoryGraphStore::load(sources) {
            Ok(store) => self.assess(&store, options),
            Err(OntoNavError::Load(reason)) => {
                info!(error = %reason, "graph load failed; emitting failure report");
                Ok(readiness::load_failure_report(&reason))
            }
            Err(err) => Err(err),
        }
    }

    /// Component selector: discovery plus metrics only.
    pub fn discover_and_measure(
        &self,
        graph: &dyn GraphStore,
    ) -> Result<(Catalog, TaxonomyMetrics)> {
        let catalog = discovery::discover(graph)?;
        let metrics = metrics::compute(&catalog, &self.policy);
        Ok((catalog, metrics))
    }

    /// Component selector: navigation harness only.
    #[must_use]
    pub fn run_navigation_harness(
        &self,
        graph: &dyn GraphStore,
        options: &RunOptions,
    ) -> (Vec<QueryExecutionResult>, bool) {
        harness::execute_all(graph, &harness::catalog(), options.deadline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadinessLevel;
    use crate::vocab;

    fn small_graph() -> MemoryGraphStore {
        let mut store = MemoryGraphStore::default();
        store
            .load_text(
                &format!(
                    "<urn:s> <{rdf_type}> <{scheme}> .\n\
                     <urn:c1> <{in_scheme}> <urn:s> .\n\
                     <urn:c2> <{in_scheme}> <urn:s> .\n\
                     <urn:c1> <{broader}> <urn:c2> .\n\
                     <urn:c2> <{narrower}> <urn:c1> .\n",
                    rdf_type = vocab::RDF_TYPE,
                    scheme = vocab::SKOS_CONCEPT_SCHEME,
                    in_scheme = vocab::SKOS_IN_SCHEME,
                    broader = vocab::SKOS_BROADER,
                    narrower = vocab::SKOS_NARROWER,
                ),
                "fixture",
            )
            .expect("fixture");
        store
    }

    #[test]
    fn assess_produces_a_complete_report() {
        let assessor = Assessor::with_default_policy();
        let report = assessor
            .assess(&small_graph(), &RunOptions::default())
            .expect("assess");
        assert_eq!(report.validations.len(), 4);
        assert_eq!(report.query_results.len(), harness::catalog().len());
        assert!(!report.incomplete);
    }

    #[test]
    fn zero_timeout_yields_an_incomplete_but_valid_report() {
        let assessor = Assessor::with_default_policy();
        let report = assessor
            .assess(
                &small_graph(),
                &RunOptions {
                    timeout: Some(Duration::ZERO),
                },
            )
            .expect("assess");
        assert!(report.incomplete);
        assert!(report
            .critical_issues
            .iter()
            .any(|issue| issue.contains("deadline expired")));
    }

    #[test]
    fn missing_source_becomes_a_failure_report() {
        let assessor = Assessor::with_default_policy();
        let report = assessor
            .assess_sources(&["/nonexistent/graph.nt"], &RunOptions::default())
            .expect("failure report");
        assert_eq!(report.level, ReadinessLevel::NotReady);
        assert!(report.critical_issues[0].contains("graph load failed"));
    }

    #[test]
    fn invalid_policy_is_rejected_on_construction() {
        let policy = ScoringPolicy {
            scheme_pass_threshold: 400.0,
            ..ScoringPolicy::default()
        };
        assert!(Assessor::new(policy).is_err());
    }
}
