//! Navigation query harness: executes the static scenario catalog against
//! the graph store and records one result per scenario. A failing query is
//! captured in its own result and never aborts the remaining scenarios.

use std::time::Instant;

use tracing::{debug, warn};

use crate::graph::GraphStore;
use crate::models::{NavigationQueryScenario, QueryExecutionResult};

mod scenarios;

pub use scenarios::{CATALOG_VERSION, catalog};

/// Diagnostics sample size kept on each result.
const SAMPLE_LIMIT: usize = 3;

/// Execute every scenario in catalog order. Returns the recorded results
/// and whether the deadline expired before the catalog was exhausted.
pub fn execute_all(
    graph: &dyn GraphStore,
    scenarios: &[NavigationQueryScenario],
    deadline: Option<Instant>,
) -> (Vec<QueryExecutionResult>, bool) {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!(scenario = %scenario.name, "deadline expired before scenario ran");
                return (results, true);
            }
        }
        results.push(execute(graph, scenario));
    }
    (results, false)
}

fn execute(graph: &dyn GraphStore, scenario: &NavigationQueryScenario) -> QueryExecutionResult {
    match graph.query(&scenario.query) {
        Ok(rows) => {
            let meets_expectation = rows.len() >= scenario.expected_min_results;
            debug!(
                scenario = %scenario.name,
                results = rows.len(),
                meets_expectation,
                "scenario executed"
            );
            QueryExecutionResult {
                scenario: scenario.name.clone(),
                category: scenario.category.as_str().to_string(),
                succeeded: true,
                result_count: rows.len(),
                sample: rows.iter().take(SAMPLE_LIMIT).map(ToString::to_string).collect(),
                meets_expectation,
                error: String::new(),
            }
        }
        Err(err) => {
            warn!(scenario = %scenario.name, error = %err, "scenario failed");
            QueryExecutionResult {
                scenario: scenario.name.clone(),
                category: scenario.category.as_str().to_string(),
                succeeded: false,
                result_count: 0,
                sample: Vec::new(),
                meets_expectation: false,
                error: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OntoNavError, Result};
    use crate::graph::{MemoryGraphStore, PatternQuery, Row};
    use crate::models::PatternCategory;
    use crate::vocab;

    /// Store that fails any query containing a marker predicate; everything
    /// else is delegated to an in-memory graph.
    struct FaultyStore {
        inner: MemoryGraphStore,
        poison_predicate: String,
    }

    impl GraphStore for FaultyStore {
        fn query(&self, query: &PatternQuery) -> Result<Vec<Row>> {
            let poisoned = query.patterns.iter().any(|pattern| {
                matches!(&pattern.predicate, crate::graph::Term::Uri(uri) if *uri == self.poison_predicate)
            });
            if poisoned {
                return Err(OntoNavError::Query("backend fault".to_string()));
            }
            self.inner.query(query)
        }

        fn triple_count(&self) -> usize {
            self.inner.triple_count()
        }
    }

    fn populated_store() -> MemoryGraphStore {
        let mut store = MemoryGraphStore::default();
        store
            .load_text(
                &format!(
                    "<urn:a> <{broader}> <urn:b> .\n\
                     <urn:b> <{broader}> <urn:c> .\n\
                     <urn:c> <{broader}> <urn:d> .\n\
                     <urn:b> <{narrower}> <urn:a> .\n\
                     <urn:a> <{in_scheme}> <urn:s1> .\n\
                     <urn:b> <{in_scheme}> <urn:s1> .\n\
                     <urn:x> <{in_scheme}> <urn:s2> .\n\
                     <urn:a> <{related}> <urn:x> .\n\
                     <urn:s1> <{see_also}> <urn:s2> .\n\
                     <urn:d1> <{derived}> <urn:d2> .\n\
                     <urn:d2> <{derived}> <urn:d3> .\n",
                    broader = vocab::SKOS_BROADER,
                    narrower = vocab::SKOS_NARROWER,
                    in_scheme = vocab::SKOS_IN_SCHEME,
                    related = vocab::SKOS_RELATED,
                    see_also = vocab::RDFS_SEE_ALSO,
                    derived = vocab::PROV_WAS_DERIVED_FROM,
                ),
                "fixture",
            )
            .expect("fixture");
        store
    }

    #[test]
    fn full_catalog_succeeds_against_a_rich_graph() {
        let store = populated_store();
        let (results, timed_out) = execute_all(&store, &catalog(), None);
        assert!(!timed_out);
        assert_eq!(results.len(), catalog().len());
        for result in &results {
            assert!(result.succeeded, "scenario {} failed", result.scenario);
            assert!(result.meets_expectation, "scenario {} under target", result.scenario);
        }
    }

    #[test]
    fn sample_rows_are_bounded() {
        let store = populated_store();
        let (results, _) = execute_all(&store, &catalog(), None);
        for result in results {
            assert!(result.sample.len() <= SAMPLE_LIMIT);
            if result.result_count > 0 {
                assert!(!result.sample.is_empty());
            }
        }
    }

    #[test]
    fn one_failing_scenario_leaves_the_rest_untouched() {
        let store = FaultyStore {
            inner: populated_store(),
            poison_predicate: vocab::PROV_WAS_DERIVED_FROM.to_string(),
        };
        let scenarios = catalog();
        let (results, timed_out) = execute_all(&store, &scenarios, None);
        assert!(!timed_out);
        assert_eq!(results.len(), scenarios.len());
        let failed: Vec<_> = results.iter().filter(|result| !result.succeeded).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].scenario, "derivation_chain");
        assert_eq!(failed[0].error, "query failed: backend fault");
    }

    #[test]
    fn expired_deadline_stops_remaining_scenarios() {
        let store = populated_store();
        let deadline = Instant::now();
        let (results, timed_out) = execute_all(&store, &catalog(), Some(deadline));
        assert!(timed_out);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_graph_meets_no_expectations_but_every_query_succeeds() {
        let store = MemoryGraphStore::default();
        let (results, _) = execute_all(&store, &catalog(), None);
        for result in results {
            assert!(result.succeeded);
            assert!(!result.meets_expectation);
            assert_eq!(result.result_count, 0);
        }
    }

    #[test]
    fn categories_are_recorded_on_results() {
        let store = populated_store();
        let (results, _) = execute_all(&store, &catalog(), None);
        assert!(results
            .iter()
            .any(|result| result.category == PatternCategory::CrossOntology.as_str()));
    }
}
