//! The static navigation-scenario catalog. Fixed and versioned: changing a
//! scenario or the set bumps [`CATALOG_VERSION`], which is serialized into
//! every report.

use crate::graph::{PatternQuery, Term, TriplePattern};
use crate::models::{NavigationQueryScenario, PatternCategory};
use crate::vocab;

pub const CATALOG_VERSION: &str = "2024-1";

#[must_use]
pub fn catalog() -> Vec<NavigationQueryScenario> {
    vec![
        scenario(
            "broader_forward",
            "walk one hop up the hierarchy from any concept",
            PatternQuery::new(vec![pattern("concept", vocab::SKOS_BROADER, "parent")]),
            1,
            1,
            PatternCategory::Forward,
        ),
        scenario(
            "scheme_membership",
            "enumerate concepts of a scheme through their membership edges",
            PatternQuery::new(vec![pattern("concept", vocab::SKOS_IN_SCHEME, "scheme")]),
            2,
            1,
            PatternCategory::Forward,
        ),
        scenario(
            "narrower_backward",
            "walk the hierarchy downwards through the inverse property",
            PatternQuery::new(vec![pattern("parent", vocab::SKOS_NARROWER, "child")]),
            1,
            1,
            PatternCategory::Backward,
        ),
        scenario(
            "see_also_cross_reference",
            "discover neighbouring vocabularies through see-also links",
            PatternQuery::new(vec![pattern("source", vocab::RDFS_SEE_ALSO, "target")]),
            1,
            1,
            PatternCategory::CrossReference,
        ),
        scenario(
            "broader_chain_three_hops",
            "chain three broader hops from leaf towards root",
            PatternQuery::new(vec![
                pattern("a", vocab::SKOS_BROADER, "b"),
                pattern("b", vocab::SKOS_BROADER, "c"),
                pattern("c", vocab::SKOS_BROADER, "d"),
            ]),
            1,
            3,
            PatternCategory::MultiHop,
        ),
        scenario(
            "related_across_ontologies",
            "follow a related edge that crosses independently loaded schemes",
            PatternQuery::new(vec![
                pattern("a", vocab::SKOS_RELATED, "b"),
                pattern("a", vocab::SKOS_IN_SCHEME, "scheme_a"),
                pattern("b", vocab::SKOS_IN_SCHEME, "scheme_b"),
            ])
            .with_distinct("scheme_a", "scheme_b"),
            1,
            3,
            PatternCategory::CrossOntology,
        ),
        scenario(
            "hierarchy_round_trip",
            "traverse a broader edge and return through its narrower inverse",
            PatternQuery::new(vec![
                pattern("child", vocab::SKOS_BROADER, "parent"),
                pattern("parent", vocab::SKOS_NARROWER, "child"),
            ]),
            1,
            2,
            PatternCategory::Bidirectional,
        ),
        scenario(
            "derivation_chain",
            "follow derived-from links across two inference hops",
            PatternQuery::new(vec![
                pattern("a", vocab::PROV_WAS_DERIVED_FROM, "b"),
                pattern("b", vocab::PROV_WAS_DERIVED_FROM, "c"),
            ]),
            1,
            2,
            PatternCategory::Inference,
        ),
    ]
}

fn scenario(
    name: &str,
    description: &str,
    query: PatternQuery,
    expected_min_results: usize,
    hops: usize,
    category: PatternCategory,
) -> NavigationQueryScenario {
    NavigationQueryScenario {
        name: name.to_string(),
        description: description.to_string(),
        query,
        expected_min_results,
        hops,
        category,
    }
}

fn pattern(subject: &str, predicate: &str, object: &str) -> TriplePattern {
    TriplePattern::new(Term::var(subject), Term::uri(predicate), Term::var(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_spans_every_pattern_category() {
        let scenarios = catalog();
        for category in PatternCategory::ALL {
            assert!(
                scenarios.iter().any(|s| s.category == category),
                "no scenario for category {category}"
            );
        }
    }

    #[test]
    fn scenario_names_are_unique() {
        let scenarios = catalog();
        let mut names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn multi_hop_scenarios_declare_their_hop_count() {
        let scenarios = catalog();
        let chain = scenarios
            .iter()
            .find(|s| s.name == "broader_chain_three_hops")
            .unwrap();
        assert_eq!(chain.hops, 3);
        assert_eq!(chain.query.patterns.len(), 3);
    }
}
