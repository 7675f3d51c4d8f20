//! Examples & Scope Notes check: four coverage/quality sub-percentages and
//! their arithmetic mean. Passing requires every sub-threshold to hold, not
//! just the mean.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::ValidationResult;
use crate::policy::ScoringPolicy;

use super::percentage;

pub const CHECK_NAME: &str = "examples_scope_notes";

pub fn run(catalog: &Catalog, policy: &ScoringPolicy) -> Result<ValidationResult> {
    let total = catalog.concept_count();
    let mut with_examples = 0usize;
    let mut with_notes = 0usize;
    let mut detailed_notes = 0usize;
    let mut ready_examples = 0usize;
    let mut keywords_seen: BTreeSet<String> = BTreeSet::new();
    let mut affected = Vec::new();

    for concept in catalog.concepts() {
        if concept.has_scope_note() {
            with_notes += 1;
            if concept.scope_note.len() >= policy.scope_note_detail_length {
                detailed_notes += 1;
            }
        }
        if concept.has_examples() {
            with_examples += 1;
            let mut matched = false;
            for example in &concept.examples {
                let lowered = example.to_lowercase();
                for keyword in &policy.readiness_keywords {
                    if lowered.contains(&keyword.to_lowercase()) {
                        keywords_seen.insert(keyword.clone());
                        matched = true;
                    }
                }
            }
            if matched {
                ready_examples += 1;
            }
        }
        if !concept.has_examples() && !concept.has_scope_note() {
            affected.push(concept.uri.clone());
        }
    }

    let example_coverage = percentage(with_examples, total);
    let scope_note_coverage = percentage(with_notes, total);
    let detail_quality = percentage(detailed_notes, with_notes);
    let implementation_readiness = percentage(ready_examples, with_examples);
    let score =
        (example_coverage + scope_note_coverage + detail_quality + implementation_readiness) / 4.0;

    let passed = example_coverage >= policy.example_coverage_threshold
        && scope_note_coverage >= policy.scope_note_coverage_threshold
        && detail_quality >= policy.detail_quality_threshold
        && implementation_readiness >= policy.implementation_readiness_threshold;

    let mut recommendations = Vec::new();
    if example_coverage < policy.example_coverage_threshold {
        recommendations.push("add usage examples to undocumented concepts".to_string());
    }
    if scope_note_coverage < policy.scope_note_coverage_threshold {
        recommendations.push("add scope notes to undocumented concepts".to_string());
    }
    if detail_quality < policy.detail_quality_threshold {
        recommendations.push(format!(
            "expand scope notes below {} characters",
            policy.scope_note_detail_length
        ));
    }
    if implementation_readiness < policy.implementation_readiness_threshold {
        recommendations.push("rewrite examples around concrete integration terms".to_string());
    }

    let mut details = BTreeMap::new();
    details.insert("example_coverage".to_string(), json!(example_coverage));
    details.insert("scope_note_coverage".to_string(), json!(scope_note_coverage));
    details.insert("detail_quality".to_string(), json!(detail_quality));
    details.insert(
        "implementation_readiness".to_string(),
        json!(implementation_readiness),
    );
    details.insert(
        "distinct_keywords_matched".to_string(),
        json!(keywords_seen.len()),
    );

    Ok(ValidationResult {
        check: CHECK_NAME.to_string(),
        passed,
        message: format!(
            "coverage: examples {example_coverage:.1}%, scope notes {scope_note_coverage:.1}%"
        ),
        score,
        details,
        affected,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_from_spec_example() -> Catalog {
        // 10 concepts, 8 with >=200-char scope notes, 5 with keyword examples.
        let mut catalog = Catalog::new();
        for index in 0..10 {
            let uri = format!("urn:c{index}");
            catalog.link_membership(&uri, "urn:s");
            if index < 8 {
                catalog.upsert_concept(&uri).scope_note = "x".repeat(220);
            }
            if index < 5 {
                catalog
                    .upsert_concept(&uri)
                    .examples
                    .insert(format!("call the lambda handler for case {index}"));
            }
        }
        catalog
    }

    #[test]
    fn spec_example_scores_eighty_two_point_five() {
        let result = run(&catalog_from_spec_example(), &ScoringPolicy::default()).unwrap();
        assert_eq!(result.details["example_coverage"], 50.0);
        assert_eq!(result.details["scope_note_coverage"], 80.0);
        assert_eq!(result.details["detail_quality"], 100.0);
        assert_eq!(result.details["implementation_readiness"], 100.0);
        assert_eq!(result.score, 82.5);
        assert!(result.passed);
    }

    #[test]
    fn passing_requires_every_sub_threshold() {
        let mut catalog = catalog_from_spec_example();
        // Shrink every note below the detail threshold: mean stays decent
        // but detail quality collapses to 0.
        for index in 0..8 {
            catalog.upsert_concept(&format!("urn:c{index}")).scope_note = "short".to_string();
        }
        let result = run(&catalog, &ScoringPolicy::default()).unwrap();
        assert!(!result.passed);
        assert_eq!(result.details["detail_quality"], 0.0);
    }

    #[test]
    fn empty_catalog_produces_zero_sub_scores() {
        let result = run(&Catalog::new(), &ScoringPolicy::default()).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
        assert_eq!(result.details["distinct_keywords_matched"], 0);
    }

    #[test]
    fn undocumented_concepts_are_listed_as_affected() {
        let mut catalog = Catalog::new();
        catalog.link_membership("urn:bare", "urn:s");
        let result = run(&catalog, &ScoringPolicy::default()).unwrap();
        assert_eq!(result.affected, vec!["urn:bare".to_string()]);
    }
}
