//! Hierarchical Browsing check: every `broader` edge must be answered by a
//! reciprocal `narrower` edge, and concepts should sit inside the hierarchy.

use std::collections::BTreeMap;

use serde_json::json;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::ValidationResult;
use crate::policy::ScoringPolicy;

use super::percentage;

pub const CHECK_NAME: &str = "hierarchical_browsing";

pub fn run(catalog: &Catalog, policy: &ScoringPolicy) -> Result<ValidationResult> {
    let mut total_edges = 0usize;
    let mut bidirectional = 0usize;
    let mut orphans = 0usize;
    let mut affected = Vec::new();
    let mut recommendations = Vec::new();

    for concept in catalog.concepts() {
        if concept.is_orphan() {
            orphans += 1;
            affected.push(concept.uri.clone());
            recommendations.push(format!("attach orphan concept {} to the hierarchy", concept.uri));
        }
        for parent_uri in &concept.broader {
            total_edges += 1;
            let reciprocal = catalog
                .concept(parent_uri)
                .is_some_and(|parent| parent.narrower.contains(&concept.uri));
            if reciprocal {
                bidirectional += 1;
            } else {
                affected.push(format!("{} -> {parent_uri}", concept.uri));
                recommendations.push(format!(
                    "declare the narrower edge from {parent_uri} back to {}",
                    concept.uri
                ));
            }
        }
    }

    let issue_count = total_edges - bidirectional;
    let penalty = (policy.orphan_penalty * orphans as f64).min(policy.orphan_penalty_cap);
    let score = (percentage(bidirectional, total_edges) - penalty).max(0.0);
    let passed = score >= policy.hierarchy_pass_threshold
        && issue_count < policy.hierarchy_max_issues;

    let mut details = BTreeMap::new();
    details.insert("total_hierarchical_edges".to_string(), json!(total_edges));
    details.insert("bidirectional_edges".to_string(), json!(bidirectional));
    details.insert("non_bidirectional_edges".to_string(), json!(issue_count));
    details.insert("orphan_concepts".to_string(), json!(orphans));
    details.insert("orphan_penalty".to_string(), json!(penalty));

    Ok(ValidationResult {
        check: CHECK_NAME.to_string(),
        passed,
        message: format!(
            "{bidirectional} of {total_edges} broader edges are bidirectional, {orphans} orphan concept(s)"
        ),
        score,
        details,
        affected,
        recommendations,
    })
}
