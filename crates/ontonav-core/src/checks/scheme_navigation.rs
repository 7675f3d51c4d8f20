//! Scheme Navigation check: can a client pick a scheme and know what it is
//! about and where to go next?

use std::collections::BTreeMap;

use serde_json::json;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::ValidationResult;
use crate::policy::ScoringPolicy;

use super::percentage;

pub const CHECK_NAME: &str = "scheme_navigation";

/// A scheme is clean iff it carries a label, a comment, a description, at
/// least one member concept, and at least one outbound cross-reference.
pub fn run(catalog: &Catalog, policy: &ScoringPolicy) -> Result<ValidationResult> {
    let total = catalog.scheme_count();
    let mut clean = 0usize;
    let mut affected = Vec::new();
    let mut recommendations = Vec::new();

    for scheme in catalog.schemes() {
        let mut problems = Vec::new();
        if scheme.label.is_empty() {
            problems.push("missing label");
        }
        if scheme.comment.is_empty() {
            problems.push("missing comment");
        }
        if scheme.description.is_empty() {
            problems.push("missing description");
        }
        if scheme.concepts.is_empty() {
            problems.push("no member concepts");
        }
        if scheme.cross_references.is_empty() {
            problems.push("no outbound cross-references");
        }
        if problems.is_empty() {
            clean += 1;
        } else {
            affected.push(scheme.uri.clone());
            recommendations.push(format!(
                "annotate scheme {} ({})",
                scheme.uri,
                problems.join(", ")
            ));
        }
    }

    let score = percentage(clean, total);
    let passed = total > 0 && score >= policy.scheme_pass_threshold;
    let mut details = BTreeMap::new();
    details.insert("total_schemes".to_string(), json!(total));
    details.insert("clean_schemes".to_string(), json!(clean));

    Ok(ValidationResult {
        check: CHECK_NAME.to_string(),
        passed,
        message: format!("{clean} of {total} schemes are fully navigable"),
        score,
        details,
        affected,
        recommendations,
    })
}
