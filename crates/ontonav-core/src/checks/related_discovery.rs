//! Related Concept Discovery check: associative edges must land on real
//! concepts, and cross-scheme associations earn a capped bonus.

use std::collections::BTreeMap;

use serde_json::json;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::ValidationResult;
use crate::policy::ScoringPolicy;

use super::percentage;

pub const CHECK_NAME: &str = "related_discovery";

pub fn run(catalog: &Catalog, policy: &ScoringPolicy) -> Result<ValidationResult> {
    let total = catalog.concept_count();
    let mut with_related = 0usize;
    let mut cross_scheme = 0usize;
    let mut dangling = 0usize;
    let mut affected = Vec::new();
    let mut recommendations = Vec::new();

    for concept in catalog.concepts() {
        if !concept.related.is_empty() {
            with_related += 1;
        }
        for target_uri in &concept.related {
            match catalog.concept(target_uri) {
                Some(target) => {
                    if !concept.scheme.is_empty()
                        && !target.scheme.is_empty()
                        && concept.scheme != target.scheme
                    {
                        cross_scheme += 1;
                    }
                }
                None => {
                    dangling += 1;
                    affected.push(format!("{} -> {target_uri}", concept.uri));
                    recommendations.push(format!(
                        "remove or resolve dangling related edge {} -> {target_uri}",
                        concept.uri
                    ));
                }
            }
        }
    }

    let bonus = (policy.cross_scheme_bonus * cross_scheme as f64).min(policy.cross_scheme_bonus_cap);
    let score = (percentage(with_related, total) + bonus).min(100.0);
    let passed = total > 0
        && score >= policy.related_pass_threshold
        && dangling < policy.related_max_dangling;

    let mut details = BTreeMap::new();
    details.insert("total_concepts".to_string(), json!(total));
    details.insert("concepts_with_related".to_string(), json!(with_related));
    details.insert("cross_scheme_edges".to_string(), json!(cross_scheme));
    details.insert("cross_scheme_bonus".to_string(), json!(bonus));
    details.insert("dangling_references".to_string(), json!(dangling));

    Ok(ValidationResult {
        check: CHECK_NAME.to_string(),
        passed,
        message: format!(
            "{with_related} of {total} concepts carry related edges, {dangling} dangling reference(s)"
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

    fn member(catalog: &mut Catalog, uri: &str, scheme: &str) {
        catalog.upsert_scheme(scheme);
        catalog.link_membership(uri, scheme);
    }

    #[test]
    fn dangling_related_edges_are_recorded() {
        let mut catalog = Catalog::new();
        member(&mut catalog, "urn:a", "urn:s1");
        catalog.upsert_concept("urn:a").related.insert("urn:gone".to_string());
        let result = run(&catalog, &ScoringPolicy::default()).unwrap();
        assert_eq!(result.details["dangling_references"], 1);
        assert_eq!(result.affected, vec!["urn:a -> urn:gone".to_string()]);
    }

    #[test]
    fn cross_scheme_edges_earn_a_capped_bonus() {
        let mut catalog = Catalog::new();
        member(&mut catalog, "urn:a", "urn:s1");
        member(&mut catalog, "urn:b", "urn:s2");
        catalog.upsert_concept("urn:a").related.insert("urn:b".to_string());
        catalog.upsert_concept("urn:b").related.insert("urn:a".to_string());
        let result = run(&catalog, &ScoringPolicy::default()).unwrap();
        // Both concepts have related edges (100%) and the bonus saturates at
        // the 100-point score ceiling.
        assert_eq!(result.score, 100.0);
        assert_eq!(result.details["cross_scheme_edges"], 2);
        assert!(result.passed);
    }

    #[test]
    fn too_many_dangling_references_fail_the_check() {
        let mut catalog = Catalog::new();
        for index in 0..4 {
            let uri = format!("urn:c{index}");
            member(&mut catalog, &uri, "urn:s1");
            catalog
                .upsert_concept(&uri)
                .related
                .insert(format!("urn:gone{index}"));
        }
        let result = run(&catalog, &ScoringPolicy::default()).unwrap();
        assert_eq!(result.score, 100.0);
        assert!(!result.passed);
    }

    #[test]
    fn empty_catalog_scores_zero() {
        let result = run(&Catalog::new(), &ScoringPolicy::default()).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }
}
