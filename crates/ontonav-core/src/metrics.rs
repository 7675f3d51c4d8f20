//! Hierarchy metrics: per-concept depth over `broader` edges and the
//! aggregate counts and composite scores derived from the catalog.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::TaxonomyMetrics;
use crate::policy::ScoringPolicy;

// Completeness composite weights; each dimension is capped at its
// policy-configured "sufficient" count before weighting so no single
// dimension can saturate the score. Sum: 100.
const COMPLETENESS_SCHEME_WEIGHT: f64 = 25.0;
const COMPLETENESS_CONCEPT_WEIGHT: f64 = 35.0;
const COMPLETENESS_HIERARCHY_WEIGHT: f64 = 25.0;
const COMPLETENESS_RELATED_WEIGHT: f64 = 15.0;

// Navigation-readiness composite weights. Sum: 100.
const NAVIGATION_DEPTH_WEIGHT: f64 = 40.0;
const NAVIGATION_AVG_DEPTH_WEIGHT: f64 = 30.0;
const NAVIGATION_DENSITY_WEIGHT: f64 = 30.0;

// Saturation points for the navigation composite: a three-level hierarchy
// with an average depth of two and two hierarchy links per concept is
// treated as fully browsable.
const SATURATING_MAX_DEPTH: f64 = 3.0;
const SATURATING_AVG_DEPTH: f64 = 2.0;
const SATURATING_LINK_DENSITY: f64 = 2.0;

/// Depth of a concept counted from a root (a concept without broader
/// concepts). The visited set is passed by value down the recursion so
/// sibling branches never contaminate each other; a URI already on the
/// current path contributes 0, which guarantees termination on cycles.
#[must_use]
pub fn concept_depth(catalog: &Catalog, uri: &str, visited: HashSet<String>) -> usize {
    if visited.contains(uri) {
        return 0;
    }
    let Some(concept) = catalog.concept(uri) else {
        // Dangling broader target: contributes nothing to the path.
        return 0;
    };
    if concept.broader.is_empty() {
        return 1;
    }
    let mut path = visited;
    path.insert(uri.to_string());
    let deepest = concept
        .broader
        .iter()
        .map(|parent| concept_depth(catalog, parent, path.clone()))
        .max()
        .unwrap_or(0);
    1 + deepest
}

/// Compute all aggregate counts and the two derived composites in one pass
/// over the catalog. Every division is guarded; an empty catalog yields
/// all-zero metrics.
#[must_use]
pub fn compute(catalog: &Catalog, policy: &ScoringPolicy) -> TaxonomyMetrics {
    let mut metrics = TaxonomyMetrics {
        scheme_count: catalog.scheme_count(),
        concept_count: catalog.concept_count(),
        ..TaxonomyMetrics::default()
    };

    let mut depth_total = 0usize;
    let mut depth_samples = 0usize;
    for concept in catalog.concepts() {
        metrics.hierarchical_relationships += concept.broader.len() + concept.narrower.len();
        metrics.related_relationships += concept.related.len();
        if concept.has_examples() {
            metrics.concepts_with_examples += 1;
        }
        if concept.has_scope_note() {
            metrics.concepts_with_scope_notes += 1;
        }
        let depth = concept_depth(catalog, &concept.uri, HashSet::new());
        metrics.max_hierarchy_depth = metrics.max_hierarchy_depth.max(depth);
        if depth > 0 {
            depth_total += depth;
            depth_samples += 1;
        }
    }

    if depth_samples > 0 {
        metrics.avg_hierarchy_depth = depth_total as f64 / depth_samples as f64;
    }
    metrics.completeness_score = completeness_score(&metrics, policy);
    metrics.navigation_readiness_score = navigation_readiness_score(&metrics);
    metrics
}

fn completeness_score(metrics: &TaxonomyMetrics, policy: &ScoringPolicy) -> f64 {
    capped_ratio(metrics.scheme_count, policy.sufficient_schemes) * COMPLETENESS_SCHEME_WEIGHT
        + capped_ratio(metrics.concept_count, policy.sufficient_concepts)
            * COMPLETENESS_CONCEPT_WEIGHT
        + capped_ratio(
            metrics.hierarchical_relationships,
            policy.sufficient_hierarchy_links,
        ) * COMPLETENESS_HIERARCHY_WEIGHT
        + capped_ratio(metrics.related_relationships, policy.sufficient_related_links)
            * COMPLETENESS_RELATED_WEIGHT
}

fn navigation_readiness_score(metrics: &TaxonomyMetrics) -> f64 {
    let density = if metrics.concept_count == 0 {
        0.0
    } else {
        metrics.hierarchical_relationships as f64 / metrics.concept_count as f64
    };
    (metrics.max_hierarchy_depth as f64 / SATURATING_MAX_DEPTH).min(1.0) * NAVIGATION_DEPTH_WEIGHT
        + (metrics.avg_hierarchy_depth / SATURATING_AVG_DEPTH).min(1.0)
            * NAVIGATION_AVG_DEPTH_WEIGHT
        + (density / SATURATING_LINK_DENSITY).min(1.0) * NAVIGATION_DENSITY_WEIGHT
}

fn capped_ratio(count: usize, sufficient: usize) -> f64 {
    if sufficient == 0 {
        return 0.0;
    }
    (count as f64 / sufficient as f64).min(1.0)
}
