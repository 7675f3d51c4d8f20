//! Readiness scoring and report aggregation: the join point of the
//! pipeline. Combines metrics, check results, and scenario outcomes into
//! the weighted overall score, the readiness level, the Lambda
//! sub-assessments, and the final report document.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::checks::{
    DOCUMENTATION_CHECK, HIERARCHICAL_BROWSING_CHECK, RELATED_DISCOVERY_CHECK,
    SCHEME_NAVIGATION_CHECK,
};
use crate::error::{OntoNavError, Result};
use crate::harness;
use crate::models::{
    LambdaAssessment, LambdaReadiness, PatternCategory, QueryExecutionResult, ReadinessLevel,
    ReadinessReport, ReadinessScore, ReadinessScoreComponent, TaxonomyMetrics, ValidationResult,
};
use crate::policy::ScoringPolicy;

// Component weights of the overall score. Documented constants; the
// aggregator still re-validates the sum at run time because a wrong weight
// table must stop the run rather than emit a misleading score.
pub const WEIGHT_TAXONOMY_COMPLETENESS: f64 = 25.0;
pub const WEIGHT_NAVIGATION_EFFECTIVENESS: f64 = 30.0;
pub const WEIGHT_IMPLEMENTATION_GUIDANCE: f64 = 25.0;
pub const WEIGHT_QUERY_READINESS: f64 = 20.0;

// Navigation effectiveness: relative weights of the three structural
// checks. Sum: 100.
const EFFECTIVENESS_SCHEME_WEIGHT: f64 = 30.0;
const EFFECTIVENESS_HIERARCHY_WEIGHT: f64 = 40.0;
const EFFECTIVENESS_RELATED_WEIGHT: f64 = 30.0;

// Query readiness: success rate, expectation rate, and breadth of pattern
// categories exercised successfully. Sum: 100.
const QUERY_SUCCESS_WEIGHT: f64 = 50.0;
const QUERY_EXPECTATION_WEIGHT: f64 = 30.0;
const QUERY_BREADTH_WEIGHT: f64 = 20.0;

// Implementation guidance keyword-density boost: points per distinct
// readiness keyword observed, and the boost ceiling.
const GUIDANCE_BOOST_PER_KEYWORD: f64 = 2.0;
const GUIDANCE_BOOST_CAP: f64 = 10.0;

// Readiness level step thresholds.
const LEVEL_PRODUCTION_READY: f64 = 85.0;
const LEVEL_NEEDS_MINOR: f64 = 75.0;
const LEVEL_NEEDS_MAJOR: f64 = 60.0;

// Lambda sub-assessment gates.
const LAMBDA_COMPONENT_GATE: f64 = 60.0;
const LAMBDA_STRICT_GATE: f64 = 70.0;

// Overall score below this raises a critical issue.
const CRITICAL_SCORE_FLOOR: f64 = 60.0;

// Next-validation intervals.
const REVALIDATE_CRITICAL_HOURS: i64 = 24;
const REVALIDATE_HEALTHY_DAYS: i64 = 7;

#[must_use]
pub fn level_for(score: f64) -> ReadinessLevel {
    if score >= LEVEL_PRODUCTION_READY {
        ReadinessLevel::ProductionReady
    } else if score >= LEVEL_NEEDS_MINOR {
        ReadinessLevel::NeedsMinorImprovements
    } else if score >= LEVEL_NEEDS_MAJOR {
        ReadinessLevel::NeedsMajorImprovements
    } else {
        ReadinessLevel::NotReady
    }
}

/// Assemble the final report from everything the pipeline produced.
pub fn aggregate(
    metrics: TaxonomyMetrics,
    validations: Vec<ValidationResult>,
    query_results: Vec<QueryExecutionResult>,
    policy: &ScoringPolicy,
    incomplete: bool,
) -> Result<ReadinessReport> {
    validate_weights()?;

    let completeness = metrics.completeness_score;
    let effectiveness = navigation_effectiveness(&validations);
    let guidance = implementation_guidance(&validations);
    let query_readiness = query_readiness(&query_results);

    let overall = (completeness * WEIGHT_TAXONOMY_COMPLETENESS
        + effectiveness * WEIGHT_NAVIGATION_EFFECTIVENESS
        + guidance * WEIGHT_IMPLEMENTATION_GUIDANCE
        + query_readiness * WEIGHT_QUERY_READINESS)
        / 100.0;
    let level = level_for(overall);

    let failed_scenarios: Vec<&QueryExecutionResult> = query_results
        .iter()
        .filter(|result| !result.succeeded)
        .collect();

    let mut critical_issues = Vec::new();
    if overall < CRITICAL_SCORE_FLOOR {
        critical_issues.push(format!(
            "overall readiness score {overall:.1} is below {CRITICAL_SCORE_FLOOR}"
        ));
    }
    if failed_scenarios.len() > policy.max_failed_scenarios {
        let names: Vec<&str> = failed_scenarios
            .iter()
            .map(|result| result.scenario.as_str())
            .collect();
        critical_issues.push(format!(
            "{} navigation scenarios failed: {}",
            failed_scenarios.len(),
            names.join(", ")
        ));
    }
    if incomplete {
        critical_issues.push(
            "run deadline expired before full check/scenario coverage".to_string(),
        );
    }

    let recommendations = merge_recommendations(&validations, &query_results, policy);
    let lambda = lambda_readiness(completeness, effectiveness, guidance, query_readiness, overall);
    let now = Utc::now();
    let next_validation = if critical_issues.is_empty() {
        now + Duration::days(REVALIDATE_HEALTHY_DAYS)
    } else {
        now + Duration::hours(REVALIDATE_CRITICAL_HOURS)
    };

    Ok(ReadinessReport {
        run_id: Uuid::new_v4().to_string(),
        generated_at: now,
        overall_score: overall,
        level,
        components: component_scores(completeness, effectiveness, guidance, query_readiness),
        metrics,
        validations,
        query_results,
        critical_issues,
        recommendations,
        next_validation,
        lambda,
        scenario_catalog_version: harness::CATALOG_VERSION.to_string(),
        incomplete,
    })
}

/// Fatal-load path: a report carrying only the failure explanation.
#[must_use]
pub fn load_failure_report(reason: &str) -> ReadinessReport {
    let now = Utc::now();
    ReadinessReport {
        run_id: Uuid::new_v4().to_string(),
        generated_at: now,
        overall_score: 0.0,
        level: ReadinessLevel::NotReady,
        components: component_scores(0.0, 0.0, 0.0, 0.0),
        metrics: TaxonomyMetrics::default(),
        validations: Vec::new(),
        query_results: Vec::new(),
        critical_issues: vec![format!("graph load failed: {reason}")],
        recommendations: vec!["fix the graph sources and re-run the assessment".to_string()],
        next_validation: now + Duration::hours(REVALIDATE_CRITICAL_HOURS),
        lambda: LambdaReadiness::default(),
        scenario_catalog_version: harness::CATALOG_VERSION.to_string(),
        incomplete: true,
    }
}

fn validate_weights() -> Result<()> {
    let sum = WEIGHT_TAXONOMY_COMPLETENESS
        + WEIGHT_NAVIGATION_EFFECTIVENESS
        + WEIGHT_IMPLEMENTATION_GUIDANCE
        + WEIGHT_QUERY_READINESS;
    if (sum - 100.0).abs() > f64::EPSILON {
        return Err(OntoNavError::Aggregation(format!(
            "component weights sum to {sum}, expected 100"
        )));
    }
    Ok(())
}

fn component_scores(
    completeness: f64,
    effectiveness: f64,
    guidance: f64,
    query_readiness: f64,
) -> Vec<ReadinessScore> {
    vec![
        ReadinessScore {
            name: ReadinessScoreComponent::TaxonomyCompleteness.as_str().to_string(),
            score: completeness,
            weight: WEIGHT_TAXONOMY_COMPLETENESS,
        },
        ReadinessScore {
            name: ReadinessScoreComponent::NavigationEffectiveness.as_str().to_string(),
            score: effectiveness,
            weight: WEIGHT_NAVIGATION_EFFECTIVENESS,
        },
        ReadinessScore {
            name: ReadinessScoreComponent::ImplementationGuidance.as_str().to_string(),
            score: guidance,
            weight: WEIGHT_IMPLEMENTATION_GUIDANCE,
        },
        ReadinessScore {
            name: ReadinessScoreComponent::QueryReadiness.as_str().to_string(),
            score: query_readiness,
            weight: WEIGHT_QUERY_READINESS,
        },
    ]
}

fn check_score(validations: &[ValidationResult], check: &str) -> f64 {
    validations
        .iter()
        .find(|result| result.check == check)
        .map_or(0.0, |result| result.score)
}

fn navigation_effectiveness(validations: &[ValidationResult]) -> f64 {
    (check_score(validations, SCHEME_NAVIGATION_CHECK) * EFFECTIVENESS_SCHEME_WEIGHT
        + check_score(validations, HIERARCHICAL_BROWSING_CHECK) * EFFECTIVENESS_HIERARCHY_WEIGHT
        + check_score(validations, RELATED_DISCOVERY_CHECK) * EFFECTIVENESS_RELATED_WEIGHT)
        / 100.0
}

fn implementation_guidance(validations: &[ValidationResult]) -> f64 {
    let documentation = validations
        .iter()
        .find(|result| result.check == DOCUMENTATION_CHECK);
    let Some(documentation) = documentation else {
        return 0.0;
    };
    let keywords = documentation
        .details
        .get("distinct_keywords_matched")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    let boost = (GUIDANCE_BOOST_PER_KEYWORD * keywords as f64).min(GUIDANCE_BOOST_CAP);
    (documentation.score + boost).min(100.0)
}

fn query_readiness(query_results: &[QueryExecutionResult]) -> f64 {
    if query_results.is_empty() {
        return 0.0;
    }
    let total = query_results.len() as f64;
    let succeeded = query_results.iter().filter(|result| result.succeeded).count() as f64;
    let met = query_results
        .iter()
        .filter(|result| result.meets_expectation)
        .count() as f64;
    let categories_hit = PatternCategory::ALL
        .iter()
        .filter(|category| {
            query_results
                .iter()
                .any(|result| result.succeeded && result.category == category.as_str())
        })
        .count() as f64;
    let breadth = 100.0 * categories_hit / PatternCategory::ALL.len() as f64;

    (100.0 * (succeeded / total) * QUERY_SUCCESS_WEIGHT
        + 100.0 * (met / total) * QUERY_EXPECTATION_WEIGHT
        + breadth * QUERY_BREADTH_WEIGHT)
        / 100.0
}

fn lambda_readiness(
    completeness: f64,
    effectiveness: f64,
    guidance: f64,
    query_readiness: f64,
    overall: f64,
) -> LambdaReadiness {
    LambdaReadiness {
        development: LambdaAssessment {
            score: (guidance + completeness) / 2.0,
            ready: guidance >= LAMBDA_COMPONENT_GATE && completeness >= LAMBDA_COMPONENT_GATE,
        },
        deployment: LambdaAssessment {
            score: (query_readiness + effectiveness) / 2.0,
            ready: query_readiness >= LAMBDA_STRICT_GATE
                && effectiveness >= LAMBDA_COMPONENT_GATE,
        },
        user_experience: LambdaAssessment {
            score: (effectiveness + guidance) / 2.0,
            ready: effectiveness >= LAMBDA_STRICT_GATE && overall >= LAMBDA_COMPONENT_GATE,
        },
    }
}

/// Merge recommendations from every check and under-performing scenario,
/// deduplicated in first-occurrence order and truncated to the policy cap.
fn merge_recommendations(
    validations: &[ValidationResult],
    query_results: &[QueryExecutionResult],
    policy: &ScoringPolicy,
) -> Vec<String> {
    let mut merged = Vec::new();
    for validation in validations {
        for recommendation in &validation.recommendations {
            if !merged.contains(recommendation) {
                merged.push(recommendation.clone());
            }
        }
    }
    for result in query_results {
        let recommendation = if !result.succeeded {
            format!("investigate failing navigation scenario '{}'", result.scenario)
        } else if !result.meets_expectation {
            format!(
                "add relationships so scenario '{}' reaches its expected result count",
                result.scenario
            )
        } else {
            continue;
        };
        if !merged.contains(&recommendation) {
            merged.push(recommendation);
        }
    }
    merged.truncate(policy.max_recommendations);
    merged
}
