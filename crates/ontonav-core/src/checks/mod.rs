//! Structural consistency checks: four independent, pure functions of the
//! catalog, each producing one [`ValidationResult`]. A check failure is
//! captured as data and never crosses the component boundary as an error.

use std::time::Instant;

use tracing::warn;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::ValidationResult;
use crate::policy::ScoringPolicy;

mod documentation;
mod hierarchical_browsing;
mod related_discovery;
mod scheme_navigation;

pub use documentation::CHECK_NAME as DOCUMENTATION_CHECK;
pub use hierarchical_browsing::CHECK_NAME as HIERARCHICAL_BROWSING_CHECK;
pub use related_discovery::CHECK_NAME as RELATED_DISCOVERY_CHECK;
pub use scheme_navigation::CHECK_NAME as SCHEME_NAVIGATION_CHECK;

type CheckFn = fn(&Catalog, &ScoringPolicy) -> Result<ValidationResult>;

const CHECKS: &[(&str, CheckFn)] = &[
    (scheme_navigation::CHECK_NAME, scheme_navigation::run),
    (
        hierarchical_browsing::CHECK_NAME,
        hierarchical_browsing::run,
    ),
    (related_discovery::CHECK_NAME, related_discovery::run),
    (documentation::CHECK_NAME, documentation::run),
];

/// Run every check sequentially. A check error becomes a failed result; a
/// deadline expiry stops the remaining checks and reports the run as
/// incomplete.
pub fn run_all(
    catalog: &Catalog,
    policy: &ScoringPolicy,
    deadline: Option<Instant>,
) -> (Vec<ValidationResult>, bool) {
    let mut results = Vec::with_capacity(CHECKS.len());
    for (name, check) in CHECKS {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!(check = name, "deadline expired before check ran");
                return (results, true);
            }
        }
        let result = match check(catalog, policy) {
            Ok(result) => result,
            Err(err) => {
                warn!(check = name, error = %err, "check failed to run");
                ValidationResult::from_failure(name, &err.to_string())
            }
        };
        results.push(result);
    }
    (results, false)
}

/// Percentage with a guarded denominator: 0 when there is nothing to
/// measure, never NaN.
#[must_use]
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}
