// Public fallible APIs in this crate share one concrete error contract
// (`OntoNavError`). Repeating per-function `# Errors` boilerplate obscures
// behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod assessor;
pub mod catalog;
pub mod checks;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod harness;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod readiness;
pub mod render;
pub mod vocab;

pub use assessor::{Assessor, RunOptions};
pub use catalog::Catalog;
pub use error::{OntoNavError, Result};
pub use graph::{GraphStore, MemoryGraphStore};
pub use models::{ReadinessLevel, ReadinessReport};
pub use policy::ScoringPolicy;
