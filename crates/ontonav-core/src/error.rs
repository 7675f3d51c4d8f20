use thiserror::Error;

pub type Result<T> = std::result::Result<T, OntoNavError>;

#[derive(Debug, Error)]
pub enum OntoNavError {
    /// The graph could not be loaded at all; no catalog can be built and the
    /// run aborts with a failure-only report.
    #[error("graph load failed: {0}")]
    Load(String),

    /// A malformed row during discovery. Logged and skipped; never fatal.
    #[error("discovery failed for {entity}: {reason}")]
    Discovery { entity: String, reason: String },

    /// A consistency check could not run. Captured as a failed result.
    #[error("check '{check}' failed: {reason}")]
    Check { check: String, reason: String },

    /// A navigation query could not execute. Captured as a failed result.
    #[error("query failed: {0}")]
    Query(String),

    /// Internal scoring invariant violated (e.g. weight sum != 100). Fatal:
    /// emitting a score from a broken weight table would be misleading.
    #[error("aggregation invariant violated: {0}")]
    Aggregation(String),

    #[error("invalid scoring policy: {0}")]
    Policy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    PolicyParse(#[from] toml::de::Error),
}

impl OntoNavError {
    /// Fatal errors abort the run; everything else is recovered into a
    /// failed result object and counted against the score.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Load(_) | Self::Aggregation(_) | Self::Policy(_)
        )
    }
}
