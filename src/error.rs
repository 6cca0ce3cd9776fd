use thiserror::Error;

/// Failures raised by the extraction, registry and decoding core.
///
/// Every variant is fatal to the call that produced it; nothing in the core
/// retries or substitutes a default.
#[derive(Debug, Error)]
pub enum EcgError {
    #[error("lead '{lead}' missing from recording (expected dataset at {path})")]
    MissingLead { lead: String, path: String },

    #[error("duplicate output head name '{0}'")]
    DuplicateHeadName(String),

    #[error("unknown head kind '{0}'; supported: categorical, continuous, survival_curve")]
    UnknownHeadKind(String),

    #[error("model reported output '{0}' which is not in the head registry")]
    UnknownOutputHead(String),

    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: String,
        expected: String,
        got: String,
    },

    #[error("more than one survival_curve head configured: {0:?}")]
    AmbiguousSurvivalHeads(Vec<String>),

    #[error("output head '{0}' reported more than once in a single prediction")]
    DuplicateOutput(String),

    #[error("invalid head spec '{name}': {reason}")]
    InvalidHeadSpec { name: String, reason: String },

    #[error("invalid lead layout: {0}")]
    InvalidLayout(String),

    #[error("failed to read recording: {0}")]
    Recording(String),
}

impl EcgError {
    pub(crate) fn shape(what: impl Into<String>, expected: impl ToString, got: impl ToString) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
