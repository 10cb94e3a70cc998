use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Malformed or out-of-range input, rejected before any engine runs.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A precondition the engines rely on does not hold (e.g. duplicate ids).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SimError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
