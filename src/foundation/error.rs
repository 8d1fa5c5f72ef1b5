/// Convenience result type used across framefit.
pub type FramefitResult<T> = Result<T, FramefitError>;

/// Top-level error taxonomy used at the crate boundary.
///
/// The scheduling and per-frame math never fails; errors only come from loading manifests,
/// evaluating out-of-range frame windows, or setting up worker pools.
#[derive(thiserror::Error, Debug)]
pub enum FramefitError {
    /// Invalid user-provided manifest or subtitle data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating timeline state for a frame range.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefitError {
    /// Build a [`FramefitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramefitError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FramefitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
