/// Convenience result type used across shortreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for a pipeline run.
///
/// Every variant except [`ReelError::Backend`] raised inside the speech chain terminates the run
/// as soon as it is returned.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Missing or empty configuration (template pools, backend list, credentials).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A speech backend or processing stage failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// The duration probe failed or reported a non-positive value.
    #[error("measurement error: {0}")]
    Measurement(String),

    /// The compositing/transcoding step failed; artifacts of this run are invalid.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid caller-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ReelError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`ReelError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
