/// Convenience result type used across reelcraft.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the timeline API.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided layer or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed, unsupported or unwritable timeline JSON document.
    #[error("timeline document error: {0}")]
    Serde(String),

    /// Wrapped lower-level error, such as I/O while reading a document.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
