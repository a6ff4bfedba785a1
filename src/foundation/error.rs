/// Convenience result type used across smplview.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Top-level error taxonomy used by viewer APIs.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// The buffer is not an SMPL animation (bad magic, impossible header, bad face index).
    #[error("format error: {0}")]
    Format(String),

    /// The header declares more data than the buffer holds.
    #[error("truncated buffer: expected {expected} bytes, got {actual}")]
    TruncatedBuffer {
        /// Byte length implied by the header (saturating).
        expected: u64,
        /// Actual byte length of the buffer.
        actual: u64,
    },

    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised while writing frames to a sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewerError {
    /// Build a [`ViewerError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`ViewerError::TruncatedBuffer`] value.
    pub fn truncated(expected: u64, actual: u64) -> Self {
        Self::TruncatedBuffer { expected, actual }
    }

    /// Build a [`ViewerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ViewerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether this error came from decoding an animation buffer.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Format(_) | Self::TruncatedBuffer { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
