/// Convenience result type used across vlab.
pub type VlabResult<T> = Result<T, VlabError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum VlabError {
    /// Source pixels that cannot be decoded or do not match their declared size.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Zero-area or oversized destination/source dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid user-provided settings or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VlabError {
    /// Build a [`VlabError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`VlabError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`VlabError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VlabError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
