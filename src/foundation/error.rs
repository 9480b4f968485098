/// Convenience result type used across the crate.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Errors returned by player, loading and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrubError {
    /// Invalid sizes, configuration values or frame patterns.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be fetched from its source.
    #[error("load error: {0}")]
    Load(String),

    /// Drawing to the surface failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing config data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    /// Build a [`ScrubError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrubError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`ScrubError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrubError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScrubError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(ScrubError::load("x").to_string().contains("load error:"));
        assert!(ScrubError::render("x").to_string().contains("render error:"));
        assert!(
            ScrubError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ScrubError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
