//! Domain error types

use thiserror::Error;

/// Errors that can occur when decoding or encoding a content index
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index document is malformed (invalid syntax or wrong shape)
    #[error("malformed index document: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The index could not be serialized to its durable form
    #[error("failed to encode index: {0}")]
    Encode(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_cause() {
        let cause = serde_yaml::from_str::<u32>("not a number").unwrap_err();
        let err = IndexError::Parse(cause);
        assert!(err.to_string().starts_with("malformed index document:"));
    }
}
