//! Extraction error types

use thiserror::Error;

/// Result type for extraction entry points that decode their input
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Hard failures of an extraction call.
///
/// "Sheet not found" and "value not found" are not errors; see
/// [`ExtractionResult`](crate::ExtractionResult).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The upload could not be read at all
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload could not be interpreted as a workbook grid
    #[error("malformed input: {message}")]
    MalformedInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ExtractError {
    /// Wrap a decoder failure
    pub fn malformed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ExtractError::MalformedInput {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Malformed input with only a message
    pub fn malformed_msg<S: Into<String>>(message: S) -> Self {
        ExtractError::MalformedInput {
            message: message.into(),
            source: None,
        }
    }
}
