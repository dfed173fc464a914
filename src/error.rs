//! Error types for the list-view controller.
//!
//! Input validation errors leave the controller untouched, so callers bound
//! to UI controls can usually ignore them. Load and configuration errors
//! come from the collaborators around the controller.

use thiserror::Error;

/// Errors returned by controller setters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListViewError {
    /// A page number below 1 was requested.
    #[error("page {page} is out of range (pages start at 1)")]
    PageOutOfRange {
        /// The rejected page number.
        page: usize,
    },

    /// A page size of zero was requested.
    #[error("invalid page size {size}: must be at least 1")]
    InvalidPageSize {
        /// The rejected page size.
        size: usize,
    },
}

/// Errors produced while loading an entity collection.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// The transport (HTTP client, service call) failed.
    #[error("failed to load entities: {0}")]
    Transport(String),

    /// The payload could not be decoded into entities.
    #[error("failed to decode entities: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors produced while reading a [`ListConfig`](crate::config::ListConfig).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration document is not valid JSON for `ListConfig`.
    #[error("failed to parse list configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid list configuration: {0}")]
    Invalid(String),
}

/// A backend code that does not name any variant of a badge enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} code {code:?}")]
pub struct ParseCodeError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected code.
    pub code: String,
}

/// Convenience alias for controller results.
pub type Result<T, E = ListViewError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_rejected_value() {
        let err = ListViewError::PageOutOfRange { page: 0 };
        assert_eq!(err.to_string(), "page 0 is out of range (pages start at 1)");

        let err = ListViewError::InvalidPageSize { size: 0 };
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_decode_error_converts() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
