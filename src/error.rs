//! # Error Types
//!
//! Library-level failures. Fetch errors are recovered inside
//! [`crate::conditions`] and never reach the caller; everything else is fatal
//! and ends up in `main` wrapped by `anyhow`.

use crate::theme::ThemeLabel;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Request failed: connection, timeout or non-2xx status.
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response arrived but did not contain what we read from it.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("the {theme} directory {} does not exist", path.display())]
    DirectoryNotFound { theme: ThemeLabel, path: PathBuf },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to start player `{executable}`: {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = Error::DirectoryNotFound {
            theme: ThemeLabel::Autumn,
            path: PathBuf::from("/music/Scarecrow Sessions"),
        };
        assert_eq!(
            err.to_string(),
            "the autumn directory /music/Scarecrow Sessions does not exist"
        );
    }

    #[test]
    fn test_configuration_message() {
        let err = Error::Configuration("no directory for theme(s): evening".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: no directory for theme(s): evening"
        );
    }
}
