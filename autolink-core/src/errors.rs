//! errors.rs - Custom error types for the autolink-core library.
//!
//! Compile-time failures are scoped to a single rule, lookup failures to a
//! single match. Neither is ever allowed to abort a whole rule set or message.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `autolink-core`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AutolinkError {
    #[error("Failed to compile autolink '{0}' (pattern `{1}`): {2}")]
    RuleCompilationError(String, String, regex::Error),

    #[error("Autolink '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Autolink '{0}': capture group name '{1}' is reserved")]
    ReservedGroupName(String, &'static str),

    #[error("Lookup request to '{0}' failed: {1}")]
    FetchError(String, #[source] reqwest::Error),

    #[error("Lookup request to '{0}' returned HTTP {1}")]
    HttpStatus(String, u16),

    #[error("Failed to read lookup response from '{0}': {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("Invalid autolink configuration: {0}")]
    ConfigError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
