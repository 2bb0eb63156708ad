/*!
 * Error types for the hinet-selector application.
 *
 * This module contains custom error types for the portal session, the
 * station selection request and the application as a whole, using the
 * thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while talking to the data portal
#[derive(Error, Debug)]
pub enum PortalError {
    /// Error when a request could not be sent or its response not read
    #[error("Portal request failed: {0}")]
    RequestFailed(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error returned by the portal itself
    #[error("Portal responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The login step did not produce an authenticated session
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_builder() {
            Self::ClientBuild(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while preparing a station selection
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The network code is not one of the codes the portal accepts
    #[error("Network code must be 0101 or 0103, got '{0}'")]
    InvalidNetworkCode(String),

    /// The station list file could not be read
    #[error("Cannot read station list '{path}': {reason}")]
    StationListUnreadable {
        /// Path of the list file
        path: String,
        /// Underlying I/O error
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration file does not exist
    #[error("Configure file '{0}' not found")]
    ConfigurationMissing(String),

    /// The configuration file exists but cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from the portal session
    #[error("Portal error: {0}")]
    Portal(#[from] PortalError),

    /// Error preparing the selection
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
