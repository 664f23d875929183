//! Error types for the Boxcar settings engine
//!
//! Provides a unified error type and the settings-specific variants

use thiserror::Error;

use crate::types::constraint::TypeConstraint;

/// Result type alias using BoxcarError
pub type Result<T> = std::result::Result<T, BoxcarError>;

/// Unified error type for Boxcar operations
#[derive(Debug, Error)]
pub enum BoxcarError {
    // Settings errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    // Storage errors (audit log I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BoxcarError {
    /// The settings error behind this error, if any
    pub fn as_settings(&self) -> Option<&SettingsError> {
        match self {
            BoxcarError::Settings(err) => Some(err),
            _ => None,
        }
    }
}

/// Lookup, typing, and verification errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Unable to find a setting for controller {0}")]
    UnknownController(String),

    #[error("Controller {controller} has no constant {name}")]
    UnknownSetting { controller: String, name: String },

    #[error(
        "constant \"{name}\" in {controller} contains value: {value}, which is of type {actual}. Expected type: {expected}"
    )]
    TypeMismatch {
        controller: String,
        name: String,
        value: String,
        actual: String,
        expected: TypeConstraint,
    },

    #[error("constant \"{name}\" in {controller} has a cyclic alias chain: {}", .chain.join(" -> "))]
    CyclicAlias {
        controller: String,
        name: String,
        chain: Vec<String>,
    },

    #[error(
        "The following constants have invalid values for their types:\n{}",
        .failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    )]
    InvalidConfiguration { failures: Vec<VerificationFailure> },
}

/// One failing (controller, name) pair from bulk verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFailure {
    pub controller: String,
    pub name: String,
    pub reason: String,
}

impl std::fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.controller, self.name)
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for BoxcarError {
    fn from(err: serde_json::Error) -> Self {
        BoxcarError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for BoxcarError {
    fn from(err: std::io::Error) -> Self {
        BoxcarError::Storage(err.to_string())
    }
}
