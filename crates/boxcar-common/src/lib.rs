//! # Boxcar Common
//!
//! Shared value model, type constraints, and errors for the Boxcar settings
//! engine and its fitness scorers.
//!
//! ## Core Types
//!
//! - [`Value`]: a raw or resolved setting value (scalar, tuple, absent, callable)
//! - [`Kind`]: the runtime tag of a [`Value`]
//! - [`TypeConstraint`]: what a resolved value is allowed to be, and how it is coerced
//! - [`OutcomeRecord`]: per-candidate simulation telemetry consumed by the scorers
//! - [`CandidateTelemetry`]: one row of the population CSV log
//!
//! ## Errors
//!
//! - [`BoxcarError`]: unified error type
//! - [`SettingsError`]: lookup, type, alias, and verification failures

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BoxcarError, Result, SettingsError, VerificationFailure};
pub use types::{
    constraint::{ConstraintViolation, TypeConstraint},
    outcome_record::OutcomeRecord,
    telemetry::{population_columns, population_headers, CandidateTelemetry, MAX_ROUND_DIGITS},
    value::{Kind, Value},
};

/// Boxcar version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of indexed columns reserved per repeated component in telemetry exports
pub const MAX_COMPONENT_SLOTS: usize = 8;
