//! Core data types for the Boxcar settings engine

pub mod constraint;
pub mod outcome_record;
pub mod telemetry;
pub mod value;
