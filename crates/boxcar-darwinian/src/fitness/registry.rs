//! Scorers addressable by name
//!
//! The `ga` controller stores its fitness functions as callable settings;
//! this registry turns those names back into scorers.

use boxcar_common::{BoxcarError, OutcomeRecord, Value};
use boxcar_settings::{Resolver, GA_CONTROLLER};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calculator::FitnessCalculator;
use crate::FitnessConfig;

/// Scorer lookup errors
#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("No fitness function registered as {0}")]
    UnknownFunction(String),

    #[error("Setting {setting} is not callable: {value}")]
    NotCallable { setting: String, value: String },

    #[error(transparent)]
    Resolution(#[from] BoxcarError),
}

/// A registered fitness function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessFunction {
    /// Unbounded, dominated by the position term
    PositionDominant,
    /// Weighted sum of every outcome factor, rescaled
    MultiFactor,
}

impl FitnessFunction {
    pub const ALL: [FitnessFunction; 2] =
        [FitnessFunction::PositionDominant, FitnessFunction::MultiFactor];

    /// Registered name
    pub fn name(&self) -> &'static str {
        match self {
            FitnessFunction::PositionDominant => "fitness_function",
            FitnessFunction::MultiFactor => "fitness_function2",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, FitnessError> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FitnessError::UnknownFunction(name.to_string()))
    }

    /// Scorer referenced by a `ga` setting holding a callable
    pub fn from_setting(resolver: &mut Resolver, setting: &str) -> Result<Self, FitnessError> {
        match resolver.resolve(GA_CONTROLLER, setting)? {
            Value::Callable(name) => Self::from_name(&name),
            other => Err(FitnessError::NotCallable {
                setting: setting.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Score one outcome
    pub fn score(&self, outcome: &OutcomeRecord, config: &FitnessConfig) -> f64 {
        match self {
            FitnessFunction::PositionDominant => FitnessCalculator::position_dominant(
                outcome.max_position,
                outcome.num_wheels,
                outcome.chassis_volume,
                outcome.wheels_volume,
                outcome.frames,
            ),
            FitnessFunction::MultiFactor => FitnessCalculator::multi_factor(outcome, config),
        }
    }
}

impl std::fmt::Display for FitnessFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
