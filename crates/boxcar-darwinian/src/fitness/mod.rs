//! Fitness scoring
pub mod calculator;
pub mod registry;

pub use self::calculator::FitnessCalculator;
pub use self::registry::{FitnessError, FitnessFunction};
