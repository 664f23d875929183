//! # Darwinian
//!
//! Fitness scoring and population telemetry for the Boxcar GA.
//!
//! ## Fitness Functions
//!
//! - `fitness_function` ([`FitnessFunction::PositionDominant`]): raw
//!   polynomial, unbounded, dominated by distance travelled
//! - `fitness_function2` ([`FitnessFunction::MultiFactor`]): weighted sum of
//!   distance, wheel count, ground contacts, time, mass, volume, and stall
//!   time, passed through a saturating rescale
//!
//! ## Rescale
//!
//! ```text
//! rescale(x) = atan(x) + π/2     x <= 0
//!            = x^(3/4) + π/2     x > 0
//! ```
//!
//! Deeply negative candidates cluster just above zero instead of swamping
//! selection with huge negative magnitudes.
//!
//! Scorers are pure and can be called from any number of threads.

pub mod fitness;
pub mod telemetry;

pub use fitness::{FitnessCalculator, FitnessError, FitnessFunction};
pub use telemetry::PopulationLog;

use boxcar_common::{BoxcarError, Result};
use boxcar_settings::{Resolver, BOXCAR_CONTROLLER, GA_CONTROLLER};

/// Parameters of the multi-factor scorer
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessConfig {
    /// Wheel counts above this pay the per-wheel term
    pub min_num_wheels: u32,
    /// Penalty for a wheel that never touched the ground
    pub max_contacts_penalty: f64,
    /// Contact count at which the per-wheel penalty reaches zero
    pub contacts_threshold: u32,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            min_num_wheels: 2,
            max_contacts_penalty: 50.0,
            contacts_threshold: 10,
        }
    }
}

impl FitnessConfig {
    /// Read parameters from the `boxcar` and `ga` controllers
    pub fn from_resolver(resolver: &mut Resolver) -> Result<Self> {
        Ok(Self {
            min_num_wheels: non_negative(
                "min_num_wheels",
                resolver.resolve_i64(BOXCAR_CONTROLLER, "min_num_wheels")?,
            )?,
            max_contacts_penalty: resolver.resolve_f64(GA_CONTROLLER, "max_contacts_penalty")?,
            contacts_threshold: non_negative(
                "contacts_threshold",
                resolver.resolve_i64(GA_CONTROLLER, "contacts_threshold")?,
            )?,
        })
    }
}

fn non_negative(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| BoxcarError::Config(format!("{} must be a non-negative count, got {}", name, value)))
}
