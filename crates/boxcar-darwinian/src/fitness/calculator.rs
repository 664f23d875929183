//! Fitness calculation
//!
//! Position-dominant:
//!
//! ```text
//! f = (3p)^3.5 - w^5 - (5·Vc)^3 - (10·Vw)^5 - frames
//! ```
//!
//! Multi-factor, rescaled:
//!
//! ```text
//! raw = 10p - [50w if w > w_min else 0] - Σ contact_penalty
//!       - frames / (100 · (winner + 0.1))
//!       - Mc - 100·Vc - Mw/10 - 10·Vw - 10·stall
//! f   = rescale(raw)
//! ```

use std::f64::consts::FRAC_PI_2;

use boxcar_common::OutcomeRecord;

use crate::FitnessConfig;

pub struct FitnessCalculator;

impl FitnessCalculator {
    /// Position-dominant score; unbounded, not rescaled
    ///
    /// Negative positions count as zero in the position term.
    pub fn position_dominant(
        max_position: f64,
        num_wheels: u32,
        total_chassis_volume: f64,
        total_wheels_volume: f64,
        frames: u64,
    ) -> f64 {
        (max_position.max(0.0) * 3.0).powf(3.5)
            - (num_wheels as f64).powi(5)
            - (total_chassis_volume * 5.0).powi(3)
            - (total_wheels_volume * 10.0).powi(5)
            - frames as f64
    }

    /// Unscaled multi-factor sum
    pub fn multi_factor_raw(outcome: &OutcomeRecord, config: &FitnessConfig) -> f64 {
        // Only the wheel term is conditional
        let wheel_term = if outcome.num_wheels > config.min_num_wheels {
            50.0 * outcome.num_wheels as f64
        } else {
            0.0
        };
        let contacts: f64 = outcome
            .wheels_contacts
            .iter()
            .map(|&c| Self::contact_penalty(c, config.max_contacts_penalty, config.contacts_threshold))
            .sum();
        let time_pressure = (1.0 / (outcome.winner_factor() + 0.10)) * (outcome.frames as f64 / 100.0);

        10.0 * outcome.max_position
            - wheel_term
            - contacts
            - time_pressure
            - outcome.chassis_mass
            - 100.0 * outcome.chassis_volume
            - outcome.wheels_mass / 10.0
            - 10.0 * outcome.wheels_volume
            - 10.0 * outcome.cumulative_stall_time
    }

    /// Multi-factor score passed through [`FitnessCalculator::rescale`]
    pub fn multi_factor(outcome: &OutcomeRecord, config: &FitnessConfig) -> f64 {
        Self::rescale(Self::multi_factor_raw(outcome, config))
    }

    /// Penalty for one wheel: `max_penalty` at zero contacts, falling
    /// linearly to zero at `threshold`, zero above it
    pub fn contact_penalty(contacts: u32, max_penalty: f64, threshold: u32) -> f64 {
        if contacts > threshold {
            return 0.0;
        }
        if threshold == 0 {
            return max_penalty;
        }
        (-max_penalty / threshold as f64) * contacts as f64 + max_penalty
    }

    /// Saturating rescale: `atan(x) + π/2` for `x <= 0`, `x^0.75 + π/2` above
    #[inline]
    pub fn rescale(x: f64) -> f64 {
        if x <= 0.0 {
            x.atan() + FRAC_PI_2
        } else {
            x.powf(0.75) + FRAC_PI_2
        }
    }
}
