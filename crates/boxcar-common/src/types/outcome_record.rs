//! OutcomeRecord - per-candidate simulation telemetry
//!
//! Every evaluated car produces one OutcomeRecord. It is built by the
//! simulation, handed to a fitness scorer, and then discarded.

use serde::{Deserialize, Serialize};

/// Simulation outcome of one candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Furthest x position reached
    pub max_position: f64,

    /// Whether the car reached the end of the floor
    pub is_winner: bool,

    /// Number of wheels on the car
    pub num_wheels: u32,

    /// Ground contacts counted per wheel
    pub wheels_contacts: Vec<u32>,

    /// Frames simulated before the car stopped or won
    pub frames: u64,

    /// Total chassis volume
    pub chassis_volume: f64,

    /// Total chassis mass
    pub chassis_mass: f64,

    /// Total volume across all wheels
    pub wheels_volume: f64,

    /// Total mass across all wheels
    pub wheels_mass: f64,

    /// Cumulative time the car spent motionless
    pub cumulative_stall_time: f64,
}

impl OutcomeRecord {
    /// Create a record for a car that reached `max_position` after `frames`
    pub fn new(max_position: f64, frames: u64) -> Self {
        Self {
            max_position,
            frames,
            ..Default::default()
        }
    }

    /// Mark the car as a winner
    pub fn winner(mut self) -> Self {
        self.is_winner = true;
        self
    }

    /// Set per-wheel contact counts (also sets the wheel count)
    pub fn with_wheels_contacts(mut self, contacts: Vec<u32>) -> Self {
        self.num_wheels = contacts.len() as u32;
        self.wheels_contacts = contacts;
        self
    }

    /// Set chassis volume and mass
    pub fn with_chassis(mut self, volume: f64, mass: f64) -> Self {
        self.chassis_volume = volume;
        self.chassis_mass = mass;
        self
    }

    /// Set total wheel volume and mass
    pub fn with_wheels(mut self, volume: f64, mass: f64) -> Self {
        self.wheels_volume = volume;
        self.wheels_mass = mass;
        self
    }

    /// Set cumulative stall time
    pub fn with_stall_time(mut self, stall_time: f64) -> Self {
        self.cumulative_stall_time = stall_time;
        self
    }

    /// Winner flag as the 0/1 factor used by the scorers
    #[inline]
    pub fn winner_factor(&self) -> f64 {
        if self.is_winner {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_wheel_count() {
        let record = OutcomeRecord::new(12.5, 300).with_wheels_contacts(vec![3, 0, 11]);
        assert_eq!(record.num_wheels, 3);
        assert_eq!(record.wheels_contacts, vec![3, 0, 11]);
        assert_eq!(record.frames, 300);
    }

    #[test]
    fn test_winner_factor() {
        let record = OutcomeRecord::new(1.0, 10);
        assert_eq!(record.winner_factor(), 0.0);
        assert_eq!(record.winner().winner_factor(), 1.0);
    }
}
