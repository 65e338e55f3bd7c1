//! Simulation clock
//!
//! Converts variable frame deltas into a fixed number of simulation steps.
//! All timers in the movement kit run on simulation time, never wall-clock.

use serde::{Deserialize, Serialize};

/// Configuration for the simulation clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for ability processing (in seconds)
    pub fixed_timestep: f32,
    /// Maximum frame delta to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Fixed-step simulation clock
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    /// Configuration
    pub config: ClockConfig,
    /// Simulated seconds since start
    pub total_time: f64,
    /// Number of fixed steps produced so far
    pub step_count: u64,
    /// Leftover time not yet consumed by a fixed step
    accumulator: f32,
}

impl SimClock {
    /// Create a clock with custom config
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The fixed step length handed to ability processing
    pub fn step(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Feed a raw frame delta and return how many fixed steps to run
    pub fn advance(&mut self, raw_delta: f32) -> u32 {
        if self.config.fixed_timestep <= 0.0 {
            return 0;
        }

        let delta = raw_delta.clamp(0.0, self.config.max_delta_time) * self.config.time_scale;
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.step_count += steps as u64;
        self.total_time += steps as f64 * self.config.fixed_timestep as f64;
        steps
    }

}
