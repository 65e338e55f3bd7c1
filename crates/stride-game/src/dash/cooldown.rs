//! Cooldown gate controlling how often the dash can be used

use serde::{Deserialize, Serialize};

use super::config::CooldownConfig;

/// Slack on phase boundaries so summed fixed steps land on them
const BOUNDARY_EPSILON: f32 = 1e-5;

/// Phase of the recharge cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CooldownPhase {
    /// Usable
    #[default]
    Ready,
    /// Just used, the gauge is draining
    Consuming,
    /// Gauge refilling towards ready
    Refilling,
}

/// Recharge timer gating the dash.
///
/// All operations are total: starting an unready gate is a no-op.
#[derive(Debug, Clone)]
pub struct Cooldown {
    /// Timing configuration
    pub config: CooldownConfig,
    phase: CooldownPhase,
    /// Seconds since the last successful `start`
    elapsed: f32,
}

impl Cooldown {
    /// Create a ready gate
    pub fn new(config: CooldownConfig) -> Self {
        Self {
            config,
            phase: CooldownPhase::Ready,
            elapsed: 0.0,
        }
    }

    /// Whether the dash may be used
    pub fn ready(&self) -> bool {
        self.phase == CooldownPhase::Ready
    }

    /// Current phase
    pub fn phase(&self) -> CooldownPhase {
        self.phase
    }

    /// Begin recharging. Does nothing if the gate is not ready.
    pub fn start(&mut self) {
        if !self.ready() {
            return;
        }
        self.elapsed = 0.0;
        self.phase = CooldownPhase::Consuming;
    }

    /// Advance the recharge timer by `dt` seconds of simulation time
    pub fn update(&mut self, dt: f32) {
        if self.ready() {
            return;
        }

        self.elapsed += dt.max(0.0);
        self.phase = if reached(self.elapsed, self.config.recharge_time) {
            CooldownPhase::Ready
        } else if reached(self.elapsed, self.config.consumption_duration) {
            CooldownPhase::Refilling
        } else {
            CooldownPhase::Consuming
        };
    }

    /// Force the gate ready immediately
    pub fn stop(&mut self) {
        self.phase = CooldownPhase::Ready;
        self.elapsed = 0.0;
    }

    /// Seconds until ready (0 when ready)
    pub fn remaining(&self) -> f32 {
        if self.ready() {
            0.0
        } else {
            (self.config.recharge_time - self.elapsed).max(0.0)
        }
    }

    /// Total recharge time
    pub fn total(&self) -> f32 {
        self.config.recharge_time
    }

    /// Gauge level in [0, 1] for UI bars: drains while consuming, refills after
    pub fn fill_fraction(&self) -> f32 {
        match self.phase {
            CooldownPhase::Ready => 1.0,
            CooldownPhase::Consuming => {
                let consumption = self.config.consumption_duration;
                if consumption <= 0.0 {
                    0.0
                } else {
                    (1.0 - self.elapsed / consumption).clamp(0.0, 1.0)
                }
            }
            CooldownPhase::Refilling => {
                let refill = self.config.recharge_time - self.config.consumption_duration;
                if refill <= 0.0 {
                    1.0
                } else {
                    ((self.elapsed - self.config.consumption_duration) / refill).clamp(0.0, 1.0)
                }
            }
        }
    }
}

fn reached(elapsed: f32, boundary: f32) -> bool {
    boundary - elapsed <= BOUNDARY_EPSILON
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(CooldownConfig::default())
    }
}
