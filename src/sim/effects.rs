//! Timed boosts and the vehicle
//!
//! Speed, Multiplier and Immunity are independent countdowns keyed by kind: an
//! entry in the map means the effect is active. The gameplay parameters they
//! modify are derived from the map, so expiry reverts them automatically.
//!
//! The vehicle is special-cased: it keeps a stock of charges, rides on its own
//! timer, and a crash leaves a short cooldown during which obstacles are ignored.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::entities::BoostKind;
use super::state::GameEvent;
use crate::consts::*;

/// Boosts that run on a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimedEffect {
    Speed,
    Multiplier,
    Immunity,
}

/// Vehicle charges and ride state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unused charges (0..=MAX_VEHICLE_CHARGES)
    pub charges: u8,
    /// Remaining ride time; `Some` while riding
    pub ride: Option<Duration>,
    /// Remaining post-crash grace period
    pub cooldown: Duration,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            charges: START_VEHICLE_CHARGES,
            ride: None,
            cooldown: Duration::ZERO,
        }
    }
}

/// All active effects for a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Active timed effects and their remaining time
    pub timed: BTreeMap<TimedEffect, Duration>,
    pub vehicle: Vehicle,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a collected boost. Returns instant bonus points (0 for timed boosts).
    pub fn apply(&mut self, kind: BoostKind) -> u64 {
        match kind {
            BoostKind::ScoreSmall => SCORE_SMALL_BONUS,
            BoostKind::ScoreLarge => SCORE_LARGE_BONUS,
            BoostKind::Speed => self.start(TimedEffect::Speed),
            BoostKind::Multiplier => self.start(TimedEffect::Multiplier),
            BoostKind::Immunity => self.start(TimedEffect::Immunity),
            BoostKind::Vehicle => {
                self.vehicle.charges = (self.vehicle.charges + 1).min(MAX_VEHICLE_CHARGES);
                0
            }
        }
    }

    /// (Re)start a countdown. Re-picking only refreshes the timer.
    fn start(&mut self, effect: TimedEffect) -> u64 {
        self.timed.insert(effect, EFFECT_DURATION);
        0
    }

    /// Spend a charge and start riding. No-op without charges or while riding.
    pub fn activate_vehicle(&mut self) -> bool {
        if self.vehicle.charges == 0 || self.vehicle.ride.is_some() {
            return false;
        }
        self.vehicle.charges -= 1;
        self.vehicle.ride = Some(VEHICLE_RIDE_DURATION);
        true
    }

    /// End the ride on impact and open the cooldown window
    pub fn crash_vehicle(&mut self) {
        self.vehicle.ride = None;
        self.vehicle.cooldown = VEHICLE_COOLDOWN;
    }

    /// Count every timer down by `dt`, dropping whatever expires
    pub fn tick(&mut self, dt: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.timed.retain(|effect, remaining| {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                events.push(GameEvent::EffectExpired(*effect));
                false
            } else {
                true
            }
        });

        if let Some(remaining) = self.vehicle.ride {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.vehicle.ride = None;
                events.push(GameEvent::VehicleExpired);
            } else {
                self.vehicle.ride = Some(remaining);
            }
        }

        self.vehicle.cooldown = self.vehicle.cooldown.saturating_sub(dt);

        events
    }

    #[inline]
    pub fn is_active(&self, effect: TimedEffect) -> bool {
        self.timed.contains_key(&effect)
    }

    pub fn remaining(&self, effect: TimedEffect) -> Option<Duration> {
        self.timed.get(&effect).copied()
    }

    #[inline]
    pub fn is_riding(&self) -> bool {
        self.vehicle.ride.is_some()
    }

    #[inline]
    pub fn in_cooldown(&self) -> bool {
        !self.vehicle.cooldown.is_zero()
    }

    /// World speed factor
    pub fn speed_factor(&self) -> f32 {
        if self.is_active(TimedEffect::Speed) {
            SPEED_BOOST_FACTOR
        } else {
            1.0
        }
    }

    pub fn score_multiplier(&self) -> u64 {
        if self.is_active(TimedEffect::Multiplier) {
            2
        } else {
            1
        }
    }
}
