//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (spawn order, `BTreeMap` for effects)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod lanes;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use clock::{Clock, FixedStepClock, ManualClock, Mark, SystemClock};
pub use collision::{Aabb, CollisionOutcome, Resolution, resolve};
pub use effects::{Effects, TimedEffect, Vehicle};
pub use entities::{Boost, BoostKind, EntityStore, Obstacle, ObstacleKind};
pub use lanes::LaneLayout;
pub use player::{LaneDirection, Motion, Player};
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{Field, GameEvent, GamePhase, GameState, MenuItem};
pub use tick::tick;
