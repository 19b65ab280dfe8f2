//! Collision detection and resolution
//!
//! Boxes are axis-aligned; the interesting part is deciding what an overlap
//! means given the player's motion and active effects. Rules are evaluated in
//! strict priority order once per frame:
//!
//! 1. Boost pickups
//! 2. Vehicle riding (first hit ends the ride, nothing else happens)
//! 3. Post-crash cooldown (obstacles ignored)
//! 4. Immunity (airborne clears everything, grounded hits are fatal)
//! 5. Default (airborne clears Low obstacles, anything else is fatal)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{Effects, TimedEffect};
use super::entities::{Boost, BoostKind, Obstacle, ObstacleKind};
use super::player::Motion;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from top-left corner and size
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap; boxes that only touch along an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// What the obstacle pass decided this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// No consequence (no overlap, or the overlap was passable)
    Clear,
    /// The vehicle absorbed a hit and the ride ended
    VehicleCrash(ObstacleKind),
    /// The run is over
    Fatal(ObstacleKind),
}

/// Result of a collision pass
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Boosts collected this frame, in list order
    pub picked: Vec<BoostKind>,
    /// Instant bonus points from collected boosts
    pub bonus: u64,
    pub outcome: CollisionOutcome,
}

impl Resolution {
    pub fn clear() -> Self {
        Self {
            picked: Vec::new(),
            bonus: 0,
            outcome: CollisionOutcome::Clear,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.outcome, CollisionOutcome::Fatal(_))
    }
}

/// Run the collision rules for one frame.
///
/// Mutates `boosts` (picked boosts are deactivated) and `effects` (pickups are
/// applied, a vehicle crash ends the ride). Obstacles are only read.
pub fn resolve(
    player: &Aabb,
    motion: Motion,
    boosts: &mut [Boost],
    obstacles: &[Obstacle],
    effects: &mut Effects,
) -> Resolution {
    let mut result = Resolution::clear();

    // 1. Pickups
    for boost in boosts.iter_mut().filter(|b| b.active) {
        if player.intersects(&boost.bounds()) {
            boost.active = false;
            result.bonus += effects.apply(boost.kind);
            result.picked.push(boost.kind);
        }
    }

    let mut hits = obstacles.iter().filter(|o| player.intersects(&o.bounds()));

    // 2. Vehicle takes the first hit and nothing else is evaluated
    if effects.is_riding() {
        if let Some(obstacle) = hits.next() {
            effects.crash_vehicle();
            result.outcome = CollisionOutcome::VehicleCrash(obstacle.kind);
        }
        return result;
    }

    // 3. Grace period after dismounting
    if effects.in_cooldown() {
        return result;
    }

    let airborne = motion.is_airborne();

    // 4. Immunity only helps in the air
    if effects.is_active(TimedEffect::Immunity) {
        if !airborne {
            if let Some(obstacle) = hits.next() {
                result.outcome = CollisionOutcome::Fatal(obstacle.kind);
            }
        }
        return result;
    }

    // 5. Low obstacles can be jumped, Tall ones cannot
    let fatal = hits.find(|o| !airborne || o.kind == ObstacleKind::Tall);
    if let Some(obstacle) = fatal {
        result.outcome = CollisionOutcome::Fatal(obstacle.kind);
    }

    result
}
