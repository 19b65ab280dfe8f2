//! Player controller: lane changes and the jump arc

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::lanes::LaneLayout;
use crate::consts::*;

/// Vertical motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Grounded,
    Rising,
    Falling,
}

impl Motion {
    #[inline]
    pub fn is_airborne(&self) -> bool {
        !matches!(self, Motion::Grounded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Occupied lane (0 = left)
    pub lane: usize,
    /// Height above the ground, never negative
    pub jump_height: f32,
    pub motion: Motion,
    /// Top edge of the box while grounded
    pub base_y: f32,
}

impl Player {
    /// Grounded player in the centre lane
    pub fn new(field_height: f32) -> Self {
        Self {
            lane: LANE_COUNT / 2,
            jump_height: 0.0,
            motion: Motion::Grounded,
            base_y: field_height - PLAYER_BASE_OFFSET,
        }
    }

    /// Shift one lane, stopping at the road edges
    pub fn move_lane(&mut self, direction: LaneDirection) {
        self.lane = match direction {
            LaneDirection::Left => self.lane.saturating_sub(1),
            LaneDirection::Right => (self.lane + 1).min(LANE_COUNT - 1),
        };
    }

    /// Start a jump. Ignored unless grounded.
    pub fn jump(&mut self) -> bool {
        if self.motion != Motion::Grounded {
            return false;
        }
        self.motion = Motion::Rising;
        self.jump_height = 0.0;
        true
    }

    /// Advance the jump arc by `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        match self.motion {
            Motion::Grounded => {}
            Motion::Rising => {
                self.jump_height += JUMP_SPEED * dt;
                if self.jump_height >= JUMP_MAX_HEIGHT {
                    self.jump_height = JUMP_MAX_HEIGHT;
                    self.motion = Motion::Falling;
                }
            }
            Motion::Falling => {
                self.jump_height -= JUMP_SPEED * dt;
                if self.jump_height <= 0.0 {
                    self.jump_height = 0.0;
                    self.motion = Motion::Grounded;
                }
            }
        }
    }

    /// Current collision box, derived from lane and jump height
    pub fn bounding_box(&self, lanes: &LaneLayout) -> Aabb {
        let x = lanes.center_x(self.lane) - PLAYER_WIDTH / 2.0;
        let y = self.base_y - self.jump_height;
        Aabb::new(Vec2::new(x, y), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_move_lane_clamps() {
        let mut player = Player::new(600.0);
        assert_eq!(player.lane, 1);
        player.move_lane(LaneDirection::Left);
        player.move_lane(LaneDirection::Left);
        assert_eq!(player.lane, 0);
        player.move_lane(LaneDirection::Right);
        player.move_lane(LaneDirection::Right);
        player.move_lane(LaneDirection::Right);
        assert_eq!(player.lane, 2);
    }

    #[test]
    fn test_box_follows_lane_immediately() {
        let lanes = LaneLayout::new(800.0);
        let mut player = Player::new(600.0);
        let before = player.bounding_box(&lanes);
        player.move_lane(LaneDirection::Right);
        let after = player.bounding_box(&lanes);
        assert!((after.min.x - before.min.x - lanes.lane_width).abs() < 1e-4);
        assert!((after.center().x - lanes.centers[2]).abs() < 1e-4);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = Player::new(600.0);
        assert!(player.jump());
        player.integrate(0.1);
        assert!(!player.jump());
        assert_eq!(player.motion, Motion::Rising);
    }

    #[test]
    fn test_jump_raises_box() {
        let lanes = LaneLayout::new(800.0);
        let mut player = Player::new(600.0);
        let grounded = player.bounding_box(&lanes);
        player.jump();
        player.integrate(0.1);
        let airborne = player.bounding_box(&lanes);
        assert!((grounded.min.y - airborne.min.y - JUMP_SPEED * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_full_jump_cycle() {
        let mut player = Player::new(600.0);
        player.jump();
        let mut saw_falling = false;
        for _ in 0..200 {
            player.integrate(1.0 / 60.0);
            saw_falling |= player.motion == Motion::Falling;
        }
        assert!(saw_falling);
        assert_eq!(player.motion, Motion::Grounded);
        assert_eq!(player.jump_height, 0.0);
    }

    proptest! {
        #[test]
        fn prop_lane_stays_in_range(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut player = Player::new(600.0);
            for right in moves {
                player.move_lane(if right { LaneDirection::Right } else { LaneDirection::Left });
                prop_assert!(player.lane < LANE_COUNT);
            }
        }

        #[test]
        fn prop_jump_height_never_negative(
            steps in proptest::collection::vec(0.0f32..0.1, 1..200)
        ) {
            let mut player = Player::new(600.0);
            player.jump();
            for dt in steps {
                player.integrate(dt);
                prop_assert!(player.jump_height >= 0.0);
                prop_assert!(player.jump_height <= JUMP_MAX_HEIGHT);
            }
        }

        #[test]
        fn prop_jump_cycle_lands_exactly(dt in 0.001f32..0.1) {
            let mut player = Player::new(600.0);
            player.jump();
            let mut guard = 0;
            while player.motion != Motion::Grounded && guard < 10_000 {
                player.integrate(dt);
                guard += 1;
            }
            prop_assert_eq!(player.motion, Motion::Grounded);
            prop_assert_eq!(player.jump_height, 0.0);
        }
    }
}
