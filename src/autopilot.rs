//! Demo autopilot
//!
//! Plays the game through the same input events a person would send. Starts a
//! run from the menu, restarts after a crash, and while playing jumps Low
//! obstacles, sidesteps Tall ones and drifts toward boosts when it is safe.

use crate::consts::LANE_COUNT;
use crate::input::{InputEvent, Key};
use crate::sim::{Aabb, GamePhase, GameState, ObstacleKind, TimedEffect};

/// How far above the player an obstacle counts as a threat (pixels)
const LOOKAHEAD: f32 = 220.0;
/// Gap at which a jump is started over a Low obstacle
const JUMP_GAP: f32 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Restarts issued so far
    pub restarts: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input to send this frame
    pub fn plan(&mut self, state: &GameState) -> Vec<InputEvent> {
        match state.phase {
            GamePhase::Menu => vec![InputEvent::KeyDown(Key::Space)],
            GamePhase::Controls => vec![InputEvent::KeyDown(Key::Escape)],
            GamePhase::GameOver => {
                self.restarts += 1;
                vec![InputEvent::KeyDown(Key::R)]
            }
            GamePhase::Playing => play(state).into_iter().collect(),
        }
    }
}

/// Nearest obstacle in `lane` that is above the player within the lookahead,
/// or already overlapping vertically
fn threat(state: &GameState, lane: usize, player: &Aabb) -> Option<(ObstacleKind, f32)> {
    let center = state.lanes.center_x(lane);
    state
        .entities
        .obstacles
        .iter()
        .filter(|o| (o.bounds().center().x - center).abs() < state.lanes.lane_width / 2.0)
        .filter(|o| o.pos.y + o.size.y > player.min.y - LOOKAHEAD && o.pos.y < player.max.y)
        .map(|o| (o.kind, player.min.y - (o.pos.y + o.size.y)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn play(state: &GameState) -> Option<InputEvent> {
    let player = state.player.bounding_box(&state.lanes);
    let lane = state.player.lane;
    let airborne = state.player.motion.is_airborne();
    let immune = state.effects.is_active(TimedEffect::Immunity);

    if state.effects.is_riding() {
        return None;
    }

    if let Some((kind, gap)) = threat(state, lane, &player) {
        let jumpable = kind == ObstacleKind::Low || immune;
        if jumpable {
            if !airborne && gap <= JUMP_GAP {
                return Some(InputEvent::KeyDown(Key::Space));
            }
            return None;
        }

        if let Some(target) = safe_neighbour(state, lane, &player) {
            return Some(step_toward(lane, target));
        }
        if state.effects.vehicle.charges > 0 && gap <= JUMP_GAP {
            return Some(InputEvent::KeyDown(Key::V));
        }
        return None;
    }

    // Nothing in the way: go collect the lowest boost if its lane is clear
    let boost_lane = state
        .entities
        .boosts
        .iter()
        .filter(|b| b.active && b.pos.y < player.max.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .and_then(|b| state.lanes.lane_at(b.bounds().center().x))?;
    if boost_lane == lane {
        return None;
    }
    let next = if boost_lane > lane { lane + 1 } else { lane - 1 };
    if threat(state, next, &player).is_none() {
        Some(step_toward(lane, next))
    } else {
        None
    }
}

/// Adjacent lane without a threat, preferring the centre
fn safe_neighbour(state: &GameState, lane: usize, player: &Aabb) -> Option<usize> {
    let mut candidates = Vec::with_capacity(2);
    if lane > 0 {
        candidates.push(lane - 1);
    }
    if lane + 1 < LANE_COUNT {
        candidates.push(lane + 1);
    }
    candidates.sort_by_key(|l| l.abs_diff(LANE_COUNT / 2));
    candidates
        .into_iter()
        .find(|l| threat(state, *l, player).is_none())
}

fn step_toward(from: usize, to: usize) -> InputEvent {
    if to < from {
        InputEvent::KeyDown(Key::Left)
    } else {
        InputEvent::KeyDown(Key::Right)
    }
}
