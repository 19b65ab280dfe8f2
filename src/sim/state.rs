//! Game state and core simulation types
//!
//! Everything a run mutates lives in one `GameState`, owned by the frame driver
//! and handed by `&mut` through the update pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::{Clock, ManualClock};
use super::effects::{Effects, TimedEffect};
use super::entities::{BoostKind, EntityStore, ObstacleKind};
use super::lanes::LaneLayout;
use super::player::Player;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with Play / Controls / Quit
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Key reference screen
    Controls,
    /// Run ended, waiting for restart
    GameOver,
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Play,
    Controls,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Controls, MenuItem::Quit];

    pub fn index(&self) -> usize {
        match self {
            MenuItem::Play => 0,
            MenuItem::Controls => 1,
            MenuItem::Quit => 2,
        }
    }

    /// Entry below, stopping at the last one
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Entry above, stopping at the first one
    pub fn prev(&self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Controls => "Controls",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Play field dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ObstacleSpawned(ObstacleKind),
    BoostSpawned(BoostKind),
    BoostCollected(BoostKind),
    EffectExpired(TimedEffect),
    VehicleStarted,
    /// Ride ended by an obstacle
    VehicleCrashed(ObstacleKind),
    /// Ride timer ran out
    VehicleExpired,
    /// Fatal collision
    Crashed(ObstacleKind),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Highlighted menu entry
    pub menu_cursor: MenuItem,
    pub field: Field,
    /// Lane geometry, fixed at setup
    pub lanes: LaneLayout,
    pub player: Player,
    pub entities: EntityStore,
    pub effects: Effects,
    pub score: u64,
    /// Time accumulated toward the next per-second score payout
    pub score_timer: Duration,
    /// Background scroll position, wraps at `BACKGROUND_PERIOD`
    pub background_offset: f32,
    /// Player run-cycle frame (cosmetic)
    pub anim_frame: usize,
    pub anim_timer: Duration,
    /// Simulation timeline; only moves while Playing
    pub clock: ManualClock,
    /// Runs started since launch
    pub runs: u32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(field: Field) -> Self {
        let clock = ManualClock::new();
        Self {
            phase: GamePhase::Menu,
            menu_cursor: MenuItem::Play,
            field,
            lanes: LaneLayout::new(field.width),
            player: Player::new(field.height),
            entities: EntityStore::new(clock.now()),
            effects: Effects::new(),
            score: 0,
            score_timer: Duration::ZERO,
            background_offset: 0.0,
            anim_frame: 0,
            anim_timer: Duration::ZERO,
            clock,
            runs: 0,
            events: Vec::new(),
        }
    }

    /// Clear the run: entities, player, score, effects and spawn timers
    pub fn reset(&mut self) {
        self.clock = ManualClock::new();
        self.player = Player::new(self.field.height);
        self.entities.reset(self.clock.now());
        self.effects = Effects::new();
        self.score = 0;
        self.score_timer = Duration::ZERO;
        self.background_offset = 0.0;
        self.anim_frame = 0;
        self.anim_timer = Duration::ZERO;
    }

    /// Switch phase, recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Reset and enter Playing
    pub fn start_run(&mut self) {
        self.reset();
        self.runs += 1;
        log::info!("Run {} started", self.runs);
        self.set_phase(GamePhase::Playing);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Simulated time of the current run
    pub fn run_time(&self) -> Duration {
        self.clock.now().offset()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Field::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::{Boost, Obstacle};
    use crate::sim::player::{LaneDirection, Motion};

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::default();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.menu_cursor, MenuItem::Play);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.effects.vehicle.charges, START_VEHICLE_CHARGES);
    }

    #[test]
    fn test_menu_cursor_clamps() {
        assert_eq!(MenuItem::Play.prev(), MenuItem::Play);
        assert_eq!(MenuItem::Play.next(), MenuItem::Controls);
        assert_eq!(MenuItem::Controls.next(), MenuItem::Quit);
        assert_eq!(MenuItem::Quit.next(), MenuItem::Quit);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::default();
        state.score = 420;
        state.player.move_lane(LaneDirection::Left);
        state.player.jump();
        state.effects.apply(BoostKind::Speed);
        state.effects.apply(BoostKind::Vehicle);
        state.effects.activate_vehicle();
        let x = state.lanes.centers[0];
        state.entities.obstacles.push(Obstacle::new(ObstacleKind::Tall, x, 10.0));
        state.entities.boosts.push(Boost::new(BoostKind::Speed, x, 10.0));
        state.clock.advance(Duration::from_secs(12));

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.motion, Motion::Grounded);
        assert!(state.entities.obstacles.is_empty());
        assert!(state.entities.boosts.is_empty());
        assert!(state.effects.timed.is_empty());
        assert!(!state.effects.is_riding());
        assert_eq!(state.effects.vehicle.charges, 1);
        assert_eq!(state.run_time(), Duration::ZERO);
    }

    #[test]
    fn test_set_phase_records_event() {
        let mut state = GameState::default();
        state.set_phase(GamePhase::Controls);
        state.set_phase(GamePhase::Controls);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Controls
            }]
        );
        assert!(state.events.is_empty());
    }
}
