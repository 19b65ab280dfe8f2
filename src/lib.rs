//! Lane Runner - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, entities, effects, collisions)
//! - `machine`: Menu / Playing / Controls / GameOver phase transitions
//! - `frame`: Per-frame orchestration of clock, input, simulation and presentation
//! - `present`: Presentation collaborator, draw list and asset placeholders
//! - `input`: Input events and the input collaborator
//! - `settings`: Runtime configuration
//! - `autopilot`: Demo mode that plays the game

pub mod autopilot;
pub mod frame;
pub mod input;
pub mod machine;
pub mod present;
pub mod settings;
pub mod sim;

pub use frame::{FrameDriver, FrameStatus};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Largest simulation step; longer frames (window stalls, debugger pauses) are clamped
    pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Lane layout
    pub const LANE_COUNT: usize = 3;
    /// Fraction of the field width covered by the road
    pub const ROAD_WIDTH_RATIO: f32 = 0.6;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Distance from the field bottom to the player's grounded top edge
    pub const PLAYER_BASE_OFFSET: f32 = 140.0;
    /// Vertical jump speed (pixels/s), shared by the rise and the fall
    pub const JUMP_SPEED: f32 = 400.0;
    pub const JUMP_MAX_HEIGHT: f32 = 120.0;

    /// World scroll speed (pixels/s) for obstacles, boosts and background
    pub const BASE_SPEED: f32 = 300.0;
    pub const SPEED_BOOST_FACTOR: f32 = 1.2;

    /// Obstacle sizes (width, height)
    pub const LOW_OBSTACLE_SIZE: (f32, f32) = (70.0, 40.0);
    pub const TALL_OBSTACLE_SIZE: (f32, f32) = (70.0, 120.0);
    pub const BOOST_SIZE: (f32, f32) = (40.0, 40.0);
    /// Entities are removed once their top edge is this far below the field
    pub const PRUNE_MARGIN: f32 = 50.0;

    /// Spawn cadence
    pub const OBSTACLE_SPAWN_INTERVAL: Duration = Duration::from_millis(800);
    pub const BOOST_SPAWN_INTERVAL: Duration = Duration::from_secs(5);
    pub const MAX_ALIVE_BOOSTS: usize = 3;

    /// Timed boosts
    pub const EFFECT_DURATION: Duration = Duration::from_secs(15);
    pub const VEHICLE_RIDE_DURATION: Duration = Duration::from_secs(20);
    /// Grace period after a vehicle crash during which obstacles are ignored
    pub const VEHICLE_COOLDOWN: Duration = Duration::from_secs(1);
    pub const MAX_VEHICLE_CHARGES: u8 = 3;
    pub const START_VEHICLE_CHARGES: u8 = 1;

    /// Scoring
    pub const SCORE_PER_SECOND: u64 = 10;
    pub const SCORE_INTERVAL: Duration = Duration::from_secs(1);
    pub const SCORE_SMALL_BONUS: u64 = 50;
    pub const SCORE_LARGE_BONUS: u64 = 150;

    /// Background scroll offset wraps at this period (pixels)
    pub const BACKGROUND_PERIOD: f32 = 600.0;
    /// Player run-cycle animation
    pub const ANIMATION_FRAME_TIME: Duration = Duration::from_millis(150);
    pub const ANIMATION_FRAMES: usize = 4;
}
