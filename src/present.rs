//! Presentation collaborator
//!
//! The simulation never draws. Each frame the driver hands a `FrameView` to a
//! `Presenter`; presenters turn it into an ordered draw list and feed whatever
//! back end they own. Visual assets are looked up by name and a missing asset
//! falls back to a flat-coloured placeholder, so rendering can degrade but
//! never affects the game.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use glam::Vec2;
use serde::Serialize;

use crate::consts::{ANIMATION_FRAMES, BACKGROUND_PERIOD};
use crate::machine::menu_button;
use crate::sim::{Aabb, BoostKind, GamePhase, GameState, MenuItem, ObstacleKind, TimedEffect};

/// What a presenter gets to look at each frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    /// Frames presented so far
    pub frame: u64,
    /// Wall time of the frame that produced this view
    pub dt: Duration,
}

/// Consumer of rendered frames
pub trait Presenter {
    fn present(&mut self, view: &FrameView<'_>);
}

/// Named visuals the draw list refers to
pub const SPRITE_NAMES: [&str; 17] = [
    "background",
    "road",
    "player_run_0",
    "player_run_1",
    "player_run_2",
    "player_run_3",
    "player_jump",
    "vehicle",
    "obstacle_low",
    "obstacle_tall",
    "boost_score_small",
    "boost_score_large",
    "boost_speed",
    "boost_multiplier",
    "boost_immunity",
    "boost_vehicle",
    "button",
];

const PLAYER_RUN: [&str; ANIMATION_FRAMES] =
    ["player_run_0", "player_run_1", "player_run_2", "player_run_3"];

/// A resolved asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetHandle {
    pub name: String,
    pub path: PathBuf,
}

/// Looks up visual assets by name
pub trait AssetResolver {
    fn resolve(&self, name: &str) -> Option<AssetHandle>;
}

/// Resolves nothing; every sprite becomes a placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn resolve(&self, _name: &str) -> Option<AssetHandle> {
        None
    }
}

/// Resolves `<root>/<name>.png`
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for DirAssets {
    fn resolve(&self, name: &str) -> Option<AssetHandle> {
        let path = self.root.join(format!("{name}.png"));
        path.is_file().then(|| AssetHandle {
            name: name.to_string(),
            path,
        })
    }
}

/// A sprite is either a loaded asset or a flat RGBA placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Sprite {
    Asset(AssetHandle),
    Placeholder([u8; 4]),
}

/// Placeholder colour for a sprite name
pub fn placeholder_color(name: &str) -> [u8; 4] {
    match name {
        "background" => [24, 24, 32, 255],
        "road" => [60, 60, 70, 255],
        "player_jump" => [90, 200, 255, 255],
        "vehicle" => [255, 215, 0, 255],
        "obstacle_low" => [200, 120, 40, 255],
        "obstacle_tall" => [200, 40, 40, 255],
        "boost_score_small" | "boost_score_large" => [255, 240, 120, 255],
        "boost_speed" => [80, 255, 120, 255],
        "boost_multiplier" => [255, 120, 255, 255],
        "boost_immunity" => [120, 160, 255, 255],
        "boost_vehicle" => [255, 180, 60, 255],
        "button" => [70, 70, 90, 255],
        n if n.starts_with("player_run") => [60, 170, 255, 255],
        _ => [255, 0, 255, 255],
    }
}

/// Every named sprite, resolved once at startup
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sprites: BTreeMap<&'static str, Sprite>,
}

impl SpriteSheet {
    pub fn load(resolver: &dyn AssetResolver) -> Self {
        let mut sprites = BTreeMap::new();
        let mut missing = Vec::new();
        for name in SPRITE_NAMES {
            let sprite = match resolver.resolve(name) {
                Some(handle) => Sprite::Asset(handle),
                None => {
                    missing.push(name);
                    Sprite::Placeholder(placeholder_color(name))
                }
            };
            sprites.insert(name, sprite);
        }
        if !missing.is_empty() {
            log::warn!("Using placeholders for missing sprites: {}", missing.join(", "));
        }
        Self { sprites }
    }

    pub fn get(&self, name: &str) -> Sprite {
        self.sprites
            .get(name)
            .cloned()
            .unwrap_or_else(|| Sprite::Placeholder(placeholder_color(name)))
    }

    /// Number of sprites that fell back to a placeholder
    pub fn placeholder_count(&self) -> usize {
        self.sprites
            .values()
            .filter(|s| matches!(s, Sprite::Placeholder(_)))
            .count()
    }
}

/// One back-end draw call, in painter's order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Sprite {
        name: &'static str,
        bounds: Aabb,
        /// Flat fill to use instead of the asset when it failed to load
        placeholder: Option<[u8; 4]>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
    },
}

/// Accumulates draw commands, resolving sprite names against the sheet
struct DrawList<'a> {
    sheet: &'a SpriteSheet,
    cmds: Vec<DrawCommand>,
}

impl DrawList<'_> {
    fn sprite(&mut self, name: &'static str, bounds: Aabb) {
        let placeholder = match self.sheet.get(name) {
            Sprite::Asset(_) => None,
            Sprite::Placeholder(color) => Some(color),
        };
        self.cmds.push(DrawCommand::Sprite {
            name,
            bounds,
            placeholder,
        });
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32) {
        self.cmds.push(DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(x, y),
            size,
        });
    }
}

pub fn boost_sprite(kind: BoostKind) -> &'static str {
    match kind {
        BoostKind::ScoreSmall => "boost_score_small",
        BoostKind::ScoreLarge => "boost_score_large",
        BoostKind::Speed => "boost_speed",
        BoostKind::Multiplier => "boost_multiplier",
        BoostKind::Immunity => "boost_immunity",
        BoostKind::Vehicle => "boost_vehicle",
    }
}

/// Build the draw list for the current phase
pub fn build_draw_list(view: &FrameView<'_>, sheet: &SpriteSheet) -> Vec<DrawCommand> {
    let state = view.state;
    let mut list = DrawList {
        sheet,
        cmds: Vec::new(),
    };
    match state.phase {
        GamePhase::Menu => draw_menu(state, &mut list),
        GamePhase::Controls => draw_controls(state, &mut list),
        GamePhase::Playing => draw_world(state, &mut list),
        GamePhase::GameOver => {
            draw_world(state, &mut list);
            let cx = state.field.width / 2.0 - 120.0;
            let cy = state.field.height / 2.0;
            list.text("GAME OVER", cx, cy - 60.0, 48.0);
            list.text(format!("Score: {}", state.score), cx, cy, 28.0);
            list.text("Press R to restart", cx, cy + 40.0, 20.0);
        }
    }
    list.cmds
}

fn draw_background(state: &GameState, list: &mut DrawList<'_>) {
    let size = Vec2::new(state.field.width, BACKGROUND_PERIOD);
    // Two stacked tiles so the scroll wraps seamlessly
    for tile in 0..2 {
        let y = state.background_offset - BACKGROUND_PERIOD * tile as f32;
        list.sprite("background", Aabb::new(Vec2::new(0.0, y), size));
    }
}

fn draw_menu(state: &GameState, list: &mut DrawList<'_>) {
    draw_background(state, list);
    let title_x = state.field.width / 2.0 - 140.0;
    list.text("LANE RUNNER", title_x, state.field.height * 0.2, 48.0);
    for item in MenuItem::ALL {
        let bounds = menu_button(item, &state.field);
        list.sprite("button", bounds);
        let label = if item == state.menu_cursor {
            format!("> {} <", item.label())
        } else {
            item.label().to_string()
        };
        list.text(label, bounds.min.x + 20.0, bounds.min.y + 12.0, 24.0);
    }
}

const CONTROLS_TEXT: [&str; 6] = [
    "Left / A, Right / D  - change lane",
    "Up / W / Space       - jump",
    "V / Shift            - ride the vehicle",
    "Escape               - back to menu",
    "R                    - restart after a crash",
    "Press Escape to return",
];

fn draw_controls(state: &GameState, list: &mut DrawList<'_>) {
    draw_background(state, list);
    list.text("CONTROLS", 60.0, 60.0, 40.0);
    for (i, line) in CONTROLS_TEXT.iter().enumerate() {
        list.text(*line, 60.0, 140.0 + i as f32 * 36.0, 20.0);
    }
}

fn draw_world(state: &GameState, list: &mut DrawList<'_>) {
    draw_background(state, list);
    list.sprite(
        "road",
        Aabb::new(
            Vec2::new(state.lanes.road_left, 0.0),
            Vec2::new(state.lanes.road_width(), state.field.height),
        ),
    );

    for obstacle in &state.entities.obstacles {
        let name = match obstacle.kind {
            ObstacleKind::Low => "obstacle_low",
            ObstacleKind::Tall => "obstacle_tall",
        };
        list.sprite(name, obstacle.bounds());
    }
    for boost in state.entities.boosts.iter().filter(|b| b.active) {
        list.sprite(boost_sprite(boost.kind), boost.bounds());
    }

    let player_sprite = if state.effects.is_riding() {
        "vehicle"
    } else if state.player.motion.is_airborne() {
        "player_jump"
    } else {
        PLAYER_RUN[state.anim_frame % ANIMATION_FRAMES]
    };
    list.sprite(player_sprite, state.player.bounding_box(&state.lanes));

    for (i, line) in hud_lines(state).into_iter().enumerate() {
        list.text(line, 16.0, 16.0 + i as f32 * 24.0, 20.0);
    }
}

/// HUD text: score, running effects and vehicle status
pub fn hud_lines(state: &GameState) -> Vec<String> {
    let mut lines = vec![format!("Score: {}", state.score)];
    for (effect, remaining) in &state.effects.timed {
        let label = match effect {
            TimedEffect::Speed => "Speed",
            TimedEffect::Multiplier => "x2",
            TimedEffect::Immunity => "Immunity",
        };
        lines.push(format!("{label}: {:.1}s", remaining.as_secs_f32()));
    }
    let vehicle = &state.effects.vehicle;
    match vehicle.ride {
        Some(remaining) => lines.push(format!("Vehicle: {:.1}s", remaining.as_secs_f32())),
        None => lines.push(format!("Vehicle charges: {}", vehicle.charges)),
    }
    lines
}

/// Headless presenter: builds the draw list every frame and logs a summary
pub struct LogPresenter {
    sheet: SpriteSheet,
    log_every: Duration,
    next_log: Duration,
    last_phase: Option<GamePhase>,
    /// Draw commands issued over the presenter's lifetime
    pub commands_issued: u64,
}

impl LogPresenter {
    pub fn new(sheet: SpriteSheet, log_every: Duration) -> Self {
        Self {
            sheet,
            log_every,
            next_log: Duration::ZERO,
            last_phase: None,
            commands_issued: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, view: &FrameView<'_>) {
        let cmds = build_draw_list(view, &self.sheet);
        let placeholders = cmds
            .iter()
            .filter(|cmd| {
                matches!(
                    cmd,
                    DrawCommand::Sprite {
                        placeholder: Some(_),
                        ..
                    }
                )
            })
            .count();
        self.commands_issued += cmds.len() as u64;

        let phase = view.state.phase;
        if self.last_phase != Some(phase) {
            self.last_phase = Some(phase);
            self.next_log = Duration::ZERO;
            log::info!("[frame {}] showing {:?}", view.frame, phase);
        }

        if phase == GamePhase::Playing && view.state.run_time() >= self.next_log {
            self.next_log = view.state.run_time() + self.log_every;
            let fps = if view.dt.is_zero() {
                0.0
            } else {
                1.0 / view.dt.as_secs_f32()
            };
            log::info!(
                "[frame {}] {} | {} draw calls ({} placeholder) at {:.0} fps",
                view.frame,
                hud_lines(view.state).join(" | "),
                cmds.len(),
                placeholders,
                fps
            );
        }
    }
}
