//! Obstacles and boosts scrolling down the lanes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Mark};
use super::collision::Aabb;
use super::lanes::LaneLayout;
use super::rng::RandomSource;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Bench-height barrier; can be jumped over
    Low,
    /// Full-height barrier; fatal even mid-jump unless immune
    Tall,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Low, ObstacleKind::Tall];

    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            ObstacleKind::Low => LOW_OBSTACLE_SIZE,
            ObstacleKind::Tall => TALL_OBSTACLE_SIZE,
        };
        Vec2::new(w, h)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    ScoreSmall,
    ScoreLarge,
    Speed,
    Multiplier,
    /// Jumping clears every obstacle while active
    Immunity,
    /// Adds a vehicle charge
    Vehicle,
}

impl BoostKind {
    pub const ALL: [BoostKind; 6] = [
        BoostKind::ScoreSmall,
        BoostKind::ScoreLarge,
        BoostKind::Speed,
        BoostKind::Multiplier,
        BoostKind::Immunity,
        BoostKind::Vehicle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoostKind::ScoreSmall => "score_small",
            BoostKind::ScoreLarge => "score_large",
            BoostKind::Speed => "speed",
            BoostKind::Multiplier => "multiplier",
            BoostKind::Immunity => "immunity",
            BoostKind::Vehicle => "vehicle",
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Spawned this frame; skipped by the next advance
    #[serde(skip)]
    pub just_spawned: bool,
}

impl Obstacle {
    /// Obstacle horizontally centred on `center_x` with its top edge at `top`
    pub fn new(kind: ObstacleKind, center_x: f32, top: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(center_x - size.x / 2.0, top),
            size,
            just_spawned: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A boost entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub kind: BoostKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared on pickup; inactive boosts are pruned
    pub active: bool,
    #[serde(skip)]
    pub just_spawned: bool,
}

impl Boost {
    pub fn new(kind: BoostKind, center_x: f32, top: f32) -> Self {
        let size = Vec2::new(BOOST_SIZE.0, BOOST_SIZE.1);
        Self {
            kind,
            pos: Vec2::new(center_x - size.x / 2.0, top),
            size,
            active: true,
            just_spawned: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Owns every live obstacle and boost plus their spawn cadence
#[derive(Debug, Clone)]
pub struct EntityStore {
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Active boosts (spawn order)
    pub boosts: Vec<Boost>,
    last_obstacle_spawn: Mark,
    last_boost_spawn: Mark,
    /// False until the first advance after a reset has been swallowed
    primed: bool,
}

impl EntityStore {
    pub fn new(now: Mark) -> Self {
        Self {
            obstacles: Vec::new(),
            boosts: Vec::new(),
            last_obstacle_spawn: now,
            last_boost_spawn: now,
            primed: false,
        }
    }

    /// Drop every entity and restart both spawn timers from `now`
    pub fn reset(&mut self, now: Mark) {
        *self = Self::new(now);
    }

    /// Spawn an obstacle if the spawn interval has elapsed
    pub fn spawn_obstacle(
        &mut self,
        clock: &impl Clock,
        rng: &mut dyn RandomSource,
        lanes: &LaneLayout,
    ) -> Option<ObstacleKind> {
        if clock.elapsed_since(self.last_obstacle_spawn) < OBSTACLE_SPAWN_INTERVAL {
            return None;
        }

        let kind = ObstacleKind::ALL[rng.pick(ObstacleKind::ALL.len())];
        let lane = rng.pick(LANE_COUNT);
        let mut obstacle = Obstacle::new(kind, lanes.center_x(lane), 0.0);
        // Start just above the visible field so it scrolls in
        obstacle.pos.y = -obstacle.size.y;
        obstacle.just_spawned = true;
        self.obstacles.push(obstacle);
        self.last_obstacle_spawn = clock.now();

        log::debug!("Spawned {:?} obstacle in lane {}", kind, lane);
        Some(kind)
    }

    /// Spawn a boost if the spawn interval has elapsed and there is room
    pub fn spawn_boost(
        &mut self,
        clock: &impl Clock,
        rng: &mut dyn RandomSource,
        lanes: &LaneLayout,
    ) -> Option<BoostKind> {
        if clock.elapsed_since(self.last_boost_spawn) < BOOST_SPAWN_INTERVAL
            || self.alive_boosts() >= MAX_ALIVE_BOOSTS
        {
            return None;
        }

        let kind = BoostKind::ALL[rng.pick(BoostKind::ALL.len())];
        let lane = rng.pick(LANE_COUNT);
        let mut boost = Boost::new(kind, lanes.center_x(lane), 0.0);
        boost.pos.y = -boost.size.y;
        boost.just_spawned = true;
        self.boosts.push(boost);
        self.last_boost_spawn = clock.now();

        log::debug!("Spawned {:?} boost in lane {}", kind, lane);
        Some(kind)
    }

    /// Number of boosts still collectable
    pub fn alive_boosts(&self) -> usize {
        self.boosts.iter().filter(|b| b.active).count()
    }

    /// Move every obstacle down by `speed * dt`
    fn advance_obstacles(&mut self, dt: f32, speed: f32) {
        if !self.primed {
            return;
        }
        let step = speed * dt;
        for obstacle in &mut self.obstacles {
            if obstacle.just_spawned {
                obstacle.just_spawned = false;
                continue;
            }
            obstacle.pos.y += step;
        }
    }

    /// Move every boost down by `speed * dt`
    fn advance_boosts(&mut self, dt: f32, speed: f32) {
        if !self.primed {
            return;
        }
        let step = speed * dt;
        for boost in &mut self.boosts {
            if boost.just_spawned {
                boost.just_spawned = false;
                continue;
            }
            boost.pos.y += step;
        }
    }

    /// Advance obstacles and boosts together
    pub fn advance_all(&mut self, dt: f32, speed: f32) {
        self.advance_obstacles(dt, speed);
        self.advance_boosts(dt, speed);
        self.finish_advance();
    }

    /// Close out a frame's advance. The first call after a reset only arms the
    /// store, so the very first frame never moves anything.
    fn finish_advance(&mut self) {
        if !self.primed {
            self.primed = true;
            for obstacle in &mut self.obstacles {
                obstacle.just_spawned = false;
            }
            for boost in &mut self.boosts {
                boost.just_spawned = false;
            }
        }
    }

    fn prune_obstacles(&mut self, field_height: f32) {
        let limit = field_height + PRUNE_MARGIN;
        self.obstacles.retain(|o| o.pos.y <= limit);
    }

    fn prune_boosts(&mut self, field_height: f32) {
        let limit = field_height + PRUNE_MARGIN;
        self.boosts.retain(|b| b.active && b.pos.y <= limit);
    }

    /// Remove off-field entities and consumed boosts
    pub fn prune(&mut self, field_height: f32) {
        self.prune_obstacles(field_height);
        self.prune_boosts(field_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::ManualClock;
    use crate::sim::rng::ScriptedRandom;
    use std::time::Duration;

    fn setup() -> (EntityStore, ManualClock, LaneLayout) {
        let clock = ManualClock::new();
        (EntityStore::new(clock.now()), clock, LaneLayout::new(800.0))
    }

    #[test]
    fn test_obstacle_spawn_is_gated() {
        let (mut store, mut clock, lanes) = setup();
        let mut rng = ScriptedRandom::zeros();

        clock.advance(Duration::from_millis(799));
        assert!(store.spawn_obstacle(&clock, &mut rng, &lanes).is_none());

        clock.advance(Duration::from_millis(1));
        assert_eq!(
            store.spawn_obstacle(&clock, &mut rng, &lanes),
            Some(ObstacleKind::Low)
        );
        // Timer restarted on success
        assert!(store.spawn_obstacle(&clock, &mut rng, &lanes).is_none());
        assert_eq!(store.obstacles.len(), 1);
    }

    #[test]
    fn test_obstacle_placement() {
        let (mut store, mut clock, lanes) = setup();
        // Tall in lane 2
        let mut rng = ScriptedRandom::new(vec![1, 2]);
        clock.advance(OBSTACLE_SPAWN_INTERVAL);
        store.spawn_obstacle(&clock, &mut rng, &lanes);

        let o = &store.obstacles[0];
        assert_eq!(o.kind, ObstacleKind::Tall);
        assert!((o.pos.x + o.size.x / 2.0 - lanes.centers[2]).abs() < 1e-4);
        assert!((o.pos.y + o.size.y).abs() < 1e-4);
    }

    #[test]
    fn test_boost_spawn_caps_alive_count() {
        let (mut store, mut clock, lanes) = setup();
        let mut rng = ScriptedRandom::new(vec![3, 1]);

        for _ in 0..MAX_ALIVE_BOOSTS {
            clock.advance(BOOST_SPAWN_INTERVAL);
            assert_eq!(
                store.spawn_boost(&clock, &mut rng, &lanes),
                Some(BoostKind::Multiplier)
            );
        }
        clock.advance(BOOST_SPAWN_INTERVAL * 2);
        assert!(store.spawn_boost(&clock, &mut rng, &lanes).is_none());

        // Consuming one frees a slot
        store.boosts[0].active = false;
        assert!(store.spawn_boost(&clock, &mut rng, &lanes).is_some());
    }

    #[test]
    fn test_first_advance_is_swallowed() {
        let (mut store, _, lanes) = setup();
        store
            .obstacles
            .push(Obstacle::new(ObstacleKind::Low, lanes.centers[0], 0.0));

        store.advance_all(0.1, 300.0);
        assert_eq!(store.obstacles[0].pos.y, 0.0);

        store.advance_all(0.1, 300.0);
        assert!((store.obstacles[0].pos.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_fresh_spawn_waits_one_frame() {
        let (mut store, mut clock, lanes) = setup();
        let mut rng = ScriptedRandom::zeros();
        store.advance_all(0.1, 300.0);

        clock.advance(OBSTACLE_SPAWN_INTERVAL);
        store.spawn_obstacle(&clock, &mut rng, &lanes);
        let start = store.obstacles[0].pos.y;

        store.advance_all(0.1, 300.0);
        assert_eq!(store.obstacles[0].pos.y, start);

        store.advance_all(0.1, 300.0);
        assert!((store.obstacles[0].pos.y - start - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_prune() {
        let (mut store, _, lanes) = setup();
        let x = lanes.centers[1];
        store.obstacles.push(Obstacle::new(ObstacleKind::Low, x, 600.0));
        store.obstacles.push(Obstacle::new(ObstacleKind::Tall, x, 651.0));
        store.boosts.push(Boost::new(BoostKind::Speed, x, 100.0));
        let mut consumed = Boost::new(BoostKind::Speed, x, 100.0);
        consumed.active = false;
        store.boosts.push(consumed);
        store.boosts.push(Boost::new(BoostKind::Vehicle, x, 700.0));

        store.prune(600.0);
        assert_eq!(store.obstacles.len(), 1);
        assert_eq!(store.obstacles[0].kind, ObstacleKind::Low);
        assert_eq!(store.boosts.len(), 1);
        assert!(store.boosts[0].active);
    }

    #[test]
    fn test_reset_clears_and_rearms() {
        let (mut store, mut clock, lanes) = setup();
        store.advance_all(0.1, 300.0);
        store
            .obstacles
            .push(Obstacle::new(ObstacleKind::Low, lanes.centers[0], 0.0));
        clock.advance(Duration::from_secs(10));
        store.reset(clock.now());

        assert!(store.obstacles.is_empty());
        let mut rng = ScriptedRandom::zeros();
        assert!(store.spawn_obstacle(&clock, &mut rng, &lanes).is_none());
        assert!(!store.primed);
    }
}
