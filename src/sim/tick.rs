//! Per-frame simulation step
//!
//! Runs the Playing pipeline in a fixed order: cosmetic timers, background
//! scroll, player motion, score, spawning, entity movement, effect timers and
//! finally collision resolution.

use std::time::Duration;

use super::collision::{CollisionOutcome, resolve};
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame of `dt`.
///
/// Does nothing outside the Playing phase; a finished run stays frozen until
/// the state machine resets it.
pub fn tick(state: &mut GameState, rng: &mut dyn RandomSource, dt: Duration) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Bound the step after stalls
    let dt = if dt > MAX_FRAME_DT {
        log::warn!(
            "Frame took {:.1}ms - clamping step to {}ms",
            dt.as_secs_f64() * 1000.0,
            MAX_FRAME_DT.as_millis()
        );
        MAX_FRAME_DT
    } else {
        dt
    };
    let secs = dt.as_secs_f32();
    state.clock.advance(dt);

    // Run-cycle animation
    state.anim_timer += dt;
    while state.anim_timer >= ANIMATION_FRAME_TIME {
        state.anim_timer -= ANIMATION_FRAME_TIME;
        state.anim_frame = (state.anim_frame + 1) % ANIMATION_FRAMES;
    }

    let speed = BASE_SPEED * state.effects.speed_factor();

    state.background_offset = (state.background_offset + speed * secs) % BACKGROUND_PERIOD;

    state.player.integrate(secs);

    // Score pays out once per whole elapsed second
    state.score_timer += dt;
    while state.score_timer >= SCORE_INTERVAL {
        state.score_timer -= SCORE_INTERVAL;
        state.score += SCORE_PER_SECOND * state.effects.score_multiplier();
    }

    // Spawn -> advance -> prune
    if let Some(kind) = state.entities.spawn_obstacle(&state.clock, rng, &state.lanes) {
        state.events.push(GameEvent::ObstacleSpawned(kind));
    }
    if let Some(kind) = state.entities.spawn_boost(&state.clock, rng, &state.lanes) {
        state.events.push(GameEvent::BoostSpawned(kind));
    }
    state.entities.advance_all(secs, speed);
    state.entities.prune(state.field.height);

    let expired = state.effects.tick(dt);
    for event in &expired {
        log::debug!("{:?}", event);
    }
    state.events.extend(expired);

    // Collisions
    let player_box = state.player.bounding_box(&state.lanes);
    let result = resolve(
        &player_box,
        state.player.motion,
        &mut state.entities.boosts,
        &state.entities.obstacles,
        &mut state.effects,
    );

    state.score += result.bonus;
    for kind in result.picked {
        log::debug!("Collected {:?} boost", kind);
        state.events.push(GameEvent::BoostCollected(kind));
    }

    match result.outcome {
        CollisionOutcome::Clear => {}
        CollisionOutcome::VehicleCrash(kind) => {
            log::debug!("Vehicle wrecked on {:?} obstacle", kind);
            state.events.push(GameEvent::VehicleCrashed(kind));
        }
        CollisionOutcome::Fatal(kind) => {
            log::info!(
                "Run {} over: hit {:?} obstacle, score {} after {:.1}s",
                state.runs,
                kind,
                state.score,
                state.run_time().as_secs_f32()
            );
            state.events.push(GameEvent::Crashed(kind));
            state.set_phase(GamePhase::GameOver);
        }
    }
}
