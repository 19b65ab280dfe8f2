//! Game phase state machine
//!
//! Legal transitions:
//! - Menu -> Playing (Play / Space, full reset)
//! - Menu -> Controls (Controls / C)
//! - Controls -> Menu (Escape / Backspace)
//! - Playing -> GameOver (fatal collision, raised by `sim::tick`)
//! - Playing -> Menu (Escape, with reset)
//! - GameOver -> Playing (R / Enter, full reset)
//! - any -> terminated (close request, or Quit from the menu)
//!
//! Input that means nothing in the current phase is ignored.

use glam::Vec2;

use crate::input::{InputEvent, Key};
use crate::sim::{Aabb, Field, GameEvent, GamePhase, GameState, LaneDirection, MenuItem};

/// Whether the game keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Menu button size and spacing
pub const MENU_BUTTON_SIZE: (f32, f32) = (220.0, 50.0);
pub const MENU_BUTTON_SPACING: f32 = 70.0;
/// Top of the first menu button, as a fraction of field height
pub const MENU_TOP_RATIO: f32 = 0.4;

/// Screen rectangle of a menu button
pub fn menu_button(item: MenuItem, field: &Field) -> Aabb {
    let (w, h) = MENU_BUTTON_SIZE;
    let x = (field.width - w) / 2.0;
    let y = field.height * MENU_TOP_RATIO + item.index() as f32 * MENU_BUTTON_SPACING;
    Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
}

/// Dispatch one input event to the handler of the current phase
pub fn handle_event(state: &mut GameState, event: &InputEvent) -> Control {
    if let InputEvent::CloseRequested = event {
        log::info!("Close requested");
        return Control::Quit;
    }

    let control = match state.phase {
        GamePhase::Menu => menu(state, event),
        GamePhase::Controls => controls(state, event),
        GamePhase::Playing => playing(state, event),
        GamePhase::GameOver => game_over(state, event),
    };
    control.unwrap_or_else(|| {
        log::trace!("Ignored {:?} in {:?}", event, state.phase);
        Control::Continue
    })
}

/// Handlers return `None` when the event has no meaning in their phase
fn menu(state: &mut GameState, event: &InputEvent) -> Option<Control> {
    match *event {
        InputEvent::KeyDown(Key::Up | Key::W) => {
            state.menu_cursor = state.menu_cursor.prev();
            Some(Control::Continue)
        }
        InputEvent::KeyDown(Key::Down | Key::S) => {
            state.menu_cursor = state.menu_cursor.next();
            Some(Control::Continue)
        }
        InputEvent::KeyDown(Key::Enter) => {
            let item = state.menu_cursor;
            Some(select(state, item))
        }
        InputEvent::KeyDown(Key::Space) => Some(select(state, MenuItem::Play)),
        InputEvent::KeyDown(Key::C) => Some(select(state, MenuItem::Controls)),
        InputEvent::PointerPressed(pos) => {
            let item = MenuItem::ALL
                .into_iter()
                .find(|item| menu_button(*item, &state.field).contains(pos))?;
            state.menu_cursor = item;
            Some(select(state, item))
        }
        _ => None,
    }
}

fn select(state: &mut GameState, item: MenuItem) -> Control {
    match item {
        MenuItem::Play => {
            state.start_run();
            Control::Continue
        }
        MenuItem::Controls => {
            state.set_phase(GamePhase::Controls);
            Control::Continue
        }
        MenuItem::Quit => {
            log::info!("Quit selected");
            Control::Quit
        }
    }
}

fn controls(state: &mut GameState, event: &InputEvent) -> Option<Control> {
    match event {
        InputEvent::KeyDown(Key::Escape | Key::Backspace) => {
            state.set_phase(GamePhase::Menu);
            Some(Control::Continue)
        }
        _ => None,
    }
}

fn playing(state: &mut GameState, event: &InputEvent) -> Option<Control> {
    let InputEvent::KeyDown(key) = event else {
        return None;
    };
    match key {
        Key::Left | Key::A => state.player.move_lane(LaneDirection::Left),
        Key::Right | Key::D => state.player.move_lane(LaneDirection::Right),
        Key::Up | Key::W | Key::Space => {
            state.player.jump();
        }
        Key::V | Key::Shift => {
            if state.effects.activate_vehicle() {
                log::debug!(
                    "Vehicle started, {} charge(s) left",
                    state.effects.vehicle.charges
                );
                state.events.push(GameEvent::VehicleStarted);
            }
        }
        Key::Escape => {
            state.reset();
            state.set_phase(GamePhase::Menu);
        }
        _ => return None,
    }
    Some(Control::Continue)
}

fn game_over(state: &mut GameState, event: &InputEvent) -> Option<Control> {
    match event {
        InputEvent::KeyDown(Key::R | Key::Enter) => {
            state.start_run();
            Some(Control::Continue)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BoostKind, Motion, Obstacle, ObstacleKind};

    fn key(state: &mut GameState, key: Key) -> Control {
        handle_event(state, &InputEvent::KeyDown(key))
    }

    #[test]
    fn test_menu_to_playing_resets() {
        let mut state = GameState::default();
        state.score = 99;
        assert_eq!(key(&mut state, Key::Enter), Control::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_menu_navigation_and_controls() {
        let mut state = GameState::default();
        key(&mut state, Key::Down);
        assert_eq!(state.menu_cursor, MenuItem::Controls);
        key(&mut state, Key::Enter);
        assert_eq!(state.phase, GamePhase::Controls);

        // Gameplay keys mean nothing here
        key(&mut state, Key::Space);
        key(&mut state, Key::R);
        assert_eq!(state.phase, GamePhase::Controls);

        key(&mut state, Key::Escape);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_cursor_letter_keys() {
        let mut state = GameState::default();
        key(&mut state, Key::S);
        key(&mut state, Key::S);
        assert_eq!(state.menu_cursor, MenuItem::Quit);
        key(&mut state, Key::W);
        assert_eq!(state.menu_cursor, MenuItem::Controls);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_designated_keys() {
        let mut state = GameState::default();
        key(&mut state, Key::C);
        assert_eq!(state.phase, GamePhase::Controls);
        key(&mut state, Key::Backspace);
        key(&mut state, Key::Space);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_quit() {
        let mut state = GameState::default();
        key(&mut state, Key::Down);
        key(&mut state, Key::Down);
        key(&mut state, Key::Down);
        assert_eq!(state.menu_cursor, MenuItem::Quit);
        assert_eq!(key(&mut state, Key::Enter), Control::Quit);
    }

    #[test]
    fn test_pointer_selects_button() {
        let mut state = GameState::default();
        let button = menu_button(MenuItem::Controls, &state.field);
        handle_event(&mut state, &InputEvent::PointerPressed(button.center()));
        assert_eq!(state.phase, GamePhase::Controls);
        assert_eq!(state.menu_cursor, MenuItem::Controls);

        let mut state = GameState::default();
        handle_event(&mut state, &InputEvent::PointerPressed(Vec2::new(1.0, 1.0)));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_playing_controls() {
        let mut state = GameState::default();
        key(&mut state, Key::Enter);

        key(&mut state, Key::A);
        assert_eq!(state.player.lane, 0);
        key(&mut state, Key::Left);
        assert_eq!(state.player.lane, 0);
        key(&mut state, Key::D);
        key(&mut state, Key::Right);
        assert_eq!(state.player.lane, 2);

        key(&mut state, Key::Space);
        assert_eq!(state.player.motion, Motion::Rising);

        key(&mut state, Key::V);
        assert!(state.effects.is_riding());
        assert!(state.events.contains(&GameEvent::VehicleStarted));
        assert_eq!(state.effects.vehicle.charges, 0);
    }

    #[test]
    fn test_vehicle_key_without_charges_is_noop() {
        let mut state = GameState::default();
        key(&mut state, Key::Enter);
        state.effects.vehicle.charges = 0;
        state.drain_events();
        key(&mut state, Key::Shift);
        assert!(!state.effects.is_riding());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_playing_cancel_returns_to_menu_with_reset() {
        let mut state = GameState::default();
        key(&mut state, Key::Enter);
        state.score = 77;
        state.effects.apply(BoostKind::Speed);
        key(&mut state, Key::Escape);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert!(state.effects.timed.is_empty());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = GameState::default();
        key(&mut state, Key::Enter);
        state.score = 120;
        state.effects.vehicle.charges = 3;
        state.effects.apply(BoostKind::Multiplier);
        let x = state.lanes.centers[1];
        state.entities.obstacles.push(Obstacle::new(ObstacleKind::Tall, x, 0.0));
        state.set_phase(GamePhase::GameOver);

        // Not a legal transition out of GameOver
        key(&mut state, Key::Escape);
        assert_eq!(state.phase, GamePhase::GameOver);

        key(&mut state, Key::R);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.entities.obstacles.is_empty());
        assert_eq!(state.effects.vehicle.charges, 1);
        assert!(state.effects.timed.is_empty());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::default();
        key(&mut state, Key::Enter);
        state.score = 40;
        key(&mut state, Key::R);
        assert_eq!(state.score, 40);
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_close_from_any_phase() {
        for phase in [
            GamePhase::Menu,
            GamePhase::Controls,
            GamePhase::Playing,
            GamePhase::GameOver,
        ] {
            let mut state = GameState::default();
            state.phase = phase;
            assert_eq!(
                handle_event(&mut state, &InputEvent::CloseRequested),
                Control::Quit
            );
        }
    }
}
