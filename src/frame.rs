//! Frame orchestration
//!
//! One `step` is one complete, synchronous frame: sample the clock, drain and
//! dispatch input, run the simulation if a run is active, then present.

use std::time::Duration;

use crate::input::{InputEvent, InputSource};
use crate::machine::{Control, handle_event};
use crate::present::{FrameView, Presenter};
use crate::sim::{Clock, GameEvent, GameState, Mark, RandomSource, tick};

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Closed,
}

/// Owns the game state and its collaborators
pub struct FrameDriver<C: Clock, I: InputSource, P: Presenter> {
    state: GameState,
    rng: Box<dyn RandomSource>,
    clock: C,
    input: I,
    presenter: P,
    last_mark: Mark,
    frame: u64,
    /// Events from the most recent frame
    last_events: Vec<GameEvent>,
}

impl<C: Clock, I: InputSource, P: Presenter> FrameDriver<C, I, P> {
    pub fn new(
        state: GameState,
        rng: Box<dyn RandomSource>,
        clock: C,
        input: I,
        presenter: P,
    ) -> Self {
        let last_mark = clock.now();
        Self {
            state,
            rng,
            clock,
            input,
            presenter,
            last_mark,
            frame: 0,
            last_events: Vec::new(),
        }
    }

    /// Run one frame
    pub fn step(&mut self) -> FrameStatus {
        let now = self.clock.now();
        let dt = now.duration_since(self.last_mark);
        self.last_mark = now;

        // A close request wins over everything else queued this frame
        let events = self.input.drain();
        if events.contains(&InputEvent::CloseRequested) {
            log::info!("Close requested after {} frames", self.frame);
            return FrameStatus::Closed;
        }

        for event in &events {
            if handle_event(&mut self.state, event) == Control::Quit {
                return FrameStatus::Closed;
            }
        }

        tick(&mut self.state, self.rng.as_mut(), dt);

        self.frame += 1;
        self.presenter.present(&FrameView {
            state: &self.state,
            frame: self.frame,
            dt,
        });
        self.last_events = self.state.drain_events();

        FrameStatus::Running
    }

    /// Step until the game is closed. Returns the number of frames run.
    pub fn run(&mut self) -> u64 {
        while self.step() == FrameStatus::Running {}
        self.frame
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Simulated time of the current run
    pub fn run_time(&self) -> Duration {
        self.state.run_time()
    }
}
