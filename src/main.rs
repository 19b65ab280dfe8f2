//! Lane Runner entry point
//!
//! Headless host: wires the simulation to a log-based presenter, feeds input
//! from the demo autopilot and runs the frame loop.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use lane_runner::autopilot::Autopilot;
use lane_runner::input::{InputEvent, QueuedInput};
use lane_runner::present::{AssetResolver, DirAssets, LogPresenter, NoAssets, SpriteSheet};
use lane_runner::sim::{Clock, FixedStepClock, GameState, SystemClock, seeded};
use lane_runner::{FrameDriver, FrameStatus, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lane Runner starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {}", seed);

    if settings.target_fps == 0 {
        // Unpaced: simulate at a steady 60 Hz as fast as possible
        run(&settings, seed, FixedStepClock::per_second(60), None);
    } else {
        let frame_time = Duration::from_secs(1) / settings.target_fps;
        run(&settings, seed, SystemClock::new(), Some(frame_time));
    }
}

fn run<C: Clock>(settings: &Settings, seed: u64, clock: C, pace: Option<Duration>) {
    let resolver: Box<dyn AssetResolver> = match &settings.assets_dir {
        Some(dir) => Box::new(DirAssets::new(dir)),
        None => Box::new(NoAssets),
    };
    let sheet = SpriteSheet::load(resolver.as_ref());
    let log_every = Duration::from_secs_f32(settings.log_every_secs.max(0.1).min(3600.0));
    let presenter = LogPresenter::new(sheet, log_every);

    let mut driver = FrameDriver::new(
        GameState::new(settings.field()),
        Box::new(seeded(seed)),
        clock,
        QueuedInput::new(),
        presenter,
    );
    let mut pilot = settings.autopilot.then(Autopilot::new);
    if pilot.is_none() {
        log::warn!("Autopilot disabled and no input device attached, idling on the menu");
    }

    loop {
        let started = Instant::now();

        if let Some(pilot) = pilot.as_mut() {
            let events = pilot.plan(driver.state());
            driver.input_mut().extend(events);
        }
        if settings.max_frames.is_some_and(|max| driver.frame() >= max) {
            driver.input_mut().push(InputEvent::CloseRequested);
        }

        if driver.step() == FrameStatus::Closed {
            break;
        }

        if let Some(frame_time) = pace {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let state = driver.state();
    log::info!(
        "Lane Runner stopped after {} frames: {} run(s), last score {}, {} draw calls",
        driver.frame(),
        state.runs,
        state.score,
        driver.presenter().commands_issued
    );
}
