//! VibeSnake 1024 entry point
//!
//! Native builds run a headless autopilot game and print the final board as
//! JSON. The browser build starts from `web::start` in the library.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use vibe_snake::consts::RENDER_FPS;
    use vibe_snake::sim::{GameState, RunStatus};
    use vibe_snake::{Session, Tuning};

    /// Ten minutes of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    fn load_tuning(path: &Path) -> Option<Tuning> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => Some(tuning),
            Err(e) => {
                log::error!("Invalid tuning in {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn run() -> i32 {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(arg) => match arg.parse::<u64>() {
                Ok(seed) => seed,
                Err(_) => {
                    log::error!("Seed must be an unsigned integer, got {:?}", arg);
                    return 2;
                }
            },
            None => 1024,
        };
        let tuning = match args.next() {
            Some(path) => match load_tuning(Path::new(&path)) {
                Some(tuning) => tuning,
                None => return 2,
            },
            None => Tuning::default(),
        };

        let state = match GameState::with_tuning(seed, tuning) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return 2;
            }
        };
        log::info!("Headless run with seed {}", seed);

        let mut session = Session::from_state(state);
        session.set_idle_mode(true);
        let dt = 1.0 / RENDER_FPS;
        let mut frames = 0u64;
        let mut last_logged_step = 0u64;

        while session.state().status() == RunStatus::Running && frames < MAX_FRAMES {
            if let Some(rank) = session.update(dt) {
                log::info!("Run placed #{} on the leaderboard", rank);
            }
            frames += 1;

            let steps = session.state().steps();
            if steps >= last_logged_step + 500 {
                last_logged_step = steps;
                log::info!("step {}: {}", steps, session.hud_line());
            }
        }

        let state = session.state();
        if state.status() == RunStatus::Running {
            log::info!("Stopped after {} frames", frames);
        }
        let leaderboard = session.leaderboard();
        if let Some(best) = leaderboard.top_score() {
            log::info!(
                "Best finished run: {} ({} perfect)",
                best,
                leaderboard.perfect_runs()
            );
        }

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                1
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("VibeSnake 1024 (native) starting...");
    std::process::exit(headless::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start in the library
}
