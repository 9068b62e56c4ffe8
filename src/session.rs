//! Platform-neutral game session
//!
//! Owns one simulation, the session leaderboard, presentation settings and
//! the code-rain overlay. Front ends (the browser bridge, the headless
//! runner) feed it keys and frame times and read back JSON-friendly views.

use glam::{UVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{BOARD_BOTTOM_MARGIN, CELL_PIXELS, HUD_RESERVED_HEIGHT};
use crate::highscores::HighScores;
use crate::overlay::{Bounds, CodeRain, CodeRainConfig};
use crate::settings::{Settings, ShaderVariant};
use crate::sim::{BeanKind, Direction, FrameInput, GameEvent, GameState, InputEvent, frame};

/// Map a `KeyboardEvent.code` (or `.key`) to a game input
pub fn key_to_input(code: &str) -> Option<InputEvent> {
    match code {
        "ArrowUp" | "KeyW" | "w" | "W" => Some(InputEvent::Direction(Direction::Up)),
        "ArrowDown" | "KeyS" | "s" | "S" => Some(InputEvent::Direction(Direction::Down)),
        "ArrowLeft" | "KeyA" | "a" | "A" => Some(InputEvent::Direction(Direction::Left)),
        "ArrowRight" | "KeyD" | "d" | "D" => Some(InputEvent::Direction(Direction::Right)),
        "KeyR" | "r" | "R" => Some(InputEvent::Restart),
        "Escape" => Some(InputEvent::Exit),
        _ => None,
    }
}

/// Where the board sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoardPlacement {
    pub rect: Bounds,
    /// Screen pixels per unscaled board pixel
    pub scale: f32,
    /// Whole-number scaling was used
    pub integer_scale: bool,
}

/// Center the board below the HUD band, as large as the screen allows.
///
/// With `pixel_perfect`, scales of 1 or more are floored to whole numbers.
pub fn place_board(screen: UVec2, grid_size: i32, pixel_perfect: bool) -> BoardPlacement {
    let board_px = (CELL_PIXELS * grid_size.max(1) as u32) as f32;
    let available_h = screen
        .y
        .saturating_sub(HUD_RESERVED_HEIGHT + BOARD_BOTTOM_MARGIN)
        .max(1) as f32;

    let mut scale = (screen.x as f32 / board_px).min(available_h / board_px);
    if scale <= 0.0 {
        scale = 1.0;
    }
    let integer_scale = pixel_perfect && scale >= 1.0;
    let (size, scale) = if integer_scale {
        let whole = scale.floor().max(1.0);
        (board_px * whole, whole)
    } else {
        let size = (board_px * scale).floor().max(1.0);
        (size, size / board_px)
    };

    let left = (screen.x / 2) as f32 - (size / 2.0).floor();
    let top = HUD_RESERVED_HEIGHT as f32 + ((available_h - size).max(0.0) / 2.0).floor();
    BoardPlacement {
        rect: Bounds::new(Vec2::new(left, top), Vec2::new(left + size, top + size)),
        scale,
        integer_scale,
    }
}

/// A code-rain glyph ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayGlyph<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
    pub alpha: u8,
}

fn new_rain(seed: u64, settings: &Settings) -> CodeRain {
    CodeRain::new(
        seed ^ 0x9e37_79b9,
        CodeRainConfig {
            density: settings.code_rain_density,
            ..CodeRainConfig::default()
        },
    )
}

/// One player's session: current run, finished runs, presentation state
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: FrameInput,
    leaderboard: HighScores,
    settings: Settings,
    rain: CodeRain,
    menu_rng: Pcg32,
    screen: UVec2,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    /// Wrap an already built game (custom tuning or layout)
    pub fn from_state(state: GameState) -> Self {
        let seed = state.seed;
        let settings = Settings::default();
        Self {
            rain: new_rain(seed, &settings),
            menu_rng: Pcg32::seed_from_u64(seed.rotate_left(17)),
            state,
            input: FrameInput::default(),
            leaderboard: HighScores::new(),
            settings,
            screen: UVec2::ZERO,
        }
    }

    /// Queue a key press for the next update. Returns false for unmapped keys.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match key_to_input(code) {
            Some(event) => {
                self.input.events.push(event);
                true
            }
            None => false,
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Advance by `dt` seconds. Returns the leaderboard rank of a run that
    /// finished during this update.
    pub fn update(&mut self, dt: f32) -> Option<usize> {
        frame(&mut self.state, &self.input, dt);
        self.input.events.clear();

        let mut rank = None;
        for event in self.state.drain_events() {
            if matches!(event, GameEvent::Died(_) | GameEvent::Won) {
                if let Some(run) = self.state.run_summary() {
                    rank = self.leaderboard.add_run(run);
                }
            }
        }
        rank
    }

    /// Start a fresh run, dropping any keys not yet applied
    pub fn reset(&mut self) {
        self.input.events.clear();
        self.state.reset();
    }

    pub fn resize(&mut self, screen: UVec2) {
        self.screen = screen;
    }

    /// Move the code rain by `dt_ms` milliseconds
    pub fn advance_overlay(&mut self, dt_ms: f32) {
        if !self.settings.effective_code_rain() {
            return;
        }
        self.rain.set_score(self.state.score());
        self.rain.advance(dt_ms, self.screen, HUD_RESERVED_HEIGHT);
    }

    pub fn board(&self) -> BoardPlacement {
        place_board(
            self.screen,
            self.state.tuning().grid_size,
            self.settings.pixel_perfect,
        )
    }

    /// Glyphs to draw this frame; those over the board are left out
    pub fn visible_glyphs(&self) -> Vec<OverlayGlyph<'_>> {
        if !self.settings.effective_code_rain() {
            return Vec::new();
        }
        let board = self.board().rect;
        self.rain
            .visible(Some(board))
            .map(|g| OverlayGlyph {
                text: &g.text,
                x: g.pos.x,
                y: g.pos.y,
                color: g.group.color(),
                alpha: g.alpha,
            })
            .collect()
    }

    /// Status line shown above the board
    pub fn hud_line(&self) -> String {
        let state = &self.state;
        let mut line = format!(
            "Score: {}   High: {}   Phase: {}",
            state.score(),
            state.high_score(),
            state.phase().as_str()
        );
        if self.settings.show_bean_counts {
            let beans = state.beans();
            line.push_str(&format!(
                "   Beans G/O/R: {}/{}/{}",
                beans.count(BeanKind::Green),
                beans.count(BeanKind::Orange),
                beans.count(BeanKind::Red)
            ));
        }
        line
    }

    /// Swap presentation settings. A density change rebuilds the rain.
    pub fn apply_settings(&mut self, settings: Settings) {
        if settings.code_rain_density != self.settings.code_rain_density {
            self.rain = new_rain(self.state.seed, &settings);
        }
        self.settings = settings;
    }

    /// Menu background for this visit
    pub fn menu_shader(&mut self) -> ShaderVariant {
        self.settings.menu_variant(&mut self.menu_rng)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
