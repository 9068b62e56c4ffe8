//! Browser bridge
//!
//! Thin `wasm-bindgen` wrapper over [`Session`]: key codes in, JSON views
//! out. Drawing happens on the JS side.

use glam::UVec2;
use wasm_bindgen::prelude::*;

use crate::session::Session;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("VibeSnake 1024 loaded");
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; a seed of 0 uses the current time
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let seed = if seed > 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(seed),
        }
    }

    /// Queue a key press for the next update. Returns false for unmapped keys.
    pub fn handle_key(&mut self, code: &str) -> bool {
        self.session.handle_key(code)
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.session.set_idle_mode(idle);
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.session.update(dt);
    }

    /// Fresh run, e.g. when the game screen is entered from the menu
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Canvas size in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.session.resize(UVec2::new(width, height));
    }

    /// Move the code rain by `dt_ms` milliseconds
    pub fn advance_overlay(&mut self, dt_ms: f32) {
        self.session.advance_overlay(dt_ms);
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.state().snapshot()).unwrap_or_default()
    }

    /// Board rectangle and scale for the current canvas
    pub fn board_json(&self) -> String {
        serde_json::to_string(&self.session.board()).unwrap_or_default()
    }

    /// Code-rain glyphs outside the board, with their colors
    pub fn overlay_json(&self) -> String {
        serde_json::to_string(&self.session.visible_glyphs()).unwrap_or_default()
    }

    pub fn hud_line(&self) -> String {
        self.session.hud_line()
    }

    pub fn leaderboard_json(&self) -> String {
        serde_json::to_string(self.session.leaderboard()).unwrap_or_default()
    }

    /// Replace presentation settings from JSON; invalid input keeps the old ones
    pub fn apply_settings_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                self.session.apply_settings(settings);
                true
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                false
            }
        }
    }

    /// Menu background for this visit
    pub fn menu_shader(&mut self) -> String {
        self.session.menu_shader().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.session.state().score()
    }

    pub fn high_score(&self) -> u32 {
        self.session.state().high_score()
    }

    pub fn wants_exit(&self) -> bool {
        self.session.state().wants_exit()
    }
}
