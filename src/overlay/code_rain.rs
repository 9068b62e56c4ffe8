//! Falling-code overlay state
//!
//! Glyph positions, speeds and token choice for the decoration drawn around
//! the board. The renderer reads [`CodeRain::glyphs`]; this module never
//! draws anything itself.

use glam::{UVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::weighted::WeightedTable;

const SUCCESS_TOKENS: &[&str] = &[
    "BUILD SUCCESS",
    "ALL TESTS PASS",
    "DEPLOY OK",
    "PIPELINE GREEN",
    "SHIP IT!",
    "1024 UNLOCKED",
    "LEVEL CLEARED",
    "SCORE++",
    "COMMIT APPROVED",
    "GG WP",
];

const ERROR_TOKENS: &[&str] = &[
    "ERROR 404",
    "ERROR 500",
    "SEGFAULT",
    "ROLLBACK",
    "TIMEOUT",
    "PANIC!",
    "BUILD FAILED",
    "MERGE CONFLICT",
];

const CODE_TOKENS: &[&str] = &[
    "git status",
    "git push origin main",
    "git checkout -b feature/1024",
    "cargo run --release",
    "cargo test",
    "cargo clippy -- -D warnings",
    "rustup update",
    "docker run --rm -it",
    "kubectl get pods",
    "npm run build",
    "curl -s https://example.com",
    "ssh user@server",
    "make && make install",
    "chmod +x deploy.sh",
    "ls -al",
    "cat README.md",
    "tail -f /var/log/app.log",
    "top -o cpu",
    "tmux attach",
    "ps aux",
    "rsync -av",
    "go test ./...",
    "terraform plan",
    "helm install",
    "kill -9",
    "whoami",
    "echo 1024",
    "exit",
];

/// Which pool a token came from; the renderer colors by group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenGroup {
    Neutral,
    Error,
    Success,
}

impl TokenGroup {
    /// RGB color for the group
    pub fn color(self) -> [u8; 3] {
        match self {
            TokenGroup::Neutral => [230, 230, 230],
            TokenGroup::Error => [255, 80, 80],
            TokenGroup::Success => [0, 255, 128],
        }
    }
}

/// Success tokens get more frequent as the snake grows
pub fn success_weight(score: u32) -> f64 {
    match score {
        90.. => 10.0,
        50..90 => 6.0,
        20..50 => 3.0,
        _ => 1.0,
    }
}

/// Overlay look and motion parameters
#[derive(Debug, Clone)]
pub struct CodeRainConfig {
    pub font_size: f32,
    /// Glyphs per font-sized square of screen
    pub density: f32,
    /// Vertical speed range (px/s)
    pub fall_speed: (f32, f32),
    /// Maximum sideways drift (px/s), either way
    pub drift_speed: f32,
    pub alpha_range: (u8, u8),
    /// Longer tokens are cut to this many characters
    pub max_token_len: Option<usize>,
}

impl Default for CodeRainConfig {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            density: 0.12,
            fall_speed: (30.0, 120.0),
            drift_speed: 40.0,
            alpha_range: (140, 220),
            max_token_len: Some(24),
        }
    }
}

impl CodeRainConfig {
    /// Ordered ranges, finite speeds and a usable font size
    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            self.font_size = defaults.font_size;
        }
        if !(self.density.is_finite() && self.density >= 0.0) {
            self.density = 0.0;
        }
        let (a, b) = self.fall_speed;
        self.fall_speed = if a.is_finite() && b.is_finite() {
            (a.min(b), a.max(b))
        } else {
            defaults.fall_speed
        };
        self.drift_speed = if self.drift_speed.is_finite() {
            self.drift_speed.abs()
        } else {
            0.0
        };
        let (lo, hi) = self.alpha_range;
        self.alpha_range = (lo.min(hi), lo.max(hi));
        self
    }
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        (self.max - self.min).max(Vec2::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        let size = self.size();
        size.x <= 0.0 || size.y <= 0.0
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// One falling token
#[derive(Debug, Clone, Serialize)]
pub struct Glyph {
    pub text: String,
    pub group: TokenGroup,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: u8,
}

#[derive(Debug, Clone)]
struct TokenPool {
    neutral: Vec<String>,
    error: Vec<String>,
    success: Vec<String>,
    success_weight: f64,
}

impl TokenPool {
    fn new(max_len: Option<usize>) -> Self {
        let trim = |tokens: &[&str]| -> Vec<String> {
            tokens
                .iter()
                .map(|t| match max_len {
                    Some(n) => t.chars().take(n).collect(),
                    None => t.to_string(),
                })
                .collect()
        };
        Self {
            neutral: trim(CODE_TOKENS),
            error: trim(ERROR_TOKENS),
            success: trim(SUCCESS_TOKENS),
            success_weight: success_weight(0),
        }
    }

    fn tokens(&self, group: TokenGroup) -> &[String] {
        match group {
            TokenGroup::Neutral => &self.neutral,
            TokenGroup::Error => &self.error,
            TokenGroup::Success => &self.success,
        }
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> (TokenGroup, String) {
        let mut table = WeightedTable::new();
        for (weight, group) in [
            (1.0, TokenGroup::Neutral),
            (1.0, TokenGroup::Error),
            (self.success_weight, TokenGroup::Success),
        ] {
            if !self.tokens(group).is_empty() {
                table.push(weight, group);
            }
        }
        let Some(&group) = table.pick(rng) else {
            return (TokenGroup::Neutral, String::new());
        };
        let tokens = self.tokens(group);
        let text = tokens[rng.random_range(0..tokens.len())].clone();
        (group, text)
    }
}

/// Code-rain overlay state
#[derive(Debug, Clone)]
pub struct CodeRain {
    config: CodeRainConfig,
    rng: Pcg32,
    pool: TokenPool,
    score: u32,
    glyphs: Vec<Glyph>,
    layout_key: Option<(UVec2, u32)>,
    bounds: Bounds,
}

impl CodeRain {
    pub fn new(seed: u64, config: CodeRainConfig) -> Self {
        let config = config.normalized();
        Self {
            pool: TokenPool::new(config.max_token_len),
            config,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            glyphs: Vec::new(),
            layout_key: None,
            bounds: Bounds::default(),
        }
    }

    /// Publish the current score so token weighting can follow it
    pub fn set_score(&mut self, score: u32) {
        if score == self.score {
            return;
        }
        self.score = score;
        self.pool.success_weight = success_weight(score);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Area glyphs currently fall through
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Rebuild the glyph field when the screen size or HUD band changes
    fn ensure_layout(&mut self, screen: UVec2, hud_height: u32) {
        let key = (screen, hud_height);
        if self.layout_key == Some(key) {
            return;
        }
        self.layout_key = Some(key);
        self.glyphs.clear();

        let top = hud_height.min(screen.y) as f32;
        self.bounds = Bounds::new(Vec2::new(0.0, top), screen.as_vec2());
        if self.bounds.is_empty() {
            return;
        }

        let size = self.bounds.size();
        let fs = self.config.font_size.max(1.0);
        let target = (size.x * size.y / (fs * fs) * self.config.density).max(12.0) as usize;
        log::debug!("Code rain layout {}x{}: {} glyphs", screen.x, screen.y, target);

        let Self {
            config,
            rng,
            pool,
            glyphs,
            bounds,
            ..
        } = self;
        for _ in 0..target {
            let pos = Vec2::new(
                rng.random_range(bounds.min.x..=bounds.max.x),
                rng.random_range(bounds.min.y..=bounds.max.y),
            );
            let vel = Vec2::new(
                rng.random_range(-config.drift_speed..=config.drift_speed),
                rng.random_range(config.fall_speed.0..=config.fall_speed.1),
            );
            let alpha = rng.random_range(config.alpha_range.0..=config.alpha_range.1);
            let (group, text) = pool.pick(rng);
            glyphs.push(Glyph {
                text,
                group,
                pos,
                vel,
                alpha,
            });
        }
    }

    /// Move every glyph by one frame of `dt_ms` milliseconds (at least 1 ms)
    pub fn advance(&mut self, dt_ms: f32, screen: UVec2, hud_height: u32) {
        self.ensure_layout(screen, hud_height);
        if self.bounds.is_empty() {
            return;
        }

        let dt = dt_ms.max(1.0) / 1000.0;
        let Self {
            config,
            rng,
            pool,
            glyphs,
            bounds,
            ..
        } = self;
        for glyph in glyphs.iter_mut() {
            glyph.pos += glyph.vel * dt;
            if glyph.pos.y > bounds.max.y {
                glyph.pos.y = bounds.min.y - config.font_size * rng.random_range(0.2..=1.5);
                let (group, text) = pool.pick(rng);
                glyph.group = group;
                glyph.text = text;
                glyph.alpha = rng.random_range(config.alpha_range.0..=config.alpha_range.1);
            }
            if glyph.pos.x < bounds.min.x - 20.0 {
                glyph.pos.x = bounds.max.x + 10.0;
            } else if glyph.pos.x > bounds.max.x + 20.0 {
                glyph.pos.x = bounds.min.x - 10.0;
            }
        }
    }

    /// Approximate screen box of a glyph (monospace, 0.6 em per char)
    pub fn glyph_bounds(&self, glyph: &Glyph) -> Bounds {
        let fs = self.config.font_size;
        let width = glyph.text.chars().count() as f32 * fs * 0.6;
        Bounds::new(glyph.pos, glyph.pos + Vec2::new(width, fs))
    }

    /// Glyphs that do not overlap the board
    pub fn visible<'a>(&'a self, board: Option<Bounds>) -> impl Iterator<Item = &'a Glyph> + 'a {
        self.glyphs.iter().filter(move |g| match board {
            Some(board) => !self.glyph_bounds(g).overlaps(&board),
            None => true,
        })
    }
}
