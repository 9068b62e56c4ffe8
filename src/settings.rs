//! Presentation settings and preferences
//!
//! Handed to the renderer explicitly each frame; nothing here is global.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Neon background effect behind the menu title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShaderVariant {
    #[default]
    Vortex,
    Metaballs,
    Kaleido,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 3] = [
        ShaderVariant::Vortex,
        ShaderVariant::Metaballs,
        ShaderVariant::Kaleido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShaderVariant::Vortex => "vortex",
            ShaderVariant::Metaballs => "metaballs",
            ShaderVariant::Kaleido => "kaleido",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vortex" => Some(ShaderVariant::Vortex),
            "metaballs" | "meta" => Some(ShaderVariant::Metaballs),
            "kaleido" | "kaleidoscope" => Some(ShaderVariant::Kaleido),
            _ => None,
        }
    }

    /// Fresh pick each time the menu opens
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Menu background effect. `None` picks a random one per menu visit.
    pub shader_variant: Option<ShaderVariant>,

    // === Code rain ===
    /// Falling-code overlay around the board
    pub code_rain: bool,
    /// Glyphs per font-sized square of screen
    pub code_rain_density: f32,

    // === Board ===
    /// Integer scaling only when the window allows it
    pub pixel_perfect: bool,

    // === HUD ===
    /// Show bean counts next to the score
    pub show_bean_counts: bool,

    // === Accessibility ===
    /// Reduced motion (static menu background, no code rain)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shader_variant: None,
            code_rain: true,
            code_rain_density: 0.12,
            pixel_perfect: true,
            show_bean_counts: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Variant to render for this menu visit
    pub fn menu_variant<R: Rng + ?Sized>(&self, rng: &mut R) -> ShaderVariant {
        self.shader_variant
            .unwrap_or_else(|| ShaderVariant::random(rng))
    }

    /// Effective code rain (respects reduced_motion)
    pub fn effective_code_rain(&self) -> bool {
        self.code_rain && !self.reduced_motion && self.code_rain_density > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_variant_names_round_trip() {
        for variant in ShaderVariant::ALL {
            assert_eq!(ShaderVariant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(ShaderVariant::from_str("KALEIDOSCOPE"), Some(ShaderVariant::Kaleido));
        assert_eq!(ShaderVariant::from_str("plasma"), None);
    }

    #[test]
    fn test_fixed_variant_wins_over_random() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = Settings {
            shader_variant: Some(ShaderVariant::Metaballs),
            ..Settings::default()
        };
        for _ in 0..10 {
            assert_eq!(settings.menu_variant(&mut rng), ShaderVariant::Metaballs);
        }
    }

    #[test]
    fn test_random_variant_covers_all() {
        let mut rng = Pcg32::seed_from_u64(2);
        let settings = Settings::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(settings.menu_variant(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_reduced_motion_disables_rain() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_code_rain());
        assert!(Settings::default().effective_code_rain());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "shader_variant": "Kaleido" }"#).expect("valid settings");
        assert_eq!(settings.shader_variant, Some(ShaderVariant::Kaleido));
        assert!(settings.code_rain);
    }
}
