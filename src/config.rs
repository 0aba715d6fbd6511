//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tuneable values in
//! [`crate::constants`].  `main` calls [`load_game_config`] before the app is
//! built, because the scene paths it carries are needed to load the scene
//! library.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.can_mass`, `config.ball_spawn()`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use std::path::Path;

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Assets ────────────────────────────────────────────────────────────────
    pub asset_dir: String,
    pub menu_scene: String,
    pub level_scene: String,
    pub can_scene: String,
    pub ball_scene: String,

    // ── Presentation ──────────────────────────────────────────────────────────
    pub fade_duration: f32,
    pub window_width: u32,
    pub window_height: u32,

    // ── Timing ────────────────────────────────────────────────────────────────
    pub ball_dispense_delay: f32,

    // ── World ─────────────────────────────────────────────────────────────────
    pub world_gravity: [f32; 3],
    pub contact_mask: u32,

    // ── Cans ──────────────────────────────────────────────────────────────────
    pub can_mass: f32,
    pub can_radius: f32,
    pub can_height: f32,

    // ── Ball ──────────────────────────────────────────────────────────────────
    pub ball_mass: f32,
    pub ball_friction: f32,
    pub ball_radius: f32,
    pub ball_spawn: [f32; 3],
    pub ball_impulse: [f32; 3],

    // ── Randomness ────────────────────────────────────────────────────────────
    /// Fixed seed for the can label coin flips; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Assets
            asset_dir: ASSET_DIR.to_string(),
            menu_scene: MENU_SCENE_PATH.to_string(),
            level_scene: LEVEL_SCENE_PATH.to_string(),
            can_scene: CAN_SCENE_PATH.to_string(),
            ball_scene: BALL_SCENE_PATH.to_string(),
            // Presentation
            fade_duration: FADE_DURATION,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            // Timing
            ball_dispense_delay: BALL_DISPENSE_DELAY,
            // World
            world_gravity: WORLD_GRAVITY,
            contact_mask: CONTACT_MASK,
            // Cans
            can_mass: CAN_MASS,
            can_radius: CAN_RADIUS,
            can_height: CAN_HEIGHT,
            // Ball
            ball_mass: BALL_MASS,
            ball_friction: BALL_FRICTION,
            ball_radius: BALL_RADIUS,
            ball_spawn: BALL_SPAWN,
            ball_impulse: BALL_IMPULSE,
            // Randomness
            rng_seed: None,
        }
    }
}

impl GameConfig {
    #[inline]
    pub fn world_gravity(&self) -> Vec3 {
        Vec3::from_array(self.world_gravity)
    }

    #[inline]
    pub fn ball_spawn(&self) -> Vec3 {
        Vec3::from_array(self.ball_spawn)
    }

    #[inline]
    pub fn ball_impulse(&self) -> Vec3 {
        Vec3::from_array(self.ball_impulse)
    }
}

/// Read `path` and return a [`GameConfig`] with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored.
pub fn load_game_config(path: impl AsRef<Path>) -> GameConfig {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                println!("✓ Loaded game config from {}", path.display());
                loaded
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {}: {e}; using defaults", path.display());
                GameConfig::default()
            }
        },
        Err(_) => {
            // File not present — defaults are fine; not an error.
            println!("ℹ No {} found; using compiled defaults", path.display());
            GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            ball_mass = 5.0
            rng_seed = 7
            "#,
        )
        .expect("partial config must parse");

        assert_eq!(config.ball_mass, 5.0);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.can_mass, CAN_MASS);
        assert_eq!(config.ball_spawn(), Vec3::new(-1.75, 1.75, 8.0));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_game_config("does/not/exist/game.toml");
        assert_eq!(config.world_gravity(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(config.ball_dispense_delay, 1.0);
        assert!(config.rng_seed.is_none());
    }
}
