//! Centralised gameplay and physics constants.
//!
//! Every tuneable value lives here so it can be found and changed in one
//! place.  [`crate::config::GameConfig::default`] reads from this module, so
//! `assets/game.toml` only needs to list the values it overrides.

// ── Assets ────────────────────────────────────────────────────────────────────

/// Directory that Bevy's `AssetServer` and the scene loader resolve paths against.
pub const ASSET_DIR: &str = "assets";

/// Runtime configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

pub const MENU_SCENE_PATH: &str = "scenes/menu.toml";
pub const LEVEL_SCENE_PATH: &str = "scenes/level.toml";
pub const CAN_SCENE_PATH: &str = "scenes/can.toml";
pub const BALL_SCENE_PATH: &str = "scenes/ball.toml";

// ── Required scene nodes ──────────────────────────────────────────────────────

pub const HUD_NODE: &str = "hud";
pub const CAMERA_NODE: &str = "camera";
pub const SHELF_NODE: &str = "shelf";
pub const CAN_NODE: &str = "can";
pub const BALL_TEMPLATE_NODE: &str = "sphere";

/// Name given to every dispensed ball entity.
pub const BALL_NAME: &str = "ball";

// ── Presentation ──────────────────────────────────────────────────────────────

/// Length of the cross-fade between the menu and the level (seconds).
pub const FADE_DURATION: f32 = 1.0;

/// Portrait phone-sized window.
pub const WINDOW_WIDTH: u32 = 375;
pub const WINDOW_HEIGHT: u32 = 667;

/// Side length of the near-invisible plane that sits behind the shelf.
pub const TOUCH_PLANE_SIZE: f32 = 40.0;
pub const TOUCH_PLANE_OPACITY: f32 = 0.001;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Delay between the cans landing on the shelf and the ball being dispensed.
pub const BALL_DISPENSE_DELAY: f32 = 1.0;

// ── World ─────────────────────────────────────────────────────────────────────

/// Gravity applied to the level once it is presented.  Deliberately weak so
/// the cans settle slowly.
pub const WORLD_GRAVITY: [f32; 3] = [0.0, -1.0, 0.0];

/// Contact-test mask carried by cans and balls.
pub const CONTACT_MASK: u32 = 1;

// ── Cans ──────────────────────────────────────────────────────────────────────

pub const CAN_MASS: f32 = 0.75;
pub const CAN_RADIUS: f32 = 0.33;
pub const CAN_HEIGHT: f32 = 1.25;

/// Yaw (radians) of the cans wearing the primary label.
pub const CAN_PRIMARY_YAW: f32 = 55.0;
/// Yaw (radians) of the cans wearing the alternate label.
pub const CAN_ALTERNATE_YAW: f32 = -110.0;

pub const CAN_PRIMARY_TEXTURE: &str = "textures/can_diffuse_1.png";
pub const CAN_ALTERNATE_TEXTURE: &str = "textures/can_diffuse_2.png";

// ── Ball ──────────────────────────────────────────────────────────────────────

pub const BALL_MASS: f32 = 3.0;
pub const BALL_FRICTION: f32 = 2.0;
pub const BALL_RADIUS: f32 = 0.35;

/// World-space spawn point of every dispensed ball.
pub const BALL_SPAWN: [f32; 3] = [-1.75, 1.75, 8.0];

/// One-shot launch impulse applied at spawn.
pub const BALL_IMPULSE: [f32; 3] = [0.825, 0.0, 0.0];
