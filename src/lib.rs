//! Can Bully: a tap-to-throw can knockdown game.
//!
//! A menu waits for a tap, the level's cans are stacked on a shelf, and a ball
//! is launched at them a second later.  Rendering and rigid-body dynamics are
//! Bevy's and Rapier's; this crate owns the session state machine, the level
//! layouts, and the scene descriptions they are built from.

pub mod ball;
pub mod cans;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod graphics;
pub mod input;
pub mod level;
pub mod menu;
pub mod physics;
pub mod presentation;
pub mod scene;
pub mod scheduler;
pub mod session;
