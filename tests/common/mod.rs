//! Shared helpers for the headless integration tests.
//!
//! The app built here has [`MinimalPlugins`] and [`StatesPlugin`] plus
//! [`GamePlugin`] — no window, no rendering, no physics stepping.  Rapier
//! components are plain data, and a bare [`RapierConfiguration`] entity stands
//! in for the physics context so gravity changes can be observed.  Every
//! `app.update()` advances game time by [`FRAME`].

#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::RapierConfiguration;

use can_bully::config::GameConfig;
use can_bully::game::GamePlugin;
use can_bully::input::TouchSignal;
use can_bully::menu::GameState;
use can_bully::scene::SceneLibrary;

pub const FRAME: Duration = Duration::from_millis(100);

pub fn shipped_library() -> SceneLibrary {
    SceneLibrary::from_sources(
        include_str!("../../assets/scenes/menu.toml"),
        include_str!("../../assets/scenes/level.toml"),
        include_str!("../../assets/scenes/can.toml"),
        include_str!("../../assets/scenes/ball.toml"),
    )
    .expect("shipped scenes must load")
}

pub fn seeded_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(7),
        ..Default::default()
    }
}

/// Headless app with a seeded RNG, settled into its first frame.
pub fn headless_app() -> App {
    headless_app_with(seeded_config())
}

pub fn headless_app_with(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.insert_resource(config);
    app.insert_resource(shipped_library());
    app.add_plugins(GamePlugin);
    app.world_mut().spawn(RapierConfiguration::new(1.0));
    app.update();
    app
}

pub fn touch(app: &mut App, signal: TouchSignal) {
    app.world_mut()
        .resource_mut::<Messages<TouchSignal>>()
        .write(signal);
}

/// Tap, then run the two frames it takes for `OnEnter(Playing)` to fire.
pub fn tap_to_play(app: &mut App) {
    touch(app, TouchSignal::Began);
    app.update(); // tap handled, transition requested
    app.update(); // StateTransition runs OnEnter(Playing)
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

pub fn count<C: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
    query.iter(app.world()).count()
}
