//! Game session plugin: wires the state machine, level setup, ball dispensing,
//! and scene presentation together.
//!
//! ## Flow
//!
//! | Schedule               | Systems                                                   |
//! |------------------------|-----------------------------------------------------------|
//! | `Startup`              | `build_level_catalog`, `spawn_scene_graphs`               |
//! | `OnEnter(MenuWaiting)` | `present_menu`                                            |
//! | `OnEnter(Playing)`     | `setup_next_level` → `apply_level_gravity` → `present_level` |
//! | `Update`               | `tap_to_play_system`; `tick_scheduled_tasks` → `dispense_scheduled_balls`; `begin_presentation` → `advance_cross_fade` |
//!
//! The plugin expects [`crate::config::GameConfig`] and
//! [`crate::scene::SceneLibrary`] to be inserted before
//! it is added.  It registers nothing that needs a window or render assets.

use bevy::prelude::*;

use crate::ball::dispense_scheduled_balls;
use crate::cans::setup_next_level;
use crate::input::TouchSignal;
use crate::level::build_level_catalog;
use crate::menu::{tap_to_play_system, GameState};
use crate::physics::apply_level_gravity;
use crate::presentation::{
    advance_cross_fade, begin_presentation, present_level, present_menu, spawn_scene_graphs,
    PresentScene, Presentation,
};
use crate::scheduler::{tick_scheduled_tasks, DeferredActionFired};
use crate::session::{GameSession, VariantRng};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<TouchSignal>()
            .add_message::<DeferredActionFired>()
            .add_message::<PresentScene>()
            .init_resource::<GameSession>()
            .init_resource::<Presentation>()
            .init_resource::<VariantRng>()
            .add_systems(Startup, (build_level_catalog, spawn_scene_graphs))
            .add_systems(OnEnter(GameState::MenuWaiting), present_menu)
            .add_systems(
                OnEnter(GameState::Playing),
                (setup_next_level, apply_level_gravity, present_level).chain(),
            )
            .add_systems(
                Update,
                (
                    tap_to_play_system,
                    (tick_scheduled_tasks, dispense_scheduled_balls).chain(),
                    (begin_presentation, advance_cross_fade).chain(),
                ),
            );
    }
}
