//! Headless tests for the [`GameState`] state machine and its tap handling.
//!
//! Covered scenarios:
//! 1. Default initial state is `MenuWaiting`, and the menu scene is presented.
//! 2. A touch-begin in the menu transitions to `Playing`.
//! 3. A touch-end in the menu is ignored.
//! 4. `Playing` persists across frames and ignores further touches.
//! 5. Scene graphs: fixed shelf body, touch-catching plane, flipped HUD.
//! 6. Fades: zero or NaN durations swap at once; a tap mid-fade replaces the
//!    menu fade with the level fade.

mod common;

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use can_bully::cans::Can;
use can_bully::config::GameConfig;
use can_bully::input::TouchSignal;
use can_bully::menu::GameState;
use can_bully::presentation::{Presentation, SceneGraphRoot, SceneKind, TouchCatchingPlane};
use can_bully::scene::{NodeShape, NodeVisual};
use common::*;

fn root_visibility(app: &mut App, kind: SceneKind) -> Visibility {
    let mut query = app.world_mut().query::<(&SceneGraphRoot, &Visibility)>();
    query
        .iter(app.world())
        .find(|(root, _)| root.0 == kind)
        .map(|(_, visibility)| *visibility)
        .expect("scene root must be spawned at startup")
}

fn named(app: &mut App, name: &str) -> Entity {
    let mut query = app.world_mut().query::<(Entity, &Name)>();
    query
        .iter(app.world())
        .find(|(_, n)| n.as_str() == name)
        .map(|(entity, _)| entity)
        .unwrap_or_else(|| panic!("no entity named {name}"))
}

fn fade_target(app: &App) -> Option<SceneKind> {
    app.world()
        .resource::<Presentation>()
        .fade
        .as_ref()
        .map(|fade| fade.target)
}

#[test]
fn default_state_is_menu_waiting() {
    let app = headless_app();
    assert_eq!(state(&app), GameState::MenuWaiting, "initial state must be MenuWaiting");
}

#[test]
fn menu_scene_is_presented_after_the_fade() {
    let mut app = headless_app();
    run_frames(&mut app, 15);

    let presentation = app.world().resource::<Presentation>();
    assert_eq!(presentation.shown, Some(SceneKind::Menu));
    assert!(presentation.fade.is_none(), "fade must be finished");
    assert_eq!(root_visibility(&mut app, SceneKind::Menu), Visibility::Visible);
    assert_eq!(root_visibility(&mut app, SceneKind::Level), Visibility::Hidden);
}

#[test]
fn touch_began_in_menu_starts_playing() {
    let mut app = headless_app();
    tap_to_play(&mut app);
    assert_eq!(state(&app), GameState::Playing);
}

#[test]
fn touch_ended_in_menu_is_ignored() {
    let mut app = headless_app();
    touch(&mut app, TouchSignal::Ended);
    run_frames(&mut app, 3);

    assert_eq!(state(&app), GameState::MenuWaiting);
    assert_eq!(count::<Can>(&mut app), 0, "no level may be set up without a tap");
}

#[test]
fn playing_ignores_further_touches() {
    let mut app = headless_app();
    tap_to_play(&mut app);
    let cans = count::<Can>(&mut app);

    for _ in 0..3 {
        touch(&mut app, TouchSignal::Began);
        touch(&mut app, TouchSignal::Ended);
        run_frames(&mut app, 2);
    }

    assert_eq!(state(&app), GameState::Playing, "Playing must remain stable");
    assert_eq!(count::<Can>(&mut app), cans, "touches while playing must not respawn cans");
}

#[test]
fn level_is_presented_after_tap() {
    let mut app = headless_app();
    tap_to_play(&mut app);
    run_frames(&mut app, 15);

    assert_eq!(
        app.world().resource::<Presentation>().shown,
        Some(SceneKind::Level)
    );
    assert_eq!(root_visibility(&mut app, SceneKind::Level), Visibility::Visible);
    assert_eq!(root_visibility(&mut app, SceneKind::Menu), Visibility::Hidden);
}

#[test]
fn shelf_is_a_fixed_body_without_gravity() {
    let mut app = headless_app();
    let shelf = named(&mut app, "shelf");
    let world = app.world();

    assert_eq!(world.get::<RigidBody>(shelf), Some(&RigidBody::Fixed));
    assert_eq!(world.get::<GravityScale>(shelf).map(|g| g.0), Some(0.0));
    let cuboid = world
        .get::<Collider>(shelf)
        .and_then(|collider| collider.as_cuboid())
        .expect("shelf must carry a cuboid collider");
    assert!(cuboid
        .half_extents()
        .abs_diff_eq(Vec3::new(1.5, 0.01, 0.6), 1e-6));
}

#[test]
fn touch_plane_faces_the_camera_at_shelf_depth() {
    let mut app = headless_app();
    let library = shipped_library();
    let shelf_z = library.shelf().unwrap().translation().z;
    let camera_rotation = library.level_camera().unwrap().transform().rotation;

    let mut query = app
        .world_mut()
        .query_filtered::<(&NodeVisual, &Transform), With<TouchCatchingPlane>>();
    let planes: Vec<_> = query.iter(app.world()).collect();
    assert_eq!(planes.len(), 1, "exactly one touch-catching plane");
    let (visual, transform) = planes[0];

    assert_eq!(
        visual.shape,
        NodeShape::Plane {
            width: 40.0,
            height: 40.0
        }
    );
    assert_eq!(visual.material.opacity, 0.001);
    assert_eq!(transform.translation, Vec3::new(0.0, 0.0, shelf_z));
    assert!(transform.rotation.abs_diff_eq(camera_rotation, 1e-6));
}

#[test]
fn hud_is_flipped_about_x() {
    let mut app = headless_app();
    let hud = named(&mut app, "hud");
    let transform = app.world().get::<Transform>(hud).unwrap();

    assert!(transform
        .rotation
        .abs_diff_eq(Quat::from_rotation_x(PI), 1e-6));
    assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 0.5));
}

#[test]
fn zero_fade_swaps_scenes_immediately() {
    let mut app = headless_app_with(GameConfig {
        fade_duration: 0.0,
        ..seeded_config()
    });
    app.update();

    assert_eq!(
        app.world().resource::<Presentation>().shown,
        Some(SceneKind::Menu)
    );
    assert_eq!(fade_target(&app), None);
    assert_eq!(root_visibility(&mut app, SceneKind::Menu), Visibility::Visible);

    tap_to_play(&mut app);
    app.update();

    assert_eq!(
        app.world().resource::<Presentation>().shown,
        Some(SceneKind::Level)
    );
    assert_eq!(fade_target(&app), None);
    assert_eq!(root_visibility(&mut app, SceneKind::Level), Visibility::Visible);
    assert_eq!(root_visibility(&mut app, SceneKind::Menu), Visibility::Hidden);
}

#[test]
fn nan_fade_swaps_instead_of_starting_a_timer() {
    let mut app = headless_app_with(GameConfig {
        fade_duration: f32::NAN,
        ..seeded_config()
    });
    app.update();

    assert_eq!(
        app.world().resource::<Presentation>().shown,
        Some(SceneKind::Menu)
    );
    assert_eq!(fade_target(&app), None);
}

#[test]
fn tap_mid_fade_replaces_the_menu_fade() {
    let mut app = headless_app();
    run_frames(&mut app, 2);
    assert_eq!(fade_target(&app), Some(SceneKind::Menu), "menu fade still running");

    tap_to_play(&mut app);
    assert_eq!(fade_target(&app), Some(SceneKind::Level));

    run_frames(&mut app, 15);
    let presentation = app.world().resource::<Presentation>();
    assert_eq!(presentation.shown, Some(SceneKind::Level));
    assert!(presentation.fade.is_none());
    assert_eq!(root_visibility(&mut app, SceneKind::Level), Visibility::Visible);
    assert_eq!(root_visibility(&mut app, SceneKind::Menu), Visibility::Hidden);
}
