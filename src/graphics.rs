//! Everything that needs a window: camera, lights, meshes and materials for
//! scene nodes, the fade overlay, and raw input collection.
//!
//! [`crate::game::GamePlugin`] never touches render assets, so it runs under
//! `MinimalPlugins` in tests; this plugin is only added by `main`.

use bevy::prelude::*;

use crate::input::collect_touch_input;
use crate::menu::{cleanup_menu_prompt, setup_menu_prompt, GameState};
use crate::presentation::{Presentation, SceneCameraPose, SceneGraphRoot};
use crate::scene::{NodeShape, NodeVisual};

/// The single 3D camera; moved to the shown scene's camera pose.
#[derive(Component)]
pub struct MainCamera;

/// Full-screen overlay driven by [`Presentation::overlay_alpha`].
#[derive(Component)]
pub struct FadeOverlay;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, setup_lights, setup_fade_overlay))
            .add_systems(OnEnter(GameState::MenuWaiting), setup_menu_prompt)
            .add_systems(OnExit(GameState::MenuWaiting), cleanup_menu_prompt)
            .add_systems(PreUpdate, collect_touch_input)
            .add_systems(
                PostUpdate,
                (
                    attach_node_visuals,
                    sync_fade_overlay,
                    sync_camera_to_presented_scene,
                ),
            );
    }
}

/// Setup camera for 3D rendering.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
    eprintln!("[SETUP] Camera spawned");
}

pub fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 8.0, 12.0).looking_at(Vec3::new(0.0, 0.0, 8.0), Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 4.0, 14.0),
    ));
}

pub fn setup_fade_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        GlobalZIndex(i32::MAX),
        FadeOverlay,
    ));
}

/// Give every scene node with a [`NodeVisual`] a mesh and its own material.
pub fn attach_node_visuals(
    mut commands: Commands,
    nodes: Query<(Entity, &NodeVisual), Without<Mesh3d>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    for (entity, visual) in nodes.iter() {
        let mesh = match visual.shape {
            NodeShape::Plane { width, height } => {
                meshes.add(Plane3d::new(Vec3::Z, Vec2::new(width * 0.5, height * 0.5)))
            }
            NodeShape::Cuboid { size } => meshes.add(Cuboid::new(size[0], size[1], size[2])),
            NodeShape::Cylinder { radius, height } => meshes.add(Cylinder::new(radius, height)),
            NodeShape::Sphere { radius } => meshes.add(Sphere::new(radius)),
        };

        let [r, g, b] = visual.material.color;
        let opacity = visual.material.opacity;
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(r, g, b, opacity),
            base_color_texture: visual
                .material
                .texture
                .as_ref()
                .map(|path| asset_server.load(path.clone())),
            alpha_mode: if opacity < 1.0 {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            double_sided: matches!(visual.shape, NodeShape::Plane { .. }),
            cull_mode: None,
            ..default()
        });

        commands
            .entity(entity)
            .insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}

pub fn sync_fade_overlay(
    presentation: Res<Presentation>,
    mut overlay: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    let alpha = presentation.overlay_alpha();
    for mut color in overlay.iter_mut() {
        color.0 = Color::BLACK.with_alpha(alpha);
    }
}

/// Move the camera when the shown scene changes.
pub fn sync_camera_to_presented_scene(
    presentation: Res<Presentation>,
    roots: Query<(&SceneGraphRoot, &SceneCameraPose)>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    if !presentation.is_changed() {
        return;
    }
    let Some(shown) = presentation.shown else {
        return;
    };
    let Some((_, pose)) = roots.iter().find(|(root, _)| root.0 == shown) else {
        return;
    };
    for mut transform in camera.iter_mut() {
        *transform = pose.0;
    }
}
