//! Scene graphs in the world and cross-fades between them.
//!
//! ## Scenes
//!
//! | Scene   | Root                       | Shown while             |
//! |---------|----------------------------|-------------------------|
//! | `Menu`  | `SceneGraphRoot(Menu)`     | `GameState::MenuWaiting`|
//! | `Level` | `SceneGraphRoot(Level)`    | `GameState::Playing`    |
//!
//! Both graphs are spawned hidden at startup.  A [`PresentScene`] request
//! starts a [`CrossFade`]: the overlay darkens for the first half, the roots
//! swap visibility at the midpoint, and the overlay clears for the second
//! half.  The view layer reads [`Presentation::overlay_alpha`] and the shown
//! scene's [`SceneCameraPose`].

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::{
    CAMERA_NODE, HUD_NODE, SHELF_NODE, TOUCH_PLANE_OPACITY, TOUCH_PLANE_SIZE,
};
use crate::error::{SceneError, SceneResult};
use crate::physics::shelf_body;
use crate::scene::{spawn_scene, NodeMaterial, NodeShape, NodeVisual, SceneLibrary, SceneNode};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Menu,
    Level,
}

impl SceneKind {
    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Menu => "menu",
            SceneKind::Level => "level",
        }
    }
}

/// Root entity of a spawned scene graph.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneGraphRoot(pub SceneKind);

/// Where the camera sits while this scene is shown.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneCameraPose(pub Transform);

/// Large, nearly transparent plane behind the shelf.
#[derive(Component, Debug)]
pub struct TouchCatchingPlane;

/// Request to show a scene, fading over `fade_secs`.
#[derive(Message, Debug, Clone, Copy)]
pub struct PresentScene {
    pub scene: SceneKind,
    pub fade_secs: f32,
}

/// A fade in progress.
#[derive(Debug)]
pub struct CrossFade {
    pub target: SceneKind,
    pub timer: Timer,
    /// Set once the roots have been swapped at the midpoint.
    pub swapped: bool,
}

/// Which scene is on screen and whether a fade is running.
#[derive(Resource, Debug, Default)]
pub struct Presentation {
    pub shown: Option<SceneKind>,
    pub fade: Option<CrossFade>,
}

impl Presentation {
    /// Opacity of the full-screen fade overlay.
    pub fn overlay_alpha(&self) -> f32 {
        self.fade
            .as_ref()
            .map_or(0.0, |fade| fade_alpha(fade.timer.fraction()))
    }
}

/// Triangle ramp: 0 at the ends of the fade, 1 at the midpoint.
pub fn fade_alpha(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (2.0 * t - 1.0).abs()
}

/// Find the root of a spawned scene.
pub fn scene_root(
    roots: &Query<(Entity, &SceneGraphRoot)>,
    kind: SceneKind,
) -> SceneResult<Entity> {
    roots
        .iter()
        .find(|(_, root)| root.0 == kind)
        .map(|(entity, _)| entity)
        .ok_or(SceneError::SceneNotSpawned {
            scene: kind.label(),
        })
}

// ── Startup: spawn graphs ─────────────────────────────────────────────────────

fn spawn_root(commands: &mut Commands, kind: SceneKind, camera: Transform) -> Entity {
    commands
        .spawn((
            Name::new(format!("{} scene", kind.label())),
            SceneGraphRoot(kind),
            SceneCameraPose(camera),
            Transform::IDENTITY,
            Visibility::Hidden,
        ))
        .id()
}

fn default_menu_camera() -> Transform {
    Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y)
}

/// Startup system: spawn the menu and level scene graphs, hidden.
///
/// The menu's HUD plane is flipped about X.  The shelf gets a fixed body, and
/// a touch-catching plane is placed at the shelf's depth facing the camera.
pub fn spawn_scene_graphs(mut commands: Commands, library: Res<SceneLibrary>) -> Result {
    // ── Menu ──────────────────────────────────────────────────────────────────
    let menu_camera = library
        .menu
        .try_node(CAMERA_NODE)
        .map_or_else(default_menu_camera, SceneNode::transform);
    let menu_root = spawn_root(&mut commands, SceneKind::Menu, menu_camera);

    let menu_index = spawn_scene(&mut commands, menu_root, &library.menu);
    let hud = *menu_index.get(HUD_NODE).ok_or_else(|| SceneError::NodeNotFound {
        scene: library.menu.name().to_string(),
        node: HUD_NODE.to_string(),
    })?;
    let hud_node = library.menu.find_node(HUD_NODE)?;
    commands.entity(hud).insert(Transform {
        rotation: Quat::from_rotation_x(PI),
        ..hud_node.transform()
    });

    // ── Level ─────────────────────────────────────────────────────────────────
    let camera_node = library.level_camera()?;
    let level_root = spawn_root(&mut commands, SceneKind::Level, camera_node.transform());

    let level_index = spawn_scene(&mut commands, level_root, &library.level);

    let shelf_node = library.shelf()?;
    let shelf = *level_index.get(SHELF_NODE).ok_or_else(|| SceneError::NodeNotFound {
        scene: library.level.name().to_string(),
        node: SHELF_NODE.to_string(),
    })?;
    let shelf_shape = shelf_node.shape.ok_or_else(|| SceneError::MissingShape {
        scene: library.level.name().to_string(),
        node: SHELF_NODE.to_string(),
    })?;
    commands
        .entity(shelf)
        .insert(shelf_body(shelf_shape, Vec3::from_array(shelf_node.scale)));

    commands.spawn((
        Name::new("touch plane"),
        TouchCatchingPlane,
        Transform {
            translation: Vec3::new(0.0, 0.0, shelf_node.translation().z),
            rotation: camera_node.transform().rotation,
            ..default()
        },
        Visibility::Inherited,
        NodeVisual {
            shape: NodeShape::Plane {
                width: TOUCH_PLANE_SIZE,
                height: TOUCH_PLANE_SIZE,
            },
            material: NodeMaterial {
                opacity: TOUCH_PLANE_OPACITY,
                ..default()
            },
        },
        ChildOf(level_root),
    ));

    info!(
        "Spawned scene graphs: {} menu nodes, {} level nodes",
        menu_index.len(),
        level_index.len()
    );
    Ok(())
}

// ── Presentation requests ─────────────────────────────────────────────────────

/// `OnEnter(MenuWaiting)`: fade the menu in.
pub fn present_menu(config: Res<GameConfig>, mut requests: MessageWriter<PresentScene>) {
    requests.write(PresentScene {
        scene: SceneKind::Menu,
        fade_secs: config.fade_duration,
    });
}

/// `OnEnter(Playing)`: fade the level in.
pub fn present_level(config: Res<GameConfig>, mut requests: MessageWriter<PresentScene>) {
    requests.write(PresentScene {
        scene: SceneKind::Level,
        fade_secs: config.fade_duration,
    });
}

fn show_scene(
    target: SceneKind,
    presentation: &mut Presentation,
    roots: &mut Query<(&SceneGraphRoot, &mut Visibility)>,
) {
    for (root, mut visibility) in roots.iter_mut() {
        *visibility = if root.0 == target {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    presentation.shown = Some(target);
    info!("Presenting {} scene", target.label());
}

/// Start a fade for the latest request.  A new request replaces a fade that
/// is still running; a duration that is not positive swaps at once.
pub fn begin_presentation(
    mut requests: MessageReader<PresentScene>,
    mut presentation: ResMut<Presentation>,
    mut roots: Query<(&SceneGraphRoot, &mut Visibility)>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    // Also catches NaN, which `Timer` cannot hold.
    if !(request.fade_secs > 0.0) {
        presentation.fade = None;
        show_scene(request.scene, &mut presentation, &mut roots);
        return;
    }

    presentation.fade = Some(CrossFade {
        target: request.scene,
        timer: Timer::from_seconds(request.fade_secs, TimerMode::Once),
        swapped: false,
    });
}

/// Advance the running fade, swapping scenes at its midpoint.
pub fn advance_cross_fade(
    time: Res<Time>,
    mut presentation: ResMut<Presentation>,
    mut roots: Query<(&SceneGraphRoot, &mut Visibility)>,
) {
    let Some(fade) = presentation.fade.as_mut() else {
        return;
    };
    fade.timer.tick(time.delta());

    let target = fade.target;
    let swap_now = !fade.swapped && fade.timer.fraction() >= 0.5;
    let finished = fade.timer.just_finished();
    if swap_now {
        fade.swapped = true;
    }

    if swap_now {
        show_scene(target, &mut presentation, &mut roots);
    }
    if finished {
        presentation.fade = None;
    }
}
