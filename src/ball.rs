//! Ball dispensing.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::constants::BALL_NAME;
use crate::physics::contact_events;
use crate::presentation::{scene_root, SceneGraphRoot, SceneKind};
use crate::scene::{spawn_node_tree, NodeVisual, SceneLibrary, SceneNode};
use crate::scheduler::{DeferredAction, DeferredActionFired};
use crate::session::GameSession;

/// Marker for dispensed balls.
#[derive(Component, Debug)]
pub struct Ball;

/// Spawn a ball from `template` at the configured spawn point and launch it.
///
/// The impulse is applied once; Rapier clears it after the next step.
pub fn dispense_new_ball(
    commands: &mut Commands,
    root: Entity,
    template: &SceneNode,
    config: &GameConfig,
    session: &mut GameSession,
) -> Entity {
    let [rx, ry, rz] = template.rotation;
    let transform = Transform {
        translation: config.ball_spawn(),
        rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
        scale: Vec3::from_array(template.scale),
    };

    let mut entity = commands.spawn((
        Ball,
        Name::new(BALL_NAME),
        transform,
        Visibility::Inherited,
        ChildOf(root),
        // Physics
        RigidBody::Dynamic,
        Collider::ball(config.ball_radius),
        ColliderMassProperties::Mass(config.ball_mass),
        Friction::coefficient(config.ball_friction),
        contact_events(config.contact_mask),
        Velocity::zero(),
        ExternalImpulse {
            impulse: config.ball_impulse(),
            torque_impulse: Vec3::ZERO,
        },
    ));
    if let Some(visual) = NodeVisual::of(template) {
        entity.insert(visual);
    }
    let id = entity.id();

    for child in &template.children {
        spawn_node_tree(commands, id, child);
    }

    session.track_ball(id);
    info!("Ball dispensed at {:?}", config.ball_spawn());
    id
}

/// Dispense a ball for every fired [`DeferredAction::DispenseBall`].
pub fn dispense_scheduled_balls(
    mut commands: Commands,
    mut fired: MessageReader<DeferredActionFired>,
    config: Res<GameConfig>,
    library: Res<SceneLibrary>,
    mut session: ResMut<GameSession>,
    roots: Query<(Entity, &SceneGraphRoot)>,
) -> Result {
    for message in fired.read() {
        if message.action != DeferredAction::DispenseBall {
            continue;
        }
        session.pending_dispense = None;
        let template = library.ball_template()?;
        let root = scene_root(&roots, SceneKind::Level)?;
        dispense_new_ball(&mut commands, root, template, &config, &mut session);
    }
    Ok(())
}
