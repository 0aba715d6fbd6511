//! Can spawning and level setup.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    CAN_ALTERNATE_TEXTURE, CAN_ALTERNATE_YAW, CAN_PRIMARY_TEXTURE, CAN_PRIMARY_YAW,
};
use crate::level::LevelCatalog;
use crate::physics::contact_events;
use crate::presentation::{scene_root, SceneGraphRoot, SceneKind};
use crate::scene::{spawn_node_tree, NodeVisual, SceneLibrary, SceneNode};
use crate::scheduler::{schedule_task, DeferredAction};
use crate::session::{GameSession, VariantRng};

/// Marker for can entities.
#[derive(Component, Debug)]
pub struct Can;

/// Which label a can wears.  The label also fixes the can's yaw.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanVariant {
    Primary,
    Alternate,
}

impl CanVariant {
    /// Fair coin flip.
    pub fn roll(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            CanVariant::Alternate
        } else {
            CanVariant::Primary
        }
    }

    #[inline]
    pub fn yaw(self) -> f32 {
        match self {
            CanVariant::Primary => CAN_PRIMARY_YAW,
            CanVariant::Alternate => CAN_ALTERNATE_YAW,
        }
    }

    #[inline]
    pub fn texture(self) -> &'static str {
        match self {
            CanVariant::Primary => CAN_PRIMARY_TEXTURE,
            CanVariant::Alternate => CAN_ALTERNATE_TEXTURE,
        }
    }
}

/// Spawn one can cloned from `template` at `position`.
///
/// The can gets its own copy of the template's appearance, so retexturing it
/// never touches the template or its siblings.  Only a material that already
/// carries a texture is retextured.
pub fn spawn_can(
    commands: &mut Commands,
    root: Entity,
    template: &SceneNode,
    index: usize,
    position: Vec3,
    variant: CanVariant,
    config: &GameConfig,
) -> Entity {
    let mut appearance = template.instance();
    if let Some(material) = appearance.material.as_mut() {
        if material.texture.is_some() {
            material.texture = Some(variant.texture().to_string());
        }
    }

    let transform = Transform {
        translation: position,
        rotation: Quat::from_rotation_y(variant.yaw()),
        scale: Vec3::from_array(template.scale),
    };

    let mut entity = commands.spawn((
        Can,
        variant,
        Name::new(format!("Can #{index}")),
        transform,
        Visibility::Inherited,
        ChildOf(root),
        // Physics
        RigidBody::Dynamic,
        Collider::cylinder(config.can_height * 0.5, config.can_radius),
        ColliderMassProperties::Mass(config.can_mass),
        contact_events(config.contact_mask),
        Velocity::zero(),
    ));
    if let Some(visual) = NodeVisual::of(&appearance) {
        entity.insert(visual);
    }
    let id = entity.id();

    for child in &appearance.children {
        spawn_node_tree(commands, id, child);
    }
    id
}

/// Spawn the current level's cans and schedule the ball.
///
/// Runs on `OnEnter(GameState::Playing)`.  The most recent ball stops being
/// tracked and any ball still waiting on its delay is cancelled, so calling
/// this again never leaves two dispenses pending.  Cans from an earlier setup
/// are dropped from tracking but left in the world.  The session is left
/// untouched when the level, the can template, or the level scene is missing.
#[allow(clippy::too_many_arguments)]
pub fn setup_next_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    library: Res<SceneLibrary>,
    catalog: Res<LevelCatalog>,
    mut session: ResMut<GameSession>,
    mut rng: ResMut<VariantRng>,
    roots: Query<(Entity, &SceneGraphRoot)>,
) -> Result {
    let level = catalog.level(session.current_level)?;
    let template = library.can_template()?;
    let root = scene_root(&roots, SceneKind::Level)?;

    if let Some(ball) = session.release_latest_ball() {
        debug!("Released ball {:?} from tracking", ball);
    }
    if let Some(pending) = session.pending_dispense.take() {
        pending.cancel(&mut commands);
    }

    session.can_entities.clear();
    for (index, position) in level.can_positions.iter().enumerate() {
        let variant = CanVariant::roll(&mut rng.0);
        let can = spawn_can(
            &mut commands,
            root,
            template,
            index,
            *position,
            variant,
            &config,
        );
        session.can_entities.push(can);
    }

    session.pending_dispense = Some(schedule_task(
        &mut commands,
        config.ball_dispense_delay,
        DeferredAction::DispenseBall,
    ));

    info!(
        "Level {} set up with {} cans; ball in {:.1}s",
        session.current_level + 1,
        session.can_entities.len(),
        config.ball_dispense_delay
    );
    Ok(())
}
