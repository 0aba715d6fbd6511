//! Rapier glue: colliders from scene shapes, contact reporting, world gravity.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::scene::NodeShape;

/// Which contacts a body reports.  The mask never affects whether bodies
/// collide; a zero mask only silences collision events.
pub fn contact_events(mask: u32) -> ActiveEvents {
    if mask == 0 {
        ActiveEvents::empty()
    } else {
        ActiveEvents::COLLISION_EVENTS
    }
}

/// Collider matching a node's shape at the given scale.
pub fn collider_for_shape(shape: NodeShape, scale: Vec3) -> Collider {
    match shape {
        NodeShape::Cuboid { size } => {
            let half = Vec3::from_array(size) * scale * 0.5;
            Collider::cuboid(half.x, half.y, half.z)
        }
        // Planes get a sliver of thickness so they can still be hit.
        NodeShape::Plane { width, height } => {
            Collider::cuboid(width * scale.x * 0.5, height * scale.y * 0.5, 0.01)
        }
        NodeShape::Cylinder { radius, height } => {
            Collider::cylinder(height * scale.y * 0.5, radius * scale.x)
        }
        NodeShape::Sphere { radius } => Collider::ball(radius * scale.max_element()),
    }
}

/// Immovable body for the shelf the cans stand on.
pub fn shelf_body(shape: NodeShape, scale: Vec3) -> impl Bundle {
    (
        RigidBody::Fixed,
        collider_for_shape(shape, scale),
        GravityScale(0.0),
    )
}

/// Set world gravity for the level.
pub fn apply_level_gravity(
    config: Res<GameConfig>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    let gravity = config.world_gravity();
    let mut applied = false;
    for mut cfg in rapier_config.iter_mut() {
        cfg.gravity = gravity;
        applied = true;
    }
    if applied {
        info!("World gravity set to {:?}", gravity);
    } else {
        warn!("No Rapier context found; gravity {:?} not applied", gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_mask_only_toggles_event_reporting() {
        assert_eq!(contact_events(1), ActiveEvents::COLLISION_EVENTS);
        assert_eq!(contact_events(0b110), ActiveEvents::COLLISION_EVENTS);
        assert_eq!(contact_events(0), ActiveEvents::empty());
    }

    #[test]
    fn cuboid_collider_uses_half_extents() {
        let collider = collider_for_shape(
            NodeShape::Cuboid {
                size: [4.0, 0.2, 1.0],
            },
            Vec3::ONE,
        );
        let cuboid = collider.as_cuboid().expect("cuboid shape");
        assert_eq!(cuboid.half_extents(), Vec3::new(2.0, 0.1, 0.5));
    }

    #[test]
    fn cylinder_collider_halves_height() {
        let collider = collider_for_shape(
            NodeShape::Cylinder {
                radius: 0.33,
                height: 1.25,
            },
            Vec3::ONE,
        );
        let cylinder = collider.as_cylinder().expect("cylinder shape");
        assert_eq!(cylinder.half_height(), 0.625);
        assert_eq!(cylinder.radius(), 0.33);
    }
}
