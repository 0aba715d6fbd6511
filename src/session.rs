//! Per-session bookkeeping: which level is current and which cans and balls
//! the controller is tracking.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::scheduler::TaskHandle;

/// Mutable state of the running session.
///
/// `current_level` starts at 0 and nothing advances it: there is no win
/// detection, so level 2 is only reachable by setting the index directly.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    pub current_level: usize,
    /// Cans spawned by the most recent level setup.
    pub can_entities: Vec<Entity>,
    /// Dispensed balls still being tracked, oldest first.
    pub ball_entities: Vec<Entity>,
    /// The ball dispensed last, if it is still tracked.
    pub current_ball: Option<Entity>,
    /// Ball dispense waiting on its delay.
    pub pending_dispense: Option<TaskHandle>,
}

impl GameSession {
    /// Stop tracking the most recently dispensed ball.  The entity itself
    /// stays in the world.
    pub fn release_latest_ball(&mut self) -> Option<Entity> {
        let released = self.ball_entities.pop()?;
        if self.current_ball == Some(released) {
            self.current_ball = None;
        }
        Some(released)
    }

    pub fn track_ball(&mut self, ball: Entity) {
        self.ball_entities.push(ball);
        self.current_ball = Some(ball);
    }
}

/// Random source for the per-can label coin flip.
#[derive(Resource)]
pub struct VariantRng(pub StdRng);

impl VariantRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl FromWorld for VariantRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<GameConfig>()
            .and_then(|config| config.rng_seed);
        Self::new(seed)
    }
}
