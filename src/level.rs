//! Level layouts and the level catalog.
//!
//! Levels are not authored in scene files: each one is a fixed table of
//! offsets from the shelf's position in the level scene.

use bevy::prelude::*;

use crate::error::{SceneError, SceneResult};
use crate::scene::SceneLibrary;

/// Three cans: two side by side on the shelf, one balanced on top.
pub const LEVEL_ONE_OFFSETS: [[f32; 3]; 3] = [
    [-0.5, 0.62, 0.0],
    [0.5, 0.62, 0.0],
    [0.0, 1.75, 0.0],
];

/// Four cans in two columns of two.
pub const LEVEL_TWO_OFFSETS: [[f32; 3]; 4] = [
    [-0.65, 0.62, 0.0],
    [-0.65, 1.75, 0.0],
    [0.65, 0.62, 0.0],
    [0.65, 1.75, 0.0],
];

/// Where each can of a level starts, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLevel {
    pub can_positions: Vec<Vec3>,
}

impl GameLevel {
    pub fn from_offsets(anchor: Vec3, offsets: &[[f32; 3]]) -> Self {
        Self {
            can_positions: offsets
                .iter()
                .map(|offset| anchor + Vec3::from_array(*offset))
                .collect(),
        }
    }

    #[inline]
    pub fn can_count(&self) -> usize {
        self.can_positions.len()
    }
}

/// Every level in play order.  Built once at startup and never mutated.
#[derive(Resource, Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<GameLevel>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<GameLevel>) -> SceneResult<Self> {
        if levels.is_empty() {
            return Err(SceneError::EmptyLevelCatalog);
        }
        Ok(Self { levels })
    }

    /// The built-in layouts, positioned relative to `anchor`.
    pub fn from_anchor(anchor: Vec3) -> SceneResult<Self> {
        Self::new(vec![
            GameLevel::from_offsets(anchor, &LEVEL_ONE_OFFSETS),
            GameLevel::from_offsets(anchor, &LEVEL_TWO_OFFSETS),
        ])
    }

    pub fn level(&self, index: usize) -> SceneResult<&GameLevel> {
        self.levels.get(index).ok_or(SceneError::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Startup system: build the catalog from the shelf node of the level scene.
pub fn build_level_catalog(mut commands: Commands, library: Res<SceneLibrary>) -> Result {
    let anchor = library.shelf()?.translation();
    let catalog = LevelCatalog::from_anchor(anchor)?;
    info!(
        "Built level catalog: {} levels around shelf at {:?}",
        catalog.len(),
        anchor
    );
    commands.insert_resource(catalog);
    Ok(())
}
