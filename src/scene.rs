//! TOML scene descriptions, the scene library, and scene-graph spawning.
//!
//! A scene file is a named tree of nodes.  Each node has a transform and may
//! carry a primitive shape and a material:
//!
//! ```toml
//! [scene]
//! name = "can"
//!
//! [[nodes]]
//! name = "can"
//! shape = { kind = "cylinder", radius = 0.33, height = 1.25 }
//! material = { color = [0.9, 0.9, 0.9], texture = "textures/can_diffuse_1.png" }
//! ```
//!
//! [`SceneLibrary`] holds the four scenes the game needs and checks at load
//! time that every node the controller looks up is present.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::config::GameConfig;
use crate::constants::{BALL_TEMPLATE_NODE, CAMERA_NODE, CAN_NODE, HUD_NODE, SHELF_NODE};
use crate::error::{SceneError, SceneResult};

// ── File format ───────────────────────────────────────────────────────────────

/// Root structure of a scene TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneAsset {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
}

/// One node of a scene tree.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub translation: [f32; 3],
    /// XYZ euler angles in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub shape: Option<NodeShape>,
    #[serde(default)]
    pub material: Option<NodeMaterial>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Primitive geometry a node can render and collide with.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeShape {
    /// Flat rectangle in the local XY plane, facing +Z.
    Plane { width: f32, height: f32 },
    Cuboid { size: [f32; 3] },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
}

/// Surface appearance of a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeMaterial {
    pub color: [f32; 3],
    /// Texture path relative to the asset directory.
    pub texture: Option<String>,
    pub opacity: f32,
}

impl Default for NodeMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            texture: None,
            opacity: 1.0,
        }
    }
}

impl SceneNode {
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.translation)
    }

    pub fn transform(&self) -> Transform {
        let [x, y, z] = self.rotation;
        Transform {
            translation: self.translation(),
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            scale: Vec3::from_array(self.scale),
        }
    }

    /// Depth-first search of this node and its descendants.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Copy of this node with an independent material, used when an instance
    /// needs its own appearance.
    pub fn instance(&self) -> SceneNode {
        let mut node = self.clone();
        node.material = Some(self.material.clone().unwrap_or_default());
        node
    }
}

impl SceneAsset {
    /// Parse a scene from TOML source.  `origin` is only used in error messages.
    pub fn from_toml(source: &str, origin: &str) -> SceneResult<Self> {
        toml::from_str(source).map_err(|e| SceneError::AssetParse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|_| SceneError::AssetNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&source, &path.display().to_string())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.scene.name
    }

    /// Recursively find a node by name anywhere in the scene.
    pub fn find_node(&self, name: &str) -> SceneResult<&SceneNode> {
        self.nodes
            .iter()
            .find_map(|node| node.find(name))
            .ok_or_else(|| SceneError::NodeNotFound {
                scene: self.scene.name.clone(),
                node: name.to_string(),
            })
    }

    /// Like [`Self::find_node`] but absent nodes are not an error.
    pub fn try_node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find_map(|node| node.find(name))
    }
}

// ── Library ───────────────────────────────────────────────────────────────────

/// The four scenes the game is built from.
#[derive(Resource, Debug, Clone)]
pub struct SceneLibrary {
    pub menu: SceneAsset,
    pub level: SceneAsset,
    pub can: SceneAsset,
    pub ball: SceneAsset,
}

impl SceneLibrary {
    /// Load every scene named in `config` and check the required nodes.
    pub fn load(config: &GameConfig) -> SceneResult<Self> {
        let root = Path::new(&config.asset_dir);
        let library = Self {
            menu: SceneAsset::load(root.join(&config.menu_scene))?,
            level: SceneAsset::load(root.join(&config.level_scene))?,
            can: SceneAsset::load(root.join(&config.can_scene))?,
            ball: SceneAsset::load(root.join(&config.ball_scene))?,
        };
        library.validate()?;
        Ok(library)
    }

    /// Build a library from in-memory TOML sources.
    pub fn from_sources(menu: &str, level: &str, can: &str, ball: &str) -> SceneResult<Self> {
        let library = Self {
            menu: SceneAsset::from_toml(menu, "menu")?,
            level: SceneAsset::from_toml(level, "level")?,
            can: SceneAsset::from_toml(can, "can")?,
            ball: SceneAsset::from_toml(ball, "ball")?,
        };
        library.validate()?;
        Ok(library)
    }

    /// Fail on the first required node that is missing.
    pub fn validate(&self) -> SceneResult<()> {
        self.menu.find_node(HUD_NODE)?;
        self.level.find_node(CAMERA_NODE)?;
        let shelf = self.level.find_node(SHELF_NODE)?;
        if shelf.shape.is_none() {
            return Err(SceneError::MissingShape {
                scene: self.level.name().to_string(),
                node: SHELF_NODE.to_string(),
            });
        }
        self.can.find_node(CAN_NODE)?;
        self.ball.find_node(BALL_TEMPLATE_NODE)?;
        Ok(())
    }

    pub fn shelf(&self) -> SceneResult<&SceneNode> {
        self.level.find_node(SHELF_NODE)
    }

    pub fn level_camera(&self) -> SceneResult<&SceneNode> {
        self.level.find_node(CAMERA_NODE)
    }

    pub fn can_template(&self) -> SceneResult<&SceneNode> {
        self.can.find_node(CAN_NODE)
    }

    pub fn ball_template(&self) -> SceneResult<&SceneNode> {
        self.ball.find_node(BALL_TEMPLATE_NODE)
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Shape and material of a spawned node.  The view layer turns this into a
/// mesh and a material; nothing else reads it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub shape: NodeShape,
    pub material: NodeMaterial,
}

impl NodeVisual {
    pub fn of(node: &SceneNode) -> Option<Self> {
        node.shape.map(|shape| Self {
            shape,
            material: node.material.clone().unwrap_or_default(),
        })
    }
}

/// Spawn `node` and its descendants under `parent`, returning the entity
/// created for `node` itself.
pub fn spawn_node_tree(commands: &mut Commands, parent: Entity, node: &SceneNode) -> Entity {
    spawn_node(commands, parent, node, &mut None)
}

/// Spawn every top-level node of `asset` under `parent` and index the
/// resulting entities by node name.  The first node with a given name wins.
pub fn spawn_scene(
    commands: &mut Commands,
    parent: Entity,
    asset: &SceneAsset,
) -> HashMap<String, Entity> {
    let mut index = Some(HashMap::new());
    for node in &asset.nodes {
        spawn_node(commands, parent, node, &mut index);
    }
    index.unwrap_or_default()
}

fn spawn_node(
    commands: &mut Commands,
    parent: Entity,
    node: &SceneNode,
    index: &mut Option<HashMap<String, Entity>>,
) -> Entity {
    let mut entity = commands.spawn((
        Name::new(node.name.clone()),
        node.transform(),
        Visibility::Inherited,
        ChildOf(parent),
    ));
    if let Some(visual) = NodeVisual::of(node) {
        entity.insert(visual);
    }
    let id = entity.id();
    if let Some(index) = index.as_mut() {
        index.entry(node.name.clone()).or_insert(id);
    }

    for child in &node.children {
        spawn_node(commands, id, child, index);
    }
    id
}
