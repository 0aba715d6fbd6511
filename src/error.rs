//! Scene and level error types.
//!
//! Every named scene asset and node the game relies on is required.  Lookups
//! return [`SceneResult`] so a missing file, a renamed node, or an empty level
//! table is reported with enough context to fix the asset, and startup halts
//! before gameplay begins.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use can_bully::error::SceneResult;
//!
//! fn shelf_anchor(library: &SceneLibrary) -> SceneResult<Vec3> {
//!     let shelf = library.level.find_node("shelf")?;
//!     Ok(shelf.translation())
//! }
//! ```

use std::fmt;

/// Top-level error enum for scene loading and level setup.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A scene file could not be read from disk.
    AssetNotFound {
        /// Path that was tried, including the asset directory.
        path: String,
    },

    /// A scene file was read but is not a valid scene description.
    AssetParse {
        path: String,
        /// Parser message, usually with line and column.
        message: String,
    },

    /// A required node is missing from a scene's node tree.
    NodeNotFound {
        /// Name of the scene that was searched.
        scene: String,
        /// Node name that was looked up.
        node: String,
    },

    /// A node that needs geometry (to build a collider from) has no shape.
    MissingShape {
        scene: String,
        node: String,
    },

    /// A scene graph root was expected in the world but has not been spawned.
    SceneNotSpawned {
        scene: &'static str,
    },

    /// The level catalog has no entries.
    EmptyLevelCatalog,

    /// The session points at a level the catalog does not have.
    LevelOutOfRange {
        index: usize,
        len: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::AssetNotFound { path } => {
                write!(f, "required scene asset '{}' not found", path)
            }
            SceneError::AssetParse { path, message } => {
                write!(f, "failed to parse scene asset '{}': {}", path, message)
            }
            SceneError::NodeNotFound { scene, node } => {
                write!(f, "scene '{}' has no node named '{}'", scene, node)
            }
            SceneError::MissingShape { scene, node } => {
                write!(f, "node '{}' in scene '{}' has no shape", node, scene)
            }
            SceneError::SceneNotSpawned { scene } => {
                write!(f, "scene '{}' has not been spawned into the world", scene)
            }
            SceneError::EmptyLevelCatalog => write!(f, "level catalog is empty"),
            SceneError::LevelOutOfRange { index, len } => write!(
                f,
                "level index {} is out of range (catalog has {} levels)",
                index, len
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Convenience alias: a `Result` using `SceneError` as the error type.
pub type SceneResult<T> = Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_names_scene_and_node() {
        let err = SceneError::NodeNotFound {
            scene: "level".into(),
            node: "shelf".into(),
        };
        assert_eq!(err.to_string(), "scene 'level' has no node named 'shelf'");
    }

    #[test]
    fn level_out_of_range_reports_catalog_size() {
        let err = SceneError::LevelOutOfRange { index: 5, len: 2 };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("2 levels"));
    }
}
