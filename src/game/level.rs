//=========================================================================
// Level Description & Binding
//=========================================================================
//
// Loads a level from JSON and binds gameplay roles to scene indices.
//
// Flow (once, at construction):
// ```text
// level.json ──serde──> LevelDescription ──to_scene()────> SceneGraph
//                                │                            │
//                                └──────── LevelBinding::bind ┘
//                                               │
//                                   player, goal, camera,
//                                   platforms[0..N], gems[0..M]
// ```
//
// Object names are interpreted here and nowhere else. The simulation only
// ever sees the validated index arrays of [`LevelBinding`].
//
// Naming convention:
// - `Player`, `Goal`: unique roles
// - `Platform<k>`, `Gem<k>`: slot `k` of the platform/gem arrays
// - anything else: decoration, drawn but never collided
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::path::Path;

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::geometry::Aabb;
use super::scene::{Camera, ObjectId, SceneGraph, SceneObject, Transform};

//=== LevelError ==========================================================

/// Configuration errors detected while loading or binding a level.
///
/// None of these is recoverable: the game cannot run on a partial level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Platform{0} not found")]
    MissingPlatform(usize),

    #[error("Gem{0} not found")]
    MissingGem(usize),

    #[error("Player not found")]
    MissingPlayer,

    #[error("Goal not found")]
    MissingGoal,

    #[error("expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),

    #[error("scene object {0:?} appears more than once")]
    DuplicateEntity(String),

    #[error("{name} is out of range, the level declares {expected}")]
    IndexOutOfRange { name: String, expected: usize },
}

//=== Description =========================================================

fn default_visible() -> bool {
    true
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_fovy() -> f32 {
    std::f32::consts::FRAC_PI_3
}

/// One scene object as written in the level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "Quat::default")]
    pub rotation: Quat,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub bounds: Aabb,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// One camera as written in the level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "Quat::default")]
    pub rotation: Quat,
    /// Vertical field of view in radians.
    #[serde(default = "default_fovy")]
    pub fovy: f32,
}

/// Complete level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub expected_platforms: usize,
    #[serde(default)]
    pub expected_gems: usize,
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub cameras: Vec<CameraDescription>,
    #[serde(default)]
    pub tuning: GameConfig,
}

impl LevelDescription {
    //--- Loading ----------------------------------------------------------

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        info!("Loading level from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    //--- Conversion -------------------------------------------------------

    /// Builds the scene graph described by this level.
    pub fn to_scene(&self) -> SceneGraph {
        let objects = self
            .objects
            .iter()
            .map(|o| SceneObject {
                name: o.name.clone(),
                transform: Transform {
                    position: o.position,
                    rotation: o.rotation.normalize(),
                    scale: o.scale,
                },
                bounds: o.bounds,
                visible: o.visible,
            })
            .collect();

        let cameras = self
            .cameras
            .iter()
            .map(|c| Camera {
                name: c.name.clone(),
                transform: Transform {
                    position: c.position,
                    rotation: c.rotation.normalize(),
                    scale: Vec3::ONE,
                },
                fovy: c.fovy,
                aspect: 1.0,
            })
            .collect();

        SceneGraph::new(objects, cameras)
    }
}

//=== Name Adapter ========================================================

/// Gameplay role encoded in an object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Goal,
    Platform(usize),
    Gem(usize),
    Decoration,
}

impl Role {
    /// Parses a role from an object name.
    ///
    /// Numeric suffixes must be plain decimal digits; `Platform` followed
    /// by anything else is decoration.
    pub fn from_name(name: &str) -> Self {
        fn indexed(name: &str, prefix: &str) -> Option<usize> {
            let suffix = name.strip_prefix(prefix)?;
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            suffix.parse().ok()
        }

        match name {
            "Player" => Role::Player,
            "Goal" => Role::Goal,
            _ => {
                if let Some(k) = indexed(name, "Platform") {
                    Role::Platform(k)
                } else if let Some(k) = indexed(name, "Gem") {
                    Role::Gem(k)
                } else {
                    Role::Decoration
                }
            }
        }
    }
}

//=== LevelBinding ========================================================

/// Validated gameplay roles inside a [`SceneGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBinding {
    pub player: ObjectId,
    pub goal: ObjectId,
    /// Platform `k` lives at `platforms[k]`.
    pub platforms: Vec<ObjectId>,
    /// Gem `k` lives at `gems[k]`.
    pub gems: Vec<ObjectId>,
    pub camera: usize,
}

impl LevelBinding {
    /// Binds every role, failing on the first missing or conflicting one.
    pub fn bind(scene: &SceneGraph, expected_platforms: usize, expected_gems: usize) -> Result<Self, LevelError> {
        let mut player = None;
        let mut goal = None;
        let mut platforms: Vec<Option<ObjectId>> = vec![None; expected_platforms];
        let mut gems: Vec<Option<ObjectId>> = vec![None; expected_gems];

        for (id, object) in scene.iter() {
            let name = object.name.as_str();
            let slot = match Role::from_name(name) {
                Role::Player => &mut player,
                Role::Goal => &mut goal,
                Role::Platform(k) => slot_mut(&mut platforms, k, name)?,
                Role::Gem(k) => slot_mut(&mut gems, k, name)?,
                Role::Decoration => {
                    if name.starts_with("Platform") || name.starts_with("Gem") {
                        warn!("Scene object {name:?} looks like a role but has no index; drawn as decoration");
                    } else {
                        debug!("Decoration {name:?}");
                    }
                    continue;
                }
            };
            if slot.replace(id).is_some() {
                return Err(LevelError::DuplicateEntity(name.to_owned()));
            }
        }

        let platforms = platforms
            .into_iter()
            .enumerate()
            .map(|(k, id)| id.ok_or(LevelError::MissingPlatform(k)))
            .collect::<Result<Vec<_>, _>>()?;
        let player = player.ok_or(LevelError::MissingPlayer)?;

        let camera_count = scene.cameras().len();
        if camera_count != 1 {
            return Err(LevelError::CameraCount(camera_count));
        }

        let goal = goal.ok_or(LevelError::MissingGoal)?;
        let gems = gems
            .into_iter()
            .enumerate()
            .map(|(k, id)| id.ok_or(LevelError::MissingGem(k)))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Level bound: {} platforms, {} gems, {} objects total",
            platforms.len(),
            gems.len(),
            scene.objects().len()
        );

        Ok(Self {
            player,
            goal,
            platforms,
            gems,
            camera: 0,
        })
    }
}

fn slot_mut<'a>(
    slots: &'a mut [Option<ObjectId>],
    index: usize,
    name: &str,
) -> Result<&'a mut Option<ObjectId>, LevelError> {
    let expected = slots.len();
    slots.get_mut(index).ok_or_else(|| LevelError::IndexOutOfRange {
        name: name.to_owned(),
        expected,
    })
}

//=== Level ===============================================================

/// A loaded, bound level ready to play.
#[derive(Debug, Clone)]
pub struct Level {
    pub scene: SceneGraph,
    pub binding: LevelBinding,
    pub config: GameConfig,
}

impl Level {
    pub fn load(description: &LevelDescription) -> Result<Self, LevelError> {
        let scene = description.to_scene();
        let binding = LevelBinding::bind(&scene, description.expected_platforms, description.expected_gems)?;
        Ok(Self {
            scene,
            binding,
            config: description.tuning,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
