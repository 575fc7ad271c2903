//=========================================================================
// Gameplay Core
//=========================================================================
//
// The rhythm-platformer simulation, independent of window and threads.
//
// Layering (leaf-first):
// ```text
//   geometry   Aabb, overlap, closest face
//   rhythm     playback position → jump gate + pulse
//   kinematics jump/fall integrator
//   collision  platform sweep, support, gems
//   level      JSON level → SceneGraph + validated roles
//   play_mode  lifecycle, scoring, the `Mode` implementation
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collaborators;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod kinematics;
pub mod level;
pub mod play_mode;
pub mod rhythm;
pub mod scene;

//=== Public API ==========================================================

pub use collaborators::{AudioLoop, Collaborators, Listener, Renderer};
pub use config::{GameConfig, JumpConfig, RhythmConfig};
pub use geometry::{intersects, resolve, Aabb, CollisionResult};
pub use kinematics::{JumpPhase, PlayerKinematicState};
pub use level::{Level, LevelBinding, LevelDescription, LevelError};
pub use play_mode::{Lifecycle, PlayMode, ResetReason};
pub use rhythm::{RhythmClock, RhythmState};
pub use scene::{Camera, ObjectId, SceneGraph, SceneObject, Transform};
