//=========================================================================
// Collaborators
//=========================================================================
//
// Narrow interfaces to the audio and rendering services the gameplay core
// consumes. The core never owns a device; it is handed these at
// construction (audio) or per draw call (renderer).
//
// Architecture:
// ```text
//   PlayMode ──sample_index / sample_count──> AudioLoop   (rhythm source)
//            ──set_position─────────────────> AudioLoop   (3D panning)
//            ──set_position_right───────────> Listener    (camera ears)
//            ──set_beat_pulse / draw_*──────> Renderer    (per frame)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::scene::{Camera, SceneGraph};

//=== Audio ===============================================================

/// Handle to the looping background track.
pub trait AudioLoop: Send {
    /// Current playback position in samples.
    fn sample_index(&self) -> usize;

    /// Length of the loop in samples.
    fn sample_count(&self) -> usize;

    /// Moves the sound source (world space).
    fn set_position(&mut self, position: Vec3);
}

/// The 3D audio listener.
pub trait Listener: Send {
    /// Places the listener at `position` with `right` as its ear axis.
    fn set_position_right(&mut self, position: Vec3, right: Vec3);
}

//=== Rendering ===========================================================

/// Per-frame drawing surface.
pub trait Renderer {
    /// Beat-driven shader parameter, `0..=1`.
    fn set_beat_pulse(&mut self, pulse: f32);

    fn draw_scene(&mut self, scene: &SceneGraph, camera: &Camera);

    /// Overlay text drawn on top of the scene.
    fn draw_text(&mut self, text: &str);
}

//=== Collaborators =======================================================

/// Services injected into the gameplay core at construction.
pub struct Collaborators {
    pub music: Box<dyn AudioLoop>,
    pub listener: Box<dyn Listener>,
}

impl Collaborators {
    pub fn new(music: impl AudioLoop + 'static, listener: impl Listener + 'static) -> Self {
        Self {
            music: Box::new(music),
            listener: Box::new(listener),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("sample_index", &self.music.sample_index())
            .field("sample_count", &self.music.sample_count())
            .finish_non_exhaustive()
    }
}
