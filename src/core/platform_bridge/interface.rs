//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages exchanged between the platform (main) thread and the core
// (logic) thread, and the platform's error type.
//
// ```text
//   Platform ──PlatformEvent──> Core
//   Platform <──FrameOutput──── Core
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Input collected during one platform frame.
    ///
    /// `discrete` keeps key and button transitions in arrival order.
    /// `continuous` holds at most the last cursor position and the
    /// motion accumulated over the frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Drawable size changed (physical pixels).
    Resized(UVec2),

    /// Window close requested.
    WindowClosed,
}

//=== FrameOutput =========================================================

/// What the core wants shown after a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Overlay text; the platform shows it as the window title.
    pub status: String,

    /// Beat pulse, `0..=1`.
    pub pulse: f32,

    /// Whether the cursor should be captured.
    pub pointer_lock: bool,

    /// Drawables flagged visible this frame.
    pub visible_objects: usize,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// Fatal: without an event loop there is nothing to run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}
