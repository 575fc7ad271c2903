//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use rhythm_platformer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::mode::Mode;
pub use crate::core::platform_bridge::{FrameOutput, PlatformError};

// Input
pub use crate::core::input::{Button, Controls, InputEvent, KeyCode, Modifiers, MouseButton};

// Gameplay
pub use crate::game::{
    AudioLoop, Collaborators, GameConfig, LevelDescription, LevelError, Lifecycle, Listener, PlayMode,
    Renderer, ResetReason,
};

// Stand-in collaborators
pub use crate::host::{ClockedLoop, OverlayRecorder, SilentListener};
