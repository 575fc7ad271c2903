//=========================================================================
// Input System
//
// Platform-independent input types and the game's key bindings.
//
// Responsibilities:
// - Represent keyboard and mouse input without winit types
// - Track held state and per-frame press edges for bound keys
//
// Notes:
// Events reach the active mode one at a time through
// `Mode::handle_event`; the mode owns its `Controls` and clears their
// edge counters at the end of each update.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod button;
pub mod event;

//=== Public API ==========================================================

pub use button::{Button, Controls};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
