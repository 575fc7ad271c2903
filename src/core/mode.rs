//=========================================================================
// Mode
//=========================================================================
//
// The interface between the logic-thread loop and whatever is being
// played.
//
// Flow (one tick):
//   handle_event() × N → update(elapsed) → draw(size, renderer)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::UVec2;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::game::collaborators::Renderer;

//=== Mode Trait ==========================================================

/// A running game mode driven by the core orchestrator.
///
/// All three entry points are called from the logic thread only, never
/// concurrently and never re-entrantly.
pub trait Mode: Send {
    /// Reacts to one input event. Returns `true` if the event was consumed.
    ///
    /// May be called any number of times between two updates.
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool;

    /// Advances the simulation by `elapsed` seconds.
    fn update(&mut self, elapsed: f32);

    /// Renders the current state.
    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer);

    /// Whether the pointer should be captured for relative mouse motion.
    fn wants_pointer_lock(&self) -> bool {
        false
    }
}
