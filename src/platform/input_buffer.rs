//=========================================================================
// Input Buffer
//
// Collects converted input events between two frame boundaries.
//
// Responsibilities:
// - Keep key and button transitions in arrival order
// - Coalesce cursor positions (last one wins)
// - Accumulate raw mouse motion into a single delta
// - Hand everything over at once via `drain()`
//
// Notes:
// The buffer lives on the platform thread and is drained on every
// `RedrawRequested`.
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<Vec2>,
    motion: Option<Vec2>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            cursor: None,
            motion: None,
        }
    }

    //--- Discrete Events --------------------------------------------------

    /// Appends a transition. An exact repeat of the previous one is
    /// dropped.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Continuous Events ------------------------------------------------

    /// Records the latest cursor position.
    pub(crate) fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some(Vec2::new(x, y));
    }

    /// Adds raw relative motion to this frame's total.
    pub(crate) fn add_motion(&mut self, dx: f32, dy: f32) {
        *self.motion.get_or_insert(Vec2::ZERO) += Vec2::new(dx, dy);
    }

    //--- Drain ------------------------------------------------------------

    /// Takes `(discrete, continuous)` for this frame, or `None` if nothing
    /// was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let mut continuous = Vec::with_capacity(2);
        if let Some(cursor) = self.cursor.take() {
            continuous.push(InputEvent::CursorMoved { x: cursor.x, y: cursor.y });
        }
        if let Some(motion) = self.motion.take() {
            continuous.push(InputEvent::MouseMotion { dx: motion.x, dy: motion.y });
        }
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.cursor.is_some()) + usize::from(self.motion.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
