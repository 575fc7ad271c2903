//=========================================================================
// Buttons & Controls
//=========================================================================
//
// Level and edge tracking for the handful of keys the game binds.
//
// Architecture:
//   InputEvent → Controls::apply() → Button { downs, pressed } → query
//
// Frame lifecycle: apply() × N → update reads → end_frame()
//
// `pressed` persists across frames until the key is released. `downs`
// counts presses since the last `end_frame()`, so a tap that starts and
// ends between two updates is still seen.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== Button ==============================================================

/// One bound key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses since the last frame boundary.
    pub downs: u8,

    /// Currently held.
    pub pressed: bool,
}

impl Button {
    pub fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}

//=== Controls ============================================================

/// The game's key bindings: WASD movement, Space to jump, R to replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    pub jump: Button,
    pub reset: Button,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    fn button_mut(&mut self, key: KeyCode) -> Option<&mut Button> {
        match key {
            KeyCode::KeyA => Some(&mut self.left),
            KeyCode::KeyD => Some(&mut self.right),
            KeyCode::KeyW => Some(&mut self.up),
            KeyCode::KeyS => Some(&mut self.down),
            KeyCode::Space => Some(&mut self.jump),
            KeyCode::KeyR => Some(&mut self.reset),
            _ => None,
        }
    }

    /// Applies a key transition. Returns `true` if the key is bound.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, .. } => self.button_mut(*key).map(Button::press).is_some(),
            InputEvent::KeyUp { key, .. } => self.button_mut(*key).map(Button::release).is_some(),
            _ => false,
        }
    }

    /// Clears edge counters. Held state is kept.
    pub fn end_frame(&mut self) {
        for button in [
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.down,
            &mut self.jump,
            &mut self.reset,
        ] {
            button.downs = 0;
        }
    }

    /// Planar movement input in `-1..=1` per axis.
    ///
    /// Opposite keys cancel. The result is not normalized.
    pub fn move_axis(&self) -> Vec2 {
        fn axis(negative: Button, positive: Button) -> f32 {
            match (negative.pressed, positive.pressed) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        }
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
