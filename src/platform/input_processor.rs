//=========================================================================
// Input Processor
//=========================================================================
//
// Turns winit key and mouse-button transitions into `InputEvent`s.
//
// ```text
//   ModifiersChanged ──> held modifier state ─┐
//   KeyboardInput ──(repeat? unbound?)────────┼──> InputEvent ──> InputBuffer
//   MouseInput ───────────────────────────────┘
// ```
//
// Only the keys `KeyCode` names survive translation; every other key and
// every auto-repeat is dropped here, so the core never sees them. Cursor
// and raw motion bypass the processor and go straight into the buffer.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

/// Stamps transitions with the modifier state last reported by winit.
pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    pub(crate) fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Translation ------------------------------------------------------

    /// Translates a keyboard event. Repeats and unbound keys give `None`.
    pub(crate) fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }
        self.key_transition(event.physical_key, event.state)
    }

    fn key_transition(&self, physical: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = physical else {
            return None;
        };
        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        let modifiers = self.modifiers;
        Some(if state.is_pressed() {
            InputEvent::KeyDown { key, modifiers }
        } else {
            InputEvent::KeyUp { key, modifiers }
        })
    }

    /// Translates a mouse button transition. Every button is kept.
    pub(crate) fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        if state.is_pressed() {
            InputEvent::MouseButtonDown { button, modifiers }
        } else {
            InputEvent::MouseButtonUp { button, modifiers }
        }
    }
}

//=== Winit Conversions ===================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Movement, jump, replay and pointer release; anything else is
/// `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::KeyW => Self::KeyW,
            WinitKeyCode::KeyA => Self::KeyA,
            WinitKeyCode::KeyS => Self::KeyS,
            WinitKeyCode::KeyD => Self::KeyD,
            WinitKeyCode::KeyR => Self::KeyR,
            WinitKeyCode::Space => Self::Space,
            WinitKeyCode::Escape => Self::Escape,
            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
