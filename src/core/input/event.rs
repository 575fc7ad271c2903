//=========================================================================
// Input Event Types
//
// Portable representation of the low-level input the game reacts to.
//
// The platform layer converts winit events into these types before they
// cross the thread boundary, so nothing past the platform bridge depends
// on winit.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    Mode::handle_event
//         ↓
//    Controls (level + edge buttons)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier, limited to the keys the game reads.
///
/// Keys are physical locations: `KeyW` is the same key on QWERTY and AZERTY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Move forward (+Y).
    KeyW,
    /// Move left (-X).
    KeyA,
    /// Move back (-Y).
    KeyS,
    /// Move right (+X).
    KeyD,
    /// Replay after a win.
    KeyR,
    /// Jump; held to charge.
    Space,
    /// Releases the pointer.
    Escape,

    /// Any other key.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,

    /// Ctrl, or Command on macOS.
    pub ctrl: bool,

    /// Alt, or Option on macOS.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: keyboard transitions (auto-repeat filtered out)
/// - **MouseButtonDown/MouseButtonUp**: mouse button transitions
/// - **CursorMoved**: absolute cursor position, window pixels
/// - **MouseMotion**: raw relative motion, reported even while the
///   pointer is locked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor position in window pixels (top-left origin).
    CursorMoved { x: f32, y: f32 },

    /// Relative motion in device units, +y pointing down.
    MouseMotion { dx: f32, dy: f32 },
}

impl InputEvent {
    /// Returns `true` for events whose payload is a position or a delta
    /// rather than a transition.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::CursorMoved { .. } | Self::MouseMotion { .. })
    }

    /// Modifier state carried by the event, if it has one.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => Some(*modifiers),
            Self::CursorMoved { .. } | Self::MouseMotion { .. } => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
