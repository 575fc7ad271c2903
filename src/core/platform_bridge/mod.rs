//=========================================================================
// Platform Bridge
//=========================================================================
//
// The contract between the winit platform layer and the core thread.
//
// Components:
// - `interface`: messages in both directions and the platform error
// - `event_collector`: core-side draining of the platform channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{FrameOutput, PlatformError, PlatformEvent};
