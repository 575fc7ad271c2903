//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the platform channel with bounded polling and
// shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → events + resize → TickControl
//
// Bounded polling keeps a flooded channel from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use glam::UVec2;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events for one tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
    resized: Option<UVec2>,
}

impl EventCollector {
    const MAX_MESSAGES_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(32),
            resized: None,
        }
    }

    /// Drains pending platform messages (bounded).
    ///
    /// Input events are flattened in arrival order, discrete before
    /// continuous within each platform frame. Only the latest resize is
    /// kept.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.events.clear();
        self.resized = None;
        let mut drained = 0;

        while drained < Self::MAX_MESSAGES_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(message) => {
                    if self.handle_message(message) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_MESSAGES_PER_FRAME {
            warn!("Event queue backlog: drained {} messages this frame", drained);
        }

        TickControl::Continue
    }

    /// Input events collected this frame.
    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Latest drawable size reported this frame, if any.
    pub(crate) fn resized(&self) -> Option<UVec2> {
        self.resized
    }

    fn handle_message(&mut self, message: PlatformEvent) -> TickControl {
        match message {
            PlatformEvent::Inputs { discrete, continuous } => {
                self.events.extend(discrete);
                self.events.extend(continuous);
                TickControl::Continue
            }
            PlatformEvent::Resized(size) => {
                debug!("Drawable resized to {}x{}", size.x, size.y);
                self.resized = Some(size);
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
