//=========================================================================
// Core Systems Orchestrator
//
// Runs the active game mode on the logic (non-platform) thread.
//
// Responsibilities:
// - Receive platform events over the crossbeam channel
// - Feed them to the mode, then tick it at a fixed rate (TPS)
// - Record each frame and send the result back to the platform
//
// Flow (one tick):
// ```text
//   EventCollector::collect_frame()
//        ↓
//   Mode::handle_event() × N
//        ↓
//   Mode::update(elapsed)
//        ↓
//   Mode::draw() → OverlayRecorder → FrameOutput ──> platform
// ```
//
// Notes:
// The mode is owned by this thread. The platform never touches game
// state; it only sees FrameOutput.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TrySendError};
use glam::UVec2;
use log::{info, trace, warn};

//=== Submodules ==========================================================

pub mod input;
pub mod mode;
pub mod platform_bridge;

//=== Internal Modules ====================================================

use crate::host::OverlayRecorder;
use input::InputEvent;
use mode::Mode;
use platform_bridge::{EventCollector, FrameOutput, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns the running mode and drives it from the logic thread.
pub(crate) struct CoreSystemsOrchestrator {
    mode: Box<dyn Mode>,
    window_size: UVec2,
}

impl CoreSystemsOrchestrator {
    /// Longest step handed to `update`; stalls beyond it are dropped.
    const MAX_STEP: f32 = 0.1;

    //--- Construction -----------------------------------------------------

    pub fn new(mode: Box<dyn Mode>, window_size: UVec2) -> Self {
        Self { mode, window_size }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (exits on close/disconnect)
    //  2. Runs one mode tick
    //  3. Sends the frame to the platform
    //  4. Sleeps to maintain fixed pacing
    //
    pub fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<FrameOutput>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2: Tick the mode ---------------------------------
                let elapsed = frame_start.duration_since(last_tick).as_secs_f32();
                last_tick = frame_start;
                let frame = self.tick(collector.events(), collector.resized(), elapsed);

                //--- Step 3: Publish the frame -----------------------------
                match frames.try_send(frame) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => trace!("Platform behind, frame dropped"),
                    Err(TrySendError::Disconnected(_)) => {
                        info!("Platform gone, core thread exiting.");
                        break;
                    }
                }

                //--- Step 4: Maintain fixed pacing -------------------------
                let busy = frame_start.elapsed();
                if busy < frame_duration {
                    thread::sleep(frame_duration - busy);
                } else {
                    warn!("Tick overran budget: {:?} > {:?}", busy, frame_duration);
                }
            }
        })
    }

    //--- tick() -------------------------------------------------------------

    /// Runs one full tick on the mode and returns what should be shown.
    pub(crate) fn tick(&mut self, events: &[InputEvent], resized: Option<UVec2>, elapsed: f32) -> FrameOutput {
        if let Some(size) = resized {
            self.window_size = size;
        }

        for event in events {
            if !self.mode.handle_event(event, self.window_size) {
                trace!("Unhandled input: {:?}", event);
            }
        }

        self.mode.update(elapsed.min(Self::MAX_STEP));

        let mut recorder = OverlayRecorder::new();
        self.mode.draw(self.window_size, &mut recorder);
        recorder.into_frame(self.mode.wants_pointer_lock())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
