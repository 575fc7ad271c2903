//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the core thread over crossbeam
// channels, and applies what the core reports back to the window.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  CoreSystems         │
//  │   ↓                      │    │  Orchestrator        │
//  │  InputProcessor          │    │   ↓                  │
//  │   ├─ Converts Winit      │    │  Mode (PlayMode)     │
//  │   └─ Tracks modifiers    │    │   ↓                  │
//  │   ↓                      │    │  OverlayRecorder     │
//  │  InputBuffer             │    │                      │
//  │   ├─ discrete: Vec<>     │    └──────────────────────┘
//  │   └─ cursor + motion     │         ↑          │
//  │   ↓                      │         │          │
//  │  RedrawRequested ────────┼─────────┘          │
//  │   (PlatformEvent)        │                    │
//  │  apply FrameOutput <─────┼────────────────────┘
//  │   ├─ window title        │      FrameOutput
//  │   └─ cursor grab         │
//  └──────────────────────────┘
// ```
//
// Frame boundary is `RedrawRequested`: buffered input is sent as one
// message, then the newest frame from the core is applied. Empty input
// batches are not sent.
//
// Responsibilities:
// - Create and manage the OS window
// - Convert winit input (window and raw device events)
// - Report drawable size changes
// - Show the game status and lock the pointer on request
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use glam::UVec2;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{FrameOutput, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread (winit requirement on macOS/iOS). Input goes
/// out through `event_sender`; frames come back through `frame_receiver`.
///
/// The window is created lazily in `resumed()`.
pub(crate) struct Platform {
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    frame_receiver: Receiver<FrameOutput>,
    input_processor: InputProcessor,

    /// Title last applied, to skip redundant `set_title` calls.
    title: String,

    /// Whether the cursor is currently grabbed.
    pointer_locked: bool,
}

impl Platform {
    const WINDOW_TITLE: &'static str = "Rhythm Platformer";

    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>, frame_receiver: Receiver<FrameOutput>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            frame_receiver,
            input_processor: InputProcessor::new(),
            title: String::new(),
            pointer_locked: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core thread as one `Inputs` message.
    ///
    /// A disconnected channel means the core already exited; the events
    /// are dropped and the window stays up so it can still be closed.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Newest frame waiting from the core, discarding older ones.
    fn latest_frame(&self) -> Option<FrameOutput> {
        self.frame_receiver.try_iter().last()
    }

    /// Applies a frame to the window: status as title, pointer lock.
    fn present(&mut self, frame: &FrameOutput) {
        let Some(window) = &self.window else {
            return;
        };

        let title = Self::title_for(&frame.status);
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }

        if frame.pointer_lock != self.pointer_locked {
            self.pointer_locked = Self::set_pointer_lock(window, frame.pointer_lock);
        }
    }

    fn title_for(status: &str) -> String {
        if status.is_empty() {
            return Self::WINDOW_TITLE.to_owned();
        }
        format!("{} | {}", Self::WINDOW_TITLE, status.replace('\n', " | "))
    }

    /// Grabs or releases the cursor. Returns the resulting lock state.
    ///
    /// `Locked` is not available everywhere, so `Confined` is tried next.
    fn set_pointer_lock(window: &Window, lock: bool) -> bool {
        if !lock {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!(target: "platform", "Cursor release failed: {}", e);
            }
            window.set_cursor_visible(true);
            debug!(target: "platform", "Pointer unlocked");
            return false;
        }

        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

        match grabbed {
            Ok(()) => {
                window.set_cursor_visible(false);
                debug!(target: "platform", "Pointer locked");
                true
            }
            Err(e) => {
                warn!(target: "platform", "Cursor grab failed: {}", e);
                false
            }
        }
    }

    fn send_resize(&self, size: PhysicalSize<u32>) {
        let size = UVec2::new(size.width, size.height);
        if self.event_sender.send(PlatformEvent::Resized(size)).is_err() {
            warn!(target: "platform", "Channel disconnected, dropping resize");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(Self::WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.send_resize(size);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.send_resize(*size);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.set_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.set_cursor(position.x as f32, position.y as f32);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.key(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(frame) = self.latest_frame() {
                    self.present(&frame);
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    /// Raw mouse motion, still reported while the cursor is locked.
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.buffer.add_motion(dx as f32, dy as f32);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
