//=========================================================================
// Host Collaborators
//=========================================================================
//
// Stand-ins for the audio and rendering services, good enough to run the
// game in a plain window.
//
// - `ClockedLoop`: playback position advancing with wall time
// - `SilentListener`: remembers the last listener pose
// - `OverlayRecorder`: captures what a frame would draw into a
//   `FrameOutput` for the platform thread
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use glam::Vec3;
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::FrameOutput;
use crate::game::collaborators::{AudioLoop, Listener, Renderer};
use crate::game::scene::{Camera, SceneGraph};

//=== ClockedLoop =========================================================

/// Looping track whose playback position follows the wall clock.
#[derive(Debug, Clone)]
pub struct ClockedLoop {
    started: Instant,
    sample_rate: u32,
    sample_count: usize,
    position: Vec3,
}

impl ClockedLoop {
    /// Starts a loop of `track_length` at `sample_rate` Hz.
    pub fn start(sample_rate: u32, track_length: Duration) -> Self {
        let sample_count = (track_length.as_secs_f64() * f64::from(sample_rate)).round() as usize;
        Self {
            started: Instant::now(),
            sample_rate,
            sample_count,
            position: Vec3::ZERO,
        }
    }

    /// Last source position reported by the game.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn samples_played(&self) -> usize {
        (self.started.elapsed().as_secs_f64() * f64::from(self.sample_rate)) as usize
    }
}

impl AudioLoop for ClockedLoop {
    fn sample_index(&self) -> usize {
        match self.sample_count {
            0 => 0,
            n => self.samples_played() % n,
        }
    }

    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

//=== SilentListener ======================================================

/// Listener that only records where it was placed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SilentListener {
    pub position: Vec3,
    pub right: Vec3,
}

impl Listener for SilentListener {
    fn set_position_right(&mut self, position: Vec3, right: Vec3) {
        if position != self.position {
            trace!("Listener at {:?}", position);
        }
        self.position = position;
        self.right = right;
    }
}

//=== OverlayRecorder =====================================================

/// Renderer that records the frame instead of drawing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayRecorder {
    pub pulse: f32,
    pub text: String,
    pub visible_objects: usize,
}

impl OverlayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages the recorded frame for the platform thread.
    pub fn into_frame(self, pointer_lock: bool) -> FrameOutput {
        FrameOutput {
            status: self.text,
            pulse: self.pulse,
            pointer_lock,
            visible_objects: self.visible_objects,
        }
    }
}

impl Renderer for OverlayRecorder {
    fn set_beat_pulse(&mut self, pulse: f32) {
        self.pulse = pulse.clamp(0.0, 1.0);
    }

    fn draw_scene(&mut self, scene: &SceneGraph, _camera: &Camera) {
        self.visible_objects = scene.visible_count();
    }

    fn draw_text(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(text);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
