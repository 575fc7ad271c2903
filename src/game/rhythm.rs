//=========================================================================
// Rhythm Clock
//=========================================================================
//
// Maps the looping track's playback position to a measure index and an
// intra-measure phase, and from those to the jump gate and the visual
// pulse.
//
// Flow (every frame):
//   (sample_index, sample_count) ──sample()──> RhythmState
//
// The clock keeps no state between frames: the same playback position
// always produces the same RhythmState.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::RhythmConfig;

//=== RhythmState =========================================================

/// Rhythm-derived values for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmState {
    /// Measure the playback position falls in, `0..total_measures`.
    pub measure_index: u32,

    /// Progress through the pulse window at the start of the measure,
    /// clamped to `0..=1`.
    pub beat_phase: f32,

    /// Jump gate: open on even measures.
    pub can_jump: bool,

    /// Shader pulse: fades 1 → 0 across the pulse window of a forbidden
    /// measure, 0 everywhere else.
    pub pulse: f32,
}

impl Default for RhythmState {
    fn default() -> Self {
        Self {
            measure_index: 0,
            beat_phase: 0.0,
            can_jump: true,
            pulse: 0.0,
        }
    }
}

//=== RhythmClock =========================================================

/// Pure mapping from playback position to [`RhythmState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmClock {
    config: RhythmConfig,
}

impl RhythmClock {
    pub fn new(config: RhythmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RhythmConfig {
        &self.config
    }

    /// Computes the rhythm state at `sample_index` of a loop of
    /// `sample_count` samples.
    ///
    /// Indices past the end wrap around. An empty loop reports the first
    /// measure.
    pub fn sample(&self, sample_index: usize, sample_count: usize) -> RhythmState {
        if sample_count == 0 {
            return RhythmState::default();
        }

        let total = self.config.total_measures();
        let fraction = (sample_index % sample_count) as f64 / sample_count as f64;
        let position = fraction * f64::from(total);

        let measure_index = (position.floor() as u32).min(total - 1);
        let phase = (position - f64::from(measure_index)) as f32;

        let can_jump = measure_index % 2 == 0;
        let beat_phase = if self.config.pulse_window > 0.0 {
            (phase / self.config.pulse_window).min(1.0)
        } else {
            1.0
        };
        let pulse = if can_jump { 0.0 } else { 1.0 - beat_phase };

        RhythmState {
            measure_index,
            beat_phase,
            can_jump,
            pulse,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
