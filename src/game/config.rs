//=========================================================================
// Gameplay Tuning
//=========================================================================
//
// Every constant the simulation depends on, grouped by subsystem.
//
// Loaded from the optional `"tuning"` object of a level file. Missing
// fields fall back to the defaults below, so an empty object (or no
// object at all) yields the stock tuning.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::{Deserialize, Serialize};

//=== JumpConfig ==========================================================

/// Constants of the vertical integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Downward acceleration (units/s²).
    pub gravity: f32,

    /// Launch velocity gained per second of charge.
    pub jump_factor: f32,

    /// Longest charge that still increases launch velocity (seconds).
    pub max_press_time: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            jump_factor: 45.0,
            max_press_time: 0.13,
        }
    }
}

//=== RhythmConfig ========================================================

/// Musical structure of the background loop.
///
/// The loop is split into `measure_groups * measures_per_group` equal
/// measures. Even measures allow jumping, odd ones forbid it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhythmConfig {
    pub measure_groups: u32,
    pub measures_per_group: u32,

    /// Leading fraction of a forbidden measure during which the visual
    /// pulse fades from 1 to 0.
    pub pulse_window: f32,
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            measure_groups: 8,
            measures_per_group: 4,
            pulse_window: 1.0 / 3.0,
        }
    }
}

impl RhythmConfig {
    /// Total measures in one pass of the loop (at least one).
    pub fn total_measures(&self) -> u32 {
        self.measure_groups
            .saturating_mul(self.measures_per_group)
            .max(1)
    }
}

//=== GameConfig ==========================================================

/// Complete gameplay tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub jump: JumpConfig,
    pub rhythm: RhythmConfig,

    /// Horizontal speed (units/s), independent of direction.
    pub move_speed: f32,

    /// Level duration in seconds before an automatic reset.
    pub end_time: f32,

    /// World Z below which the player dies.
    pub death_z: f32,

    /// Score for each collected gem.
    pub gem_bonus: u32,

    /// Win bonus per second left on the clock.
    pub win_bonus_per_second: f32,

    /// Clearance left between the player and a surface after correction.
    pub recollide_offset: f32,

    /// Highest gap above a platform top that still counts as standing on it.
    pub support_tolerance: f32,

    /// Camera position relative to the player.
    pub camera_offset: Vec3,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            jump: JumpConfig::default(),
            rhythm: RhythmConfig::default(),
            move_speed: 10.0,
            end_time: 80.0,
            death_z: -10.0,
            gem_bonus: 50,
            win_bonus_per_second: 10.0,
            recollide_offset: 0.05,
            support_tolerance: 0.1,
            camera_offset: Vec3::new(0.0, -12.0, 8.0),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
