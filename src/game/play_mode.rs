//=========================================================================
// Play Mode
//=========================================================================
//
// The gameplay simulation: one level instance from spawn to win.
//
// Per-frame phase order (update):
// ```text
//   1. rhythm      audio position → RhythmState → can_jump
//   2. lifecycle   replay / death / goal / timer / timeout
//   3. collision   platform sweep → support check → gem pickups
//   4. movement    horizontal step (unless walled) → vertical integrator
//   5. sync        camera follows player → audio source → listener
//   6. input       edge counters cleared
// ```
//
// Level lifecycle:
// ```text
//   Playing ──goal overlap──> Won ──R──> Playing (reset)
//      │ ↑
//      └─┘ death / timeout (reset)
// ```
//
// A reset restores the player's spawn transform, zeroes score, timer and
// kinematics, and reactivates every gem.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, UVec2, Vec2, Vec3};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::collaborators::{Collaborators, Renderer};
use super::collision::{check_support, sweep_platforms, Collectibles};
use super::config::GameConfig;
use super::geometry::intersects;
use super::kinematics::{horizontal_step, PlayerKinematicState};
use super::level::{Level, LevelBinding, LevelDescription, LevelError};
use super::rhythm::{RhythmClock, RhythmState};
use super::scene::{SceneGraph, Transform};
use crate::core::input::{Controls, InputEvent, KeyCode};
use crate::core::mode::Mode;

//=== Lifecycle ===========================================================

/// Level-instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Playing,
    Won,
}

/// Why a level reset happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    Death,
    Timeout,
    Replay,
}

//=== PlayMode ============================================================

/// Gameplay core for one bound level.
pub struct PlayMode {
    //--- Level ----------------------------------------------------------
    scene: SceneGraph,
    binding: LevelBinding,
    config: GameConfig,
    spawn: Transform,

    //--- Collaborators --------------------------------------------------
    collaborators: Collaborators,
    clock: RhythmClock,

    //--- Simulation State -----------------------------------------------
    controls: Controls,
    kinematics: PlayerKinematicState,
    rhythm: RhythmState,
    gems: Collectibles,
    lifecycle: Lifecycle,
    score: u32,
    timer: f32,

    //--- Host State -----------------------------------------------------
    pointer_locked: bool,
}

impl PlayMode {
    //--- Construction -----------------------------------------------------

    /// Loads and binds `description`, failing on any missing role.
    pub fn new(description: &LevelDescription, collaborators: Collaborators) -> Result<Self, LevelError> {
        Ok(Self::from_level(Level::load(description)?, collaborators))
    }

    /// Starts play on an already bound level.
    pub fn from_level(level: Level, collaborators: Collaborators) -> Self {
        let Level { scene, binding, config } = level;
        let spawn = scene.object(binding.player).transform;
        let gems = Collectibles::new(binding.gems.clone());

        info!(
            "Play mode ready: {} platforms, {} gems, {:.0}s on the clock",
            binding.platforms.len(),
            gems.len(),
            config.end_time
        );

        let mut mode = Self {
            scene,
            binding,
            config,
            spawn,
            collaborators,
            clock: RhythmClock::new(config.rhythm),
            controls: Controls::new(),
            kinematics: PlayerKinematicState::grounded(),
            rhythm: RhythmState::default(),
            gems,
            lifecycle: Lifecycle::Playing,
            score: 0,
            timer: 0.0,
            pointer_locked: false,
        };
        mode.sync_collaborators();
        mode
    }

    //--- Queries ----------------------------------------------------------

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds elapsed in the current attempt.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn kinematics(&self) -> &PlayerKinematicState {
        &self.kinematics
    }

    pub fn rhythm(&self) -> &RhythmState {
        &self.rhythm
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn gems(&self) -> &Collectibles {
        &self.gems
    }

    pub fn player_position(&self) -> Vec3 {
        self.scene.object(self.binding.player).transform.position
    }

    /// Overlay text for the current state.
    pub fn status_text(&self) -> String {
        match self.lifecycle {
            Lifecycle::Playing => {
                let time_left = (self.config.end_time - self.timer).max(0.0) as i64;
                format!(
                    "Mouse motion rotates camera; WASD moves; escape ungrabs mouse; Time left: {}; Score: {}",
                    time_left, self.score
                )
            }
            Lifecycle::Won => {
                format!("You won! You got: {} points! Press R to replay!", self.score)
            }
        }
    }

    //--- Reset ------------------------------------------------------------

    /// Returns the level to its initial state.
    pub fn reset_game(&mut self, reason: ResetReason) {
        info!("Level reset ({:?}) with score {} at {:.1}s", reason, self.score, self.timer);

        self.scene.object_mut(self.binding.player).transform = self.spawn;
        self.kinematics = PlayerKinematicState::grounded();
        self.gems.reset(&mut self.scene);
        self.lifecycle = Lifecycle::Playing;
        self.score = 0;
        self.timer = 0.0;
    }

    //--- Update Phases ----------------------------------------------------

    fn update_rhythm(&mut self) {
        let music = &self.collaborators.music;
        self.rhythm = self.clock.sample(music.sample_index(), music.sample_count());
        self.kinematics.can_jump = self.rhythm.can_jump;
    }

    /// Runs win, death and timer checks. Returns the reset performed, if any.
    fn update_lifecycle(&mut self, elapsed: f32) -> Option<ResetReason> {
        if self.lifecycle == Lifecycle::Won && self.controls.reset.downs > 0 {
            return Some(ResetReason::Replay);
        }

        if self.player_position().z < self.config.death_z {
            return Some(ResetReason::Death);
        }

        if self.lifecycle != Lifecycle::Playing {
            return None;
        }

        let player = self.scene.object(self.binding.player).world_bounds();
        let goal = self.scene.object(self.binding.goal).world_bounds();
        if intersects(&player, &goal) {
            let remaining = (self.config.end_time - self.timer).max(0.0);
            let bonus = (remaining * self.config.win_bonus_per_second).floor() as u32;
            self.score = self.score.saturating_add(bonus);
            self.lifecycle = Lifecycle::Won;
            info!("Goal reached with {:.1}s left, bonus {}, score {}", remaining, bonus, self.score);
            return None;
        }

        self.timer += elapsed;
        if self.timer >= self.config.end_time {
            return Some(ResetReason::Timeout);
        }
        None
    }

    fn update_collisions(&mut self) {
        let contacts = sweep_platforms(
            &mut self.scene,
            self.binding.player,
            &self.binding.platforms,
            &mut self.kinematics,
            self.config.recollide_offset,
        );
        if !contacts.is_empty() {
            trace!("{} platform contacts", contacts.len());
        }

        check_support(
            &self.scene,
            self.binding.player,
            &self.binding.platforms,
            &mut self.kinematics,
            self.config.support_tolerance,
        );

        let picked = self.gems.collect(&mut self.scene, self.binding.player);
        if picked > 0 {
            self.score = self.score.saturating_add(picked * self.config.gem_bonus);
            debug!("Score {} ({} gems left)", self.score, self.gems.remaining());
        }
    }

    fn update_movement(&mut self, elapsed: f32) {
        let step = if self.kinematics.walled {
            Vec2::ZERO
        } else {
            horizontal_step(self.controls.move_axis(), self.config.move_speed, elapsed)
        };
        let dz = self
            .kinematics
            .integrate_vertical(self.controls.jump.pressed, elapsed, &self.config.jump);

        self.scene.object_mut(self.binding.player).transform.position += Vec3::new(step.x, step.y, dz);
    }

    /// Moves the camera with the player and updates the audio collaborators.
    fn sync_collaborators(&mut self) {
        let player = self.player_position();
        let camera = self.scene.camera_mut(self.binding.camera);
        camera.transform.position = player + self.config.camera_offset;
        let (at, right) = (camera.transform.position, camera.transform.right());

        self.collaborators.music.set_position(player);
        self.collaborators.listener.set_position_right(at, right);
    }

    //--- Camera -----------------------------------------------------------

    /// Applies relative mouse motion to the camera orientation.
    fn rotate_camera(&mut self, dx: f32, dy: f32, window_size: UVec2) {
        let height = window_size.y.max(1) as f32;
        let motion = Vec2::new(dx / height, -dy / height);

        let camera = self.scene.camera_mut(self.binding.camera);
        let yaw = Quat::from_axis_angle(Vec3::Y, -motion.x * camera.fovy);
        let pitch = Quat::from_axis_angle(Vec3::X, motion.y * camera.fovy);
        camera.transform.rotation = (camera.transform.rotation * yaw * pitch).normalize();
    }
}

//=== Mode Implementation =================================================

impl Mode for PlayMode {
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool {
        match *event {
            InputEvent::KeyDown { key: KeyCode::Escape, .. } => {
                if self.pointer_locked {
                    debug!("Pointer released");
                }
                self.pointer_locked = false;
                true
            }
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => self.controls.apply(event),
            InputEvent::MouseButtonDown { .. } if !self.pointer_locked => {
                debug!("Pointer captured");
                self.pointer_locked = true;
                true
            }
            InputEvent::MouseMotion { dx, dy } if self.pointer_locked => {
                self.rotate_camera(dx, dy, window_size);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, elapsed: f32) {
        self.update_rhythm();

        if let Some(reason) = self.update_lifecycle(elapsed) {
            self.reset_game(reason);
        } else {
            self.update_collisions();
            self.update_movement(elapsed);
        }

        self.sync_collaborators();
        self.controls.end_frame();
    }

    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer) {
        let camera = self.scene.camera_mut(self.binding.camera);
        camera.aspect = drawable_size.x as f32 / drawable_size.y.max(1) as f32;

        renderer.set_beat_pulse(self.rhythm.pulse);
        renderer.draw_scene(&self.scene, self.scene.camera(self.binding.camera));
        renderer.draw_text(&self.status_text());
    }

    fn wants_pointer_lock(&self) -> bool {
        self.pointer_locked
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
