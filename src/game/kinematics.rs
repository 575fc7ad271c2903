//=========================================================================
// Jump / Fall Integrator
//=========================================================================
//
// Vertical motion of the player as a closed-form ballistic arc.
//
// State machine:
// ```text
//            jump held ∧ gate open ∧ ¬locked
//   Grounded ───────────────────────────────> Charging
//      ↑  │ walked off an edge                  │ released ∨ charge maxed
//      │  ↓                                     ↓
//      │ Falling                          AirborneLocked
//      │  │                                     │
//      └──┴───────────── floor contact ─────────┘
// ```
//
// Each frame the height offset is evaluated analytically at the previous
// and the new arc time and the player moves by the difference. While
// charging, the launch velocity grows between the two evaluations, which
// bends the arc upward without restarting it.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::debug;

//=== Internal Dependencies ===============================================

use super::config::JumpConfig;

//=== Arc =================================================================

/// Height reached `t` seconds after launching at vertical speed `v0z`.
///
/// `z(t) = -g/2 · t² + v0z · t`
pub fn arc_height(t: f32, v0z: f32, gravity: f32) -> f32 {
    -0.5 * gravity * t * t + v0z * t
}

//=== JumpPhase ===========================================================

/// Vertical state derived from the kinematic flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    /// Standing on a platform.
    Grounded,

    /// Jump held, launch velocity still growing.
    Charging,

    /// Launched; the charge is finished and cannot resume until landing.
    AirborneLocked,

    /// Left the ground without jumping; gravity only.
    Falling,
}

//=== PlayerKinematicState ================================================

/// Everything the integrator and the collision sweep know about the
/// player's motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerKinematicState {
    pub grounded: bool,
    pub jump_locked: bool,
    pub walled: bool,
    pub jumped: bool,

    /// Seconds the jump has been charged.
    pub cur_press_time: f32,

    /// Seconds since the current arc started.
    pub cur_jump_time: f32,

    /// Launch velocity of the current arc.
    pub cur_v0: Vec3,

    /// Rhythm gate for this frame.
    pub can_jump: bool,
}

impl Default for PlayerKinematicState {
    fn default() -> Self {
        Self::grounded()
    }
}

impl PlayerKinematicState {
    //--- Construction -----------------------------------------------------

    /// Standing still with nothing charged.
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            jump_locked: false,
            walled: false,
            jumped: false,
            cur_press_time: 0.0,
            cur_jump_time: 0.0,
            cur_v0: Vec3::ZERO,
            can_jump: false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> JumpPhase {
        match (self.grounded, self.jumped, self.jump_locked) {
            (true, _, _) => JumpPhase::Grounded,
            (false, false, _) => JumpPhase::Falling,
            (false, true, false) => JumpPhase::Charging,
            (false, true, true) => JumpPhase::AirborneLocked,
        }
    }

    //--- Contact Events ---------------------------------------------------

    /// Floor contact: back to a fresh grounded state.
    pub fn land(&mut self) {
        if !self.grounded {
            debug!("Landed after {:.3}s in the air", self.cur_jump_time);
        }
        self.grounded = true;
        self.jump_locked = false;
        self.walled = false;
        self.jumped = false;
        self.cur_press_time = 0.0;
        self.cur_jump_time = 0.0;
        self.cur_v0 = Vec3::ZERO;
    }

    /// Walked off an edge: start a zero-velocity fall.
    pub fn leave_ground(&mut self) {
        if !self.grounded {
            return;
        }
        debug!("Left the ground, falling");
        self.grounded = false;
        self.jumped = false;
        self.jump_locked = true;
        self.cur_press_time = 0.0;
        self.cur_jump_time = 0.0;
        self.cur_v0 = Vec3::ZERO;
    }

    //--- Integration ------------------------------------------------------

    /// Advances the vertical state by `dt` and returns the height change.
    pub fn integrate_vertical(&mut self, jump_held: bool, dt: f32, config: &JumpConfig) -> f32 {
        match self.phase() {
            JumpPhase::Grounded => {
                if jump_held && self.can_jump && !self.jump_locked {
                    debug!("Jump started");
                    self.grounded = false;
                    self.jumped = true;
                    self.cur_press_time = 0.0;
                    self.cur_jump_time = 0.0;
                    self.cur_v0 = Vec3::ZERO;
                    self.charge(dt, config)
                } else {
                    0.0
                }
            }
            JumpPhase::Charging => {
                if jump_held && self.cur_press_time < config.max_press_time {
                    self.charge(dt, config)
                } else {
                    debug!("Jump locked at {:.3}s of charge", self.cur_press_time);
                    self.jump_locked = true;
                    self.ballistic(dt, config)
                }
            }
            JumpPhase::AirborneLocked | JumpPhase::Falling => self.ballistic(dt, config),
        }
    }

    /// One charging step: grow the launch velocity, then advance the arc.
    fn charge(&mut self, dt: f32, config: &JumpConfig) -> f32 {
        let before = arc_height(self.cur_jump_time, self.cur_v0.z, config.gravity);

        self.cur_press_time = (self.cur_press_time + dt).min(config.max_press_time);
        self.cur_v0.z = self.cur_press_time * config.jump_factor;
        self.cur_jump_time += dt;

        if self.cur_press_time >= config.max_press_time {
            self.jump_locked = true;
        }

        arc_height(self.cur_jump_time, self.cur_v0.z, config.gravity) - before
    }

    /// One gravity-only step along the current arc.
    fn ballistic(&mut self, dt: f32, config: &JumpConfig) -> f32 {
        let before = arc_height(self.cur_jump_time, self.cur_v0.z, config.gravity);
        self.cur_jump_time += dt;
        arc_height(self.cur_jump_time, self.cur_v0.z, config.gravity) - before
    }
}

//=== Horizontal Motion ===================================================

/// Planar displacement for a movement input.
///
/// The input is normalized so diagonals are no faster than straight moves.
pub fn horizontal_step(input: Vec2, speed: f32, dt: f32) -> Vec2 {
    input.normalize_or_zero() * speed * dt
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    fn ready() -> PlayerKinematicState {
        PlayerKinematicState {
            can_jump: true,
            ..PlayerKinematicState::grounded()
        }
    }

    //=====================================================================
    // Arc
    //=====================================================================

    #[test]
    fn arc_matches_closed_form() {
        assert_eq!(arc_height(0.0, 5.0, 9.81), 0.0);
        assert_abs_diff_eq!(arc_height(1.0, 5.0, 9.81), 5.0 - 4.905, epsilon = 1e-6);
    }

    #[test]
    fn ballistic_deltas_sum_to_closed_form() {
        let config = JumpConfig::default();
        let mut state = PlayerKinematicState {
            grounded: false,
            jumped: true,
            jump_locked: true,
            cur_v0: Vec3::new(0.0, 0.0, 5.0),
            ..PlayerKinematicState::grounded()
        };
        let total: f32 = (0..60).map(|_| state.integrate_vertical(false, DT, &config)).sum();
        assert_abs_diff_eq!(total, arc_height(state.cur_jump_time, 5.0, 9.81), epsilon = 1e-4);
    }

    //=====================================================================
    // Phases
    //=====================================================================

    #[test]
    fn phase_follows_flags() {
        let mut state = ready();
        assert_eq!(state.phase(), JumpPhase::Grounded);

        state.integrate_vertical(true, DT, &JumpConfig::default());
        assert_eq!(state.phase(), JumpPhase::Charging);

        state.integrate_vertical(false, DT, &JumpConfig::default());
        assert_eq!(state.phase(), JumpPhase::AirborneLocked);

        state.land();
        state.leave_ground();
        assert_eq!(state.phase(), JumpPhase::Falling);
    }

    #[test]
    fn closed_gate_blocks_takeoff() {
        let mut state = PlayerKinematicState::grounded();
        let dz = state.integrate_vertical(true, DT, &JumpConfig::default());
        assert_eq!(dz, 0.0);
        assert!(state.grounded);
    }

    #[test]
    fn jump_lock_blocks_takeoff() {
        let mut state = PlayerKinematicState {
            jump_locked: true,
            ..ready()
        };
        state.integrate_vertical(true, DT, &JumpConfig::default());
        assert!(state.grounded);
    }

    #[test]
    fn charging_ignores_gate_after_takeoff() {
        let config = JumpConfig::default();
        let mut state = ready();
        state.integrate_vertical(true, DT, &config);
        state.can_jump = false;
        state.integrate_vertical(true, DT, &config);
        assert_eq!(state.phase(), JumpPhase::Charging);
        assert_abs_diff_eq!(state.cur_press_time, 2.0 * DT, epsilon = 1e-6);
    }

    #[test]
    fn takeoff_moves_player_up() {
        let mut state = ready();
        let dz = state.integrate_vertical(true, DT, &JumpConfig::default());
        assert!(dz > 0.0);
    }

    //=====================================================================
    // Charge
    //=====================================================================

    #[test]
    fn press_time_is_monotonic_and_clamped() {
        let config = JumpConfig::default();
        let mut state = ready();
        let mut last = 0.0;
        for _ in 0..30 {
            state.integrate_vertical(true, DT, &config);
            assert!(state.cur_press_time >= last);
            assert!(state.cur_press_time <= config.max_press_time);
            last = state.cur_press_time;
        }
        assert_eq!(state.cur_press_time, config.max_press_time);
        assert!(state.jump_locked);
        assert_abs_diff_eq!(
            state.cur_v0.z,
            config.max_press_time * config.jump_factor,
            epsilon = 1e-5
        );
    }

    #[test]
    fn longer_charge_jumps_higher() {
        let config = JumpConfig::default();
        let apex = |hold_frames: usize| {
            let mut state = ready();
            let mut z = 0.0_f32;
            let mut best = 0.0_f32;
            for frame in 0..120 {
                z += state.integrate_vertical(frame < hold_frames, DT, &config);
                best = best.max(z);
            }
            best
        };
        assert!(apex(8) > apex(2));
    }

    //=====================================================================
    // Contact
    //=====================================================================

    #[test]
    fn landing_resets_everything() {
        let config = JumpConfig::default();
        let mut state = ready();
        for _ in 0..20 {
            state.integrate_vertical(true, DT, &config);
        }
        state.walled = true;
        state.land();

        assert!(state.grounded);
        assert!(!state.jump_locked);
        assert!(!state.walled);
        assert!(!state.jumped);
        assert_eq!(state.cur_press_time, 0.0);
        assert_eq!(state.cur_jump_time, 0.0);
    }

    #[test]
    fn falling_descends() {
        let config = JumpConfig::default();
        let mut state = ready();
        state.leave_ground();
        let dz = state.integrate_vertical(true, DT, &config);
        assert!(dz < 0.0);
        assert_eq!(state.phase(), JumpPhase::Falling);
    }

    #[test]
    fn leave_ground_is_noop_when_airborne() {
        let mut state = ready();
        state.integrate_vertical(true, DT, &JumpConfig::default());
        let before = state;
        state.leave_ground();
        assert_eq!(state, before);
    }

    //=====================================================================
    // Horizontal
    //=====================================================================

    #[test]
    fn diagonal_is_not_faster() {
        let straight = horizontal_step(Vec2::new(1.0, 0.0), 10.0, 1.0);
        let diagonal = horizontal_step(Vec2::new(1.0, 1.0), 10.0, 1.0);
        assert_abs_diff_eq!(straight.length(), diagonal.length(), epsilon = 1e-5);
    }

    #[test]
    fn no_input_no_motion() {
        assert_eq!(horizontal_step(Vec2::ZERO, 10.0, 1.0), Vec2::ZERO);
    }
}
