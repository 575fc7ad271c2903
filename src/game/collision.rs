//=========================================================================
// Collision Resolution
//=========================================================================
//
// Per-frame sweep of the player box against the level.
//
// Flow:
// ```text
// sweep_platforms()      resolve() per platform
//   ├─ floor contact  →  flush on top + clearance, land()
//   └─ wall contact   →  flush against face + clearance, walled
// check_support()        walked off an edge → leave_ground()
// Collectibles::collect  overlap → hide gem, count it once
// ```
//
// Corrections move only the player's `position`. Platforms are never
// written.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::geometry::{resolve, Aabb};
use super::kinematics::PlayerKinematicState;
use super::scene::{ObjectId, SceneGraph};

//=== Contact =============================================================

/// Classified contact with one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Floor(ObjectId),
    Wall(ObjectId),
}

/// Offset that moves `object` flush against the face of `surface` whose
/// outward normal is `axis`, leaving `clearance` between them.
///
/// Only the component along `axis` is non-zero.
pub fn flush_correction(object: &Aabb, surface: &Aabb, axis: Vec3, clearance: f32) -> Vec3 {
    let center = object.center();
    let half = object.half_extents();

    let mut correction = Vec3::ZERO;
    for i in 0..3 {
        if axis[i] > 0.0 {
            correction[i] = surface.max()[i] + half[i] + clearance - center[i];
        } else if axis[i] < 0.0 {
            correction[i] = surface.min()[i] - half[i] - clearance - center[i];
        }
    }
    correction
}

//=== Platform Sweep ======================================================

/// Resolves the player against every platform, in platform index order.
///
/// `walled` is recomputed from scratch. Each correction is applied before
/// the next platform is tested, so later platforms see the corrected box.
pub fn sweep_platforms(
    scene: &mut SceneGraph,
    player: ObjectId,
    platforms: &[ObjectId],
    state: &mut PlayerKinematicState,
    clearance: f32,
) -> Vec<Contact> {
    state.walled = false;
    let mut contacts = Vec::new();

    for &platform in platforms {
        let player_box = scene.object(player).world_bounds();
        let (hit, surface) = {
            let object = scene.object(platform);
            (
                resolve(&player_box, &object.bounds, &object.transform),
                object.world_bounds(),
            )
        };
        if !hit.collides {
            continue;
        }

        let correction = flush_correction(&player_box, &surface, hit.contact_axis, clearance);
        scene.object_mut(player).transform.position += correction;

        if hit.is_floor() {
            trace!("Floor contact with platform {}", platform.index());
            state.land();
            contacts.push(Contact::Floor(platform));
        } else {
            trace!(
                "Wall contact with platform {} along {:?}",
                platform.index(),
                hit.contact_axis
            );
            state.walled = true;
            contacts.push(Contact::Wall(platform));
        }
    }

    contacts
}

//=== Support Check =======================================================

/// Returns `true` if some platform is directly under the player.
///
/// The player's whole XY extent must lie strictly inside the platform's
/// XY extent and the player's bottom must be within `tolerance` of the
/// platform's top.
pub fn is_supported(scene: &SceneGraph, player: ObjectId, platforms: &[ObjectId], tolerance: f32) -> bool {
    let player_box = scene.object(player).world_bounds();
    let bottom = player_box.min().z;

    platforms.iter().any(|&platform| {
        let surface = scene.object(platform).world_bounds();
        let gap = bottom - surface.max().z;
        surface.footprint_encloses(&player_box) && gap.abs() <= tolerance
    })
}

/// Clears stale ground and wall flags once the player is off every
/// platform. Runs after [`sweep_platforms`].
pub fn check_support(
    scene: &SceneGraph,
    player: ObjectId,
    platforms: &[ObjectId],
    state: &mut PlayerKinematicState,
    tolerance: f32,
) {
    if is_supported(scene, player, platforms, tolerance) {
        return;
    }
    state.leave_ground();
    state.walled = false;
}

//=== Collectibles ========================================================

/// Gem set with per-gem collected flags.
///
/// A collected gem is hidden in the scene and skipped by later sweeps.
#[derive(Debug, Clone)]
pub struct Collectibles {
    ids: Vec<ObjectId>,
    collected: Vec<bool>,
}

impl Collectibles {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        let collected = vec![false; ids.len()];
        Self { ids, collected }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_collected(&self, index: usize) -> bool {
        self.collected.get(index).copied().unwrap_or(false)
    }

    pub fn remaining(&self) -> usize {
        self.collected.iter().filter(|c| !**c).count()
    }

    /// Collects every active gem the player touches and returns how many
    /// were newly collected.
    pub fn collect(&mut self, scene: &mut SceneGraph, player: ObjectId) -> u32 {
        let player_box = scene.object(player).world_bounds();
        let mut picked = 0;

        for (slot, &id) in self.ids.iter().enumerate() {
            if self.collected[slot] {
                continue;
            }
            let gem = scene.object_mut(id);
            if resolve(&player_box, &gem.bounds, &gem.transform).collides {
                debug!("Collected {}", gem.name);
                gem.visible = false;
                self.collected[slot] = true;
                picked += 1;
            }
        }

        picked
    }

    /// Reactivates every gem.
    pub fn reset(&mut self, scene: &mut SceneGraph) {
        for (slot, &id) in self.ids.iter().enumerate() {
            self.collected[slot] = false;
            scene.object_mut(id).visible = true;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::kinematics::JumpPhase;
    use crate::game::scene::{SceneObject, Transform};
    use approx::assert_abs_diff_eq;

    const CLEARANCE: f32 = 0.05;

    fn object(name: &str, position: Vec3, half: Vec3) -> SceneObject {
        SceneObject {
            name: name.into(),
            transform: Transform::at(position),
            bounds: Aabb::from_center_half_extents(Vec3::ZERO, half),
            visible: true,
        }
    }

    /// Player (id 0), a 10×10 slab whose top is at z=0 (id 1), a gem (id 2).
    fn scene(player_at: Vec3) -> SceneGraph {
        SceneGraph::new(
            vec![
                object("Player", player_at, Vec3::ONE),
                object("Platform0", Vec3::new(0.0, 0.0, -1.0), Vec3::new(5.0, 5.0, 1.0)),
                object("Gem0", Vec3::new(3.0, 0.0, 1.0), Vec3::splat(0.5)),
            ],
            Vec::new(),
        )
    }

    const PLAYER: ObjectId = ObjectId(0);
    const PLATFORMS: [ObjectId; 1] = [ObjectId(1)];

    //=====================================================================
    // Correction
    //=====================================================================

    #[test]
    fn flush_correction_moves_along_axis_only() {
        let player = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 0.5), Vec3::ONE);
        let surface = Aabb::new(Vec3::new(-5.0, -5.0, -2.0), Vec3::new(5.0, 5.0, 0.0));
        let c = flush_correction(&player, &surface, Vec3::Z, CLEARANCE);
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, 0.0);
        assert_abs_diff_eq!(c.z, 0.55, epsilon = 1e-6);

        let c = flush_correction(&player, &surface, Vec3::NEG_X, CLEARANCE);
        assert_abs_diff_eq!(c.x, -5.0 - 1.0 - CLEARANCE - 1.0, epsilon = 1e-6);
        assert_eq!(c.z, 0.0);
    }

    //=====================================================================
    // Sweep
    //=====================================================================

    #[test]
    fn landing_on_platform_grounds_player() {
        let mut scene = scene(Vec3::ZERO);
        let mut state = PlayerKinematicState {
            grounded: false,
            jumped: true,
            jump_locked: true,
            cur_jump_time: 0.8,
            ..PlayerKinematicState::grounded()
        };

        let contacts = sweep_platforms(&mut scene, PLAYER, &PLATFORMS, &mut state, CLEARANCE);

        assert_eq!(contacts, vec![Contact::Floor(ObjectId(1))]);
        assert!(state.grounded);
        assert!(!state.jump_locked);
        assert_eq!(state.cur_jump_time, 0.0);
        let bottom = scene.object(PLAYER).world_bounds().min().z;
        assert_abs_diff_eq!(bottom, CLEARANCE, epsilon = 1e-5);
    }

    #[test]
    fn corrected_player_no_longer_collides() {
        let mut scene = scene(Vec3::ZERO);
        let mut state = PlayerKinematicState::grounded();
        sweep_platforms(&mut scene, PLAYER, &PLATFORMS, &mut state, CLEARANCE);
        let contacts = sweep_platforms(&mut scene, PLAYER, &PLATFORMS, &mut state, CLEARANCE);
        assert!(contacts.is_empty());
    }

    #[test]
    fn side_hit_sets_walled_without_landing() {
        let mut scene = scene(Vec3::new(5.5, 0.0, -1.0));
        let mut state = PlayerKinematicState {
            grounded: false,
            jumped: true,
            jump_locked: true,
            ..PlayerKinematicState::grounded()
        };

        let contacts = sweep_platforms(&mut scene, PLAYER, &PLATFORMS, &mut state, CLEARANCE);

        assert_eq!(contacts, vec![Contact::Wall(ObjectId(1))]);
        assert!(state.walled);
        assert!(!state.grounded);
        let left = scene.object(PLAYER).world_bounds().min().x;
        assert_abs_diff_eq!(left, 5.0 + CLEARANCE, epsilon = 1e-5);
    }

    #[test]
    fn landing_far_from_center_resolves_to_wall() {
        // Bottom 0.1 into the slab top. The top face center stays nearest
        // until the side face center overtakes it about 2.8 from center.
        let mut near = scene(Vec3::new(2.5, 0.0, 0.9));
        let mut state = PlayerKinematicState {
            grounded: false,
            jump_locked: true,
            ..PlayerKinematicState::grounded()
        };
        let contacts = sweep_platforms(&mut near, PLAYER, &PLATFORMS, &mut state, CLEARANCE);
        assert_eq!(contacts, vec![Contact::Floor(ObjectId(1))]);
        assert!(state.grounded);

        let mut far = scene(Vec3::new(3.5, 0.0, 0.9));
        let mut state = PlayerKinematicState {
            grounded: false,
            jump_locked: true,
            ..PlayerKinematicState::grounded()
        };
        let contacts = sweep_platforms(&mut far, PLAYER, &PLATFORMS, &mut state, CLEARANCE);
        assert_eq!(contacts, vec![Contact::Wall(ObjectId(1))]);
        assert!(!state.grounded);
        let left = far.object(PLAYER).world_bounds().min().x;
        assert_abs_diff_eq!(left, 5.0 + CLEARANCE, epsilon = 1e-5);
    }

    #[test]
    fn walled_is_recomputed_each_sweep() {
        let mut scene = scene(Vec3::new(0.0, 0.0, 10.0));
        let mut state = PlayerKinematicState {
            walled: true,
            ..PlayerKinematicState::grounded()
        };
        sweep_platforms(&mut scene, PLAYER, &PLATFORMS, &mut state, CLEARANCE);
        assert!(!state.walled);
    }

    //=====================================================================
    // Support
    //=====================================================================

    #[test]
    fn standing_flush_is_supported() {
        let scene = scene(Vec3::new(0.0, 0.0, 1.0 + CLEARANCE));
        assert!(is_supported(&scene, PLAYER, &PLATFORMS, 0.1));
    }

    #[test]
    fn walking_off_edge_starts_fall() {
        let scene = scene(Vec3::new(6.0, 0.0, 1.0 + CLEARANCE));
        let mut state = PlayerKinematicState {
            walled: true,
            ..PlayerKinematicState::grounded()
        };
        check_support(&scene, PLAYER, &PLATFORMS, &mut state, 0.1);
        assert!(!state.grounded);
        assert!(!state.walled);
        assert!(!state.jumped);
    }

    #[test]
    fn overhanging_an_edge_starts_fall() {
        let scene = scene(Vec3::new(4.9, 0.0, 1.0 + CLEARANCE));
        assert!(!is_supported(&scene, PLAYER, &PLATFORMS, 0.1));

        let mut state = PlayerKinematicState::grounded();
        check_support(&scene, PLAYER, &PLATFORMS, &mut state, 0.1);
        assert!(!state.grounded);
        assert_eq!(state.phase(), JumpPhase::Falling);
    }

    #[test]
    fn footprint_just_inside_edge_is_supported() {
        let scene = scene(Vec3::new(3.9, -3.9, 1.0 + CLEARANCE));
        assert!(is_supported(&scene, PLAYER, &PLATFORMS, 0.1));
    }

    #[test]
    fn hovering_too_high_is_unsupported() {
        let scene = scene(Vec3::new(0.0, 0.0, 3.0));
        assert!(!is_supported(&scene, PLAYER, &PLATFORMS, 0.1));
    }

    //=====================================================================
    // Collectibles
    //=====================================================================

    #[test]
    fn gem_pickup_is_idempotent() {
        let mut scene = scene(Vec3::new(3.0, 0.0, 1.0));
        let mut gems = Collectibles::new(vec![ObjectId(2)]);

        assert_eq!(gems.collect(&mut scene, PLAYER), 1);
        assert!(gems.is_collected(0));
        assert!(!scene.object(ObjectId(2)).visible);

        assert_eq!(gems.collect(&mut scene, PLAYER), 0);
        assert_eq!(gems.remaining(), 0);
    }

    #[test]
    fn distant_gem_is_left_alone() {
        let mut scene = scene(Vec3::new(-3.0, 0.0, 1.0));
        let mut gems = Collectibles::new(vec![ObjectId(2)]);
        assert_eq!(gems.collect(&mut scene, PLAYER), 0);
        assert!(scene.object(ObjectId(2)).visible);
    }

    #[test]
    fn reset_reactivates_gems() {
        let mut scene = scene(Vec3::new(3.0, 0.0, 1.0));
        let mut gems = Collectibles::new(vec![ObjectId(2)]);
        gems.collect(&mut scene, PLAYER);
        gems.reset(&mut scene);
        assert_eq!(gems.remaining(), 1);
        assert!(scene.object(ObjectId(2)).visible);
    }
}
