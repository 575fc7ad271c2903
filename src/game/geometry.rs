//=========================================================================
// Bounding-Box Geometry
//=========================================================================
//
// Axis-aligned boxes and the two queries the simulation needs from them:
// an overlap test and a closest-face estimate.
//
// Architecture:
//   local Aabb ──transformed(Mat4)──> world Aabb ──intersects()──> bool
//                                          │
//                                          └──resolve()──> CollisionResult
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::scene::Transform;

//=== Face Enumeration ====================================================

/// Candidate face normals in the fixed order used to break distance ties.
pub const FACE_NORMALS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

//=== Aabb ================================================================

/// Axis-aligned bounding box.
///
/// Invariant: `min <= max` component-wise. Construction normalizes swapped
/// corners instead of rejecting them, so zero-extent and mirrored boxes
/// coming out of a level file are accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAabb")]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

/// Unvalidated wire form; routed through [`Aabb::new`] on deserialize.
#[derive(Deserialize)]
struct RawAabb {
    min: Vec3,
    max: Vec3,
}

impl From<RawAabb> for Aabb {
    fn from(raw: RawAabb) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl Default for Aabb {
    /// Zero-extent box at the origin.
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    //--- Construction -----------------------------------------------------

    /// Builds a box from two opposite corners (in any order).
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Builds a box centered at `center` with the given half-extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    //--- Accessors --------------------------------------------------------

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    //--- Transformation ---------------------------------------------------

    /// Bounds of this box after the affine transform `mat`.
    ///
    /// All eight corners are transformed and re-bounded, so rotated boxes
    /// grow to stay axis-aligned.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];

        let first = mat.transform_point3(corners[0]);
        let (min, max) = corners[1..]
            .iter()
            .map(|c| mat.transform_point3(*c))
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));

        Self { min, max }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if the boxes overlap on all three axes.
    ///
    /// Inclusive on faces: touching boxes count as overlapping. Full
    /// containment of either box in the other also counts.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// Returns `true` if `other`'s XY footprint lies strictly inside this
    /// box's XY footprint. Z is ignored.
    pub fn footprint_encloses(&self, other: &Aabb) -> bool {
        other.min.x > self.min.x
            && other.max.x < self.max.x
            && other.min.y > self.min.y
            && other.max.y < self.max.y
    }
}

//=== CollisionResult =====================================================

/// Outcome of [`resolve`].
///
/// `contact_axis` points from the stationary box's center toward the face
/// nearest the moving object. It is only meaningful when `collides` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub collides: bool,
    pub contact_axis: Vec3,
}

impl CollisionResult {
    pub const NONE: Self = Self {
        collides: false,
        contact_axis: Vec3::ZERO,
    };

    /// Contact with the top face of the stationary box.
    pub fn is_floor(&self) -> bool {
        self.collides && self.contact_axis.z > 0.0
    }
}

//=== Free Functions ======================================================

/// Overlap test between two world-space boxes.
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Closest-face estimate between a moving box and a stationary one.
///
/// * `object` - moving box, already in world space
/// * `stationary` - stationary box in its local space
/// * `frame` - transform placing `stationary` in the world
///
/// Face centers sit at `center ± half_extent * scale` along each axis. The
/// face whose center is nearest to the object's center wins, with ties
/// going to the earlier entry of [`FACE_NORMALS`]. The returned axis is
/// that face's unit normal, which avoids normalizing a near-zero offset
/// for flat or empty boxes.
pub fn resolve(object: &Aabb, stationary: &Aabb, frame: &Transform) -> CollisionResult {
    let world = stationary.transformed(&frame.local_to_world());
    if !object.intersects(&world) {
        return CollisionResult::NONE;
    }

    let center = frame.local_to_world().transform_point3(stationary.center());
    let half = stationary.half_extents() * frame.scale.abs();
    let target = object.center();

    let mut best = FACE_NORMALS[0];
    let mut best_dist = f32::INFINITY;
    for normal in FACE_NORMALS {
        let face_center = center + normal * half;
        let dist = face_center.distance(target);
        if dist < best_dist {
            best_dist = dist;
            best = normal;
        }
    }

    CollisionResult {
        collides: true,
        contact_axis: best,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn aabb(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max))
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn new_normalizes_swapped_corners() {
        let b = aabb([1.0, -1.0, 3.0], [-1.0, 1.0, 2.0]);
        assert_eq!(b.min(), Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(b.max(), Vec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn deserialize_normalizes_corners() {
        let b: Aabb = serde_json::from_str(r#"{"min":[1,1,1],"max":[0,0,0]}"#).unwrap();
        assert_eq!(b.min(), Vec3::ZERO);
        assert_eq!(b.max(), Vec3::ONE);
    }

    #[test]
    fn footprint_encloses_needs_whole_xy_extent() {
        let slab = Aabb::new(Vec3::new(-5.0, -5.0, -2.0), Vec3::new(5.0, 5.0, 0.0));
        let inside = Aabb::from_center_half_extents(Vec3::new(3.9, 0.0, 10.0), Vec3::ONE);
        let overhang = Aabb::from_center_half_extents(Vec3::new(4.9, 0.0, 1.0), Vec3::ONE);
        let flush = Aabb::from_center_half_extents(Vec3::new(0.0, 4.0, 1.0), Vec3::ONE);

        assert!(slab.footprint_encloses(&inside));
        assert!(!slab.footprint_encloses(&overhang));
        assert!(!slab.footprint_encloses(&flush));
    }

    #[test]
    fn transformed_applies_translation_and_scale() {
        let b = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let mat = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 1.0, 1.0),
            Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let w = b.transformed(&mat);
        assert_eq!(w.min(), Vec3::new(8.0, -1.0, -1.0));
        assert_eq!(w.max(), Vec3::new(12.0, 1.0, 1.0));
    }

    //=====================================================================
    // Overlap
    //=====================================================================

    #[test]
    fn intersects_is_symmetric() {
        let boxes = [
            aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            aabb([0.5, 0.5, 0.5], [3.0, 3.0, 3.0]),
            aabb([-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]),
            aabb([5.0, 5.0, 5.0], [6.0, 6.0, 6.0]),
            aabb([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(intersects(a, b), intersects(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = aabb([3.0, 0.0, 0.0], [4.0, 1.0, 1.0]);
        let c = aabb([0.0, 0.0, 5.0], [1.0, 1.0, 6.0]);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&a, &c));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = aabb([-5.0, -5.0, -5.0], [5.0, 5.0, 5.0]);
        let inner = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn touching_faces_overlap() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = aabb([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(intersects(&a, &b));
    }

    //=====================================================================
    // Resolve
    //=====================================================================

    #[test]
    fn player_on_platform_resolves_to_top_face() {
        let player = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let platform = aabb([-5.0, -5.0, -2.0], [5.0, 5.0, 0.0]);

        assert!(intersects(&player, &platform));
        let hit = resolve(&player, &platform, &Transform::default());
        assert!(hit.collides);
        assert_eq!(hit.contact_axis, Vec3::Z);
        assert!(hit.is_floor());
    }

    #[test]
    fn side_approach_resolves_to_wall() {
        let player = aabb([4.5, -0.5, -1.5], [5.5, 0.5, -0.5]);
        let platform = aabb([-5.0, -5.0, -2.0], [5.0, 5.0, 0.0]);
        let hit = resolve(&player, &platform, &Transform::default());
        assert!(hit.collides);
        assert_eq!(hit.contact_axis, Vec3::X);
        assert!(!hit.is_floor());
    }

    #[test]
    fn resolve_uses_stationary_transform() {
        let local = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let frame = Transform {
            position: Vec3::new(0.0, 0.0, -3.0),
            scale: Vec3::new(4.0, 4.0, 1.0),
            ..Transform::default()
        };
        let player = aabb([-0.5, -0.5, -2.2], [0.5, 0.5, -1.2]);
        let hit = resolve(&player, &local, &frame);
        assert!(hit.collides);
        assert_eq!(hit.contact_axis, Vec3::Z);
    }

    #[test]
    fn resolve_misses_when_separated() {
        let player = aabb([20.0, 20.0, 20.0], [21.0, 21.0, 21.0]);
        let platform = aabb([-5.0, -5.0, -2.0], [5.0, 5.0, 0.0]);
        assert_eq!(resolve(&player, &platform, &Transform::default()), CollisionResult::NONE);
    }

    #[test]
    fn degenerate_box_ties_break_in_enumeration_order() {
        let point = Aabb::default();
        let hit = resolve(&point, &point, &Transform::default());
        assert!(hit.collides);
        assert_eq!(hit.contact_axis, Vec3::X);
        assert!(hit.contact_axis.is_finite());
    }
}
