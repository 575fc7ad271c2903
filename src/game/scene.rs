//=========================================================================
// Scene Graph
//=========================================================================
//
// Flat scene data handed to the gameplay core at construction.
//
// The renderer draws from it and the level adapter binds gameplay roles
// to indices into it. The simulation only ever writes `position` (and the
// camera's rotation/aspect) and the per-object `visible` flag.
//
// Layout:
//   SceneGraph
//     ├─ objects: Vec<SceneObject>   (transform + local bounds + visibility)
//     └─ cameras: Vec<Camera>
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::geometry::Aabb;

//=== Transform ===========================================================

/// Position, rotation and scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates an unrotated, unscaled transform at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Matrix mapping local coordinates into world space.
    pub fn local_to_world(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local +X axis expressed in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

//=== ObjectId ============================================================

/// Stable index of an object inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

//=== SceneObject =========================================================

/// A named, drawable object with local-space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub bounds: Aabb,
    pub visible: bool,
}

impl SceneObject {
    /// Bounds of this object in world space.
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.transformed(&self.transform.local_to_world())
    }
}

//=== Camera ==============================================================

/// Perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    pub transform: Transform,
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub aspect: f32,
}

//=== SceneGraph ==========================================================

/// Owned collection of scene objects and cameras.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    cameras: Vec<Camera>,
}

impl SceneGraph {
    //--- Construction -----------------------------------------------------

    pub fn new(objects: Vec<SceneObject>, cameras: Vec<Camera>) -> Self {
        Self { objects, cameras }
    }

    //--- Objects ----------------------------------------------------------

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Iterates objects with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    /// Ids handed out by the level binding are always in range, so plain
    /// indexing is used here.
    pub fn object(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }

    //--- Cameras ----------------------------------------------------------

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn camera(&self, index: usize) -> &Camera {
        &self.cameras[index]
    }

    pub fn camera_mut(&mut self, index: usize) -> &mut Camera {
        &mut self.cameras[index]
    }

    /// Number of objects currently flagged visible.
    pub fn visible_count(&self) -> usize {
        self.objects.iter().filter(|o| o.visible).count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_transform_is_identity() {
        assert_eq!(Transform::default().local_to_world(), Mat4::IDENTITY);
    }

    #[test]
    fn right_follows_rotation() {
        let t = Transform {
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            ..Transform::default()
        };
        let right = t.right();
        assert_abs_diff_eq!(right.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn world_bounds_follow_position() {
        let object = SceneObject {
            name: "Gem0".into(),
            transform: Transform::at(Vec3::new(3.0, 0.0, 1.0)),
            bounds: Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
            visible: true,
        };
        let world = object.world_bounds();
        assert_eq!(world.min(), Vec3::new(2.5, -0.5, 0.5));
        assert_eq!(world.max(), Vec3::new(3.5, 0.5, 1.5));
    }

    #[test]
    fn visible_count_skips_hidden_objects() {
        let mut hidden = SceneObject {
            name: "A".into(),
            transform: Transform::default(),
            bounds: Aabb::default(),
            visible: true,
        };
        let shown = hidden.clone();
        hidden.visible = false;
        let scene = SceneGraph::new(vec![hidden, shown], Vec::new());
        assert_eq!(scene.visible_count(), 1);
    }
}
