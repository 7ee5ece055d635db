use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World transform of an entity.
///
/// Tweens only ever mutate these three vectors, and only additively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position in world space.
    pub translation: Vec3,
    /// Euler rotation in degrees (pitch, yaw, roll about X, Y, Z).
    pub rotation_degrees: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation_degrees: Vec3) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn translate_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    #[inline]
    pub fn rotate_by(&mut self, delta_degrees: Vec3) {
        self.rotation_degrees += delta_degrees;
    }

    #[inline]
    pub fn scale_by(&mut self, delta: Vec3) {
        self.scale += delta;
    }

    /// Orientation quaternion built from the Euler angles (yaw applied first).
    pub fn orientation(&self) -> Quat {
        let r = self.rotation_degrees;
        Quat::from_euler(
            EulerRot::YXZ,
            r.y.to_radians(),
            r.x.to_radians(),
            r.z.to_radians(),
        )
    }

    /// Forward direction (-Z rotated by the orientation).
    pub fn look(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Right direction (+X rotated by the orientation).
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_mutators() {
        let mut t = Transform3D::from_translation(Vec3::new(1.0, 0.0, 0.0));
        t.translate_by(Vec3::new(0.0, 0.0, -1.0));
        t.rotate_by(Vec3::new(0.0, 45.0, 0.0));
        t.scale_by(Vec3::splat(0.5));
        assert_eq!(t.translation, Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(t.rotation_degrees.y, 45.0);
        assert_eq!(t.scale, Vec3::splat(1.5));
    }

    #[test]
    fn yaw_rotates_look_and_right() {
        let t = Transform3D::new().with_rotation(Vec3::new(0.0, 90.0, 0.0));
        let look = t.look();
        let right = t.right();
        // Turning left by 90 degrees: forward becomes -X, right becomes -Z.
        assert!((look - Vec3::NEG_X).length() < 1e-5, "look was {:?}", look);
        assert!((right - Vec3::NEG_Z).length() < 1e-5, "right was {:?}", right);
    }
}
