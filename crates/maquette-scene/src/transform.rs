//! Local TRS transforms
//!
//! Every scene node carries a translation / rotation / non-uniform scale
//! record relative to its parent. The preview pipeline composes these into
//! resolved matrices when it pushes transforms down to the leaves, so the
//! record itself stays pure data.

use glam::{Mat4, Quat, Vec3};

/// A local transform: translation, rotation, non-uniform scale.
///
/// Coordinate system is right-handed, Y-up, matching the rest of Maquette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent node
    pub translation: Vec3,
    /// Rotation relative to the parent node
    pub rotation: Quat,
    /// Non-uniform scale; negative components mirror the subtree
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a pure translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Create a pure rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Create a pure scale
    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Builder: set the translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Builder: set the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 matrix (scale, then rotation, then translation)
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Whether this is exactly the identity transform
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether this transform mirrors the subtree.
    ///
    /// True when an odd number of scale components is negative, i.e. the
    /// scale product is negative and triangle winding flips under it.
    pub fn flips_orientation(&self) -> bool {
        self.scale.x * self.scale.y * self.scale.z < 0.0
    }
}
