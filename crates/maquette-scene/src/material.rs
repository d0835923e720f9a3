//! Surface materials
//!
//! Materials are shared between nodes by reference, so editing one updates
//! every solid bound to it. The scene stores them behind `Arc`; the preview
//! pipeline only ever clones the handle, never the data.

use glam::Vec3;

/// Surface appearance parameters for a solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Display name in the material panel
    pub name: String,
    /// Linear-space base color
    pub base_color: Vec3,
    /// Surface roughness in `[0, 1]`
    pub roughness: f32,
    /// Metallic factor in `[0, 1]`
    pub metallic: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            base_color: Vec3::new(0.8, 0.8, 0.8),
            roughness: 0.5,
            metallic: 0.0,
        }
    }
}

impl Material {
    /// Create a named material with default surface parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the base color
    pub fn with_base_color(mut self, base_color: Vec3) -> Self {
        self.base_color = base_color;
        self
    }

    /// Builder: set the roughness
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Builder: set the metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn builder_chain() {
        let m = Material::new("brass")
            .with_base_color(Vec3::new(0.8, 0.6, 0.2))
            .with_roughness(0.3)
            .with_metallic(1.0);
        assert_eq!(m.name, "brass");
        assert_eq!(m.metallic, 1.0);
    }

    #[test]
    fn shared_handles_compare_equal() {
        let a = Arc::new(Material::new("steel"));
        let b = Arc::clone(&a);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
