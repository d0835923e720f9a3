//! Primitive solids
//!
//! The closed point sets the boolean preview combines. Each variant stores
//! its dimensions in local space; placement comes from the owning node's
//! [`Transform`](crate::Transform).

use glam::Vec3;

/// A primitive solid in its local coordinate frame, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    /// Ball of the given radius
    Sphere {
        /// Radius, must be positive
        radius: f32,
    },
    /// Axis-aligned box
    Cuboid {
        /// Half the edge length along each axis
        half_extents: Vec3,
    },
    /// Cylinder along the local Y axis
    Cylinder {
        /// Radius of the circular cross section
        radius: f32,
        /// Half the height along Y
        half_height: f32,
    },
    /// Torus around the local Y axis
    Torus {
        /// Distance from the center to the tube center
        major_radius: f32,
        /// Radius of the tube
        minor_radius: f32,
    },
}

impl Solid {
    /// Sphere of the given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Box with full edge lengths x, y, z
    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::new(x, y, z) * 0.5,
        }
    }

    /// Y-axis cylinder with the given radius and full height
    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder {
            radius,
            half_height: height * 0.5,
        }
    }

    /// Y-axis torus with the given ring and tube radii
    pub fn torus(major_radius: f32, minor_radius: f32) -> Self {
        Self::Torus {
            major_radius,
            minor_radius,
        }
    }

    /// Whether a local-space point lies inside or on the solid.
    ///
    /// Boundaries count as inside, so the sets are closed. Callers testing
    /// world-space points must map them into the solid's local frame first.
    pub fn contains(&self, p: Vec3) -> bool {
        match *self {
            Self::Sphere { radius } => p.length_squared() <= radius * radius,
            Self::Cuboid { half_extents } => {
                p.x.abs() <= half_extents.x
                    && p.y.abs() <= half_extents.y
                    && p.z.abs() <= half_extents.z
            }
            Self::Cylinder {
                radius,
                half_height,
            } => {
                p.y.abs() <= half_height && p.x * p.x + p.z * p.z <= radius * radius
            }
            Self::Torus {
                major_radius,
                minor_radius,
            } => {
                let ring = (p.x * p.x + p.z * p.z).sqrt() - major_radius;
                ring * ring + p.y * p.y <= minor_radius * minor_radius
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_membership() {
        let s = Solid::sphere(1.0);
        assert!(s.contains(Vec3::ZERO));
        assert!(s.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!s.contains(Vec3::new(1.001, 0.0, 0.0)));
    }

    #[test]
    fn cuboid_membership() {
        let c = Solid::cuboid(2.0, 4.0, 6.0);
        assert!(c.contains(Vec3::new(1.0, 2.0, 3.0)));
        assert!(c.contains(Vec3::new(-1.0, -2.0, -3.0)));
        assert!(!c.contains(Vec3::new(1.1, 0.0, 0.0)));
        assert!(!c.contains(Vec3::new(0.0, 2.1, 0.0)));
    }

    #[test]
    fn cylinder_membership() {
        let c = Solid::cylinder(1.0, 2.0);
        assert!(c.contains(Vec3::new(0.5, 0.9, 0.5)));
        assert!(!c.contains(Vec3::new(0.0, 1.1, 0.0)));
        assert!(!c.contains(Vec3::new(0.8, 0.0, 0.8)));
    }

    #[test]
    fn torus_membership() {
        let t = Solid::torus(2.0, 0.5);
        // On the ring center line
        assert!(t.contains(Vec3::new(2.0, 0.0, 0.0)));
        // Inside the tube
        assert!(t.contains(Vec3::new(2.3, 0.2, 0.0)));
        // The hole in the middle is outside
        assert!(!t.contains(Vec3::ZERO));
        assert!(!t.contains(Vec3::new(2.0, 0.6, 0.0)));
    }
}
