//! Primitive region shapes

use crate::Bounds;
use glam::{DVec2, DVec3, IVec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box with inclusive faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    bounds: Bounds,
}

impl Cuboid {
    /// Create a cuboid spanning two world-space corners
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Cuboid {
            bounds: Bounds::new(a, b),
        }
    }

    /// Create a cuboid covering the inclusive block range `min..=max`
    pub fn from_blocks(min: IVec3, max: IVec3) -> Self {
        Cuboid {
            bounds: Bounds::from_blocks(min, max),
        }
    }

    /// Cuboid covering exactly one block
    pub fn block(position: IVec3) -> Self {
        Cuboid::from_blocks(position, position)
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.bounds.contains(point)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Ball around a centre point, surface inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Sphere { center, radius }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn bounds(&self) -> Bounds {
        if self.radius < 0.0 {
            return Bounds::empty();
        }
        Bounds::new(
            self.center - DVec3::splat(self.radius),
            self.center + DVec3::splat(self.radius),
        )
    }
}

/// Vertical cylinder standing on `base`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Centre of the bottom disc
    pub base: DVec3,
    pub radius: f64,
    pub height: f64,
}

impl Cylinder {
    pub fn new(base: DVec3, radius: f64, height: f64) -> Self {
        Cylinder {
            base,
            radius,
            height,
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        let dy = point.y - self.base.y;
        if dy < 0.0 || dy > self.height {
            return false;
        }
        let flat = DVec2::new(point.x - self.base.x, point.z - self.base.z);
        flat.length_squared() <= self.radius * self.radius
    }

    pub fn bounds(&self) -> Bounds {
        if self.radius < 0.0 || self.height < 0.0 {
            return Bounds::empty();
        }
        Bounds::new(
            DVec3::new(
                self.base.x - self.radius,
                self.base.y,
                self.base.z - self.radius,
            ),
            DVec3::new(
                self.base.x + self.radius,
                self.base.y + self.height,
                self.base.z + self.radius,
            ),
        )
    }
}
