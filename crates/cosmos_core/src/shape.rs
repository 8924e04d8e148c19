use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{require_positive, CosmosError, Result};
use crate::random::RandomSource;

/// Geometric extent of a body.
///
/// Ellipsoids are axis-aligned; tori lie in the xy-plane around the z axis.
/// Shapes are values: changing a body's geometry means building a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere {
        center: DVec3,
        radius: f64,
    },
    Ellipsoid {
        center: DVec3,
        radii: DVec3,
    },
    Torus {
        center: DVec3,
        major_radius: f64,
        minor_radius: f64,
    },
    HollowSphere {
        center: DVec3,
        inner_radius: f64,
        outer_radius: f64,
    },
}

impl Shape {
    pub fn sphere(center: DVec3, radius: f64) -> Result<Self> {
        let radius = require_positive("sphere radius", radius)?;
        Ok(Self::Sphere { center, radius })
    }

    pub fn ellipsoid(center: DVec3, radii: DVec3) -> Result<Self> {
        require_positive("ellipsoid x radius", radii.x)?;
        require_positive("ellipsoid y radius", radii.y)?;
        require_positive("ellipsoid z radius", radii.z)?;
        Ok(Self::Ellipsoid { center, radii })
    }

    pub fn torus(center: DVec3, major_radius: f64, minor_radius: f64) -> Result<Self> {
        let major_radius = require_positive("torus major radius", major_radius)?;
        let minor_radius = require_positive("torus minor radius", minor_radius)?;
        if minor_radius > major_radius {
            return Err(CosmosError::construction(format!(
                "torus tube radius {minor_radius} exceeds ring radius {major_radius}"
            )));
        }
        Ok(Self::Torus {
            center,
            major_radius,
            minor_radius,
        })
    }

    pub fn hollow_sphere(center: DVec3, inner_radius: f64, outer_radius: f64) -> Result<Self> {
        let outer_radius = require_positive("shell outer radius", outer_radius)?;
        if !(inner_radius.is_finite() && inner_radius >= 0.0) {
            return Err(CosmosError::construction(format!(
                "shell inner radius must be non-negative, got {inner_radius}"
            )));
        }
        if inner_radius >= outer_radius {
            return Err(CosmosError::construction(format!(
                "shell inner radius {inner_radius} is not inside outer radius {outer_radius}"
            )));
        }
        Ok(Self::HollowSphere {
            center,
            inner_radius,
            outer_radius,
        })
    }

    pub fn center(&self) -> DVec3 {
        match *self {
            Self::Sphere { center, .. }
            | Self::Ellipsoid { center, .. }
            | Self::Torus { center, .. }
            | Self::HollowSphere { center, .. } => center,
        }
    }

    /// Same shape moved to `center`
    pub fn with_center(self, center: DVec3) -> Self {
        match self {
            Self::Sphere { radius, .. } => Self::Sphere { center, radius },
            Self::Ellipsoid { radii, .. } => Self::Ellipsoid { center, radii },
            Self::Torus {
                major_radius,
                minor_radius,
                ..
            } => Self::Torus {
                center,
                major_radius,
                minor_radius,
            },
            Self::HollowSphere {
                inner_radius,
                outer_radius,
                ..
            } => Self::HollowSphere {
                center,
                inner_radius,
                outer_radius,
            },
        }
    }

    pub fn volume(&self) -> f64 {
        match *self {
            Self::Sphere { radius, .. } => 4.0 / 3.0 * PI * radius.powi(3),
            Self::Ellipsoid { radii, .. } => 4.0 / 3.0 * PI * radii.x * radii.y * radii.z,
            Self::Torus {
                major_radius,
                minor_radius,
                ..
            } => 2.0 * PI * PI * major_radius * minor_radius * minor_radius,
            Self::HollowSphere {
                inner_radius,
                outer_radius,
                ..
            } => 4.0 / 3.0 * PI * (outer_radius.powi(3) - inner_radius.powi(3)),
        }
    }

    /// Radius of the smallest sphere around the center enclosing the shape
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Self::Sphere { radius, .. } => radius,
            Self::Ellipsoid { radii, .. } => radii.max_element(),
            Self::Torus {
                major_radius,
                minor_radius,
                ..
            } => major_radius + minor_radius,
            Self::HollowSphere { outer_radius, .. } => outer_radius,
        }
    }

    /// Half-size of the axis-aligned box around the shape
    fn half_extents(&self) -> DVec3 {
        match *self {
            Self::Sphere { radius, .. } => DVec3::splat(radius),
            Self::Ellipsoid { radii, .. } => radii,
            Self::Torus {
                major_radius,
                minor_radius,
                ..
            } => DVec3::new(
                major_radius + minor_radius,
                major_radius + minor_radius,
                minor_radius,
            ),
            Self::HollowSphere { outer_radius, .. } => DVec3::splat(outer_radius),
        }
    }

    pub fn contains_point(&self, point: DVec3) -> bool {
        self.contains_sphere(point, 0.0)
    }

    /// Whether a ball of `radius` at `point` lies entirely inside the shape.
    ///
    /// Exact for spheres, shells and tori. For ellipsoids the test maps the
    /// ball through the inverse axis scaling, which bounds it by a ball of
    /// `radius / smallest axis`; the answer is never a false positive.
    pub fn contains_sphere(&self, point: DVec3, radius: f64) -> bool {
        match *self {
            Self::Sphere {
                center,
                radius: outer,
            } => point.distance(center) + radius <= outer,
            Self::Ellipsoid { center, radii } => {
                let scaled = (point - center) / radii;
                scaled.length() + radius / radii.min_element() <= 1.0
            }
            Self::Torus {
                center,
                major_radius,
                minor_radius,
            } => ring_distance(point - center, major_radius) + radius <= minor_radius,
            Self::HollowSphere {
                center,
                inner_radius,
                outer_radius,
            } => {
                let d = point.distance(center);
                d - radius >= inner_radius && d + radius <= outer_radius
            }
        }
    }

    /// Whether a ball of `radius` at `point` overlaps the shape's bounding sphere
    pub fn bounds_overlap_sphere(&self, point: DVec3, radius: f64) -> bool {
        point.distance(self.center()) < self.bounding_radius() + radius
    }

    /// Uniform point inside the shape by rejection sampling its bounding box
    pub fn sample_point(&self, rng: &mut RandomSource, attempts: u32) -> Option<DVec3> {
        let center = self.center();
        let half = self.half_extents();
        for _ in 0..attempts {
            let candidate = center
                + DVec3::new(
                    rng.next_real(-half.x, half.x),
                    rng.next_real(-half.y, half.y),
                    rng.next_real(-half.z, half.z),
                );
            if self.contains_point(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Distance from `offset` (relative to the torus center) to the ring's core circle
fn ring_distance(offset: DVec3, major_radius: f64) -> f64 {
    let planar = (offset.x * offset.x + offset.y * offset.y).sqrt() - major_radius;
    (planar * planar + offset.z * offset.z).sqrt()
}
