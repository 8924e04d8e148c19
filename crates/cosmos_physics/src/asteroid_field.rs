use cosmos_core::*;
use glam::DVec3;

use crate::structure::FieldGeometry;

/// Tube radius of a ring-shaped field relative to its ring radius
const RING_THICKNESS: f64 = 0.05;

/// Range of the random factors applied to an ellipsoidal field's other axes
const AXIS_FACTOR: (f64, f64) = (0.5, 1.5);

pub(crate) fn derive_field(
    seed: Seed,
    geometry: &FieldGeometry,
    ambient_temperature: f64,
) -> Result<Material> {
    if geometry.oort {
        return derive_oort_cloud(geometry, ambient_temperature);
    }

    let major = require_positive(
        "asteroid field major radius",
        geometry.major_radius.unwrap_or(ASTEROID_FIELD_SPACE),
    )?;

    let shape = if geometry.toroidal {
        let minor = geometry.minor_radius.unwrap_or(major * RING_THICKNESS);
        Shape::torus(DVec3::ZERO, major, minor)?
    } else if let Some(minor) = geometry.minor_radius {
        Shape::ellipsoid(DVec3::ZERO, DVec3::new(major, minor, minor))?
    } else {
        let mut rng = RandomSource::new(seed);
        let y = major * rng.next_real(AXIS_FACTOR.0, AXIS_FACTOR.1);
        let z = major * rng.next_real(AXIS_FACTOR.0, AXIS_FACTOR.1);
        Shape::ellipsoid(DVec3::ZERO, DVec3::new(major, y, z))?
    };

    Material::new(
        Substance::CosmicDust,
        shape.volume() * ASTEROID_FIELD_DENSITY,
        shape,
        ambient_temperature,
    )
}

/// A shell from `base + 3e15` (or an explicit inner radius) to `base + OORT_CLOUD_SPACE`
fn derive_oort_cloud(geometry: &FieldGeometry, ambient_temperature: f64) -> Result<Material> {
    let base = geometry.major_radius.unwrap_or(0.0);
    if !(base.is_finite() && base >= 0.0) {
        return Err(CosmosError::construction(format!(
            "Oort cloud base radius must be non-negative, got {base}"
        )));
    }
    let inner = geometry
        .minor_radius
        .unwrap_or(base + OORT_CLOUD_INNER_OFFSET);
    let shape = Shape::hollow_sphere(DVec3::ZERO, inner, base + OORT_CLOUD_SPACE)?;
    Material::new(Substance::Ice, OORT_CLOUD_MASS, shape, ambient_temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_explicit_major_radius_gives_ellipsoid() {
        let geometry = FieldGeometry {
            major_radius: Some(1.5e11),
            ..FieldGeometry::asteroid_field()
        };
        let material = derive_field(9, &geometry, 150.0).unwrap();
        match material.shape {
            Shape::Ellipsoid { radii, .. } => {
                assert_eq!(radii.x, 1.5e11);
                assert!(radii.y >= 0.75e11 && radii.y <= 2.25e11);
                assert!(radii.z >= 0.75e11 && radii.z <= 2.25e11);
            }
            other => panic!("expected ellipsoid, got {:?}", other),
        }
        assert!(material.mass > 0.0);
        assert_relative_eq!(material.mass, material.shape.volume() * 7e-8);
    }

    #[test]
    fn test_toroidal_field_is_a_thin_ring() {
        let geometry = FieldGeometry {
            toroidal: true,
            ..FieldGeometry::asteroid_field()
        };
        let material = derive_field(1, &geometry, 150.0).unwrap();
        match material.shape {
            Shape::Torus {
                major_radius,
                minor_radius,
                ..
            } => {
                assert_eq!(major_radius, ASTEROID_FIELD_SPACE);
                assert!(minor_radius < major_radius * 0.1);
            }
            other => panic!("expected torus, got {:?}", other),
        }
    }

    #[test]
    fn test_oort_cloud_defaults() {
        let material = derive_field(3, &FieldGeometry::oort_cloud(), 3.0).unwrap();
        match material.shape {
            Shape::HollowSphere {
                inner_radius,
                outer_radius,
                ..
            } => {
                assert_eq!(inner_radius, OORT_CLOUD_INNER_OFFSET);
                assert_eq!(outer_radius, OORT_CLOUD_SPACE);
            }
            other => panic!("expected hollow sphere, got {:?}", other),
        }
        assert_eq!(material.mass, OORT_CLOUD_MASS);
    }

    #[test]
    fn test_oort_cloud_offsets_from_base_radius() {
        let geometry = FieldGeometry {
            major_radius: Some(1e15),
            ..FieldGeometry::oort_cloud()
        };
        let material = derive_field(3, &geometry, 3.0).unwrap();
        assert_eq!(
            material.shape,
            Shape::HollowSphere {
                center: DVec3::ZERO,
                inner_radius: 1e15 + OORT_CLOUD_INNER_OFFSET,
                outer_radius: 1e15 + OORT_CLOUD_SPACE,
            }
        );
    }

    #[test]
    fn test_malformed_radii_fail() {
        let negative = FieldGeometry {
            major_radius: Some(-1.0),
            ..FieldGeometry::asteroid_field()
        };
        assert!(derive_field(1, &negative, 10.0).is_err());

        let inverted = FieldGeometry {
            minor_radius: Some(9e15),
            ..FieldGeometry::oort_cloud()
        };
        assert!(derive_field(1, &inverted, 10.0).is_err());
    }
}
