use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::constants::G;
use crate::error::{CosmosError, Result};
use crate::random::RandomSource;
use crate::types::LocationId;

/// The body an orbit goes around, as it was when the orbit was derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitedBody {
    /// None when the orbited mass is not a location of its own
    pub id: Option<LocationId>,
    /// Kilograms
    pub mass: f64,
    /// Global position
    pub position: DVec3,
}

/// Keplerian description of an orbit at one instant.
///
/// Angles are radians and follow the usual convention: the orbital plane is
/// rotated by the longitude of the ascending node about z, tilted by the
/// inclination about the node line, and the periapsis sits at the argument of
/// periapsis within the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    pub orbited: OrbitedBody,
    pub eccentricity: f64,
    /// Metres
    pub semi_major_axis: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
    /// Position on the ellipse when the orbit was derived
    pub true_anomaly: f64,
    /// Seconds
    pub period: f64,
}

impl OrbitalParameters {
    /// Derive a full orbit that passes through `orbiting_position` (global)
    /// with the given eccentricity.
    ///
    /// The true anomaly and the orientation of the orbital plane are drawn
    /// from `rng`; the plane is always chosen to contain the current position.
    pub fn from_eccentricity(
        orbited: OrbitedBody,
        orbiting_position: DVec3,
        eccentricity: f64,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        if !(orbited.mass.is_finite() && orbited.mass > 0.0) {
            return Err(CosmosError::construction(format!(
                "orbited body must have positive mass, got {}",
                orbited.mass
            )));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(CosmosError::construction(format!(
                "eccentricity {eccentricity} does not describe a bound orbit"
            )));
        }
        let offset = orbiting_position - orbited.position;
        let r = offset.length();
        if !(r.is_finite() && r > 0.0) {
            return Err(CosmosError::construction(
                "orbiting body coincides with the body it orbits",
            ));
        }

        let true_anomaly = rng.next_real(0.0, TAU);
        let semi_latus_rectum = r * (1.0 + eccentricity * true_anomaly.cos());
        let semi_major_axis = semi_latus_rectum / (1.0 - eccentricity * eccentricity);

        // The plane must reach the body's latitude, so the tilt is at least |latitude|.
        let latitude = (offset.z / r).clamp(-1.0, 1.0).asin();
        let longitude = offset.y.atan2(offset.x);
        let tilt = rng.positive_normal_sample(0.0, 0.05);
        let inclination = latitude.abs().max(tilt).min(FRAC_PI_2);

        let sin_i = inclination.sin();
        let base = if sin_i > f64::EPSILON {
            (latitude.sin() / sin_i).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        let argument_of_latitude = if rng.next_bool(0.5) { base } else { PI - base };
        let node = longitude
            - (inclination.cos() * argument_of_latitude.sin()).atan2(argument_of_latitude.cos());

        let period = TAU * (semi_major_axis.powi(3) / (G * orbited.mass)).sqrt();

        Ok(Self {
            orbited,
            eccentricity,
            semi_major_axis,
            inclination,
            longitude_of_ascending_node: node.rem_euclid(TAU),
            argument_of_periapsis: (argument_of_latitude - true_anomaly).rem_euclid(TAU),
            true_anomaly,
            period,
        })
    }

    /// Circular orbit through the current position
    pub fn circular(
        orbited: OrbitedBody,
        orbiting_position: DVec3,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        Self::from_eccentricity(orbited, orbiting_position, 0.0, rng)
    }

    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    fn orientation(&self) -> DMat3 {
        DMat3::from_rotation_z(self.longitude_of_ascending_node)
            * DMat3::from_rotation_x(self.inclination)
            * DMat3::from_rotation_z(self.argument_of_periapsis)
    }

    /// Position relative to the orbited body at the stored true anomaly
    pub fn relative_position(&self) -> DVec3 {
        let nu = self.true_anomaly;
        let r = self.semi_latus_rectum() / (1.0 + self.eccentricity * nu.cos());
        self.orientation() * DVec3::new(r * nu.cos(), r * nu.sin(), 0.0)
    }

    /// Velocity relative to the orbited body at the stored true anomaly (vis-viva)
    pub fn relative_velocity(&self) -> DVec3 {
        let nu = self.true_anomaly;
        let mu = G * self.orbited.mass;
        let scale = (mu / self.semi_latus_rectum()).sqrt();
        self.orientation()
            * DVec3::new(-scale * nu.sin(), scale * (self.eccentricity + nu.cos()), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AU, SOLAR_MASS};
    use approx::assert_relative_eq;

    fn sun() -> OrbitedBody {
        OrbitedBody {
            id: None,
            mass: SOLAR_MASS,
            position: DVec3::ZERO,
        }
    }

    #[test]
    fn test_circular_orbit_at_one_au_takes_a_year() {
        let mut rng = RandomSource::new(1);
        let orbit = OrbitalParameters::circular(sun(), DVec3::new(AU, 0.0, 0.0), &mut rng).unwrap();
        let year = 365.25 * 86_400.0;
        assert_relative_eq!(orbit.semi_major_axis, AU, max_relative = 1e-12);
        assert_relative_eq!(orbit.period, year, max_relative = 0.01);
        assert_relative_eq!(orbit.relative_velocity().length(), 29_780.0, max_relative = 0.01);
    }

    #[test]
    fn test_orbit_passes_through_current_position() {
        let mut rng = RandomSource::new(42);
        let positions = [
            DVec3::new(AU, 0.0, 0.0),
            DVec3::new(-2.0 * AU, 0.3 * AU, 0.1 * AU),
            DVec3::new(0.1 * AU, 0.2 * AU, -1.5 * AU),
            DVec3::new(0.0, 0.0, 3.0 * AU),
        ];
        for position in positions {
            for e in [0.0, 0.05, 0.3, 0.9] {
                let orbit = OrbitalParameters::from_eccentricity(sun(), position, e, &mut rng).unwrap();
                let back = orbit.relative_position();
                assert!(
                    back.distance(position) < position.length() * 1e-9,
                    "e={} {:?} vs {:?}",
                    e,
                    back,
                    position
                );
                assert!(orbit.periapsis() <= position.length() * (1.0 + 1e-12));
                assert!(orbit.apoapsis() >= position.length() * (1.0 - 1e-12));
            }
        }
    }

    #[test]
    fn test_velocity_is_perpendicular_for_circular_orbits() {
        let mut rng = RandomSource::new(8);
        let position = DVec3::new(1.0, 2.0, 0.5) * AU;
        let orbit = OrbitalParameters::circular(sun(), position, &mut rng).unwrap();
        let v = orbit.relative_velocity();
        assert!(v.normalize().dot(position.normalize()).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_orbits_rejected() {
        let mut rng = RandomSource::new(2);
        let p = DVec3::new(AU, 0.0, 0.0);
        assert!(OrbitalParameters::from_eccentricity(sun(), p, 1.0, &mut rng).is_err());
        assert!(OrbitalParameters::from_eccentricity(sun(), p, -0.1, &mut rng).is_err());
        assert!(OrbitalParameters::from_eccentricity(sun(), DVec3::ZERO, 0.1, &mut rng).is_err());
        let massless = OrbitedBody { mass: 0.0, ..sun() };
        assert!(OrbitalParameters::from_eccentricity(massless, p, 0.1, &mut rng).is_err());
    }
}
