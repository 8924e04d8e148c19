use serde::{Deserialize, Serialize};

use crate::error::{CosmosError, Result};
use crate::shape::Shape;

/// What a body is predominantly made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Substance {
    /// Thin gas between galaxies
    IntergalacticMedium,
    /// Hot X-ray emitting gas filling galaxy clusters
    IntraclusterMedium,
    /// Gas and dust between stars
    InterstellarMedium,
    /// Fusing hydrogen/helium plasma
    StellarPlasma,
    /// Silicate rock with metal cores
    Rock,
    /// Water, ammonia and methane ices
    Ice,
    /// Hydrogen/helium envelopes of giant planets
    HydrogenHelium,
    /// Loose grains and boulders
    CosmicDust,
    /// Collapsed matter behind an event horizon
    Singularity,
}

impl Substance {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IntergalacticMedium => "intergalactic medium",
            Self::IntraclusterMedium => "intracluster medium",
            Self::InterstellarMedium => "interstellar medium",
            Self::StellarPlasma => "stellar plasma",
            Self::Rock => "rock",
            Self::Ice => "ice",
            Self::HydrogenHelium => "hydrogen/helium",
            Self::CosmicDust => "cosmic dust",
            Self::Singularity => "singularity",
        }
    }
}

/// Physical make-up of a location: composition, mass, extent and temperature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub substance: Substance,
    /// Kilograms
    pub mass: f64,
    pub shape: Shape,
    /// Kelvin
    pub temperature: f64,
}

impl Material {
    pub fn new(substance: Substance, mass: f64, shape: Shape, temperature: f64) -> Result<Self> {
        if !(mass.is_finite() && mass >= 0.0) {
            return Err(CosmosError::construction(format!(
                "mass must be non-negative and finite, got {mass}"
            )));
        }
        if !(temperature.is_finite() && temperature >= 0.0) {
            return Err(CosmosError::construction(format!(
                "temperature must be non-negative and finite, got {temperature}"
            )));
        }
        Ok(Self {
            substance,
            mass,
            shape,
            temperature,
        })
    }

    /// Replacement material at a different temperature
    pub fn with_temperature(self, temperature: f64) -> Result<Self> {
        Self::new(self.substance, self.mass, self.shape, temperature)
    }

    /// Mean density in kg/m^3
    pub fn density(&self) -> f64 {
        self.mass / self.shape.volume()
    }

    pub fn bounding_radius(&self) -> f64 {
        self.shape.bounding_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_rejects_negative_mass_and_temperature() {
        let shape = Shape::sphere(DVec3::ZERO, 1.0).unwrap();
        assert!(Material::new(Substance::Rock, -1.0, shape, 10.0).is_err());
        assert!(Material::new(Substance::Rock, 1.0, shape, -10.0).is_err());
        assert!(Material::new(Substance::Rock, f64::INFINITY, shape, 10.0).is_err());
    }

    #[test]
    fn test_with_temperature_keeps_mass_and_shape() {
        let shape = Shape::sphere(DVec3::ZERO, 2.0).unwrap();
        let material = Material::new(Substance::Ice, 5.0, shape, 40.0).unwrap();
        let warmer = material.with_temperature(120.0).unwrap();
        assert_eq!(warmer.mass, 5.0);
        assert_eq!(warmer.shape, shape);
        assert_eq!(warmer.temperature, 120.0);
    }
}
