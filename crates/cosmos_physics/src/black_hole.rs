use cosmos_core::*;
use glam::DVec3;

/// Mass range of supermassive black holes (kg)
pub const SUPERMASSIVE_MASS: (f64, f64) = (2e35, 2e40);

/// Mass range of stellar black holes (kg)
pub const STELLAR_MASS: (f64, f64) = (6e30, 4e31);

/// Schwarzschild radius: r = 2GM / c^2
pub fn event_horizon_radius(mass: f64) -> f64 {
    2.0 * G * mass / (C * C)
}

/// Hawking radiation temperature, inversely proportional to mass
pub fn hawking_temperature(mass: f64) -> f64 {
    HAWKING_COEFFICIENT * SOLAR_MASS / mass
}

pub(crate) fn derive_black_hole(seed: Seed, supermassive: bool) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    let (low, high) = if supermassive {
        SUPERMASSIVE_MASS
    } else {
        STELLAR_MASS
    };
    let mass = rng.next_real(low, high);
    let shape = Shape::sphere(DVec3::ZERO, event_horizon_radius(mass))?;
    Material::new(Substance::Singularity, mass, shape, hawking_temperature(mass))
}
