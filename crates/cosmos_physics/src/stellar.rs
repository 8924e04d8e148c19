use cosmos_core::*;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Upper end of the initial mass function, in solar masses
const MAX_STELLAR_MASS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O, // Blue giant, >30000K
    B, // Blue-white, 10000-30000K
    A, // White, 7500-10000K
    F, // Yellow-white, 6000-7500K
    G, // Yellow (like Sun), 5200-6000K
    K, // Orange, 3700-5200K
    M, // Red dwarf, 2400-3700K
}

impl SpectralClass {
    pub fn from_temperature(temp: f64) -> Self {
        if temp > 30000.0 {
            Self::O
        } else if temp > 10000.0 {
            Self::B
        } else if temp > 7500.0 {
            Self::A
        } else if temp > 6000.0 {
            Self::F
        } else if temp > 5200.0 {
            Self::G
        } else if temp > 3700.0 {
            Self::K
        } else {
            Self::M
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::O => 'O',
            Self::B => 'B',
            Self::A => 'A',
            Self::F => 'F',
            Self::G => 'G',
            Self::K => 'K',
            Self::M => 'M',
        }
    }
}

/// Main sequence luminosity in solar luminosities: L ∝ M^3.5
pub fn luminosity(mass_kg: f64) -> f64 {
    (mass_kg / SOLAR_MASS).powf(3.5)
}

/// Equilibrium temperature of a body at `distance_m` from a star
/// T = 278 * (L/L_sun)^0.25 / sqrt(d/AU)
pub fn equilibrium_temperature(luminosity_solar: f64, distance_m: f64) -> f64 {
    let d = (distance_m / AU).max(0.01);
    278.0 * luminosity_solar.powf(0.25) / d.sqrt()
}

pub(crate) fn derive_star(seed: Seed) -> Result<Material> {
    let mut rng = RandomSource::new(seed);

    // Initial Mass Function (Kroupa IMF): most stars are low mass
    // P(m) ∝ m^(-2.3) for m > 0.5 M_sun
    let u = rng.next_real(0.0, 1.0);
    let mass = (0.08 + (1.0 - u).powf(-1.0 / 1.3) * 0.3).min(MAX_STELLAR_MASS);

    let luminosity = mass.powf(3.5);
    let surface_temp = SOLAR_TEMPERATURE * (luminosity / (mass * mass)).powf(0.25);
    let radius = SOLAR_RADIUS * mass.powf(0.8);

    let shape = Shape::sphere(DVec3::ZERO, radius)?;
    Material::new(Substance::StellarPlasma, mass * SOLAR_MASS, shape, surface_temp)
}

/// A star system claims a fixed sphere and weighs what its primary star weighs
pub(crate) fn derive_star_system(primary: &Material, ambient_temperature: f64) -> Result<Material> {
    let shape = Shape::sphere(DVec3::ZERO, STAR_SYSTEM_SPACE)?;
    Material::new(
        Substance::InterstellarMedium,
        primary.mass,
        shape,
        ambient_temperature,
    )
}
