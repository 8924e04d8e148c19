use cosmos_core::*;
use glam::DVec3;
use std::f64::consts::PI;

use crate::structure::PlanetoidKind;

/// Bulk densities (kg/m^3) of bodies sized from their radius
const DWARF_DENSITY: f64 = 2000.0;
const ASTEROID_DENSITY: f64 = 2600.0;
const COMET_DENSITY: f64 = 600.0;

pub(crate) fn derive_planetoid(
    seed: Seed,
    kind: PlanetoidKind,
    ambient_temperature: f64,
) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    match kind {
        PlanetoidKind::Terrestrial => planet(&mut rng, (-1.0, 0.7), Substance::Rock, ambient_temperature),
        PlanetoidKind::IceGiant => planet(&mut rng, (1.1, 1.9), Substance::Ice, ambient_temperature),
        PlanetoidKind::GasGiant => {
            planet(&mut rng, (2.0, 3.5), Substance::HydrogenHelium, ambient_temperature)
        }
        PlanetoidKind::Dwarf => {
            let radius = rng.next_real(2e5, 1.2e6);
            let shape = Shape::sphere(DVec3::ZERO, radius)?;
            Material::new(
                Substance::Ice,
                shape.volume() * DWARF_DENSITY,
                shape,
                ambient_temperature,
            )
        }
        PlanetoidKind::Asteroid => {
            small_body(&mut rng, (3.0, 5.7), ASTEROID_DENSITY, Substance::Rock, ambient_temperature)
        }
        PlanetoidKind::Comet => {
            small_body(&mut rng, (2.7, 4.5), COMET_DENSITY, Substance::Ice, ambient_temperature)
        }
    }
}

/// Planet with a log-uniform mass (Earth masses) and the mass-radius relation
/// for rocky, Neptune-like and Jupiter-like bodies
fn planet(
    rng: &mut RandomSource,
    mass_log_range: (f64, f64),
    substance: Substance,
    temperature: f64,
) -> Result<Material> {
    let mass_log = rng.next_real(mass_log_range.0, mass_log_range.1);
    let mass = 10.0f64.powf(mass_log);

    let radius = if mass < 2.0 {
        mass.powf(0.27) // Rocky
    } else if mass < 100.0 {
        mass.powf(0.06) * 2.0 // Sub-Neptune to Neptune
    } else {
        mass.powf(-0.04) * 11.0 // Gas giant (radius plateaus)
    };

    let shape = Shape::sphere(DVec3::ZERO, radius * EARTH_RADIUS)?;
    Material::new(substance, mass * EARTH_MASS, shape, temperature)
}

/// Irregular body: an ellipsoid with a log-uniform long axis and shorter
/// axes drawn from the same stream
fn small_body(
    rng: &mut RandomSource,
    radius_log_range: (f64, f64),
    density: f64,
    substance: Substance,
    temperature: f64,
) -> Result<Material> {
    let major = 10.0f64.powf(rng.next_real(radius_log_range.0, radius_log_range.1));
    let radii = DVec3::new(
        major,
        major * rng.next_real(0.5, 1.0),
        major * rng.next_real(0.5, 1.0),
    );
    let shape = Shape::ellipsoid(DVec3::ZERO, radii)?;
    let mass = 4.0 / 3.0 * PI * radii.x * radii.y * radii.z * density;
    Material::new(substance, mass, shape, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_giants_outweigh_terrestrials() {
        for seed in 0..100 {
            let rocky = derive_planetoid(seed, PlanetoidKind::Terrestrial, 200.0).unwrap();
            let giant = derive_planetoid(seed, PlanetoidKind::GasGiant, 200.0).unwrap();
            assert!(giant.mass > rocky.mass);
            assert!(giant.shape.bounding_radius() > rocky.shape.bounding_radius());
        }
    }

    #[test]
    fn test_small_bodies_are_irregular() {
        let asteroid = derive_planetoid(4, PlanetoidKind::Asteroid, 150.0).unwrap();
        let comet = derive_planetoid(4, PlanetoidKind::Comet, 30.0).unwrap();
        assert!(matches!(asteroid.shape, Shape::Ellipsoid { .. }));
        assert!(matches!(comet.shape, Shape::Ellipsoid { .. }));
        assert_eq!(comet.substance, Substance::Ice);
        assert!(asteroid.density() > comet.density());
    }

    #[test]
    fn test_temperature_is_ambient() {
        let dwarf = derive_planetoid(1, PlanetoidKind::Dwarf, 44.0).unwrap();
        assert_eq!(dwarf.temperature, 44.0);
    }
}
