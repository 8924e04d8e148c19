use cosmos_core::*;

use crate::asteroid_field::derive_field;
use crate::black_hole::derive_black_hole;
use crate::galactic::*;
use crate::planetoid::derive_planetoid;
use crate::stellar::{derive_star, derive_star_system};
use crate::structure::{GalaxyKind, Structure};

/// Share of subgroups whose main galaxy is a spiral
const SPIRAL_MAIN_GALAXY_CHANCE: f64 = 0.7;

/// Salt separating the dominant-child stream from a location's own draws
const DOMINANT_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive the material of a location.
///
/// Pure in (structure, seed, ambient temperature): calling it again with the
/// same inputs reproduces the same mass, shape and temperature bit for bit.
/// Bodies without their own heat source take the ambient temperature.
pub fn derive_material(
    structure: &Structure,
    seed: Seed,
    ambient_temperature: f64,
) -> Result<Material> {
    match structure {
        Structure::Universe => derive_universe(),
        Structure::Supercluster => derive_supercluster(seed, ambient_temperature),
        Structure::GalaxyCluster => derive_galaxy_cluster(seed),
        Structure::GalaxyGroup | Structure::GalaxySubgroup | Structure::StarSystem => {
            let (dominant, dominant_seed) = dominant_child(structure, seed).ok_or_else(|| {
                CosmosError::construction(format!("{structure:?} has no dominant child"))
            })?;
            let inner = derive_material(&dominant, dominant_seed, ambient_temperature)?;
            match structure {
                Structure::GalaxyGroup => derive_galaxy_group(&inner, ambient_temperature),
                Structure::GalaxySubgroup => derive_galaxy_subgroup(&inner, ambient_temperature),
                _ => derive_star_system(&inner, ambient_temperature),
            }
        }
        Structure::Galaxy(kind) => derive_galaxy(seed, *kind, ambient_temperature),
        Structure::GlobularCluster => derive_globular_cluster(seed, ambient_temperature),
        Structure::AsteroidField(geometry) => derive_field(seed, geometry, ambient_temperature),
        Structure::BlackHole { supermassive } => derive_black_hole(seed, *supermassive),
        Structure::Star => derive_star(seed),
        Structure::Planetoid(kind) => derive_planetoid(seed, *kind, ambient_temperature),
    }
}

/// The body that sits at the center of a location and defines it: the main
/// galaxy of a subgroup, the main subgroup of a group, the central black hole
/// of a spiral or elliptical galaxy, the primary star of a star system.
///
/// Drawn from a stream of the location's own seed, so the dominant child
/// generated later always matches what `derive_material` assumed.
pub fn dominant_child(structure: &Structure, seed: Seed) -> Option<(Structure, Seed)> {
    let mut rng = RandomSource::new(seed ^ DOMINANT_STREAM_SALT);
    let child = match structure {
        Structure::GalaxyGroup => Structure::GalaxySubgroup,
        Structure::GalaxySubgroup => {
            if rng.next_bool(SPIRAL_MAIN_GALAXY_CHANCE) {
                Structure::Galaxy(GalaxyKind::Spiral)
            } else {
                Structure::Galaxy(GalaxyKind::Elliptical)
            }
        }
        Structure::Galaxy(GalaxyKind::Spiral | GalaxyKind::Elliptical) => {
            Structure::BlackHole { supermassive: true }
        }
        Structure::StarSystem => Structure::Star,
        _ => return None,
    };
    Some((child, rng.next_seed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{FieldGeometry, PlanetoidKind};

    fn all_structures() -> Vec<Structure> {
        vec![
            Structure::Universe,
            Structure::Supercluster,
            Structure::GalaxyCluster,
            Structure::GalaxyGroup,
            Structure::GalaxySubgroup,
            Structure::Galaxy(GalaxyKind::Spiral),
            Structure::Galaxy(GalaxyKind::Elliptical),
            Structure::Galaxy(GalaxyKind::Dwarf),
            Structure::GlobularCluster,
            Structure::StarSystem,
            Structure::AsteroidField(FieldGeometry::asteroid_field()),
            Structure::AsteroidField(FieldGeometry {
                toroidal: true,
                ..FieldGeometry::asteroid_field()
            }),
            Structure::AsteroidField(FieldGeometry::oort_cloud()),
            Structure::BlackHole { supermassive: true },
            Structure::BlackHole { supermassive: false },
            Structure::Star,
            Structure::Planetoid(PlanetoidKind::Terrestrial),
            Structure::Planetoid(PlanetoidKind::GasGiant),
            Structure::Planetoid(PlanetoidKind::IceGiant),
            Structure::Planetoid(PlanetoidKind::Dwarf),
            Structure::Planetoid(PlanetoidKind::Asteroid),
            Structure::Planetoid(PlanetoidKind::Comet),
        ]
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for structure in all_structures() {
            for seed in [0u64, 1, 0xdead_beef, u64::MAX] {
                let a = derive_material(&structure, seed, CMB_TEMPERATURE).unwrap();
                let b = derive_material(&structure, seed, CMB_TEMPERATURE).unwrap();
                assert_eq!(a.mass.to_bits(), b.mass.to_bits(), "{:?}", structure);
                assert_eq!(a.temperature.to_bits(), b.temperature.to_bits());
                assert_eq!(a.shape, b.shape);
                assert!(a.mass > 0.0, "{:?} has no mass", structure);
                assert!(a.shape.volume() > 0.0);
            }
        }
    }

    #[test]
    fn test_dominant_child_is_stable() {
        assert_eq!(
            dominant_child(&Structure::GalaxySubgroup, 77),
            dominant_child(&Structure::GalaxySubgroup, 77)
        );
        assert_eq!(dominant_child(&Structure::Galaxy(GalaxyKind::Dwarf), 1), None);
        assert_eq!(dominant_child(&Structure::Star, 1), None);
    }

    #[test]
    fn test_main_galaxy_mostly_spiral() {
        let spirals = (0..2000u64)
            .filter(|seed| {
                matches!(
                    dominant_child(&Structure::GalaxySubgroup, *seed),
                    Some((Structure::Galaxy(GalaxyKind::Spiral), _))
                )
            })
            .count();
        let share = spirals as f64 / 2000.0;
        assert!((share - 0.7).abs() < 0.05, "share = {}", share);
    }

    #[test]
    fn test_containers_follow_their_dominant_child() {
        let seed = 31;
        let subgroup = derive_material(&Structure::GalaxySubgroup, seed, CMB_TEMPERATURE).unwrap();
        let (galaxy, galaxy_seed) = dominant_child(&Structure::GalaxySubgroup, seed).unwrap();
        let galaxy = derive_material(&galaxy, galaxy_seed, CMB_TEMPERATURE).unwrap();
        assert_eq!(subgroup.mass, galaxy.mass * 1.25);

        let system = derive_material(&Structure::StarSystem, seed, CMB_TEMPERATURE).unwrap();
        let (star, star_seed) = dominant_child(&Structure::StarSystem, seed).unwrap();
        let star = derive_material(&star, star_seed, CMB_TEMPERATURE).unwrap();
        assert_eq!(system.mass, star.mass);
        assert!(system.shape.bounding_radius() > OORT_CLOUD_SPACE);
    }
}
