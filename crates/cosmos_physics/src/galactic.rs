use cosmos_core::*;
use glam::DVec3;

use crate::structure::GalaxyKind;

/// Long axis of a supercluster: 100 to 400 million light years (m)
const SUPERCLUSTER_MAJOR: (f64, f64) = (9.4607e23, 3.7843e24);
/// Short axes as a fraction of the long axis
const SUPERCLUSTER_MINOR_FRACTION: (f64, f64) = (0.1, 0.25);
/// Mean density of a supercluster (kg/m^3), a few times the cosmic mean
const SUPERCLUSTER_DENSITY: f64 = 5e-25;

const CLUSTER_RADIUS: (f64, f64) = (1.5e22, 9e22);
const CLUSTER_MASS: (f64, f64) = (2e44, 2e45);
/// X-ray temperature of the intracluster medium (K)
const CLUSTER_TEMPERATURE: (f64, f64) = (1e7, 1e8);

/// A group is its main subgroup, scaled
const GROUP_MASS_FACTOR: f64 = 2.5;
const GROUP_RADIUS_FACTOR: f64 = 5.0;

/// A subgroup is its main galaxy, scaled
const SUBGROUP_MASS_FACTOR: f64 = 1.25;
const SUBGROUP_RADIUS_FACTOR: f64 = 10.0;

const SPIRAL_RADIUS: (f64, f64) = (1.5e20, 1e21);
const SPIRAL_THICKNESS: (f64, f64) = (0.05, 0.15);
const SPIRAL_MASS: (f64, f64) = (2e41, 3e42);

const ELLIPTICAL_RADIUS: (f64, f64) = (3e19, 1.5e21);
const ELLIPTICAL_MASS: (f64, f64) = (1e40, 1e43);

const DWARF_RADIUS: (f64, f64) = (3e18, 3e19);
const DWARF_MASS: (f64, f64) = (2e37, 2e39);

const GLOBULAR_RADIUS: (f64, f64) = (1.5e17, 1.5e18);
const GLOBULAR_MASS: (f64, f64) = (2e34, 2e36);

pub(crate) fn derive_universe() -> Result<Material> {
    let shape = Shape::sphere(DVec3::ZERO, UNIVERSE_RADIUS)?;
    Material::new(
        Substance::IntergalacticMedium,
        UNIVERSE_MASS,
        shape,
        CMB_TEMPERATURE,
    )
}

/// Superclusters are filaments or sheets.
///
/// One long axis and one short axis are drawn, then one of six axis
/// permutations: three filaments (two short axes, long axis along x, y or z)
/// and three sheets (two long axes, short axis along x, y or z).
pub(crate) fn derive_supercluster(seed: Seed, ambient_temperature: f64) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    let major = rng.next_real(SUPERCLUSTER_MAJOR.0, SUPERCLUSTER_MAJOR.1);
    let minor = major * rng.next_real(SUPERCLUSTER_MINOR_FRACTION.0, SUPERCLUSTER_MINOR_FRACTION.1);

    let radii = match rng.next_index(6) {
        0 => DVec3::new(major, minor, minor),
        1 => DVec3::new(minor, major, minor),
        2 => DVec3::new(minor, minor, major),
        3 => DVec3::new(minor, major, major),
        4 => DVec3::new(major, minor, major),
        _ => DVec3::new(major, major, minor),
    };

    let shape = Shape::ellipsoid(DVec3::ZERO, radii)?;
    Material::new(
        Substance::IntergalacticMedium,
        shape.volume() * SUPERCLUSTER_DENSITY,
        shape,
        ambient_temperature,
    )
}

pub(crate) fn derive_galaxy_cluster(seed: Seed) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    let radius = rng.next_real(CLUSTER_RADIUS.0, CLUSTER_RADIUS.1);
    let mass = rng.next_real(CLUSTER_MASS.0, CLUSTER_MASS.1);
    let temperature = rng.next_real(CLUSTER_TEMPERATURE.0, CLUSTER_TEMPERATURE.1);
    let shape = Shape::sphere(DVec3::ZERO, radius)?;
    Material::new(Substance::IntraclusterMedium, mass, shape, temperature)
}

pub(crate) fn derive_galaxy_group(
    main_subgroup: &Material,
    ambient_temperature: f64,
) -> Result<Material> {
    let shape = Shape::sphere(
        DVec3::ZERO,
        main_subgroup.bounding_radius() * GROUP_RADIUS_FACTOR,
    )?;
    Material::new(
        Substance::IntergalacticMedium,
        main_subgroup.mass * GROUP_MASS_FACTOR,
        shape,
        ambient_temperature,
    )
}

pub(crate) fn derive_galaxy_subgroup(
    main_galaxy: &Material,
    ambient_temperature: f64,
) -> Result<Material> {
    let shape = Shape::sphere(
        DVec3::ZERO,
        main_galaxy.bounding_radius() * SUBGROUP_RADIUS_FACTOR,
    )?;
    Material::new(
        Substance::IntergalacticMedium,
        main_galaxy.mass * SUBGROUP_MASS_FACTOR,
        shape,
        ambient_temperature,
    )
}

pub(crate) fn derive_galaxy(
    seed: Seed,
    kind: GalaxyKind,
    ambient_temperature: f64,
) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    let (shape, mass) = match kind {
        GalaxyKind::Spiral => {
            let radius = rng.next_real(SPIRAL_RADIUS.0, SPIRAL_RADIUS.1);
            let thickness = rng.next_real(SPIRAL_THICKNESS.0, SPIRAL_THICKNESS.1);
            let shape = Shape::ellipsoid(DVec3::ZERO, DVec3::new(radius, radius, radius * thickness))?;
            (shape, rng.next_real(SPIRAL_MASS.0, SPIRAL_MASS.1))
        }
        GalaxyKind::Elliptical => {
            let radius = rng.next_real(ELLIPTICAL_RADIUS.0, ELLIPTICAL_RADIUS.1);
            let radii = DVec3::new(
                radius,
                radius * rng.next_real(0.5, 1.0),
                radius * rng.next_real(0.5, 1.0),
            );
            let shape = Shape::ellipsoid(DVec3::ZERO, radii)?;
            (shape, rng.next_real(ELLIPTICAL_MASS.0, ELLIPTICAL_MASS.1))
        }
        GalaxyKind::Dwarf => {
            let shape = Shape::sphere(DVec3::ZERO, rng.next_real(DWARF_RADIUS.0, DWARF_RADIUS.1))?;
            (shape, rng.next_real(DWARF_MASS.0, DWARF_MASS.1))
        }
    };
    Material::new(Substance::InterstellarMedium, mass, shape, ambient_temperature)
}

pub(crate) fn derive_globular_cluster(seed: Seed, ambient_temperature: f64) -> Result<Material> {
    let mut rng = RandomSource::new(seed);
    let shape = Shape::sphere(DVec3::ZERO, rng.next_real(GLOBULAR_RADIUS.0, GLOBULAR_RADIUS.1))?;
    let mass = rng.next_real(GLOBULAR_MASS.0, GLOBULAR_MASS.1);
    Material::new(Substance::InterstellarMedium, mass, shape, ambient_temperature)
}
