use cosmos_core::STAR_SYSTEM_SPACE;

use crate::structure::{FieldGeometry, GalaxyKind, PlanetoidKind, Structure, StructureKind};

/// One kind of child a region is populated with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildDefinition {
    /// Structure the child is created from
    pub template: Structure,
    /// Representative bounding radius of such a child (m)
    pub radius: f64,
    /// Expected number of such children per cubic metre of parent
    pub density: f64,
}

impl ChildDefinition {
    const fn new(template: Structure, radius: f64, density: f64) -> Self {
        Self {
            template,
            radius,
            density,
        }
    }

    /// Expected number of children in `volume` cubic metres
    pub fn expected_count(&self, volume: f64) -> f64 {
        self.density * volume
    }
}

const UNIVERSE_CHILDREN: &[ChildDefinition] = &[ChildDefinition::new(
    Structure::Supercluster,
    2e24,
    2.8e-74,
)];

const SUPERCLUSTER_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::GalaxyCluster, 5e22, 1e-71),
    ChildDefinition::new(Structure::GalaxyGroup, 3e22, 4e-71),
];

const GALAXY_CLUSTER_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::Galaxy(GalaxyKind::Elliptical), 5e20, 2e-67),
    ChildDefinition::new(Structure::Galaxy(GalaxyKind::Spiral), 5e20, 5e-68),
    ChildDefinition::new(Structure::Galaxy(GalaxyKind::Dwarf), 1e19, 1e-66),
];

const GALAXY_GROUP_CHILDREN: &[ChildDefinition] = &[ChildDefinition::new(
    Structure::GalaxySubgroup,
    1e22,
    2e-68,
)];

const GALAXY_SUBGROUP_CHILDREN: &[ChildDefinition] = &[ChildDefinition::new(
    Structure::Galaxy(GalaxyKind::Dwarf),
    1e19,
    2e-65,
)];

const SPIRAL_GALAXY_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::StarSystem, STAR_SYSTEM_SPACE, 3.4e-51),
    ChildDefinition::new(Structure::GlobularCluster, 5e17, 3e-60),
    ChildDefinition::new(Structure::BlackHole { supermassive: false }, 1e5, 3e-54),
];

const ELLIPTICAL_GALAXY_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::StarSystem, STAR_SYSTEM_SPACE, 2e-51),
    ChildDefinition::new(Structure::GlobularCluster, 5e17, 1e-59),
    ChildDefinition::new(Structure::BlackHole { supermassive: false }, 1e5, 2e-54),
];

const DWARF_GALAXY_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::StarSystem, STAR_SYSTEM_SPACE, 1e-51),
    ChildDefinition::new(Structure::BlackHole { supermassive: false }, 1e5, 1e-54),
];

const GLOBULAR_CLUSTER_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::StarSystem, STAR_SYSTEM_SPACE, 1e-49),
    ChildDefinition::new(Structure::BlackHole { supermassive: false }, 1e5, 1e-52),
];

const STAR_SYSTEM_CHILDREN: &[ChildDefinition] = &[
    ChildDefinition::new(Structure::Planetoid(PlanetoidKind::Terrestrial), 1e7, 2e-49),
    ChildDefinition::new(Structure::Planetoid(PlanetoidKind::GasGiant), 7e7, 1e-49),
    ChildDefinition::new(Structure::Planetoid(PlanetoidKind::IceGiant), 2.5e7, 1e-49),
    ChildDefinition::new(Structure::Planetoid(PlanetoidKind::Dwarf), 1e6, 3e-49),
    ChildDefinition::new(
        Structure::AsteroidField(FieldGeometry::asteroid_field()),
        3.15e11,
        5e-50,
    ),
];

const ASTEROID_FIELD_CHILDREN: &[ChildDefinition] = &[ChildDefinition::new(
    Structure::Planetoid(PlanetoidKind::Asteroid),
    1e5,
    1e-34,
)];

const OORT_CLOUD_CHILDREN: &[ChildDefinition] = &[ChildDefinition::new(
    Structure::Planetoid(PlanetoidKind::Comet),
    1e4,
    1e-47,
)];

/// Density table for a structural type; empty for bodies with no children
pub fn child_definitions(kind: StructureKind) -> &'static [ChildDefinition] {
    match kind {
        StructureKind::Universe => UNIVERSE_CHILDREN,
        StructureKind::Supercluster => SUPERCLUSTER_CHILDREN,
        StructureKind::GalaxyCluster => GALAXY_CLUSTER_CHILDREN,
        StructureKind::GalaxyGroup => GALAXY_GROUP_CHILDREN,
        StructureKind::GalaxySubgroup => GALAXY_SUBGROUP_CHILDREN,
        StructureKind::SpiralGalaxy => SPIRAL_GALAXY_CHILDREN,
        StructureKind::EllipticalGalaxy => ELLIPTICAL_GALAXY_CHILDREN,
        StructureKind::DwarfGalaxy => DWARF_GALAXY_CHILDREN,
        StructureKind::GlobularCluster => GLOBULAR_CLUSTER_CHILDREN,
        StructureKind::StarSystem => STAR_SYSTEM_CHILDREN,
        StructureKind::AsteroidField => ASTEROID_FIELD_CHILDREN,
        StructureKind::OortCloud => OORT_CLOUD_CHILDREN,
        StructureKind::BlackHole | StructureKind::Star | StructureKind::Planetoid => &[],
    }
}
