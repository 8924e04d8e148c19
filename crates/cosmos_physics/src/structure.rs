use serde::{Deserialize, Serialize};

/// Closed classification of a cosmic location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Universe,
    Supercluster,
    GalaxyCluster,
    GalaxyGroup,
    GalaxySubgroup,
    SpiralGalaxy,
    EllipticalGalaxy,
    DwarfGalaxy,
    GlobularCluster,
    StarSystem,
    AsteroidField,
    OortCloud,
    BlackHole,
    Star,
    Planetoid,
}

impl StructureKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Universe => "Universe",
            Self::Supercluster => "Supercluster",
            Self::GalaxyCluster => "Galaxy Cluster",
            Self::GalaxyGroup => "Galaxy Group",
            Self::GalaxySubgroup => "Galaxy Subgroup",
            Self::SpiralGalaxy => "Spiral Galaxy",
            Self::EllipticalGalaxy => "Elliptical Galaxy",
            Self::DwarfGalaxy => "Dwarf Galaxy",
            Self::GlobularCluster => "Globular Cluster",
            Self::StarSystem => "Star System",
            Self::AsteroidField => "Asteroid Field",
            Self::OortCloud => "Oort Cloud",
            Self::BlackHole => "Black Hole",
            Self::Star => "Star",
            Self::Planetoid => "Planetoid",
        }
    }

    pub fn is_galaxy(&self) -> bool {
        matches!(
            self,
            Self::SpiralGalaxy | Self::EllipticalGalaxy | Self::DwarfGalaxy
        )
    }

    /// Asteroid fields and Oort clouds
    pub fn is_field(&self) -> bool {
        matches!(self, Self::AsteroidField | Self::OortCloud)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalaxyKind {
    Spiral,
    Elliptical,
    Dwarf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetoidKind {
    Terrestrial,
    GasGiant,
    IceGiant,
    Dwarf,
    Asteroid,
    Comet,
}

impl PlanetoidKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Terrestrial => "Terrestrial",
            Self::GasGiant => "Gas Giant",
            Self::IceGiant => "Ice Giant",
            Self::Dwarf => "Dwarf Planet",
            Self::Asteroid => "Asteroid",
            Self::Comet => "Comet",
        }
    }
}

/// Geometry scalars of an asteroid field or Oort cloud.
///
/// `toroidal` is decided once, when the field is created, from where it sits
/// in its parent; it is stored so re-derivation does not need the parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub oort: bool,
    pub toroidal: bool,
    pub major_radius: Option<f64>,
    pub minor_radius: Option<f64>,
}

impl FieldGeometry {
    pub const fn asteroid_field() -> Self {
        Self {
            oort: false,
            toroidal: false,
            major_radius: None,
            minor_radius: None,
        }
    }

    pub const fn oort_cloud() -> Self {
        Self {
            oort: true,
            toroidal: false,
            major_radius: None,
            minor_radius: None,
        }
    }
}

/// Structural type plus the scalars its derivation needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Structure {
    Universe,
    Supercluster,
    GalaxyCluster,
    GalaxyGroup,
    GalaxySubgroup,
    Galaxy(GalaxyKind),
    GlobularCluster,
    StarSystem,
    AsteroidField(FieldGeometry),
    BlackHole { supermassive: bool },
    Star,
    Planetoid(PlanetoidKind),
}

impl Structure {
    pub fn kind(&self) -> StructureKind {
        match self {
            Self::Universe => StructureKind::Universe,
            Self::Supercluster => StructureKind::Supercluster,
            Self::GalaxyCluster => StructureKind::GalaxyCluster,
            Self::GalaxyGroup => StructureKind::GalaxyGroup,
            Self::GalaxySubgroup => StructureKind::GalaxySubgroup,
            Self::Galaxy(GalaxyKind::Spiral) => StructureKind::SpiralGalaxy,
            Self::Galaxy(GalaxyKind::Elliptical) => StructureKind::EllipticalGalaxy,
            Self::Galaxy(GalaxyKind::Dwarf) => StructureKind::DwarfGalaxy,
            Self::GlobularCluster => StructureKind::GlobularCluster,
            Self::StarSystem => StructureKind::StarSystem,
            Self::AsteroidField(geometry) if geometry.oort => StructureKind::OortCloud,
            Self::AsteroidField(_) => StructureKind::AsteroidField,
            Self::BlackHole { .. } => StructureKind::BlackHole,
            Self::Star => StructureKind::Star,
            Self::Planetoid(_) => StructureKind::Planetoid,
        }
    }
}
