use cosmos_core::*;
use cosmos_physics::{Structure, StructureKind};
use glam::DVec3;

/// Node of the spatial hierarchy: identity, parent link, local position and orbit
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    /// None for a root
    pub parent: Option<LocationId>,
    /// Position relative to the parent's center
    pub position: DVec3,
    /// Local positions from the root down to this node; None when unknown
    pub absolute_position: Option<Vec<DVec3>>,
    pub orbit: Option<OrbitalParameters>,
}

/// A location in space with its own physics
#[derive(Debug, Clone)]
pub struct CosmicLocation {
    pub location: Location,
    pub structure: Structure,
    /// Fixed at creation; the material is always re-derivable from it
    pub seed: Seed,
    pub name: Option<String>,
    /// Velocity relative to the body this location orbits, zero when it does not orbit
    pub velocity: DVec3,
    pub material: Material,
    /// Orbit handed to every child of an asteroid field or Oort cloud
    pub child_orbit: Option<OrbitalParameters>,
    pub(crate) children: Vec<LocationId>,
    /// Memoized dominant child, filled on first access
    pub(crate) dominant: Option<LocationId>,
}

impl CosmicLocation {
    pub fn id(&self) -> LocationId {
        self.location.id
    }

    pub fn parent(&self) -> Option<LocationId> {
        self.location.parent
    }

    pub fn kind(&self) -> StructureKind {
        self.structure.kind()
    }

    pub fn position(&self) -> DVec3 {
        self.location.position
    }

    pub fn orbit(&self) -> Option<&OrbitalParameters> {
        self.location.orbit.as_ref()
    }

    pub fn children(&self) -> &[LocationId] {
        &self.children
    }

    /// Dominant child if it has been generated already
    pub fn generated_dominant_child(&self) -> Option<LocationId> {
        self.dominant
    }

    pub fn mass(&self) -> f64 {
        self.material.mass
    }

    pub fn temperature(&self) -> f64 {
        self.material.temperature
    }

    pub fn shape(&self) -> &Shape {
        &self.material.shape
    }

    /// The shape placed at this location's position in the parent's frame
    pub fn occupied_shape(&self) -> Shape {
        self.material.shape.with_center(self.location.position)
    }

    pub fn is_centered(&self) -> bool {
        self.location.position == DVec3::ZERO
    }

    /// Name if one was given, otherwise the structural type
    pub fn display_name(&self) -> String {
        match (&self.name, self.structure) {
            (Some(name), _) => name.clone(),
            (None, Structure::Planetoid(kind)) => kind.name().to_string(),
            (None, _) => self.kind().name().to_string(),
        }
    }
}

/// What orbit a newly placed location should get
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum OrbitChoice {
    /// Ask the parent for an orbit suited to its structural type
    #[default]
    Derive,
    Explicit(OrbitalParameters),
    None,
}

/// Where and how a new location is placed in its parent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    /// Local position; None searches the parent for open space
    pub position: Option<DVec3>,
    pub orbit: OrbitChoice,
}

impl Placement {
    pub fn at(position: DVec3) -> Self {
        Self {
            position: Some(position),
            orbit: OrbitChoice::Derive,
        }
    }

    pub fn anywhere() -> Self {
        Self::default()
    }

    pub fn with_orbit(mut self, orbit: OrbitalParameters) -> Self {
        self.orbit = OrbitChoice::Explicit(orbit);
        self
    }

    pub fn without_orbit(mut self) -> Self {
        self.orbit = OrbitChoice::None;
        self
    }
}

/// Scalars for creating an asteroid field or Oort cloud
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldOptions {
    pub oort: bool,
    pub major_radius: Option<f64>,
    pub minor_radius: Option<f64>,
    /// Fixed orbit given to every child of the field
    pub child_orbit: Option<OrbitalParameters>,
}
