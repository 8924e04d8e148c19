use cosmos_core::*;
use cosmos_physics::{FieldGeometry, GalaxyKind, PlanetoidKind, Structure, StructureKind};
use glam::DVec3;
use tracing::info;

use crate::cosmos::{Cosmos, Target};
use crate::location::{OrbitChoice, Placement};

/// The kind of region a body of this structure is normally found in
pub fn container_for(structure: &Structure) -> Option<Structure> {
    let container = match structure {
        Structure::Universe => return None,
        Structure::Supercluster => Structure::Universe,
        Structure::GalaxyCluster | Structure::GalaxyGroup => Structure::Supercluster,
        Structure::GalaxySubgroup => Structure::GalaxyGroup,
        Structure::Galaxy(_) | Structure::BlackHole { supermassive: true } => {
            Structure::GalaxySubgroup
        }
        Structure::GlobularCluster
        | Structure::StarSystem
        | Structure::BlackHole { supermassive: false } => Structure::Galaxy(GalaxyKind::Spiral),
        Structure::Star | Structure::AsteroidField(_) => Structure::StarSystem,
        Structure::Planetoid(PlanetoidKind::Asteroid) => {
            Structure::AsteroidField(FieldGeometry::asteroid_field())
        }
        Structure::Planetoid(PlanetoidKind::Comet) => {
            Structure::AsteroidField(FieldGeometry::oort_cloud())
        }
        Structure::Planetoid(_) => Structure::StarSystem,
    };
    Some(container)
}

impl Cosmos {
    /// Generate a plausible region around a root location and move the
    /// location into it.
    ///
    /// The new region becomes a root itself. The child is placed by
    /// `placement` (open space when no position is given; Oort clouds sit at
    /// the center) and gets an orbit by the usual rules. Returns None for a
    /// universe, which has nothing around it.
    pub fn parent_for_child(
        &mut self,
        child: LocationId,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<Option<LocationId>> {
        let node = self.location(child)?;
        if node.parent().is_some() {
            return Err(CosmosError::AlreadyParented(child));
        }
        let Some(container) = container_for(&node.structure) else {
            return Ok(None);
        };
        let centered = node.kind() == StructureKind::OortCloud;
        let radius = node.material.bounding_radius();

        let parent = self.create_at(
            None,
            container,
            Target::Exact(DVec3::ZERO),
            OrbitChoice::None,
            rng,
        )?;
        if let Err(err) = self.adopt(parent, child, placement, centered, radius, rng) {
            self.remove(parent)?;
            return Err(err);
        }

        info!(
            "Generated {} {} around {} {}",
            container.kind().name(),
            parent,
            self.location(child)?.kind().name(),
            child
        );
        Ok(Some(parent))
    }

    /// Place `child` inside `parent`; on failure the child is left a root
    fn adopt(
        &mut self,
        parent: LocationId,
        child: LocationId,
        placement: Placement,
        centered: bool,
        radius: f64,
        rng: &mut RandomSource,
    ) -> Result<()> {
        let position = match placement.position {
            Some(position) => position,
            None if centered => DVec3::ZERO,
            None => self.find_open_space(parent, radius, rng)?,
        };
        if let OrbitChoice::Explicit(orbit) = &placement.orbit {
            self.check_orbit_reference(Some(parent), orbit)?;
        }

        let previous = self.link(parent, child, position)?;

        let orbit = match placement.orbit {
            OrbitChoice::Explicit(orbit) => Some(orbit),
            OrbitChoice::None => None,
            OrbitChoice::Derive if self.config.assign_orbits => {
                match self.derive_child_orbit(parent, child, rng) {
                    Ok(orbit) => orbit,
                    Err(err) => {
                        self.unlink(parent, child, previous)?;
                        return Err(err);
                    }
                }
            }
            OrbitChoice::Derive => None,
        };
        self.set_orbit(child, orbit)
    }

    /// Attach `child` under `parent`; returns the material it had as a root
    fn link(&mut self, parent: LocationId, child: LocationId, position: DVec3) -> Result<Material> {
        self.location_mut(parent)?.children.push(child);
        let node = self.location_mut(child)?;
        let previous = node.material;
        node.location.parent = Some(parent);
        node.location.position = position;
        self.refresh_absolute_positions(child)?;

        let node = self.location(child)?;
        let material = self.heated_material(node)?;
        self.location_mut(child)?.material = material;
        Ok(previous)
    }

    /// Undo `link`, putting back the material the child had before
    fn unlink(&mut self, parent: LocationId, child: LocationId, material: Material) -> Result<()> {
        self.location_mut(parent)?
            .children
            .retain(|existing| *existing != child);
        let node = self.location_mut(child)?;
        node.location.parent = None;
        node.location.position = DVec3::ZERO;
        node.material = material;
        self.refresh_absolute_positions(child)
    }
}
