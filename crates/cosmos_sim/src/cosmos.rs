use std::collections::HashMap;

use cosmos_core::*;
use cosmos_physics::stellar::{equilibrium_temperature, luminosity};
use cosmos_physics::{derive_material, FieldGeometry, GalaxyKind, PlanetoidKind, Structure, StructureKind};
use glam::DVec3;
use tracing::{debug, info};

use crate::location::{CosmicLocation, FieldOptions, Location, OrbitChoice, Placement};

/// Where a new location goes inside its parent
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target {
    Exact(DVec3),
    Anywhere,
    /// Open space inside the parent whose center falls in the given region
    Within(Shape),
}

/// The generated hierarchy.
///
/// Locations live in an arena keyed by id; parents and children refer to each
/// other by id only. A tree is driven from one thread at a time.
#[derive(Debug, Clone, Default)]
pub struct Cosmos {
    pub(crate) config: GenerationConfig,
    pub(crate) locations: HashMap<LocationId, CosmicLocation>,
}

impl Cosmos {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            locations: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&CosmicLocation> {
        self.locations.get(&id)
    }

    /// Like `get`, but a missing id is an error
    pub fn location(&self, id: LocationId) -> Result<&CosmicLocation> {
        self.locations
            .get(&id)
            .ok_or(CosmosError::UnknownLocation(id))
    }

    pub(crate) fn location_mut(&mut self, id: LocationId) -> Result<&mut CosmicLocation> {
        self.locations
            .get_mut(&id)
            .ok_or(CosmosError::UnknownLocation(id))
    }

    pub fn children(&self, id: LocationId) -> Result<&[LocationId]> {
        Ok(self.location(id)?.children())
    }

    /// Locations without a parent
    pub fn roots(&self) -> Vec<LocationId> {
        let mut roots: Vec<_> = self
            .locations
            .values()
            .filter(|l| l.parent().is_none())
            .map(|l| l.id())
            .collect();
        roots.sort();
        roots
    }

    pub fn iter(&self) -> impl Iterator<Item = &CosmicLocation> {
        self.locations.values()
    }

    pub fn set_name(&mut self, id: LocationId, name: impl Into<String>) -> Result<()> {
        self.location_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Position in the root's frame.
    ///
    /// Sums the absolute-position chain when it is known, otherwise walks the
    /// parent links.
    pub fn global_position(&self, id: LocationId) -> Result<DVec3> {
        let location = self.location(id)?;
        if let Some(chain) = &location.location.absolute_position {
            return Ok(chain.iter().copied().sum());
        }
        let mut position = location.position();
        let mut parent = location.parent();
        while let Some(parent_id) = parent {
            let node = self.location(parent_id)?;
            position += node.position();
            parent = node.parent();
        }
        Ok(position)
    }

    /// Create a location and attach it under `parent` (None creates a root).
    ///
    /// The seed and id are drawn from `rng`, the material is derived right
    /// away, then the location is placed and, unless told otherwise, given
    /// an orbit suited to its parent.
    pub fn create(
        &mut self,
        parent: Option<LocationId>,
        structure: Structure,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        let target = match placement.position {
            Some(position) => Target::Exact(position),
            None => Target::Anywhere,
        };
        self.create_at(parent, structure, target, placement.orbit, rng)
    }

    pub fn create_universe(&mut self, rng: &mut RandomSource) -> Result<LocationId> {
        self.create(
            None,
            Structure::Universe,
            Placement::at(DVec3::ZERO).without_orbit(),
            rng,
        )
    }

    pub fn create_asteroid_field(
        &mut self,
        parent: Option<LocationId>,
        options: FieldOptions,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        let structure = Structure::AsteroidField(FieldGeometry {
            oort: options.oort,
            toroidal: false,
            major_radius: options.major_radius,
            minor_radius: options.minor_radius,
        });
        let id = self.create(parent, structure, placement, rng)?;
        if let Some(orbit) = options.child_orbit {
            if let Err(err) = self.check_orbit_reference(Some(id), &orbit) {
                self.remove(id)?;
                return Err(err);
            }
            self.location_mut(id)?.child_orbit = Some(orbit);
        }
        Ok(id)
    }

    pub fn create_black_hole(
        &mut self,
        parent: Option<LocationId>,
        supermassive: bool,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        self.create(parent, Structure::BlackHole { supermassive }, placement, rng)
    }

    pub fn create_galaxy(
        &mut self,
        parent: Option<LocationId>,
        kind: GalaxyKind,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        self.create(parent, Structure::Galaxy(kind), placement, rng)
    }

    pub fn create_star_system(
        &mut self,
        parent: Option<LocationId>,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        self.create(parent, Structure::StarSystem, placement, rng)
    }

    pub fn create_planetoid(
        &mut self,
        parent: Option<LocationId>,
        kind: PlanetoidKind,
        placement: Placement,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        self.create(parent, Structure::Planetoid(kind), placement, rng)
    }

    pub(crate) fn create_at(
        &mut self,
        parent: Option<LocationId>,
        structure: Structure,
        target: Target,
        orbit: OrbitChoice,
        rng: &mut RandomSource,
    ) -> Result<LocationId> {
        let structure = self.resolve_structure(parent, structure, target)?;

        // Explicit orbits are checked before anything is drawn or inserted
        if let OrbitChoice::Explicit(explicit) = &orbit {
            self.check_orbit_reference(parent, explicit)?;
        }

        let seed = rng.next_seed();
        let id = LocationId::generate(rng);
        let ambient = self.ambient_temperature(parent)?;
        let material = derive_material(&structure, seed, ambient)?;

        let position = match (parent, target) {
            (_, Target::Exact(position)) => position,
            (None, _) => DVec3::ZERO,
            (Some(parent_id), Target::Anywhere) => {
                self.find_open_space(parent_id, material.bounding_radius(), rng)?
            }
            (Some(parent_id), Target::Within(region)) => {
                self.find_open_space_within(parent_id, &region, material.bounding_radius(), rng)?
            }
        };

        self.insert(id, parent, structure, seed, material, position)?;

        let orbit = match orbit {
            OrbitChoice::Explicit(explicit) => Some(explicit),
            OrbitChoice::None => None,
            OrbitChoice::Derive if self.config.assign_orbits => match parent {
                Some(parent_id) => match self.derive_child_orbit(parent_id, id, rng) {
                    Ok(orbit) => orbit,
                    Err(err) => {
                        self.remove(id)?;
                        return Err(err);
                    }
                },
                None => None,
            },
            OrbitChoice::Derive => None,
        };
        self.set_orbit(id, orbit)?;

        debug!(
            "Created {} {} at {:?} (seed {})",
            structure.kind().name(),
            id,
            position,
            seed
        );
        Ok(id)
    }

    /// Fix up scalars that depend on where the location goes
    fn resolve_structure(
        &self,
        parent: Option<LocationId>,
        structure: Structure,
        target: Target,
    ) -> Result<Structure> {
        let Structure::AsteroidField(mut geometry) = structure else {
            return Ok(structure);
        };
        let in_star_system = match parent {
            Some(parent_id) => self.location(parent_id)?.kind() == StructureKind::StarSystem,
            None => false,
        };
        let at_origin = matches!(target, Target::Exact(position) if position == DVec3::ZERO);
        if !geometry.oort && geometry.major_radius.is_none() && in_star_system && at_origin {
            geometry.toroidal = true;
        }
        Ok(Structure::AsteroidField(geometry))
    }

    /// Temperature handed to bodies without their own heat source
    fn ambient_temperature(&self, parent: Option<LocationId>) -> Result<f64> {
        match parent {
            Some(parent_id) => Ok(self.location(parent_id)?.temperature()),
            None => Ok(CMB_TEMPERATURE),
        }
    }

    /// Insert a fully derived location and link it to its parent
    pub(crate) fn insert(
        &mut self,
        id: LocationId,
        parent: Option<LocationId>,
        structure: Structure,
        seed: Seed,
        material: Material,
        position: DVec3,
    ) -> Result<()> {
        let absolute_position = match parent {
            Some(parent_id) => self
                .location(parent_id)?
                .location
                .absolute_position
                .as_ref()
                .map(|chain| {
                    let mut chain = chain.clone();
                    chain.push(position);
                    chain
                }),
            None => Some(vec![position]),
        };

        let mut node = CosmicLocation {
            location: Location {
                id,
                parent,
                position,
                absolute_position,
                orbit: None,
            },
            structure,
            seed,
            name: None,
            velocity: DVec3::ZERO,
            material,
            child_orbit: None,
            children: Vec::new(),
            dominant: None,
        };
        node.material = self.heated_material(&node)?;

        if let Some(parent_id) = parent {
            self.location_mut(parent_id)?.children.push(id);
        }
        self.locations.insert(id, node);
        Ok(())
    }

    /// Planets and fields inside a star system sit at the equilibrium
    /// temperature for their distance from the primary star
    pub(crate) fn heated_material(&self, node: &CosmicLocation) -> Result<Material> {
        let warmed = matches!(
            node.kind(),
            StructureKind::Planetoid | StructureKind::AsteroidField | StructureKind::OortCloud
        );
        let Some(parent_id) = node.parent() else {
            return Ok(node.material);
        };
        let parent = self.location(parent_id)?;
        if !warmed || parent.kind() != StructureKind::StarSystem {
            return Ok(node.material);
        }

        // A system weighs what its primary weighs
        let luminosity = luminosity(parent.mass());
        let distance = if node.is_centered() {
            node.material.bounding_radius()
        } else {
            node.position().length()
        };
        let temperature = equilibrium_temperature(luminosity, distance).max(parent.temperature());
        node.material.with_temperature(temperature)
    }

    /// Set the orbit and the velocity that goes with it
    pub(crate) fn set_orbit(
        &mut self,
        id: LocationId,
        orbit: Option<OrbitalParameters>,
    ) -> Result<()> {
        let node = self.location_mut(id)?;
        node.velocity = orbit
            .as_ref()
            .map(|o| o.relative_velocity())
            .unwrap_or(DVec3::ZERO);
        node.location.orbit = orbit;
        Ok(())
    }

    /// The body at the center of a location, generated on first access.
    ///
    /// Its structure and seed come from the location's own seed, so it always
    /// matches what the location's material was derived from. Locations
    /// without such a body return None.
    pub fn dominant_child(&mut self, id: LocationId) -> Result<Option<LocationId>> {
        let node = self.location(id)?;
        if let Some(existing) = node.dominant {
            return Ok(Some(existing));
        }
        let Some((structure, seed)) = cosmos_physics::dominant_child(&node.structure, node.seed)
        else {
            return Ok(None);
        };

        let ambient = node.temperature();
        let material = derive_material(&structure, seed, ambient)?;
        let child_id = LocationId::generate(&mut RandomSource::new(seed));
        self.insert(child_id, Some(id), structure, seed, material, DVec3::ZERO)?;

        // The dominant child always leads the child list
        let node = self.location_mut(id)?;
        node.children.retain(|child| *child != child_id);
        node.children.insert(0, child_id);
        node.dominant = Some(child_id);

        info!(
            "Generated {} at the center of {} {}",
            structure.kind().name(),
            self.location(id)?.kind().name(),
            id
        );
        Ok(Some(child_id))
    }

    /// Remove a location and everything below it
    pub fn remove(&mut self, id: LocationId) -> Result<()> {
        let parent = self.location(id)?.parent();
        if let Some(parent_id) = parent {
            if let Some(parent) = self.locations.get_mut(&parent_id) {
                parent.children.retain(|child| *child != id);
                if parent.dominant == Some(id) {
                    parent.dominant = None;
                }
            }
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.locations.remove(&next) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    /// Whether `target` may be orbited by a child of `parent`: the parent or
    /// one of its ancestors, or a child of any of them
    pub(crate) fn is_reachable(&self, parent: Option<LocationId>, target: LocationId) -> bool {
        let mut current = parent;
        while let Some(id) = current {
            let Some(node) = self.locations.get(&id) else {
                return false;
            };
            if id == target || node.children.contains(&target) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    pub(crate) fn check_orbit_reference(
        &self,
        parent: Option<LocationId>,
        orbit: &OrbitalParameters,
    ) -> Result<()> {
        match orbit.orbited.id {
            Some(target) if !self.is_reachable(parent, target) => {
                Err(CosmosError::OrphanOrbitReference(target))
            }
            _ => Ok(()),
        }
    }

    /// Recompute absolute-position chains below `id` after a move
    pub(crate) fn refresh_absolute_positions(&mut self, id: LocationId) -> Result<()> {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = self.location(next)?;
            let chain = match node.parent() {
                Some(parent_id) => self
                    .location(parent_id)?
                    .location
                    .absolute_position
                    .clone()
                    .map(|mut chain| {
                        chain.push(node.position());
                        chain
                    }),
                None => Some(vec![node.position()]),
            };
            pending.extend(node.children.iter().copied());
            self.location_mut(next)?.location.absolute_position = chain;
        }
        Ok(())
    }
}
