use cosmos_core::*;
use cosmos_physics::StructureKind;

use crate::cosmos::Cosmos;

/// Eccentricity spread for bodies orbiting inside galaxies and subgroups
const GALACTIC_ECCENTRICITY_SIGMA: f64 = 0.1;
/// Planets keep to rounder orbits
const PLANETARY_ECCENTRICITY_SIGMA: f64 = 0.05;
/// Half-normal draws are capped below escape
const MAX_ECCENTRICITY: f64 = 0.99;

impl Cosmos {
    /// The orbit a child gets from its parent's structural type, or None.
    ///
    /// Centered children of galaxies and star systems do not orbit; neither
    /// does a subgroup's main galaxy.
    pub(crate) fn derive_child_orbit(
        &mut self,
        parent: LocationId,
        child: LocationId,
        rng: &mut RandomSource,
    ) -> Result<Option<OrbitalParameters>> {
        let parent_node = self.location(parent)?;
        let kind = parent_node.kind();
        let fixed_child_orbit = parent_node.child_orbit;
        let own_orbit = parent_node.location.orbit;
        let centered = self.location(child)?.is_centered();

        match kind {
            StructureKind::AsteroidField | StructureKind::OortCloud => {
                if let Some(fixed) = fixed_child_orbit {
                    return Ok(Some(fixed));
                }
                let Some(field_orbit) = own_orbit else {
                    return Ok(None);
                };
                let orbited = match field_orbit.orbited.id {
                    Some(id) if self.get(id).is_some() => self.orbited_body(id)?,
                    _ => field_orbit.orbited,
                };
                self.orbit_around(orbited, child, field_orbit.eccentricity, rng)
            }
            StructureKind::GalaxySubgroup => {
                let Some(main) = self.dominant_child(parent)? else {
                    return Ok(None);
                };
                if main == child {
                    return Ok(None);
                }
                let orbited = self.orbited_body(main)?;
                let eccentricity = draw_eccentricity(rng, GALACTIC_ECCENTRICITY_SIGMA);
                self.orbit_around(orbited, child, eccentricity, rng)
            }
            StructureKind::SpiralGalaxy
            | StructureKind::EllipticalGalaxy
            | StructureKind::DwarfGalaxy
            | StructureKind::GlobularCluster => {
                if centered {
                    return Ok(None);
                }
                let orbited = match self.dominant_child(parent)? {
                    Some(center) => self.orbited_body(center)?,
                    None => self.orbited_body(parent)?,
                };
                let eccentricity = draw_eccentricity(rng, GALACTIC_ECCENTRICITY_SIGMA);
                self.orbit_around(orbited, child, eccentricity, rng)
            }
            StructureKind::StarSystem => {
                if centered {
                    return Ok(None);
                }
                let Some(primary) = self.dominant_child(parent)? else {
                    return Ok(None);
                };
                let orbited = self.orbited_body(primary)?;
                let eccentricity = draw_eccentricity(rng, PLANETARY_ECCENTRICITY_SIGMA);
                self.orbit_around(orbited, child, eccentricity, rng)
            }
            _ => Ok(None),
        }
    }

    /// A location as an orbit sees it: id, mass and current global position
    pub fn orbited_body(&self, id: LocationId) -> Result<OrbitedBody> {
        Ok(OrbitedBody {
            id: Some(id),
            mass: self.location(id)?.mass(),
            position: self.global_position(id)?,
        })
    }

    fn orbit_around(
        &self,
        orbited: OrbitedBody,
        child: LocationId,
        eccentricity: f64,
        rng: &mut RandomSource,
    ) -> Result<Option<OrbitalParameters>> {
        let position = self.global_position(child)?;
        // A body sitting on top of what it would orbit has no orbit
        if position == orbited.position {
            return Ok(None);
        }
        OrbitalParameters::from_eccentricity(orbited, position, eccentricity, rng).map(Some)
    }
}

fn draw_eccentricity(rng: &mut RandomSource, sigma: f64) -> f64 {
    rng.positive_normal_sample(0.0, sigma).min(MAX_ECCENTRICITY)
}
