use std::collections::VecDeque;

use cosmos_core::*;
use cosmos_physics::{derive_material, Structure};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::cosmos::Cosmos;

/// Everything needed to bring a location back.
///
/// The material is not stored: it is re-derived from the seed, the structure
/// and the temperature, which stands in as the ambient temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub seed: Seed,
    pub structure: Structure,
    pub parent: Option<LocationId>,
    pub absolute_position: Option<Vec<DVec3>>,
    pub name: Option<String>,
    pub velocity: DVec3,
    pub orbit: Option<OrbitalParameters>,
    pub position: DVec3,
    pub temperature: f64,
    pub child_orbit: Option<OrbitalParameters>,
    /// Whether this is its parent's dominant child
    pub dominant: bool,
}

impl Cosmos {
    pub fn capture(&self, id: LocationId) -> Result<LocationRecord> {
        let node = self.location(id)?;
        let dominant = match node.parent() {
            Some(parent) => self.location(parent)?.dominant == Some(id),
            None => false,
        };
        Ok(LocationRecord {
            id,
            seed: node.seed,
            structure: node.structure,
            parent: node.parent(),
            absolute_position: node.location.absolute_position.clone(),
            name: node.name.clone(),
            velocity: node.velocity,
            orbit: node.location.orbit,
            position: node.position(),
            temperature: node.temperature(),
            child_orbit: node.child_orbit,
            dominant,
        })
    }

    /// Capture `root` and everything below it, breadth first.
    ///
    /// Parents come before their children and a dominant child, which leads
    /// its parent's child list, before its siblings. Rehydrating the records
    /// in order rebuilds the tree.
    pub fn capture_tree(&self, root: LocationId) -> Result<Vec<LocationRecord>> {
        let mut records = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            let node = self.location(id)?;
            records.push(self.capture(id)?);
            queue.extend(node.children.iter().copied());
        }
        Ok(records)
    }

    /// Bring a captured location back under its (already present) parent.
    ///
    /// The material is re-derived; mass, shape and temperature come out as
    /// they were when the record was captured.
    pub fn rehydrate(&mut self, record: LocationRecord) -> Result<LocationId> {
        if let Some(parent) = record.parent {
            self.location(parent)?;
        }
        if let Some(orbit) = &record.orbit {
            self.check_orbit_reference(record.parent, orbit)?;
        }
        // A field's fixed orbit may also circle the field itself
        if let Some(target) = record.child_orbit.and_then(|orbit| orbit.orbited.id) {
            if target != record.id && !self.is_reachable(record.parent, target) {
                return Err(CosmosError::OrphanOrbitReference(target));
            }
        }

        let material = derive_material(&record.structure, record.seed, record.temperature)?
            .with_temperature(record.temperature)?;
        self.insert(
            record.id,
            record.parent,
            record.structure,
            record.seed,
            material,
            record.position,
        )?;

        let node = self.location_mut(record.id)?;
        node.material = material;
        node.name = record.name;
        node.velocity = record.velocity;
        node.location.orbit = record.orbit;
        node.location.absolute_position = record.absolute_position;
        node.child_orbit = record.child_orbit;
        if let (Some(parent), true) = (record.parent, record.dominant) {
            self.location_mut(parent)?.dominant = Some(record.id);
        }
        Ok(record.id)
    }
}
