use cosmos_core::*;
use cosmos_physics::{child_definitions, ChildDefinition};
use glam::DVec3;
use tracing::{info, warn};

use crate::cosmos::{Cosmos, Target};
use crate::location::OrbitChoice;

/// Above this many multiples of the cap the Poisson draw is skipped
const CAP_SHORTCUT_FACTOR: f64 = 4.0;

/// What a population pass produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationReport {
    pub spawned: Vec<LocationId>,
    /// Children that could not be placed
    pub skipped: u32,
}

impl Cosmos {
    /// Fill a location with children drawn from its density table.
    ///
    /// The dominant child is generated first. Children that find no open
    /// space are logged and skipped; the pass itself only fails when the
    /// parent is unknown.
    ///
    /// Each definition yields at most `max_children_per_definition`
    /// children, so for large parents (a galaxy expects tens of millions of
    /// star systems) the count falls far short of density × volume. Use
    /// `populate_region` on regions small enough that the expected count
    /// stays under the cap to get counts that follow the density.
    pub fn populate(
        &mut self,
        parent: LocationId,
        rng: &mut RandomSource,
    ) -> Result<PopulationReport> {
        self.populate_within(parent, None, rng)
    }

    /// Populate only the part of `parent` around `center` (parent frame).
    ///
    /// Expected counts use the smaller of the region's and the parent's
    /// volume, so repeated calls for nearby regions add detail gradually.
    pub fn populate_region(
        &mut self,
        parent: LocationId,
        center: DVec3,
        radius: f64,
        rng: &mut RandomSource,
    ) -> Result<PopulationReport> {
        let focus = Shape::sphere(center, radius)?;
        self.populate_within(parent, Some(focus), rng)
    }

    fn populate_within(
        &mut self,
        parent: LocationId,
        focus: Option<Shape>,
        rng: &mut RandomSource,
    ) -> Result<PopulationReport> {
        let mut report = PopulationReport::default();
        let kind = self.location(parent)?.kind();
        let definitions = child_definitions(kind);
        if definitions.is_empty() {
            return Ok(report);
        }

        self.dominant_child(parent)?;

        let parent_volume = self.location(parent)?.shape().volume();
        let volume = match &focus {
            Some(region) => region.volume().min(parent_volume),
            None => parent_volume,
        };
        let target = match focus {
            Some(region) => Target::Within(region),
            None => Target::Anywhere,
        };

        for definition in definitions {
            let count = self.draw_count(definition.expected_count(volume), rng);
            for _ in 0..count {
                match self.create_at(
                    Some(parent),
                    definition.template,
                    target,
                    OrbitChoice::Derive,
                    rng,
                ) {
                    Ok(id) => report.spawned.push(id),
                    Err(err) => {
                        warn!(
                            "Skipped {} in {} {}: {}",
                            definition.template.kind().name(),
                            kind.name(),
                            parent,
                            err
                        );
                        report.skipped += 1;
                    }
                }
            }
        }

        info!(
            "Populated {} {}: {} spawned, {} skipped",
            kind.name(),
            parent,
            report.spawned.len(),
            report.skipped
        );
        Ok(report)
    }

    /// Poisson count around `expected`, capped by the config
    fn draw_count(&self, expected: f64, rng: &mut RandomSource) -> u64 {
        let cap = u64::from(self.config.max_children_per_definition);
        if !(expected.is_finite() && expected > 0.0) {
            return 0;
        }
        if expected > cap as f64 * CAP_SHORTCUT_FACTOR {
            return cap;
        }
        rng.poisson(expected).min(cap)
    }

    /// Create one child of `parent` from a definition picked by density
    pub fn spawn_child(
        &mut self,
        parent: LocationId,
        rng: &mut RandomSource,
    ) -> Result<Option<LocationId>> {
        let kind = self.location(parent)?.kind();
        let Some(definition) = pick_child_definition(child_definitions(kind), rng) else {
            return Ok(None);
        };
        self.create_at(
            Some(parent),
            definition.template,
            Target::Anywhere,
            OrbitChoice::Derive,
            rng,
        )
        .map(Some)
    }
}

/// One definition, chosen with probability proportional to its density
pub fn pick_child_definition(
    definitions: &[ChildDefinition],
    rng: &mut RandomSource,
) -> Option<ChildDefinition> {
    let weights: Vec<f64> = definitions.iter().map(|d| d.density).collect();
    rng.weighted_index(&weights).map(|i| definitions[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FieldOptions, Placement};
    use cosmos_physics::{GalaxyKind, PlanetoidKind, Structure, StructureKind};

    #[test]
    fn test_pick_follows_density() {
        let definitions = child_definitions(StructureKind::SpiralGalaxy);
        let mut rng = RandomSource::new(1);
        let mut systems = 0;
        for _ in 0..2000 {
            let definition = pick_child_definition(definitions, &mut rng).unwrap();
            if definition.template == Structure::StarSystem {
                systems += 1;
            }
        }
        // Star systems outweigh the rest of the table a thousandfold
        assert!(systems > 1980, "systems = {}", systems);
        assert!(pick_child_definition(&[], &mut rng).is_none());
    }

    #[test]
    fn test_leaf_population_is_empty() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(2);
        let star = cosmos
            .create(None, Structure::Star, Placement::default(), &mut rng)
            .unwrap();
        assert_eq!(cosmos.populate(star, &mut rng).unwrap(), PopulationReport::default());
        assert_eq!(cosmos.spawn_child(star, &mut rng).unwrap(), None);
    }

    #[test]
    fn test_population_is_contained_and_disjoint() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(3);
        let galaxy = cosmos
            .create_galaxy(None, GalaxyKind::Dwarf, Placement::default(), &mut rng)
            .unwrap();
        let report = cosmos.populate(galaxy, &mut rng).unwrap();
        assert!(!report.spawned.is_empty());

        let region = *cosmos.get(galaxy).unwrap().shape();
        let children = cosmos.children(galaxy).unwrap().to_vec();
        for (i, a) in children.iter().enumerate() {
            let a = cosmos.get(*a).unwrap();
            assert!(region.contains_sphere(a.position(), a.material.bounding_radius()));
            for b in &children[i + 1..] {
                let b = cosmos.get(*b).unwrap();
                let gap = a.position().distance(b.position());
                assert!(gap >= a.material.bounding_radius() + b.material.bounding_radius());
            }
        }
    }

    #[test]
    fn test_population_clears_a_central_oort_cloud() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(31);
        let system = cosmos.create_star_system(None, Placement::default(), &mut rng).unwrap();
        let cloud = cosmos
            .create_asteroid_field(
                Some(system),
                FieldOptions {
                    oort: true,
                    ..FieldOptions::default()
                },
                Placement::at(DVec3::ZERO),
                &mut rng,
            )
            .unwrap();
        let report = cosmos.populate(system, &mut rng).unwrap();
        assert!(!report.spawned.is_empty());

        let siblings = cosmos.children(system).unwrap().to_vec();
        for id in &report.spawned {
            let child = cosmos.get(*id).unwrap();
            for other in siblings.iter().filter(|other| *other != id) {
                let other = cosmos.get(*other).unwrap();
                let gap = child.position().distance(other.position());
                assert!(gap >= child.material.bounding_radius() + other.material.bounding_radius());
            }
            let cloud = cosmos.get(cloud).unwrap();
            assert!(child.position().length() >= cloud.material.bounding_radius());
        }
    }

    #[test]
    fn test_population_is_reproducible() {
        let grow = || {
            let mut cosmos = Cosmos::new(GenerationConfig::default());
            let mut rng = RandomSource::new(99);
            let system = cosmos.create_star_system(None, Placement::default(), &mut rng).unwrap();
            cosmos.populate(system, &mut rng).unwrap();
            cosmos.capture_tree(system).unwrap()
        };
        let first = grow();
        assert!(first.len() > 1);
        assert_eq!(first, grow());
    }

    #[test]
    fn test_density_convergence() {
        // An Oort cloud volume is ~1.7e48 m^3, so at 1e-47 comets per m^3
        // the expected count is ~17, well below the cap.
        let mut cosmos = Cosmos::new(GenerationConfig {
            max_children_per_definition: 10_000,
            ..GenerationConfig::default()
        });
        let mut rng = RandomSource::new(4);
        let trials = 60;
        let mut total = 0usize;
        let mut expected = 0.0;
        for _ in 0..trials {
            let cloud = cosmos
                .create_asteroid_field(
                    None,
                    FieldOptions {
                        oort: true,
                        ..FieldOptions::default()
                    },
                    Placement::default(),
                    &mut rng,
                )
                .unwrap();
            let volume = cosmos.get(cloud).unwrap().shape().volume();
            expected += child_definitions(StructureKind::OortCloud)[0].expected_count(volume);
            let report = cosmos.populate(cloud, &mut rng).unwrap();
            assert_eq!(report.skipped, 0);
            total += report.spawned.len();
            cosmos.remove(cloud).unwrap();
        }
        let ratio = total as f64 / expected;
        assert!((ratio - 1.0).abs() < 0.1, "ratio = {}", ratio);
    }

    #[test]
    fn test_count_is_capped() {
        let mut cosmos = Cosmos::new(GenerationConfig {
            max_children_per_definition: 3,
            ..GenerationConfig::default()
        });
        let mut rng = RandomSource::new(5);
        let system = cosmos.create_star_system(None, Placement::default(), &mut rng).unwrap();
        let field = cosmos
            .create_asteroid_field(
                Some(system),
                FieldOptions {
                    major_radius: Some(1e12),
                    ..FieldOptions::default()
                },
                Placement::at(DVec3::new(2.0 * AU, 0.0, 0.0)),
                &mut rng,
            )
            .unwrap();
        let report = cosmos.populate(field, &mut rng).unwrap();
        assert_eq!(report.spawned.len() as u32 + report.skipped, 3);
        for asteroid in &report.spawned {
            let asteroid = cosmos.get(*asteroid).unwrap();
            assert_eq!(asteroid.structure, Structure::Planetoid(PlanetoidKind::Asteroid));
            assert!(asteroid.orbit().is_some());
        }
    }

    #[test]
    fn test_whole_galaxy_stops_at_the_cap() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(9);
        let galaxy = cosmos
            .create_galaxy(None, GalaxyKind::Dwarf, Placement::default(), &mut rng)
            .unwrap();
        let volume = cosmos.get(galaxy).unwrap().shape().volume();
        let definitions = child_definitions(StructureKind::DwarfGalaxy);
        let cap = cosmos.config().max_children_per_definition;
        assert!(definitions
            .iter()
            .all(|d| d.expected_count(volume) > 4.0 * cap as f64));

        let report = cosmos.populate(galaxy, &mut rng).unwrap();
        assert_eq!(
            report.spawned.len() as u32 + report.skipped,
            cap * definitions.len() as u32
        );
    }

    #[test]
    fn test_region_population_stays_local() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(6);
        let galaxy = cosmos
            .create_galaxy(None, GalaxyKind::Spiral, Placement::default(), &mut rng)
            .unwrap();
        let center = DVec3::new(5e19, 0.0, 0.0);
        let report = cosmos.populate_region(galaxy, center, 1e18, &mut rng).unwrap();
        for id in &report.spawned {
            assert!(cosmos.get(*id).unwrap().position().distance(center) <= 1e18);
        }
    }

    #[test]
    fn test_unplaceable_children_are_skipped() {
        let mut cosmos = Cosmos::new(GenerationConfig {
            placement_attempts: 0,
            ..GenerationConfig::default()
        });
        let mut rng = RandomSource::new(7);
        let system = cosmos.create_star_system(None, Placement::default(), &mut rng).unwrap();
        let report = cosmos.populate(system, &mut rng).unwrap();
        assert!(report.spawned.is_empty());
        assert!(report.skipped > 0);

        let star = cosmos.get(system).unwrap().generated_dominant_child().unwrap();
        assert_eq!(cosmos.children(system).unwrap(), &[star]);
    }

    #[test]
    fn test_spawn_child_reports_no_room() {
        let mut cosmos = Cosmos::new(GenerationConfig::default());
        let mut rng = RandomSource::new(8);
        let field = cosmos
            .create_asteroid_field(
                None,
                FieldOptions {
                    major_radius: Some(500.0),
                    minor_radius: Some(500.0),
                    ..FieldOptions::default()
                },
                Placement::default(),
                &mut rng,
            )
            .unwrap();
        let err = cosmos.spawn_child(field, &mut rng).unwrap_err();
        assert!(matches!(err, CosmosError::PlacementExhausted { .. }));
        assert!(cosmos.children(field).unwrap().is_empty());
    }
}
