//! Headless census of one generated branch of a universe.
//!
//! Usage: cosmos [seed] [snapshot path]
//!
//! Starting from a universe, each level is populated and the walk descends
//! into the first child that has children of its own, down to the asteroids
//! of a star system. Prints what was generated and, given a path, saves the
//! branch as a snapshot.

use cosmos_core::{AU, GenerationConfig, LocationId, RandomSource, SOLAR_MASS};
use cosmos_physics::{child_definitions, SpectralClass, StructureKind};
use cosmos_sim::Cosmos;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = GenerationConfig::default();
    if let Some(seed) = args.next() {
        config.seed = seed.parse()?;
    }
    let snapshot_path = args.next().map(PathBuf::from);

    let mut rng = RandomSource::new(config.seed);
    let mut cosmos = Cosmos::new(config);
    let universe = cosmos.create_universe(&mut rng)?;

    let mut path = vec![universe];
    let mut current = universe;
    loop {
        cosmos.populate(current, &mut rng)?;
        let Some(next) = descend(&cosmos, current) else {
            break;
        };
        path.push(next);
        current = next;
    }

    // Fields hang off the star system, populate them too
    let system = path
        .iter()
        .copied()
        .find(|id| cosmos.get(*id).is_some_and(|l| l.kind() == StructureKind::StarSystem));
    if let Some(system) = system {
        for child in cosmos.children(system)?.to_vec() {
            if cosmos.location(child)?.kind().is_field() && !path.contains(&child) {
                cosmos.populate(child, &mut rng)?;
            }
        }
    }

    println!("=== Branch (seed {}) ===", cosmos.config().seed);
    for (depth, id) in path.iter().enumerate() {
        let location = cosmos.location(*id)?;
        println!(
            "{}{}: {:.3e} kg, radius {:.3e} m, {:.1} K",
            "  ".repeat(depth),
            location.display_name(),
            location.mass(),
            location.material.bounding_radius(),
            location.temperature()
        );
    }

    println!();
    println!("=== Census ({} locations) ===", cosmos.len());
    let mut census: HashMap<StructureKind, u32> = HashMap::new();
    for location in cosmos.iter() {
        *census.entry(location.kind()).or_insert(0) += 1;
    }
    let mut rows: Vec<_> = census.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.name().cmp(b.0.name())));
    for (kind, count) in rows {
        println!("  {:<18} {}", kind.name(), count);
    }

    if let Some(system) = system {
        println!();
        print_system(&cosmos, system)?;
    }

    if let Some(path) = snapshot_path {
        cosmos_storage::save_cosmos(&cosmos, universe, &path)?;
        info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

/// First child that can hold children of its own; the dominant child leads
fn descend(cosmos: &Cosmos, id: LocationId) -> Option<LocationId> {
    let location = cosmos.get(id)?;
    location.children().iter().copied().find(|child| {
        cosmos
            .get(*child)
            .is_some_and(|c| !child_definitions(c.kind()).is_empty())
    })
}

fn print_system(cosmos: &Cosmos, system: LocationId) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Star system {} ===", system);
    for child in cosmos.children(system)? {
        let body = cosmos.location(*child)?;
        match body.kind() {
            StructureKind::Star => println!(
                "  Star: {:.2} M☉, class {}, {:.0} K",
                body.mass() / SOLAR_MASS,
                SpectralClass::from_temperature(body.temperature()).letter(),
                body.temperature()
            ),
            _ => match body.orbit() {
                Some(orbit) => println!(
                    "  {}: a = {:.2} AU, e = {:.3}, period {:.1} yr, {:.0} K, {} children",
                    body.display_name(),
                    orbit.semi_major_axis / AU,
                    orbit.eccentricity,
                    orbit.period / 3.155_76e7,
                    body.temperature(),
                    body.children().len()
                ),
                None => println!(
                    "  {}: {:.2} AU out, {:.0} K, {} children",
                    body.display_name(),
                    body.position().length() / AU,
                    body.temperature(),
                    body.children().len()
                ),
            },
        }
    }
    Ok(())
}
