pub mod cosmos;
pub mod enclose;
pub mod location;
pub mod orbits;
pub mod placement;
pub mod population;
pub mod record;

pub use cosmos::Cosmos;
pub use enclose::container_for;
pub use location::{CosmicLocation, FieldOptions, Location, OrbitChoice, Placement};
pub use placement::search_open_space;
pub use population::{pick_child_definition, PopulationReport};
pub use record::LocationRecord;
