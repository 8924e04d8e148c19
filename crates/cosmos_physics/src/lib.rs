pub mod asteroid_field;
pub mod black_hole;
pub mod density;
pub mod derive;
pub mod galactic;
pub mod planetoid;
pub mod stellar;
pub mod structure;

pub use density::{child_definitions, ChildDefinition};
pub use derive::{derive_material, dominant_child};
pub use stellar::SpectralClass;
pub use structure::{FieldGeometry, GalaxyKind, PlanetoidKind, Structure, StructureKind};
