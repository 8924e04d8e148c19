pub mod config;
pub mod constants;
pub mod error;
pub mod material;
pub mod orbit;
pub mod random;
pub mod shape;
pub mod types;

pub use config::GenerationConfig;
pub use constants::*;
pub use error::{require_positive, CosmosError, Result};
pub use material::{Material, Substance};
pub use orbit::{OrbitalParameters, OrbitedBody};
pub use random::{with_default_source, RandomSource};
pub use shape::Shape;
pub use types::*;
