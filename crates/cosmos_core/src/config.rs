use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed for the ambient random source of a generation run
    pub seed: u64,
    /// Candidate positions tried by one open-space search before giving up
    pub placement_attempts: u32,
    /// Rejection-sampling budget for drawing a single point inside a shape
    pub sample_attempts: u32,
    /// Upper bound on children spawned for one child definition in one pass
    pub max_children_per_definition: u32,
    /// Whether newly created children receive an orbit from their parent
    pub assign_orbits: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            placement_attempts: 500,
            sample_attempts: 64,
            max_children_per_definition: 24,
            assign_orbits: true,
        }
    }
}
