use thiserror::Error;

/// Rejected configuration values, reported by [`crate::CountdownConfig::validate`]
/// and by constructors that take capacities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle pool capacity must be nonzero")]
    ZeroCapacity,
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },
    #[error("celebration spawn probability must not be below the final-seconds probability")]
    ProbabilityOrder,
    #[error("{name} range is empty (min > max)")]
    EmptyRange { name: &'static str },
    #[error("friction must be within (0, 1], got {0}")]
    Friction(f32),
    #[error("fade duration must be at least one tick")]
    ZeroFade,
}
