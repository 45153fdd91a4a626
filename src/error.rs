use thiserror::Error;

/// Rejected solver configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size {size} is too small, need at least {min}")]
    GridTooSmall { size: usize, min: usize },

    #[error("iteration count must be at least 1, got {0}")]
    InvalidIterations(usize),

    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f32),

    #[error("diffusion rate must be finite and non-negative, got {0}")]
    InvalidDiffusion(f32),

    #[error("viscosity must be finite and non-negative, got {0}")]
    InvalidViscosity(f32),

    #[error("injection limit {name} must be finite and non-negative, got {value}")]
    InvalidLimit { name: &'static str, value: f32 },
}
