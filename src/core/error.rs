use thiserror::Error;

/// Configuration rejected before any generation state is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target_road_count must be greater than zero")]
    ZeroTargetCount,

    #[error("grid_spacing must be positive, got {0}")]
    NonPositiveSpacing(i32),

    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("decoration_jitter must be non-negative, got {0}")]
    NegativeJitter(f32),

    #[error("decoration_jitter is too large to sample, got {0}")]
    JitterTooLarge(f32),
}

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
