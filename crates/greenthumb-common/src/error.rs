//! Error types for the watering simulation.

use thiserror::Error;

use crate::ids::EntityId;

/// Top-level error type for Greenthumb operations.
#[derive(Debug, Error)]
pub enum GardenError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Growth target errors
    #[error("Growth error: {0}")]
    Growth(#[from] GrowthError),

    /// A component was built without a reference it cannot run without
    #[error("Missing required reference: {0}")]
    MissingReference(&'static str),

    /// No growth target is registered under this id
    #[error("Unknown growth target {0:?}")]
    UnknownTarget(EntityId),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration errors.
///
/// These are fatal for the component that owns the configuration only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Stage threshold count does not match the stage count
    #[error("expected {expected} stage thresholds for {stages} stages, got {thresholds}")]
    ThresholdMismatch {
        /// Number of growth stages
        stages: usize,
        /// Number of thresholds expected (`stages - 1`)
        expected: usize,
        /// Number of thresholds supplied
        thresholds: usize,
    },

    /// No growth stages were supplied
    #[error("no growth stages configured")]
    NoStages,

    /// Total growth time is zero or negative
    #[error("total growth time must be positive, got {0}")]
    NonPositiveGrowthTime(f32),

    /// Vessel capacity is zero
    #[error("vessel capacity must be greater than zero")]
    ZeroCapacity,

    /// A rate or interval is zero or negative
    #[error("{name} must be positive, got {value}")]
    NonPositiveRate {
        /// Name of the setting
        name: &'static str,
        /// Value supplied
        value: f32,
    },
}

/// Growth target errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// Requested stage index is outside the configured stages
    #[error("invalid growth stage {requested} (stage count {stage_count})")]
    InvalidStage {
        /// Requested index
        requested: usize,
        /// Number of stages configured
        stage_count: usize,
    },

    /// Stages only move forward outside of a replant
    #[error("cannot move from growth stage {current} back to {requested}")]
    Regression {
        /// Active stage
        current: usize,
        /// Requested index
        requested: usize,
    },

    /// The target failed setup and no longer accepts commands
    #[error("growth target is inert")]
    Inert,
}

/// Result type alias for Greenthumb operations.
pub type GardenResult<T> = Result<T, GardenError>;
