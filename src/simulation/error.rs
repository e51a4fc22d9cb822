//! Error types and handling
//!
//! Invalid floor requests are never errors: the controller absorbs them. The errors here
//! cover construction of a car, configuration loading, and reading batch input.

use crate::types::{ConfigError, ConfigValidationError, Floor};
use thiserror::Error;

/// Errors that can occur while building or driving a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Floor range is inverted
    #[error("Invalid floor range: min ({min}) must be <= max ({max})")]
    InvalidFloorRange {
        /// Lowest floor requested
        min: Floor,
        /// Highest floor requested
        max: Floor,
    },

    /// Starting floor outside the shaft
    #[error("Initial floor {floor} is outside the floor range {min}..={max}")]
    InitialFloorOutOfRange {
        /// The configured starting floor
        floor: Floor,
        /// Lowest floor of the range
        min: Floor,
        /// Highest floor of the range
        max: Floor,
    },

    /// Batch input could not be read
    #[error("Batch input error: {0}")]
    BatchInputError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ReadError(e) => SimulationError::IoError(e),
            other => SimulationError::ConfigurationError(other.to_string()),
        }
    }
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        match error {
            ConfigValidationError::InvalidFloorRange(min, max) => {
                SimulationError::InvalidFloorRange { min, max }
            }
            ConfigValidationError::InitialFloorOutOfRange { floor, min, max } => {
                SimulationError::InitialFloorOutOfRange { floor, min, max }
            }
            other => SimulationError::ConfigurationError(other.to_string()),
        }
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a batch input error
    pub fn batch_input_error(msg: impl Into<String>) -> Self {
        Self::BatchInputError(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// A car that cannot be built is fatal for the run. Unreadable batch input only
    /// loses that input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::InvalidFloorRange { .. } => false,
            SimulationError::InitialFloorOutOfRange { .. } => false,
            SimulationError::BatchInputError(_) => true,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvalidFloorRange { .. } => "Construction",
            SimulationError::InitialFloorOutOfRange { .. } => "Construction",
            SimulationError::BatchInputError(_) => "Batch Input",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("Invalid config");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");

        let batch_error = SimulationError::batch_input_error("not an array");
        assert_eq!(batch_error.to_string(), "Batch input error: not an array");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: SimulationError = ConfigValidationError::InvalidFloorRange(9, 2).into();
        assert!(matches!(error, SimulationError::InvalidFloorRange { min: 9, max: 2 }));
        assert_eq!(error.to_string(), "Invalid floor range: min (9) must be <= max (2)");

        let error: SimulationError =
            ConfigValidationError::InitialFloorOutOfRange { floor: 1, min: 5, max: 8 }.into();
        assert!(matches!(error, SimulationError::InitialFloorOutOfRange { floor: 1, .. }));

        let error: SimulationError = ConfigValidationError::InvalidBatchSize(0).into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
    }

    #[test]
    fn test_error_from_config_error() {
        let error: SimulationError = ConfigError::FileNotFound("x.json".to_string()).into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: SimulationError = ConfigError::ReadError(io_error).into();
        assert!(matches!(error, SimulationError::IoError(_)));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(!SimulationError::configuration_error("bad").is_recoverable());
        assert!(!SimulationError::InvalidFloorRange { min: 2, max: 1 }.is_recoverable());
        assert!(SimulationError::batch_input_error("bad batch").is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::configuration_error("x").category(), "Configuration");
        assert_eq!(
            SimulationError::InitialFloorOutOfRange { floor: 0, min: 1, max: 2 }.category(),
            "Construction"
        );
        assert_eq!(SimulationError::batch_input_error("x").category(), "Batch Input");
    }
}
