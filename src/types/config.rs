//! Configuration structures for the elevator simulator
//!
//! This module contains the controller and simulator configuration structures, the
//! command line interface, and the validation logic that guards construction of a car.

use super::{Direction, Floor, OutputFormat, UpQueueOrder};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shaft defaults
pub mod shaft {
    use crate::types::Floor;

    /// Lowest floor when none is configured
    pub const DEFAULT_MIN_FLOOR: Floor = 1;

    /// Highest floor when none is configured
    pub const DEFAULT_MAX_FLOOR: Floor = 99;

    /// Floor the car starts on
    pub const DEFAULT_INITIAL_FLOOR: Floor = 1;

    /// Requests per random batch when none is configured
    pub const DEFAULT_BATCH_SIZE: usize = 4;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-sweep-simulator",
    version,
    about = "Elevator Sweep Simulator - Drives a single elevator car through batches of floor requests",
    long_about = "Feeds batches of floor requests to a single elevator car that services them with a one-pass sweep: every stop ahead of the car in its current direction first, then a single reversal to pick up the stops behind it. Reports the car's final state and travel statistics.

EXAMPLES:
    # Replay the sample batches
    elevator-sweep-simulator --demo

    # Submit explicit batches
    elevator-sweep-simulator --batch 5,10 --batch 1,2,3,11

    # A tall building with basements and random traffic
    elevator-sweep-simulator --min-floor -3 --max-floor 200 --random-batches 50 --seed 42

    # Read batches from a JSON file and print a JSON report
    elevator-sweep-simulator --batches-file batches.json --output-format json

    # Generate configuration template
    elevator-sweep-simulator --print-config > my-config.json

    # Validate configuration without running
    elevator-sweep-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Lowest floor served by the car
    #[arg(long, allow_negative_numbers = true, help = "Lowest floor served by the car")]
    pub min_floor: Option<Floor>,

    /// Highest floor served by the car
    #[arg(long, allow_negative_numbers = true, help = "Highest floor served by the car")]
    pub max_floor: Option<Floor>,

    /// Floor the car starts on
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Floor the car starts on",
        long_help = "Floor the car starts on. Must lie within the configured floor range. Default: 1"
    )]
    pub initial_floor: Option<Floor>,

    /// Direction the car is facing at start-up
    #[arg(long, help = "Initial direction (up or down)")]
    pub initial_direction: Option<Direction>,

    /// Visiting order of the up queue
    #[arg(
        long,
        help = "Up-queue visiting order (ascending or insertion)",
        long_help = "Order in which up-bound stops are visited. 'ascending' visits the nearest stop first; 'insertion' visits stops in the order they were submitted. Default: ascending"
    )]
    pub up_order: Option<UpQueueOrder>,

    /// Batches of floor requests, comma separated
    #[arg(
        short,
        long = "batch",
        allow_hyphen_values = true,
        help = "A batch of comma-separated floor requests (repeatable)",
        long_help = "A batch of comma-separated floor requests, e.g. --batch 5,10. May be given several times; batches are submitted in the order given. Unparsable entries are dropped."
    )]
    pub batch: Vec<String>,

    /// JSON file holding an array of batches
    #[arg(long, help = "JSON file holding an array of batches")]
    pub batches_file: Option<String>,

    /// Replay the sample batches
    #[arg(long, help = "Replay the sample batches before any other batches")]
    pub demo: bool,

    /// Number of random batches to generate
    #[arg(long, help = "Number of random batches to generate")]
    pub random_batches: Option<usize>,

    /// Requests per random batch
    #[arg(long, help = "Requests per random batch")]
    pub batch_size: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Output format for the final report
    #[arg(
        long,
        help = "Output format (text or json)",
        long_help = "Output format for the final report. Supported formats: text, json. Default: text"
    )]
    pub output_format: Option<String>,

    /// Include per-batch dispatch history in the report
    #[arg(long, help = "Include per-batch dispatch history in the report")]
    pub history: bool,

    /// Directory for rolling JSON log files
    #[arg(long, help = "Also write JSON log lines to a daily rolling file in this directory")]
    pub log_dir: Option<String>,

    /// Console log format
    #[arg(long, help = "Console log format (text or json)")]
    pub log_format: Option<OutputFormat>,

    /// Log filter directive
    #[arg(
        long,
        help = "Log filter directive, e.g. elevator_sweep_simulator::controller=debug",
        long_help = "Log filter directive in RUST_LOG syntax. Replaces the level chosen by --verbose or --debug."
    )]
    pub log_filter: Option<String>,

    /// Disable colored console logs
    #[arg(long, help = "Disable colored console logs")]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Controller section of a configuration file (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ControllerConfigFile {
    /// Lowest floor served by the car
    pub min_floor: Option<Floor>,
    /// Highest floor served by the car
    pub max_floor: Option<Floor>,
    /// Floor the car starts on
    pub initial_floor: Option<Floor>,
    /// Direction the car is facing at start-up
    pub initial_direction: Option<Direction>,
    /// Visiting order of the up queue
    pub up_queue_order: Option<UpQueueOrder>,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Car settings
    pub controller: Option<ControllerConfigFile>,

    /// Number of random batches to generate
    pub random_batches: Option<usize>,

    /// Requests per random batch
    pub batch_size: Option<usize>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for the final report
    pub output_format: Option<String>,

    /// Include per-batch dispatch history in the report
    pub include_history: Option<bool>,
}

/// Settings for a single elevator car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Lowest floor served by the car
    pub min_floor: Floor,
    /// Highest floor served by the car
    pub max_floor: Floor,
    /// Floor the car starts on
    pub initial_floor: Floor,
    /// Direction the car is facing at start-up
    pub initial_direction: Direction,
    /// Visiting order of the up queue
    pub up_queue_order: UpQueueOrder,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_floor: shaft::DEFAULT_MIN_FLOOR,
            max_floor: shaft::DEFAULT_MAX_FLOOR,
            initial_floor: shaft::DEFAULT_INITIAL_FLOOR,
            initial_direction: Direction::Up,
            up_queue_order: UpQueueOrder::Ascending,
        }
    }
}

impl ControllerConfig {
    /// Configuration for a car serving `min_floor..=max_floor`, other settings default
    pub fn with_range(min_floor: Floor, max_floor: Floor) -> Self {
        Self { min_floor, max_floor, ..Default::default() }
    }

    /// Set the up-queue visiting order
    pub fn with_up_queue_order(mut self, order: UpQueueOrder) -> Self {
        self.up_queue_order = order;
        self
    }

    /// Set the starting floor
    pub fn with_initial_floor(mut self, floor: Floor) -> Self {
        self.initial_floor = floor;
        self
    }

    /// Set the starting direction
    pub fn with_initial_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Validate the floor range and starting floor
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.min_floor > self.max_floor {
            return Err(ConfigValidationError::InvalidFloorRange(self.min_floor, self.max_floor));
        }

        if !(self.min_floor..=self.max_floor).contains(&self.initial_floor) {
            return Err(ConfigValidationError::InitialFloorOutOfRange {
                floor: self.initial_floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }

        Ok(())
    }

    /// Number of floors served by the car
    pub fn floor_count(&self) -> u64 {
        if self.min_floor > self.max_floor {
            0
        } else {
            self.max_floor.abs_diff(self.min_floor).saturating_add(1)
        }
    }

    fn merge(file: ControllerConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            min_floor: file.min_floor.unwrap_or(defaults.min_floor),
            max_floor: file.max_floor.unwrap_or(defaults.max_floor),
            initial_floor: file.initial_floor.unwrap_or(defaults.initial_floor),
            initial_direction: file.initial_direction.unwrap_or(defaults.initial_direction),
            up_queue_order: file.up_queue_order.unwrap_or(defaults.up_queue_order),
        }
    }
}

/// Configuration for a simulator run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Car settings
    pub controller: ControllerConfig,

    /// Number of random batches to generate
    pub random_batches: usize,

    /// Requests per random batch
    pub batch_size: usize,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for the final report
    pub output_format: String,

    /// Include per-batch dispatch history in the report
    pub include_history: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for controller and simulator configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Floor range is inverted
    #[error("Invalid floor range: min ({0}) must be <= max ({1})")]
    InvalidFloorRange(Floor, Floor),

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

    /// Random batches requested with an empty batch size
    #[error("Batch size must be greater than 0 when random batches are requested, got {0}")]
    InvalidBatchSize(usize),

    /// Output format is not recognised
    #[error("Unknown output format: {0} (supported: text, json)")]
    UnknownOutputFormat(String),
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            random_batches: 0,
            batch_size: shaft::DEFAULT_BATCH_SIZE,
            seed: None,
            output_format: "text".to_string(),
            include_history: false,
        }
    }
}

impl SimulatorConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            controller: config_file
                .controller
                .map(ControllerConfig::merge)
                .unwrap_or(defaults.controller),
            random_batches: config_file.random_batches.unwrap_or(defaults.random_batches),
            batch_size: config_file.batch_size.unwrap_or(defaults.batch_size),
            seed: config_file.seed.or(defaults.seed),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            include_history: config_file.include_history.unwrap_or(defaults.include_history),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.min_floor {
            config.controller.min_floor = value;
        }
        if let Some(value) = args.max_floor {
            config.controller.max_floor = value;
        }
        if let Some(value) = args.initial_floor {
            config.controller.initial_floor = value;
        }
        if let Some(value) = args.initial_direction {
            config.controller.initial_direction = value;
        }
        if let Some(value) = args.up_order {
            config.controller.up_queue_order = value;
        }
        if let Some(value) = args.random_batches {
            config.random_batches = value;
        }
        if let Some(value) = args.batch_size {
            config.batch_size = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }

        // A flag can only switch history on
        if args.history {
            config.include_history = true;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.controller.validate()?;

        if self.random_batches > 0 && self.batch_size == 0 {
            return Err(ConfigValidationError::InvalidBatchSize(self.batch_size));
        }

        self.get_output_format()?;

        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, ConfigValidationError> {
        self.output_format
            .parse()
            .map_err(|_| ConfigValidationError::UnknownOutputFormat(self.output_format.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_config_default() {
        let config = SimulatorConfig::default();

        assert_eq!(config.controller.min_floor, 1);
        assert_eq!(config.controller.max_floor, 99);
        assert_eq!(config.controller.initial_floor, 1);
        assert_eq!(config.controller.initial_direction, Direction::Up);
        assert_eq!(config.controller.up_queue_order, UpQueueOrder::Ascending);
        assert_eq!(config.random_batches, 0);
        assert_eq!(config.batch_size, 4);
        assert!(config.seed.is_none());
        assert_eq!(config.output_format, "text");
        assert!(!config.include_history);
    }

    #[test]
    fn test_cli_parsing_negative_floors() {
        let args = vec!["test", "--min-floor", "-3", "--max-floor", "200"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.min_floor, Some(-3));
        assert_eq!(cli_args.max_floor, Some(200));
    }

    #[test]
    fn test_cli_parsing_repeated_batches() {
        let args = vec!["test", "--batch", "5,10", "-b", "1,2,3,11", "--batch", "-2,4"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.batch, vec!["5,10", "1,2,3,11", "-2,4"]);
    }

    #[test]
    fn test_cli_parsing_enums() {
        let args = vec!["test", "--up-order", "insertion", "--initial-direction", "down"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.up_order, Some(UpQueueOrder::Insertion));
        assert_eq!(cli_args.initial_direction, Some(Direction::Down));

        let args = vec!["test", "--up-order", "zigzag"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "controller": {
                "min_floor": -3,
                "max_floor": 200,
                "up_queue_order": "insertion"
            },
            "random_batches": 25,
            "seed": 12345,
            "output_format": "json"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulatorConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.controller.min_floor, -3);
        assert_eq!(config.controller.max_floor, 200);
        assert_eq!(config.controller.up_queue_order, UpQueueOrder::Insertion);
        // Unset fields fall back to defaults
        assert_eq!(config.controller.initial_floor, 1);
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.random_batches, 25);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.output_format, "json");
    }

    #[test]
    fn test_config_file_missing() {
        let result = SimulatorConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = SimulatorConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_print_config_round_trips_through_file() {
        let mut config = SimulatorConfig::default();
        config.controller.max_floor = 40;
        config.seed = Some(7);

        let temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = SimulatorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.controller, config.controller);
        assert_eq!(loaded.seed, Some(7));
    }

    #[test]
    fn test_cli_overrides() {
        let args = vec![
            "test",
            "--max-floor",
            "30",
            "--initial-floor",
            "10",
            "--random-batches",
            "3",
            "--seed",
            "54321",
            "--history",
        ];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        let config = SimulatorConfig::from_cli_args(cli_args).unwrap();

        assert_eq!(config.controller.max_floor, 30);
        assert_eq!(config.controller.initial_floor, 10);
        assert_eq!(config.random_batches, 3);
        assert_eq!(config.seed, Some(54321));
        assert!(config.include_history);
        // Default values should remain for non-overridden fields
        assert_eq!(config.controller.min_floor, 1);
        assert_eq!(config.batch_size, 4);
    }

    #[test]
    fn test_cli_overrides_file() {
        use std::io::Write;

        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file
            .write_all(br#"{ "controller": { "max_floor": 50 }, "batch_size": 9 }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let args = vec!["test", "--config", &path, "--max-floor", "60"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        let config = SimulatorConfig::from_cli_args(cli_args).unwrap();

        assert_eq!(config.controller.max_floor, 60);
        assert_eq!(config.batch_size, 9);
    }

    #[test]
    fn test_validation_success() {
        assert!(SimulatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_floor_range() {
        let mut config = SimulatorConfig::default();
        config.controller.min_floor = 10;
        config.controller.max_floor = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidFloorRange(10, 5))
        ));
    }

    #[test]
    fn test_validation_initial_floor() {
        let config = ControllerConfig::with_range(10, 20);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InitialFloorOutOfRange { floor: 1, min: 10, max: 20 })
        ));

        let config = ControllerConfig::with_range(10, 20).with_initial_floor(15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_batch_size() {
        let config = SimulatorConfig { random_batches: 5, batch_size: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidBatchSize(0))));

        // An empty batch size is harmless when nothing is generated
        let config = SimulatorConfig { random_batches: 0, batch_size: 0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_output_format() {
        let config = SimulatorConfig { output_format: "xml".to_string(), ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownOutputFormat(_))
        ));

        let config = SimulatorConfig { output_format: "JSON".to_string(), ..Default::default() };
        assert_eq!(config.get_output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_floor_count() {
        assert_eq!(ControllerConfig::default().floor_count(), 99);
        assert_eq!(ControllerConfig::with_range(-3, 200).floor_count(), 204);
        assert_eq!(ControllerConfig::with_range(5, 5).floor_count(), 1);
        assert_eq!(ControllerConfig::with_range(5, 4).floor_count(), 0);
    }
}
