//! Batch sources
//!
//! Every source produces batches as JSON values so they all go through the same
//! untyped submit path: sample batches, comma-separated CLI batches, a JSON batches
//! file, and seeded random traffic.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{CliArgs, Floor, SimulatorConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Probability that a random request is garbage text instead of a floor
const JUNK_REQUEST_PROBABILITY: f64 = 0.05;

/// The sample traffic: two ordinary batches, an empty one, a batch containing the
/// car's own floor, and a single request
pub fn demo_batches() -> Vec<Value> {
    vec![json!([5, 10]), json!([1, 2, 3, 11]), json!([]), json!([1, 5, 8]), json!([2])]
}

/// Parse a comma-separated batch such as `"5,10"`
///
/// Entries are kept as text and coerced by the controller, so `"5,x,7"` keeps the
/// unparsable `x` for the controller to drop. An empty string is an empty batch.
pub fn parse_batch_list(raw: &str) -> Value {
    let entries: Vec<Value> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Value::String(entry.to_string()))
        .collect();
    Value::Array(entries)
}

/// Load batches from a JSON file holding an array of batches
///
/// Individual batches are not checked; a batch that is not itself an array is ignored
/// by the controller when submitted.
pub fn load_batches_file<P: AsRef<Path>>(path: P) -> SimulationResult<Vec<Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;

    match document {
        Value::Array(batches) => {
            info!("Loaded {} batches from {}", batches.len(), path.display());
            Ok(batches)
        }
        _ => Err(SimulationError::batch_input_error(format!(
            "{} must contain a JSON array of batches",
            path.display()
        ))),
    }
}

/// Seeded generator of random request batches
///
/// Floors are drawn from a range slightly wider than the shaft, and a small share of
/// requests are text, so generated traffic exercises every drop path of the classifier.
#[derive(Debug)]
pub struct RandomBatchGenerator {
    rng: StdRng,
    low: Floor,
    high: Floor,
    batch_size: usize,
}

impl RandomBatchGenerator {
    /// Create a generator for the configured shaft and batch size
    ///
    /// Fails on a shaft the controller would also reject, such as an inverted range.
    #[instrument(skip(config), fields(batch_size = config.batch_size, seed = ?config.seed))]
    pub fn new(config: &SimulatorConfig) -> SimulationResult<Self> {
        config.controller.validate()?;

        let rng = match config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => {
                debug!("Using entropy-based random seed");
                StdRng::from_entropy()
            }
        };

        let min_floor = config.controller.min_floor;
        let max_floor = config.controller.max_floor;
        let margin = Floor::try_from(config.controller.floor_count() / 10)
            .unwrap_or(Floor::MAX)
            .max(1);

        Ok(Self {
            rng,
            low: min_floor.saturating_sub(margin),
            high: max_floor.saturating_add(margin),
            batch_size: config.batch_size,
        })
    }

    /// Range floors are drawn from
    pub fn floor_range(&self) -> (Floor, Floor) {
        (self.low, self.high)
    }

    /// Generate one batch
    pub fn next_batch(&mut self) -> Value {
        let requests: Vec<Value> = (0..self.batch_size)
            .map(|_| {
                if self.rng.gen_bool(JUNK_REQUEST_PROBABILITY) {
                    json!("lobby")
                } else {
                    json!(self.rng.gen_range(self.low..=self.high))
                }
            })
            .collect();
        Value::Array(requests)
    }

    /// Generate `count` batches
    pub fn generate(&mut self, count: usize) -> Vec<Value> {
        (0..count).map(|_| self.next_batch()).collect()
    }
}

/// Gather the batches for a run from every source the command line names
///
/// Sources are combined in a fixed order: sample batches, the batches file, each
/// `--batch` in the order given, then random batches.
pub fn collect_batches(args: &CliArgs, config: &SimulatorConfig) -> SimulationResult<Vec<Value>> {
    let mut batches = Vec::new();

    if args.demo {
        batches.extend(demo_batches());
    }

    if let Some(path) = &args.batches_file {
        batches.extend(load_batches_file(path)?);
    }

    batches.extend(args.batch.iter().map(|raw| parse_batch_list(raw)));

    if config.random_batches > 0 {
        let mut generator = RandomBatchGenerator::new(config)?;
        batches.extend(generator.generate(config.random_batches));
    }

    debug!("Collected {} batches", batches.len());
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ControllerConfig;
    use std::io::Write;

    fn seeded_config(seed: u64) -> SimulatorConfig {
        SimulatorConfig { seed: Some(seed), batch_size: 6, ..Default::default() }
    }

    #[test]
    fn test_demo_batches() {
        let batches = demo_batches();
        assert_eq!(batches.len(), 5);
        assert_eq!(batches[0], json!([5, 10]));
        assert_eq!(batches[2], json!([]));
    }

    #[test]
    fn test_parse_batch_list() {
        assert_eq!(parse_batch_list("5,10"), json!(["5", "10"]));
        assert_eq!(parse_batch_list(" 1, 2 ,3 "), json!(["1", "2", "3"]));
        assert_eq!(parse_batch_list("-3,x"), json!(["-3", "x"]));
        assert_eq!(parse_batch_list(""), json!([]));
        assert_eq!(parse_batch_list(",,"), json!([]));
    }

    #[test]
    fn test_load_batches_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"[[5, 10], "asdf", [], ["7", 2]]"#).unwrap();
        temp_file.flush().unwrap();

        let batches = load_batches_file(temp_file.path()).unwrap();
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[1], json!("asdf"));
    }

    #[test]
    fn test_load_batches_file_requires_array() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"{"batches": []}"#).unwrap();
        temp_file.flush().unwrap();

        let result = load_batches_file(temp_file.path());
        assert!(matches!(result, Err(SimulationError::BatchInputError(_))));
    }

    #[test]
    fn test_load_batches_file_invalid_json() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(b"[[5, 10").unwrap();
        temp_file.flush().unwrap();

        let result = load_batches_file(temp_file.path());
        assert!(matches!(result, Err(SimulationError::SerializationError(_))));
    }

    #[test]
    fn test_random_batches_reproducible_with_seed() {
        let first = RandomBatchGenerator::new(&seeded_config(42)).unwrap().generate(10);
        let second = RandomBatchGenerator::new(&seeded_config(42)).unwrap().generate(10);
        assert_eq!(first, second);

        let other = RandomBatchGenerator::new(&seeded_config(43)).unwrap().generate(10);
        assert_ne!(first, other);
    }

    #[test]
    fn test_random_batches_have_configured_size() {
        let batches = RandomBatchGenerator::new(&seeded_config(7)).unwrap().generate(20);
        assert_eq!(batches.len(), 20);
        assert!(batches.iter().all(|b| b.as_array().map(Vec::len) == Some(6)));
    }

    #[test]
    fn test_random_floors_stay_near_shaft() {
        let config = SimulatorConfig {
            controller: ControllerConfig::with_range(-3, 200),
            seed: Some(1),
            batch_size: 50,
            ..Default::default()
        };
        let mut generator = RandomBatchGenerator::new(&config).unwrap();
        let (low, high) = generator.floor_range();
        assert_eq!((low, high), (-23, 220));

        for batch in generator.generate(10) {
            for request in batch.as_array().unwrap() {
                if let Some(floor) = request.as_i64() {
                    assert!((low..=high).contains(&floor));
                }
            }
        }
    }

    #[test]
    fn test_small_shaft_margin_is_at_least_one() {
        let config = SimulatorConfig {
            controller: ControllerConfig::with_range(1, 3),
            ..Default::default()
        };
        assert_eq!(RandomBatchGenerator::new(&config).unwrap().floor_range(), (0, 4));
    }

    #[test]
    fn test_generator_rejects_inverted_range() {
        let config = SimulatorConfig {
            controller: ControllerConfig::with_range(10, 1),
            seed: Some(1),
            ..Default::default()
        };
        let result = RandomBatchGenerator::new(&config);
        assert!(matches!(result, Err(SimulationError::InvalidFloorRange { min: 10, max: 1 })));
    }

    #[test]
    fn test_generator_rejects_shaft_without_initial_floor() {
        let config = SimulatorConfig {
            controller: ControllerConfig::with_range(5, 50),
            ..Default::default()
        };
        let result = RandomBatchGenerator::new(&config);
        assert!(matches!(result, Err(SimulationError::InitialFloorOutOfRange { .. })));
    }

    #[test]
    fn test_collect_batches_rejects_inverted_range() {
        use clap::Parser;

        let args = CliArgs::try_parse_from([
            "elevator-sweep-simulator",
            "--min-floor",
            "10",
            "--max-floor",
            "1",
            "--random-batches",
            "3",
        ])
        .unwrap();
        let config = SimulatorConfig::from_cli_args(args.clone()).unwrap();

        let result = collect_batches(&args, &config);
        assert!(matches!(result, Err(SimulationError::InvalidFloorRange { .. })));
    }

    #[test]
    fn test_collect_batches_order() {
        use clap::Parser;

        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"[[42]]"#).unwrap();
        temp_file.flush().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let args = CliArgs::try_parse_from([
            "elevator-sweep-simulator",
            "--demo",
            "--batches-file",
            &path,
            "--batch",
            "7,8",
            "--random-batches",
            "2",
            "--seed",
            "3",
        ])
        .unwrap();
        let config = SimulatorConfig::from_cli_args(args.clone()).unwrap();

        let batches = collect_batches(&args, &config).unwrap();
        assert_eq!(batches.len(), 5 + 1 + 1 + 2);
        assert_eq!(batches[0], json!([5, 10]));
        assert_eq!(batches[5], json!([42]));
        assert_eq!(batches[6], json!(["7", "8"]));
    }

    #[test]
    fn test_collect_batches_missing_file() {
        use clap::Parser;

        let args = CliArgs::try_parse_from([
            "elevator-sweep-simulator",
            "--batches-file",
            "/nonexistent/batches.json",
        ])
        .unwrap();
        let result = collect_batches(&args, &SimulatorConfig::default());
        assert!(matches!(result, Err(SimulationError::IoError(_))));
    }
}
