//! Simulation runs and supporting infrastructure
//!
//! This module drives a controller through sequences of batches and provides the
//! error handling and logging shared by the crate.
//!
//! # Overview
//!
//! - **Batch sources**: sample batches, comma-separated lists, JSON batch files and a
//!   seeded random generator
//! - **BatchRunner**: submits batches to one controller in order and records history
//! - **RunStatistics**: run totals and the text summary
//! - **SimulationError**: error type for construction, configuration and batch input
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_sweep_simulator::simulation::*;
//! use elevator_sweep_simulator::types::*;
//!
//! let config = SimulatorConfig {
//!     random_batches: 10,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let batches = RandomBatchGenerator::new(&config)?.generate(config.random_batches);
//! let mut runner = BatchRunner::new(&config)?;
//! let report = runner.run(&batches);
//!
//! assert_eq!(report.statistics.batches_submitted, 10);
//! assert_eq!(report.statistics.stops_made, report.status.floors_travelled);
//! # Ok::<(), SimulationError>(())
//! ```

pub mod batch_generator;
pub mod error;
pub mod logging;
pub mod runner;
pub mod statistics;

pub use batch_generator::*;
pub use error::*;
pub use logging::*;
pub use runner::*;
pub use statistics::*;
