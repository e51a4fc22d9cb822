//! Elevator Sweep Simulator
//!
//! A controller for a single elevator car that services batches of floor requests with
//! a one-pass sweep, plus the tooling to drive it through recorded or random traffic.
//!
//! # Overview
//!
//! Each batch of requests is classified against the floor the car is at when the batch
//! arrives. The car first visits every stop ahead of it in its current direction, then
//! reverses at most once to visit the stops behind it. Invalid requests are dropped
//! without error and every call leaves the car with no pending work.
//!
//! ## Key Features
//!
//! - **Lenient Input**: integers, floats, numeric strings and untyped JSON batches
//! - **Sweep Dispatch**: at most one reversal per batch, stops visited in floor order
//! - **Status Reporting**: floors travelled, direction changes, position and heading
//! - **Thread-Safe Handle**: submits serialized behind a mutex
//! - **Batch Runs**: sample, file, command-line and seeded random batches
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_sweep_simulator::*;
//!
//! let mut elevator = ElevatorController::new(1, 99)?;
//!
//! elevator.submit_requests(&[5, 10]);
//! let report = elevator.submit_requests(&[1, 2, 3, 11]);
//!
//! assert_eq!(report.stops, vec![11, 3, 2, 1]);
//! assert_eq!(elevator.status().direction_changes, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Floors, directions, identifiers and configuration
//! - [`controller`]: Request classification, sweep dispatch and the controller itself
//! - [`simulation`]: Batch sources, runs, statistics, errors and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │ Controller  │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Floor       │◄───┤ Classifier  │◄───┤ BatchRunner │
//! │ Direction   │    │ Dispatcher  │    │ Statistics  │
//! │ Config      │    │ Traversal   │    │ Generators  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod controller;
pub mod simulation;
pub mod types;

// Core types and configuration
pub use types::{
    CarId, ConfigValidationError, ControllerConfig, Direction, Floor, OutputFormat,
    SimulatorConfig, UpQueueOrder,
};

// Controller
pub use controller::{
    BatchRejection, DropReason, ElevatorController, ElevatorStatus, FloorLike, RequestTally,
    SharedController, SubmitReport,
};

// Runs and infrastructure
pub use simulation::{
    BatchRunner, DispatchRecord, LoggingConfig, RandomBatchGenerator, RunReport, RunStatistics,
    SimulationError, SimulationResult,
};
