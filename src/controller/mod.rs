//! Elevator controller core
//!
//! This module contains the controller for a single car and the three parts it is
//! built from.
//!
//! # Overview
//!
//! - **RequestClassifier**: coerces, validates and routes each request into the up or
//!   down queue relative to the car's floor
//! - **Sweep dispatch**: services the queue ahead of the car, then reverses at most once
//!   for the queue behind it
//! - **Traversal**: orders one queue's stops and moves the car through them
//! - **ElevatorController**: owns the car state and ties the three together
//! - **SharedController**: mutex-guarded handle for multi-threaded hosts
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_sweep_simulator::controller::*;
//! use serde_json::json;
//!
//! let mut elevator = ElevatorController::new(-3, 200)?;
//!
//! // Out-of-range floors are dropped without error
//! let report = elevator.submit_requests(&[-5, 300]);
//! assert_eq!(report.tally.out_of_range, 2);
//! assert_eq!(elevator.status().floors_travelled, 0);
//!
//! // Untyped input: anything but a list is ignored
//! let report = elevator.submit_json(&json!("asdf"));
//! assert!(report.is_rejected());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod classifier;
pub mod dispatcher;
pub mod elevator;
pub mod shared;
pub mod status;
pub mod traversal;

mod state;

pub use classifier::{DropReason, FloorLike, PendingQueues, RequestClassifier, RequestTally};
pub use dispatcher::SweepOutcome;
pub use elevator::ElevatorController;
pub use shared::SharedController;
pub use status::{BatchRejection, ElevatorStatus, SubmitReport};
pub use traversal::order_stops;
