//! Core types and identifiers for the elevator simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the controller and the simulation layer.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based car identifier
//! - **Enums**: Travel direction, up-queue ordering policy, report output format
//! - **Configuration**: Controller and simulator configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_sweep_simulator::types::*;
//!
//! let car_id = CarId::new();
//! assert!(car_id.to_string().starts_with("CAR_"));
//!
//! let config = ControllerConfig::with_range(-3, 200)
//!     .with_up_queue_order(UpQueueOrder::Insertion);
//! assert!(config.validate().is_ok());
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
