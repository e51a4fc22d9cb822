//! Enumeration types for the elevator simulator
//!
//! This module contains the enumeration types used throughout the controller and the
//! simulation layer: travel direction, up-queue ordering policy, and report output format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A floor number. Negative values are basement levels.
pub type Floor = i64;

/// Direction of travel of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Travelling towards higher floors
    #[default]
    Up,
    /// Travelling towards lower floors
    Down,
}

impl Direction {
    /// The reverse direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Order in which the up queue is visited during a sweep
///
/// The down queue is always visited highest floor first. The up queue is visited
/// lowest floor first unless `Insertion` is selected, in which case stops are visited
/// exactly in the order they were submitted, even if that means travelling down
/// between two up-bound stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpQueueOrder {
    /// Sort ascending before visiting
    #[default]
    Ascending,
    /// Visit in submission order
    Insertion,
}

impl fmt::Display for UpQueueOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpQueueOrder::Ascending => write!(f, "ascending"),
            UpQueueOrder::Insertion => write!(f, "insertion"),
        }
    }
}

impl FromStr for UpQueueOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "sorted" | "asc" => Ok(UpQueueOrder::Ascending),
            "insertion" | "submission" | "fifo" => Ok(UpQueueOrder::Insertion),
            _ => Err(format!("Unknown up-queue order: {}", s)),
        }
    }
}

/// Output format for the final run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document for scripting
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
