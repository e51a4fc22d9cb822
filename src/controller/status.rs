//! Status snapshots and submit reports

use super::classifier::RequestTally;
use super::dispatcher::SweepOutcome;
use crate::types::{CarId, Direction, Floor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time view of a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorStatus {
    /// Car the snapshot belongs to
    pub car_id: CarId,
    /// Lowest floor served
    pub lowest_floor: Floor,
    /// Highest floor served
    pub highest_floor: Floor,
    /// Stops made since construction
    pub floors_travelled: u64,
    /// Reversals since construction
    pub direction_changes: u64,
    /// Floor the car is at
    pub current_floor: Floor,
    /// Direction the car is facing
    pub current_direction: Direction,
}

impl fmt::Display for ElevatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at floor {} heading {} (floors {}..={}, {} stops, {} direction changes)",
            self.car_id,
            self.current_floor,
            self.current_direction,
            self.lowest_floor,
            self.highest_floor,
            self.floors_travelled,
            self.direction_changes
        )
    }
}

/// Why a whole batch was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRejection {
    /// The batch had no entries
    Empty,
    /// The input was not a list
    NotASequence,
}

impl fmt::Display for BatchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchRejection::Empty => write!(f, "empty batch"),
            BatchRejection::NotASequence => write!(f, "not a sequence"),
        }
    }
}

/// Result of one submit call
///
/// Purely diagnostic: invalid input never fails a submit, it only shows up here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReport {
    /// Set when the batch was ignored without classification
    pub rejection: Option<BatchRejection>,
    /// Accepted and dropped request counts
    pub tally: RequestTally,
    /// Floors stopped at, in order
    pub stops: Vec<Floor>,
    /// Whether the car reversed during the call
    pub direction_changed: bool,
}

impl SubmitReport {
    pub(crate) fn rejected(reason: BatchRejection) -> Self {
        Self { rejection: Some(reason), ..Default::default() }
    }

    pub(crate) fn completed(tally: RequestTally, sweep: SweepOutcome) -> Self {
        Self {
            rejection: None,
            tally,
            stops: sweep.stops,
            direction_changed: sweep.direction_changed,
        }
    }

    /// Whether the batch was ignored as a whole
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Number of stops made during the call
    pub fn stops_made(&self) -> usize {
        self.stops.len()
    }

    /// Whether the call changed the car's position or counters
    pub fn moved(&self) -> bool {
        !self.stops.is_empty()
    }
}
