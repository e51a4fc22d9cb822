//! Run statistics collection and reporting
//!
//! Aggregates the per-batch submit reports of a run into totals.

use crate::controller::{BatchRejection, ElevatorStatus, SubmitReport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Totals over every batch submitted in a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    // Batch statistics
    /// Batches handed to the controller
    pub batches_submitted: usize,
    /// Batches ignored because they were empty
    pub empty_batches: usize,
    /// Batches ignored because they were not a list
    pub non_sequence_batches: usize,

    // Request statistics
    /// Requests inside batches that were classified
    pub requests_received: usize,
    /// Requests queued for service
    pub requests_accepted: usize,
    /// Requests that were not a number
    pub unparsable_requests: usize,
    /// Requests outside the shaft
    pub out_of_range_requests: usize,
    /// Requests for the floor the car was at
    pub same_floor_requests: usize,

    // Movement statistics
    /// Stops made during the run
    pub stops_made: u64,
    /// Reversals during the run
    pub direction_changes: u64,

    /// Wall-clock duration of the run
    pub run_duration: Duration,
}

impl RunStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one submit report into the totals
    pub fn record(&mut self, report: &SubmitReport) {
        self.batches_submitted += 1;

        match report.rejection {
            Some(BatchRejection::Empty) => self.empty_batches += 1,
            Some(BatchRejection::NotASequence) => self.non_sequence_batches += 1,
            None => {}
        }

        let tally = &report.tally;
        self.requests_received += tally.accepted() + tally.dropped();
        self.requests_accepted += tally.accepted();
        self.unparsable_requests += tally.unparsable;
        self.out_of_range_requests += tally.out_of_range;
        self.same_floor_requests += tally.same_floor;

        self.stops_made += report.stops_made() as u64;
        if report.direction_changed {
            self.direction_changes += 1;
        }
    }

    /// Set the run duration
    pub fn set_run_duration(&mut self, duration: Duration) {
        self.run_duration = duration;
    }

    /// Batches ignored as a whole
    pub fn ignored_batches(&self) -> usize {
        self.empty_batches + self.non_sequence_batches
    }

    /// Requests dropped for any reason
    pub fn dropped_requests(&self) -> usize {
        self.unparsable_requests + self.out_of_range_requests + self.same_floor_requests
    }

    /// Percentage of received requests that were queued
    pub fn acceptance_percentage(&self) -> f64 {
        if self.requests_received == 0 {
            0.0
        } else {
            (self.requests_accepted as f64 / self.requests_received as f64) * 100.0
        }
    }

    /// Percentage of received requests that were dropped
    pub fn drop_percentage(&self) -> f64 {
        if self.requests_received == 0 {
            0.0
        } else {
            (self.dropped_requests() as f64 / self.requests_received as f64) * 100.0
        }
    }

    /// Percentage of batches ignored as a whole
    pub fn ignored_batch_percentage(&self) -> f64 {
        if self.batches_submitted == 0 {
            0.0
        } else {
            (self.ignored_batches() as f64 / self.batches_submitted as f64) * 100.0
        }
    }

    /// Average stops per submitted batch
    pub fn average_stops_per_batch(&self) -> f64 {
        if self.batches_submitted == 0 {
            0.0
        } else {
            self.stops_made as f64 / self.batches_submitted as f64
        }
    }

    /// One-line summary
    pub fn compact_summary(&self) -> String {
        format!(
            "{} batches, {} requests accepted, {} dropped, {} stops, {} direction changes",
            self.batches_submitted,
            self.requests_accepted,
            self.dropped_requests(),
            self.stops_made,
            self.direction_changes
        )
    }

    /// Human-readable report of the run and the car's final status
    pub fn generate_summary_output(&self, status: &ElevatorStatus) -> String {
        let mut output = String::new();

        output.push_str("=== Elevator Run Summary ===\n\n");
        output.push_str(&format!(
            "Run Duration: {:.3} seconds\n\n",
            self.run_duration.as_secs_f64()
        ));

        output.push_str("Batches:\n");
        output.push_str(&format!("  • Submitted: {}\n", self.batches_submitted));
        output.push_str(&format!(
            "  • Ignored: {} ({:.1}%) [{} empty, {} not a list]\n\n",
            self.ignored_batches(),
            self.ignored_batch_percentage(),
            self.empty_batches,
            self.non_sequence_batches
        ));

        output.push_str("Requests:\n");
        output.push_str(&format!("  • Received: {}\n", self.requests_received));
        output.push_str(&format!(
            "  • Accepted: {} ({:.1}%)\n",
            self.requests_accepted,
            self.acceptance_percentage()
        ));
        output.push_str(&format!(
            "  • Dropped: {} ({:.1}%) [{} unparsable, {} out of range, {} same floor]\n\n",
            self.dropped_requests(),
            self.drop_percentage(),
            self.unparsable_requests,
            self.out_of_range_requests,
            self.same_floor_requests
        ));

        output.push_str("Movement:\n");
        output.push_str(&format!(
            "  • Stops: {} ({:.2} per batch)\n",
            self.stops_made,
            self.average_stops_per_batch()
        ));
        output.push_str(&format!("  • Direction Changes: {}\n\n", self.direction_changes));

        output.push_str("Final Status:\n");
        output.push_str(&format!("  • Car: {}\n", status.car_id));
        output.push_str(&format!(
            "  • Floors Served: {} to {}\n",
            status.lowest_floor, status.highest_floor
        ));
        output.push_str(&format!("  • Current Floor: {}\n", status.current_floor));
        output.push_str(&format!("  • Current Direction: {}\n", status.current_direction));
        output.push_str(&format!("  • Floors Travelled: {}\n", status.floors_travelled));
        output.push_str(&format!("  • Direction Changes: {}\n", status.direction_changes));

        output
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact_summary())
    }
}
