//! Batch runner
//!
//! Feeds a sequence of batches to one controller, in order, and keeps the per-batch
//! history and the run totals.

use crate::controller::{ElevatorController, ElevatorStatus, SubmitReport};
use crate::simulation::{RunStatistics, SimulationResult};
use crate::types::SimulatorConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// What happened to one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Position of the batch in the run, starting at zero
    pub batch_index: usize,
    /// When the batch was submitted
    pub dispatched_at: DateTime<Utc>,
    /// The batch as submitted
    pub batch: Value,
    /// Outcome of the submit call
    pub report: SubmitReport,
    /// Car status right after the call
    pub status_after: ElevatorStatus,
}

/// Final output of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Car status at the end of the run
    pub status: ElevatorStatus,
    /// Run totals
    pub statistics: RunStatistics,
    /// Per-batch records, when history was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<DispatchRecord>>,
}

impl RunReport {
    /// Render the report as text
    pub fn to_text(&self) -> String {
        let mut output = self.statistics.generate_summary_output(&self.status);

        if let Some(history) = &self.history {
            output.push_str("\nBatch History:\n");
            for record in history {
                output.push_str(&format!("  #{} {} ", record.batch_index, record.batch));
                match &record.report.rejection {
                    Some(reason) => output.push_str(&format!("ignored ({})\n", reason)),
                    None => output.push_str(&format!(
                        "stops {:?}, now at floor {} heading {}\n",
                        record.report.stops,
                        record.status_after.current_floor,
                        record.status_after.current_direction
                    )),
                }
            }
        }

        output
    }
}

/// Drives one controller through a sequence of batches
#[derive(Debug)]
pub struct BatchRunner {
    controller: ElevatorController,
    statistics: RunStatistics,
    history: Vec<DispatchRecord>,
    record_history: bool,
}

impl BatchRunner {
    /// Create a runner with a fresh controller built from configuration
    #[instrument(skip(config), fields(min_floor = config.controller.min_floor, max_floor = config.controller.max_floor))]
    pub fn new(config: &SimulatorConfig) -> SimulationResult<Self> {
        let controller = ElevatorController::from_config(&config.controller)?;
        info!("Initialized batch runner for {}", controller.id());
        Ok(Self::with_controller(controller, config.include_history))
    }

    /// Create a runner around an existing controller
    pub fn with_controller(controller: ElevatorController, record_history: bool) -> Self {
        Self {
            controller,
            statistics: RunStatistics::new(),
            history: Vec::new(),
            record_history,
        }
    }

    /// The controller being driven
    pub fn controller(&self) -> &ElevatorController {
        &self.controller
    }

    /// Totals so far
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Per-batch records so far; empty unless history is recorded
    pub fn history(&self) -> &[DispatchRecord] {
        &self.history
    }

    /// Submit one batch
    pub fn submit(&mut self, batch: &Value) -> SubmitReport {
        let batch_index = self.statistics.batches_submitted;
        let dispatched_at = Utc::now();
        let report = self.controller.submit_json(batch);
        self.statistics.record(&report);

        debug!(batch_index, stops = report.stops_made(), "Batch recorded");

        if self.record_history {
            self.history.push(DispatchRecord {
                batch_index,
                dispatched_at,
                batch: batch.clone(),
                report: report.clone(),
                status_after: self.controller.status(),
            });
        }

        report
    }

    /// Submit every batch in order and return the report
    #[instrument(skip(self, batches), fields(batch_count = batches.len()))]
    pub fn run(&mut self, batches: &[Value]) -> RunReport {
        let started = Instant::now();

        for batch in batches {
            self.submit(batch);
        }

        let elapsed = started.elapsed();
        self.statistics.set_run_duration(self.statistics.run_duration + elapsed);

        info!(
            batches = batches.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Run completed: {}",
            self.statistics
        );

        self.report()
    }

    /// Report for everything submitted so far
    pub fn report(&self) -> RunReport {
        RunReport {
            status: self.controller.status(),
            statistics: self.statistics.clone(),
            history: self.record_history.then(|| self.history.clone()),
        }
    }
}
