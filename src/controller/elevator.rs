//! The elevator controller
//!
//! Owns one car's state and exposes the two operations callers need: submit a batch of
//! floor requests, and read the car's status.

use super::classifier::{FloorLike, PendingQueues, RequestClassifier};
use super::dispatcher::SweepDispatcher;
use super::state::CarState;
use super::status::{BatchRejection, ElevatorStatus, SubmitReport};
use crate::simulation::SimulationResult;
use crate::types::{CarId, ControllerConfig, Floor, UpQueueOrder};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// A single elevator car with sweep dispatch
///
/// Every submit call classifies the batch against the car's current floor, services
/// the stops ahead of the car, reverses at most once to service the stops behind it,
/// and returns with no pending work.
///
/// ```rust
/// use elevator_sweep_simulator::controller::ElevatorController;
/// use elevator_sweep_simulator::types::Direction;
///
/// let mut elevator = ElevatorController::default();
/// elevator.submit_requests(&[5]);
/// elevator.submit_requests(&[1, 2, 3, 11]);
///
/// let status = elevator.status();
/// assert_eq!(status.current_floor, 1);
/// assert_eq!(status.current_direction, Direction::Down);
/// assert_eq!(status.floors_travelled, 5);
/// assert_eq!(status.direction_changes, 1);
/// ```
#[derive(Debug)]
pub struct ElevatorController {
    id: CarId,
    state: CarState,
    pending: PendingQueues,
    classifier: RequestClassifier,
    dispatcher: SweepDispatcher,
}

impl Default for ElevatorController {
    /// A car serving floors 1 to 99, starting at floor 1 facing up
    fn default() -> Self {
        Self::build(&ControllerConfig::default())
    }
}

impl ElevatorController {
    /// Create a car serving `min_floor..=max_floor`
    ///
    /// The car starts at floor 1, which must lie inside the range.
    pub fn new(min_floor: Floor, max_floor: Floor) -> SimulationResult<Self> {
        Self::from_config(&ControllerConfig::with_range(min_floor, max_floor))
    }

    /// Create a car from configuration
    pub fn from_config(config: &ControllerConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &ControllerConfig) -> Self {
        let id = CarId::new();
        debug!(
            car = %id,
            min_floor = config.min_floor,
            max_floor = config.max_floor,
            initial_floor = config.initial_floor,
            up_order = %config.up_queue_order,
            "Constructed elevator"
        );

        Self {
            id,
            state: CarState::from_config(config),
            pending: PendingQueues::default(),
            classifier: RequestClassifier::new(config.min_floor, config.max_floor),
            dispatcher: SweepDispatcher::new(config.up_queue_order),
        }
    }

    /// Identifier of this car
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Visiting order used for the up queue
    pub fn up_queue_order(&self) -> UpQueueOrder {
        self.dispatcher.up_order()
    }

    /// Whether `floor` is served by this car
    pub fn is_valid_floor(&self, floor: Floor) -> bool {
        self.classifier.validate(floor)
    }

    /// Submit a batch of floor requests and run one sweep
    ///
    /// An empty batch is ignored. Entries that are not numbers, lie outside the shaft,
    /// or name the car's current floor are dropped; the rest are serviced before this
    /// returns.
    #[instrument(skip(self, batch), fields(car = %self.id, batch_len = batch.len()))]
    pub fn submit_requests<T: FloorLike>(&mut self, batch: &[T]) -> SubmitReport {
        if batch.is_empty() {
            debug!("Ignoring empty batch");
            return SubmitReport::rejected(BatchRejection::Empty);
        }

        let tally = self
            .classifier
            .classify_batch(batch, self.state.current_floor, &mut self.pending);
        let sweep = self.dispatcher.dispatch(&mut self.state, &mut self.pending);

        info!(
            accepted = tally.accepted(),
            dropped = tally.dropped(),
            stops = sweep.stops.len(),
            reversed = sweep.direction_changed,
            current_floor = self.state.current_floor,
            direction = %self.state.current_direction,
            "Batch dispatched"
        );

        SubmitReport::completed(tally, sweep)
    }

    /// Submit an untyped batch
    ///
    /// Anything other than a JSON array is ignored as a whole.
    pub fn submit_json(&mut self, batch: &Value) -> SubmitReport {
        match batch.as_array() {
            Some(requests) => self.submit_requests(requests.as_slice()),
            None => {
                debug!(car = %self.id, "Ignoring batch that is not a sequence");
                SubmitReport::rejected(BatchRejection::NotASequence)
            }
        }
    }

    /// Current status of the car
    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            car_id: self.id,
            lowest_floor: self.state.min_floor,
            highest_floor: self.state.max_floor,
            floors_travelled: self.state.floors_travelled,
            direction_changes: self.state.direction_changes,
            current_floor: self.state.current_floor,
            current_direction: self.state.current_direction,
        }
    }
}
