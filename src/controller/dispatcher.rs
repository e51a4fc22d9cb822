//! Sweep dispatch
//!
//! One pass of SCAN scheduling per submit call: the queue ahead of the car in its
//! current direction is serviced first, then, if the opposite queue has work, the car
//! reverses once and services that. Both queues are drained before returning.

use super::classifier::PendingQueues;
use super::state::CarState;
use super::traversal::traverse;
use crate::types::{Floor, UpQueueOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a single sweep did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// Floors stopped at, in order
    pub stops: Vec<Floor>,
    /// Whether the car reversed during the sweep
    pub direction_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SweepDispatcher {
    up_order: UpQueueOrder,
}

impl SweepDispatcher {
    pub(crate) fn new(up_order: UpQueueOrder) -> Self {
        Self { up_order }
    }

    pub(crate) fn up_order(&self) -> UpQueueOrder {
        self.up_order
    }

    pub(crate) fn dispatch(&self, state: &mut CarState, pending: &mut PendingQueues) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();

        let ahead = pending.take(state.current_direction);
        if !ahead.is_empty() {
            let direction = state.current_direction;
            outcome.stops.extend(traverse(state, direction, ahead, self.up_order));
        }

        let behind = pending.take(state.current_direction.opposite());
        if !behind.is_empty() {
            state.reverse();
            outcome.direction_changed = true;
            debug!(direction = %state.current_direction, direction_changes = state.direction_changes, "Reversing");

            let direction = state.current_direction;
            outcome.stops.extend(traverse(state, direction, behind, self.up_order));
        }

        debug_assert!(pending.is_empty());
        outcome
    }
}
