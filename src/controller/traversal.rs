//! Traversal of a single queue
//!
//! Orders one direction's stops and walks the car through them.

use super::state::CarState;
use crate::types::{Direction, Floor, UpQueueOrder};
use tracing::debug;

/// Order `floors` for a sweep in `direction`
///
/// Down-bound stops are always visited highest first. Up-bound stops are visited lowest
/// first, or in submission order under [`UpQueueOrder::Insertion`]. Duplicates are kept.
pub fn order_stops(direction: Direction, mut floors: Vec<Floor>, up_order: UpQueueOrder) -> Vec<Floor> {
    match (direction, up_order) {
        (Direction::Up, UpQueueOrder::Ascending) => floors.sort(),
        (Direction::Up, UpQueueOrder::Insertion) => {}
        (Direction::Down, _) => floors.sort_by(|a, b| b.cmp(a)),
    }
    floors
}

/// Visit every floor of one queue, returning the stops in the order visited
pub(crate) fn traverse(
    state: &mut CarState,
    direction: Direction,
    floors: Vec<Floor>,
    up_order: UpQueueOrder,
) -> Vec<Floor> {
    let stops = order_stops(direction, floors, up_order);

    for &floor in &stops {
        state.visit(floor);
        debug!(floor, %direction, floors_travelled = state.floors_travelled, "Stopped at floor");
    }

    stops
}
