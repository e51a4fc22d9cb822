//! Car state
//!
//! The mutable state of one car. Only the controller and its dispatch helpers touch it.

use crate::types::{ControllerConfig, Direction, Floor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CarState {
    pub(crate) min_floor: Floor,
    pub(crate) max_floor: Floor,
    pub(crate) current_floor: Floor,
    pub(crate) current_direction: Direction,
    pub(crate) direction_changes: u64,
    pub(crate) floors_travelled: u64,
}

impl CarState {
    pub(crate) fn from_config(config: &ControllerConfig) -> Self {
        Self {
            min_floor: config.min_floor,
            max_floor: config.max_floor,
            current_floor: config.initial_floor,
            current_direction: config.initial_direction,
            direction_changes: 0,
            floors_travelled: 0,
        }
    }

    /// Stop at `floor`. Counts one stop regardless of distance.
    pub(crate) fn visit(&mut self, floor: Floor) {
        debug_assert!((self.min_floor..=self.max_floor).contains(&floor));
        self.current_floor = floor;
        self.floors_travelled += 1;
    }

    pub(crate) fn reverse(&mut self) {
        self.current_direction = self.current_direction.opposite();
        self.direction_changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config() {
        let state = CarState::from_config(&ControllerConfig::default());
        assert_eq!(state.min_floor, 1);
        assert_eq!(state.max_floor, 99);
        assert_eq!(state.current_floor, 1);
        assert_eq!(state.current_direction, Direction::Up);
        assert_eq!(state.direction_changes, 0);
        assert_eq!(state.floors_travelled, 0);
    }

    #[test]
    fn test_visit_counts_stops_not_distance() {
        let mut state = CarState::from_config(&ControllerConfig::default());
        state.visit(90);
        state.visit(2);
        assert_eq!(state.current_floor, 2);
        assert_eq!(state.floors_travelled, 2);
    }

    #[test]
    fn test_reverse_counts_changes() {
        let mut state = CarState::from_config(&ControllerConfig::default());
        state.reverse();
        assert_eq!(state.current_direction, Direction::Down);
        state.reverse();
        assert_eq!(state.current_direction, Direction::Up);
        assert_eq!(state.direction_changes, 2);
    }
}
