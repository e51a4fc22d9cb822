//! Request classification
//!
//! Turns a batch of loosely-typed floor requests into the two pending queues. Each
//! entry is coerced to an integer floor, checked against the shaft, and routed to the
//! up or down queue relative to the car's floor at the start of the call. Entries that
//! fail any step are dropped and counted, never reported as errors.

use crate::types::{Direction, Floor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// A value that can be read as a floor number
///
/// Strings use leading-integer parsing: leading whitespace and an optional sign are
/// accepted, and parsing stops at the first non-digit, so `"12abc"` is floor 12 and
/// `"abc"` is not a floor. Floats truncate toward zero. A JSON array reads as its
/// first element, so `[3]` and `[[3], 4]` are floor 3 while `[]` is not a floor.
pub trait FloorLike {
    /// The floor this value names, if any
    fn to_floor(&self) -> Option<Floor>;
}

macro_rules! impl_floor_like_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FloorLike for $ty {
                fn to_floor(&self) -> Option<Floor> {
                    Floor::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_floor_like_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FloorLike for f64 {
    fn to_floor(&self) -> Option<Floor> {
        truncate_float(*self)
    }
}

impl FloorLike for f32 {
    fn to_floor(&self) -> Option<Floor> {
        truncate_float(f64::from(*self))
    }
}

impl FloorLike for str {
    fn to_floor(&self) -> Option<Floor> {
        parse_leading_integer(self)
    }
}

impl FloorLike for String {
    fn to_floor(&self) -> Option<Floor> {
        parse_leading_integer(self)
    }
}

impl FloorLike for Value {
    fn to_floor(&self) -> Option<Floor> {
        match self {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
            Value::String(s) => parse_leading_integer(s),
            // Text form of an array starts with its first element
            Value::Array(items) => items.first().and_then(FloorLike::to_floor),
            _ => None,
        }
    }
}

impl<T: FloorLike + ?Sized> FloorLike for &T {
    fn to_floor(&self) -> Option<Floor> {
        (**self).to_floor()
    }
}

fn truncate_float(value: f64) -> Option<Floor> {
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    // i64::MAX is not representable as f64; the cast rounds it up to 2^63
    if truncated < Floor::MIN as f64 || truncated >= Floor::MAX as f64 {
        return None;
    }

    Some(truncated as Floor)
}

/// Parse the leading integer of a string
pub fn parse_leading_integer(raw: &str) -> Option<Floor> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude: Floor = unsigned[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Why a single request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Not a number
    Unparsable,
    /// Outside the shaft
    OutOfRange,
    /// The car is already there
    SameFloor,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Unparsable => write!(f, "unparsable"),
            DropReason::OutOfRange => write!(f, "out of range"),
            DropReason::SameFloor => write!(f, "same floor"),
        }
    }
}

/// Per-batch counts of accepted and dropped requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTally {
    /// Requests queued above the car
    pub accepted_up: usize,
    /// Requests queued below the car
    pub accepted_down: usize,
    /// Entries that were not numbers
    pub unparsable: usize,
    /// Entries outside the shaft
    pub out_of_range: usize,
    /// Entries naming the car's own floor
    pub same_floor: usize,
}

impl RequestTally {
    /// Total requests queued
    pub fn accepted(&self) -> usize {
        self.accepted_up + self.accepted_down
    }

    /// Total entries dropped for any reason
    pub fn dropped(&self) -> usize {
        self.unparsable + self.out_of_range + self.same_floor
    }

    fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::Unparsable => self.unparsable += 1,
            DropReason::OutOfRange => self.out_of_range += 1,
            DropReason::SameFloor => self.same_floor += 1,
        }
    }
}

/// Floors waiting to be visited, split by direction relative to the car
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQueues {
    /// Floors above the car, in submission order
    pub up: Vec<Floor>,
    /// Floors below the car, in submission order
    pub down: Vec<Floor>,
}

impl PendingQueues {
    /// Whether both queues are empty
    pub fn is_empty(&self) -> bool {
        self.up.is_empty() && self.down.is_empty()
    }

    /// Append a floor to the queue for `direction`
    pub fn push(&mut self, direction: Direction, floor: Floor) {
        match direction {
            Direction::Up => self.up.push(floor),
            Direction::Down => self.down.push(floor),
        }
    }

    /// Remove and return the whole queue for `direction`
    pub fn take(&mut self, direction: Direction) -> Vec<Floor> {
        match direction {
            Direction::Up => std::mem::take(&mut self.up),
            Direction::Down => std::mem::take(&mut self.down),
        }
    }
}

/// Validates and routes floor requests for one shaft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestClassifier {
    min_floor: Floor,
    max_floor: Floor,
}

impl RequestClassifier {
    /// Classifier for a shaft serving `min_floor..=max_floor`
    pub fn new(min_floor: Floor, max_floor: Floor) -> Self {
        Self { min_floor, max_floor }
    }

    /// Whether `floor` lies within the shaft
    pub fn validate(&self, floor: Floor) -> bool {
        floor >= self.min_floor && floor <= self.max_floor
    }

    /// Queue a request belongs in, or `None` when the car is already at `floor`
    pub fn classify(floor: Floor, current_floor: Floor) -> Option<Direction> {
        if floor > current_floor {
            Some(Direction::Up)
        } else if floor < current_floor {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Route a single entry, returning the direction it was queued in
    pub fn route<T: FloorLike + ?Sized>(
        &self,
        request: &T,
        current_floor: Floor,
    ) -> Result<(Direction, Floor), DropReason> {
        let floor = request.to_floor().ok_or(DropReason::Unparsable)?;

        if !self.validate(floor) {
            return Err(DropReason::OutOfRange);
        }

        Self::classify(floor, current_floor)
            .map(|direction| (direction, floor))
            .ok_or(DropReason::SameFloor)
    }

    /// Route every entry of `batch` into `queues`, preserving batch order
    ///
    /// All entries are classified against `current_floor`; stops visited later in the
    /// same call do not affect routing.
    pub fn classify_batch<T: FloorLike>(
        &self,
        batch: &[T],
        current_floor: Floor,
        queues: &mut PendingQueues,
    ) -> RequestTally {
        let mut tally = RequestTally::default();

        for (index, request) in batch.iter().enumerate() {
            match self.route(request, current_floor) {
                Ok((direction, floor)) => {
                    queues.push(direction, floor);
                    match direction {
                        Direction::Up => tally.accepted_up += 1,
                        Direction::Down => tally.accepted_down += 1,
                    }
                }
                Err(reason) => {
                    debug!(index, %reason, current_floor, "Dropping floor request");
                    tally.record_drop(reason);
                }
            }
        }

        tally
    }
}
