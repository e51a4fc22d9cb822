//! Unique identifier types for the elevator simulator
//!
//! Each controller is tagged with a UUID-based car identifier so that status snapshots,
//! reports and log lines can be attributed to a single car.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an elevator car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub Uuid);

impl CarId {
    /// Create a new random car ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAR_{}", self.0.simple())
    }
}

impl Serialize for CarId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CarId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("CAR_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(CarId(uuid))
    }
}
