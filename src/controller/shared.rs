//! Thread-safe controller handle
//!
//! A submit call must run classify, dispatch and traverse under one lock, otherwise
//! two batches could interleave in the pending queues. Status reads only hold the lock
//! long enough to copy the snapshot.

use super::classifier::FloorLike;
use super::elevator::ElevatorController;
use super::status::{ElevatorStatus, SubmitReport};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to one controller shared between threads
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<Mutex<ElevatorController>>,
}

impl SharedController {
    /// Wrap a controller for sharing
    pub fn new(controller: ElevatorController) -> Self {
        Self { inner: Arc::new(Mutex::new(controller)) }
    }

    // Submits never leave the car half-updated, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, ElevatorController> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a batch while holding the lock for the whole sweep
    pub fn submit_requests<T: FloorLike>(&self, batch: &[T]) -> SubmitReport {
        self.lock().submit_requests(batch)
    }

    /// Submit an untyped batch while holding the lock for the whole sweep
    pub fn submit_json(&self, batch: &Value) -> SubmitReport {
        self.lock().submit_json(batch)
    }

    /// Snapshot of the car's status
    pub fn status(&self) -> ElevatorStatus {
        self.lock().status()
    }
}

impl From<ElevatorController> for SharedController {
    fn from(controller: ElevatorController) -> Self {
        Self::new(controller)
    }
}
