//! Batch Pacer - Cooperative Throttle Between Address Batches
//!
//! Pauses for a fixed duration after every `batch_size` scanned
//! addresses, to stay under the remote endpoints' throughput tolerance.
//! Not a reaction to server backpressure: the pause is unconditional.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::ports::sleeper::Sleeper;

pub struct BatchPacer<S: Sleeper> {
  sleeper: Arc<S>,
  /// Addresses per batch; 0 disables pacing.
  batch_size: usize,
  pause: Duration,
  scanned: usize,
  pauses: usize,
}

impl<S: Sleeper> BatchPacer<S> {
  pub fn new(sleeper: Arc<S>, batch_size: usize, pause: Duration) -> Self {
    Self {
      sleeper,
      batch_size,
      pause,
      scanned: 0,
      pauses: 0,
    }
  }

  /// Record one scanned address and pause if it closed a batch.
  ///
  /// No pause follows the final address (`more_remaining == false`).
  /// Returns whether a pause happened.
  pub async fn address_done(&mut self, more_remaining: bool) -> bool {
    self.scanned += 1;

    if self.batch_size == 0 || !more_remaining || self.scanned % self.batch_size != 0 {
      return false;
    }

    debug!(
      scanned = self.scanned,
      pause_ms = self.pause.as_millis() as u64,
      "Batch complete, pausing"
    );
    self.sleeper.sleep(self.pause).await;
    self.pauses += 1;
    true
  }

  pub fn pauses(&self) -> usize {
    self.pauses
  }
}
