//! Sleeper Port - Cooperative Pause Primitive
//!
//! The batch pacer pauses between address batches through this trait
//! so tests can observe pauses without waiting for them.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Sleeper: Send + Sync + 'static {
  /// Suspend the caller for `duration`.
  async fn sleep(&self, duration: Duration);
}
