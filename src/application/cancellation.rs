// Liveness token gating late writes
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that turns false when the consumer of a load goes away.
///
/// Loads check it after their network call resolves and drop the result
/// instead of writing it once the token is cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
