use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out fetch-cycle epochs. Starting a new cycle invalidates every
/// token issued before it.
#[derive(Debug, Clone, Default)]
pub struct CycleCounter {
    current: Arc<AtomicU64>,
}

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> CycleToken {
        let epoch = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        CycleToken {
            epoch,
            current: Arc::clone(&self.current),
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct CycleToken {
    epoch: u64,
    current: Arc<AtomicU64>,
}

impl CycleToken {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.epoch
    }
}
