use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for one diff call.
///
/// Either supplied by the caller or drawn from a process-local counter, so
/// two calls in the same process never share a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallToken(u64);

impl CallToken {
    pub fn new(raw: u64) -> Self {
        CallToken(raw)
    }

    /// Next value of the process-local counter.
    pub fn next() -> Self {
        CallToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
