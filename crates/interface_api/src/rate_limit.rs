//! Fixed-window request throttling
//!
//! The admin surface sits behind a per-identity request ceiling. The
//! counting strategy is deliberately small: a store answers "how many
//! requests has this key made in the current window, counting this
//! one?" and the middleware compares that number against the ceiling.
//! Swapping in a shared store later only means implementing the trait.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Counts requests per identity within a rolling series of windows
pub trait RateLimitStore: Send + Sync + 'static {
    /// Records one request under `key` and returns how many the key has
    /// made in the current window, including this one.
    fn increment(&self, key: &str) -> u32;
}

/// In-process fixed-window counter
///
/// All keys share one window that resets wholesale when it elapses. A
/// request arriving just after the reset starts a fresh count, so a
/// burst can straddle the boundary and briefly see up to twice the
/// ceiling. Accepted: the ceiling here is abuse protection, not an SLA.
pub struct FixedWindowStore {
    window: Duration,
    state: Mutex<WindowState>,
}

struct WindowState {
    started: Instant,
    counts: HashMap<String, u32>,
}

impl FixedWindowStore {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(WindowState {
                started: Instant::now(),
                counts: HashMap::new(),
            }),
        }
    }
}

impl RateLimitStore for FixedWindowStore {
    fn increment(&self, key: &str) -> u32 {
        // A poisoned counter map is still usable as a counter map
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.started.elapsed() >= self.window {
            state.started = Instant::now();
            state.counts.clear();
        }

        let count = state.counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}
