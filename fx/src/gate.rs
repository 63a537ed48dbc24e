//! One-shot readiness signal for the first feed load.

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::time::{Duration, Instant};

/// Outcome of the most recent feed load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Feed ingested; `days_added` new publication dates appeared.
    Loaded { resource: String, days_added: usize },
    /// Feed fetch or ingestion failed.
    Failed { message: String },
}

impl LoadStatus {
    /// Whether the load succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Loaded {
                resource,
                days_added,
            } => write!(f, "Loaded {} exchange rates for days:{}", resource, days_added),
            LoadStatus::Failed { message } => {
                write!(f, "Last Error during data load: {}", message)
            }
        }
    }
}

#[derive(Debug, Default)]
struct GateState {
    signaled: bool,
    status: Option<LoadStatus>,
}

/// Single-fire gate separating "never loaded" from "loaded, possibly empty".
///
/// The first [`signal`](Self::signal) releases every current and future
/// waiter. The load status is published under the same mutex, so a waiter
/// that observes the signal also observes the status recorded with it.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    state: Mutex<GateState>,
    opened: Condvar,
}

impl ReadinessGate {
    /// Create a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until signaled or `timeout` elapses. Returns whether signaled.
    ///
    /// A timeout too large to represent as a deadline waits without one.
    pub fn wait(&self, timeout: Duration) -> bool {
        let mut state = self.state.lock();
        if state.signaled {
            return true;
        }

        match Instant::now().checked_add(timeout) {
            Some(deadline) => {
                while !state.signaled {
                    if self.opened.wait_until(&mut state, deadline).timed_out() {
                        return state.signaled;
                    }
                }
            }
            None => {
                while !state.signaled {
                    self.opened.wait(&mut state);
                }
            }
        }
        true
    }

    /// Open the gate. Later calls have no effect.
    pub fn signal(&self) {
        let mut state = self.state.lock();
        self.open(&mut state);
    }

    /// Publish the latest load status and open the gate.
    pub fn record(&self, status: LoadStatus) {
        let mut state = self.state.lock();
        state.status = Some(status);
        self.open(&mut state);
    }

    /// Whether the gate is open.
    pub fn is_signaled(&self) -> bool {
        self.state.lock().signaled
    }

    /// Latest recorded load status.
    pub fn last_status(&self) -> Option<LoadStatus> {
        self.state.lock().status.clone()
    }

    fn open(&self, state: &mut GateState) {
        if !state.signaled {
            state.signaled = true;
            self.opened.notify_all();
        }
    }
}
