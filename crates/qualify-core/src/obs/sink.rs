use crate::error::ErrorClass;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// TranslateTraceSink
///

pub trait TranslateTraceSink: Send + Sync {
    fn on_event(&self, event: TranslateTraceEvent);
}

///
/// TraceDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceDirection {
    Lower,
    Raise,
}

///
/// TranslateTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TranslateTraceEvent {
    Start {
        direction: TraceDirection,
    },
    Finish {
        direction: TraceDirection,
        rows: u64,
        exprs: u64,
    },
    Error {
        direction: TraceDirection,
        class: ErrorClass,
    },
}

///
/// TraceCounters
///
/// Lock-free sink that tallies events. Shareable across threads.
///

#[derive(Debug, Default)]
pub struct TraceCounters {
    started: AtomicU64,
    finished: AtomicU64,
    failed: AtomicU64,
    rows: AtomicU64,
    exprs: AtomicU64,
}

impl TraceCounters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: AtomicU64::new(0),
            finished: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            rows: AtomicU64::new(0),
            exprs: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot {
            started: self.started.load(Ordering::Relaxed),
            finished: self.finished.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rows: self.rows.load(Ordering::Relaxed),
            exprs: self.exprs.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.started,
            &self.finished,
            &self.failed,
            &self.rows,
            &self.exprs,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl TranslateTraceSink for TraceCounters {
    fn on_event(&self, event: TranslateTraceEvent) {
        match event {
            TranslateTraceEvent::Start { .. } => {
                self.started.fetch_add(1, Ordering::Relaxed);
            }
            TranslateTraceEvent::Finish { rows, exprs, .. } => {
                self.finished.fetch_add(1, Ordering::Relaxed);
                self.rows.fetch_add(rows, Ordering::Relaxed);
                self.exprs.fetch_add(exprs, Ordering::Relaxed);
            }
            TranslateTraceEvent::Error { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

///
/// TraceSnapshot
/// Point-in-time copy of [`TraceCounters`].
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TraceSnapshot {
    pub started: u64,
    pub finished: u64,
    pub failed: u64,
    pub rows: u64,
    pub exprs: u64,
}

///
/// TESTS
///
