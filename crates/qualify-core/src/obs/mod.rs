//! Observability: translation trace events and sink abstractions.
//!
//! Sinks are injected by the caller and must not affect translation results.

mod sink;

pub use sink::{
    TraceCounters, TraceDirection, TraceSnapshot, TranslateTraceEvent, TranslateTraceSink,
};
