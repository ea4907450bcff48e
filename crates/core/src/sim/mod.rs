//! Trace-driven simulation.
//!
//! Provides the trace parsers that produce access records and the driver that
//! replays them through a cache.

/// Simulation driver.
pub mod simulator;

/// Trace file parsing.
pub mod trace;

pub use simulator::{AccessOutcome, Simulator};
pub use trace::{TraceFormat, TraceReader, parse_trace};
