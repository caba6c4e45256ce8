//! The event filter pipeline
//!
//! Filtering is a pure, single-threaded predicate over a stream of trace
//! events in capture order. [`FilterCriteria`] holds the immutable per-run
//! configuration; [`EventFilterEngine`] evaluates one event at a time,
//! assigning each its 1-based sequence position and keeping the running
//! statistics.
//!
//! Exclusion reasons are independent and combine with OR: an event is
//! dropped as soon as any single criterion rejects it. Empty allow-lists
//! leave their dimension unrestricted.

pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, UNBOUNDED, parse_range_bound};
pub use engine::{Decision, EventFilterEngine, RunStatistics};
