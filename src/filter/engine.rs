use super::criteria::FilterCriteria;
use crate::event::TraceEvent;

/// Running counters for one filter run.
///
/// Exactly one `events_processed` increment happens per event seen, and at
/// most one `events_filtered` increment, so
/// `events_matched() + events_filtered == events_processed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub events_processed: u64,
    pub events_filtered: u64,
}

impl RunStatistics {
    pub fn events_matched(&self) -> u64 {
        self.events_processed - self.events_filtered
    }
}

/// Outcome of evaluating one event.
#[derive(Debug, Clone)]
pub struct Decision {
    pub keep: bool,
    /// The `name=value, ...` payload rendering, always computed since both
    /// the substring filter and the verbose report need it.
    pub rendered_payload: String,
}

/// Evaluates events one at a time in arrival order.
///
/// The engine performs no I/O and holds no sink references; it is the
/// predicate plus counter bookkeeping, so it can be exercised with synthetic
/// events and no source or sink wiring.
pub struct EventFilterEngine {
    criteria: FilterCriteria,
    stats: RunStatistics,
}

impl EventFilterEngine {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            stats: RunStatistics::default(),
        }
    }

    pub fn stats(&self) -> RunStatistics {
        self.stats
    }

    /// Evaluate one event. The processed counter is incremented before the
    /// predicate runs, so the position the range checks see is the 1-based
    /// running count: the first event ever evaluated is position 1.
    pub fn evaluate(&mut self, event: &TraceEvent) -> Decision {
        self.stats.events_processed += 1;
        let position = self.stats.events_processed as i64;
        let rendered_payload = event.render_payload();

        let keep = !self.criteria.excludes(event, position, &rendered_payload);
        if !keep {
            self.stats.events_filtered += 1;
        }

        Decision {
            keep,
            rendered_payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PayloadField, TraceLevel};

    fn event(provider: &str, name: &str, level: TraceLevel) -> TraceEvent {
        TraceEvent {
            timestamp_relative_ms: 10.0,
            provider_name: provider.to_string(),
            event_name: name.to_string(),
            activity_id: "act-1".to_string(),
            related_activity_id: String::new(),
            process_id: 100,
            thread_id: 200,
            level,
            payload: Vec::new(),
        }
    }

    #[test]
    fn test_position_is_one_based() {
        let mut engine = EventFilterEngine::new(FilterCriteria::new());
        engine.evaluate(&event("P", "E", TraceLevel::Informational));
        assert_eq!(engine.stats().events_processed, 1);
    }

    #[test]
    fn test_filtered_incremented_once_for_multiple_reasons() {
        // Wrong provider AND too verbose: still exactly one filtered count.
        let criteria = FilterCriteria::new()
            .with_level_ceiling(TraceLevel::Warning)
            .with_providers(["Expected"]);
        let mut engine = EventFilterEngine::new(criteria);

        let decision = engine.evaluate(&event("Other", "E", TraceLevel::Verbose));
        assert!(!decision.keep);
        assert_eq!(engine.stats().events_filtered, 1);
        assert_eq!(engine.stats().events_processed, 1);
    }

    #[test]
    fn test_payload_rendering_always_present() {
        let mut engine = EventFilterEngine::new(FilterCriteria::new());
        let mut e = event("P", "E", TraceLevel::Informational);
        e.payload = vec![
            PayloadField::new("Code", "5"),
            PayloadField::new("Status", "OK"),
        ];

        let decision = engine.evaluate(&e);
        assert!(decision.keep);
        assert_eq!(decision.rendered_payload, "Code=5, Status=OK");
    }
}
