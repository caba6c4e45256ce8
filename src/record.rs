//! Flat record adapter for the `import` subcommand.
//!
//! Converts each source event into a flat record and streams it as one JSON
//! object per line. This is a pure field-mapping pass-through: no filtering
//! is applied and every event from the source is forwarded.

use crate::capture::{CaptureError, CaptureReader};
use crate::event::{PayloadField, TraceEvent};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One event flattened for downstream consumption.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// 1-based position among all events read in this run
    pub id: u64,
    pub activity_id: String,
    pub related_activity_id: String,
    pub event_name: String,
    /// Level name, not its numeric value
    pub level: String,
    pub provider_name: String,
    pub process_id: u32,
    pub thread_id: u32,
    pub timestamp_relative_ms: f64,
    pub payload: Vec<PayloadField>,
}

impl TraceRecord {
    pub fn from_event(id: u64, event: &TraceEvent) -> Self {
        Self {
            id,
            activity_id: event.activity_id.clone(),
            related_activity_id: event.related_activity_id.clone(),
            event_name: event.event_name.clone(),
            level: event.level.as_str().to_string(),
            provider_name: event.provider_name.clone(),
            process_id: event.process_id,
            thread_id: event.thread_id,
            timestamp_relative_ms: event.timestamp_relative_ms,
            payload: event.payload.clone(),
        }
    }
}

/// Stream every event of the capture at `input` as a flat record to `out`.
/// Returns the number of records written.
pub fn import_capture(input: &Path, out: &mut impl Write) -> Result<u64, CaptureError> {
    let mut reader = CaptureReader::open(input)?;
    let mut id = 0u64;

    while let Some(event) = reader.next_event()? {
        id += 1;
        let record = TraceRecord::from_event(id, &event);
        serde_json::to_writer(&mut *out, &record).map_err(CaptureError::Encode)?;
        out.write_all(b"\n").map_err(CaptureError::Write)?;
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TraceLevel;

    #[test]
    fn test_from_event_maps_every_field() {
        let event = TraceEvent {
            timestamp_relative_ms: 3.5,
            provider_name: "Prov".to_string(),
            event_name: "Ev".to_string(),
            activity_id: "a".to_string(),
            related_activity_id: "b".to_string(),
            process_id: 11,
            thread_id: 12,
            level: TraceLevel::Error,
            payload: vec![PayloadField::new("k", "v")],
        };

        let record = TraceRecord::from_event(4, &event);
        assert_eq!(record.id, 4);
        assert_eq!(record.level, "Error");
        assert_eq!(record.provider_name, "Prov");
        assert_eq!(record.event_name, "Ev");
        assert_eq!(record.activity_id, "a");
        assert_eq!(record.related_activity_id, "b");
        assert_eq!(record.process_id, 11);
        assert_eq!(record.thread_id, 12);
        assert_eq!(record.timestamp_relative_ms, 3.5);
        assert_eq!(record.payload, vec![PayloadField::new("k", "v")]);
    }
}
