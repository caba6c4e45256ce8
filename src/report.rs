//! Console reporting: per-event lines, the column header, and the closing
//! statistics line.

use crate::event::TraceEvent;
use crate::filter::RunStatistics;
use colored::Colorize;
use std::time::Duration;
use terminal_size::{Width, terminal_size};

const POSITION_WIDTH: usize = 8;
const TIMESTAMP_WIDTH: usize = 16;
const EVENT_NAME_WIDTH: usize = 30;
const LEVEL_WIDTH: usize = 8;
/// Payload column width when the terminal width cannot be determined or the
/// output is not interactive.
const FALLBACK_PAYLOAD_WIDTH: usize = 65;

/// Formats kept events and the run summary for the console.
///
/// The payload column width is computed once at construction from the
/// terminal's column count minus the fixed columns, never recomputed
/// mid-run.
pub struct ReportingSink {
    verbose: bool,
    quiet: bool,
    payload_width: usize,
}

impl ReportingSink {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            payload_width: detect_payload_width(),
        }
    }

    /// Print the column title pair. Called once, before the first event.
    pub fn header(&self) {
        if !self.verbose {
            return;
        }
        println!(
            "{}",
            format_columns("ID", "RelativeTime", "EventName", "Level", "Payload").bold()
        );
        println!(
            "{}",
            format_columns("--", "------------", "---------", "-----", "-------")
        );
    }

    /// Print one line for a kept event; a no-op unless verbose.
    pub fn event_line(&self, position: u64, event: &TraceEvent, rendered_payload: &str) {
        if !self.verbose {
            return;
        }
        println!(
            "{}",
            format_event_line(position, event, rendered_payload, self.payload_width)
        );
    }

    /// Print the closing statistics line; a no-op when quiet.
    pub fn summary(&self, stats: RunStatistics, elapsed: Duration) {
        if self.quiet {
            return;
        }
        println!(
            "{} Events Matched, {} Events Filtered, {} Events Processed in {}",
            stats.events_matched().to_string().green().bold(),
            stats.events_filtered.to_string().yellow(),
            stats.events_processed,
            format_elapsed(elapsed)
        );
    }
}

fn detect_payload_width() -> usize {
    // One space between each of the five columns.
    let fixed = POSITION_WIDTH + TIMESTAMP_WIDTH + EVENT_NAME_WIDTH + LEVEL_WIDTH + 4;
    match terminal_size() {
        Some((Width(columns), _)) if columns as usize > fixed + 16 => columns as usize - fixed,
        _ => FALLBACK_PAYLOAD_WIDTH,
    }
}

fn format_columns(id: &str, time: &str, name: &str, level: &str, payload: &str) -> String {
    format!(
        "{:<pos$} {:>ts$} {:<name$} {:<lvl$} {}",
        id,
        time,
        name,
        level,
        payload,
        pos = POSITION_WIDTH,
        ts = TIMESTAMP_WIDTH,
        name = EVENT_NAME_WIDTH,
        lvl = LEVEL_WIDTH,
    )
}

fn format_event_line(
    position: u64,
    event: &TraceEvent,
    rendered_payload: &str,
    payload_width: usize,
) -> String {
    format_columns(
        &position.to_string(),
        &format!("{:.4}", event.timestamp_relative_ms),
        truncate(&event.event_name, EVENT_NAME_WIDTH),
        event.level.as_str(),
        truncate(rendered_payload, payload_width),
    )
}

/// Truncate to at most `max` characters, never splitting a character.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PayloadField, TraceLevel};

    fn sample_event(name: &str) -> TraceEvent {
        TraceEvent {
            timestamp_relative_ms: 12.34567,
            provider_name: "P".to_string(),
            event_name: name.to_string(),
            activity_id: String::new(),
            related_activity_id: String::new(),
            process_id: 1,
            thread_id: 2,
            level: TraceLevel::Warning,
            payload: vec![PayloadField::new("Code", "5")],
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 30), "hi");
        assert_eq!(truncate("héllo", 2), "hé");
    }

    #[test]
    fn test_event_line_columns() {
        let line = format_event_line(7, &sample_event("Kernel/ProcessStart"), "Code=5", 65);
        assert!(line.starts_with("7 "));
        assert!(line.contains("12.3457"));
        assert!(line.contains("Kernel/ProcessStart"));
        assert!(line.contains("Warning"));
        assert!(line.ends_with("Code=5"));
    }

    #[test]
    fn test_event_line_truncates_long_names_and_payloads() {
        let long_name = "A".repeat(40);
        let long_payload = "B".repeat(100);
        let line = format_event_line(1, &sample_event(&long_name), &long_payload, 65);
        assert!(line.contains(&"A".repeat(30)));
        assert!(!line.contains(&"A".repeat(31)));
        assert!(line.contains(&"B".repeat(65)));
        assert!(!line.contains(&"B".repeat(66)));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(1234)), "1.234s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.000s");
    }
}
