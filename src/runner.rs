//! Run orchestration: source/sink lifecycle, mode selection and timing.

use crate::capture::{CaptureError, CaptureReader, CaptureWriter};
use crate::filter::{EventFilterEngine, FilterCriteria, RunStatistics};
use crate::report::ReportingSink;
use std::path::Path;
use std::time::Instant;

/// Drives one filter run to completion.
///
/// Without an output path the capture is streamed read-only; with one, every
/// kept event is forwarded unchanged to a new capture at that path. The loop
/// is strictly sequential: each event is evaluated and handed to the sinks
/// before the next one is requested from the reader.
pub struct EtlRunner {
    verbose: bool,
    quiet: bool,
}

impl EtlRunner {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Stream the capture at `input` through `criteria`, optionally rewriting
    /// the kept events to `output`.
    ///
    /// Fails fast if either capture cannot be opened. A mid-stream read error
    /// aborts the run; the statistics accumulated up to that point are
    /// discarded rather than reported, since the run did not complete.
    pub fn run(
        &self,
        criteria: FilterCriteria,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<RunStatistics, CaptureError> {
        let mut reader = CaptureReader::open(input)?;
        let mut writer = match output {
            Some(path) => Some(CaptureWriter::create(path)?),
            None => None,
        };

        let mut engine = EventFilterEngine::new(criteria);
        let sink = ReportingSink::new(self.verbose, self.quiet);
        sink.header();

        let started = Instant::now();
        while let Some(event) = reader.next_event()? {
            let decision = engine.evaluate(&event);
            if !decision.keep {
                continue;
            }

            sink.event_line(
                engine.stats().events_processed,
                &event,
                &decision.rendered_payload,
            );
            if let Some(writer) = writer.as_mut() {
                writer.write_event(&event)?;
            }
        }
        let elapsed = started.elapsed();

        if let Some(writer) = writer {
            writer.finish()?;
        }

        let stats = engine.stats();
        sink.summary(stats, elapsed);
        Ok(stats)
    }
}
