pub mod capture;
pub mod cli;
pub mod event;
pub mod filter;
pub mod record;
pub mod report;
pub mod runner;

pub use capture::{CaptureError, CaptureReader, CaptureWriter};
pub use cli::{Cli, Commands, cli_parse};
pub use event::{PayloadField, TraceEvent, TraceLevel};
pub use filter::{Decision, EventFilterEngine, FilterCriteria, RunStatistics, parse_range_bound};
pub use record::{TraceRecord, import_capture};
pub use runner::EtlRunner;

use anyhow::Context;

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();

    match cli.command {
        Commands::Filter {
            input,
            output,
            verbose,
            quiet,
            include_provider,
            include_event,
            level,
            range,
            match_payload,
            activity_id,
        } => {
            let criteria = FilterCriteria::new()
                .with_level_ceiling(level)
                .with_range(&range)
                .with_providers(include_provider)
                .with_event_names(include_event)
                .with_activity_ids(activity_id)
                .with_payload_substring(match_payload);

            let runner = EtlRunner::new(verbose, quiet);
            runner
                .run(criteria, &input, output.as_deref())
                .with_context(|| format!("filter run over '{}' failed", input.display()))?;
        }
        Commands::Import { input } => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            import_capture(&input, &mut out)
                .with_context(|| format!("import of '{}' failed", input.display()))?;
        }
    }

    Ok(())
}
