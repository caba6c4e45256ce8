use crate::event::TraceLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A tool to filter recorded trace captures and re-emit the surviving events
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a capture, reporting match statistics and optionally rewriting
    /// the kept events into a new capture
    Filter {
        /// Capture file from which to read trace events
        #[arg(short, long)]
        input: PathBuf,

        /// Capture file to which to write the kept events
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print one line per kept event
        #[arg(short, long)]
        verbose: bool,

        /// Suppress the closing statistics line
        #[arg(short, long)]
        quiet: bool,

        /// Keep only events from these providers (repeatable)
        #[arg(short = 'p', long = "include-provider")]
        include_provider: Vec<String>,

        /// Keep only events with these event names (repeatable)
        #[arg(short = 'e', long = "include-event")]
        include_event: Vec<String>,

        /// Keep only events of this level or more severe
        #[arg(short, long, default_value = "verbose")]
        level: TraceLevel,

        /// Keep only events between these positions, as "start:end";
        /// accepts START/BEGIN/FIRST and END/LAST as endpoints
        #[arg(short, long, value_delimiter = ':')]
        range: Vec<String>,

        /// Keep only events whose rendered payload contains this text
        #[arg(short, long)]
        match_payload: Option<String>,

        /// Keep only events with these activity ids (repeatable)
        #[arg(short = 'a', long = "activityid")]
        activity_id: Vec<String>,
    },
    /// Stream every event of a capture as flat JSON records, no filtering
    Import {
        /// Capture file from which to read trace events
        #[arg(short, long)]
        input: PathBuf,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
