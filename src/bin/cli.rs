//! gpxfeed CLI - Analyze GPX track logs into log-ready events
//!
//! Usage:
//!   gpxfeed-cli <FILES>... [-v]
//!
//! Each input file produces one summary event per track and one event
//! per track point, written to stdout. A file that cannot be read or
//! parsed is reported and skipped; the remaining files still run.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gpxfeed::analyzer::{self, FileAnalysis};
use gpxfeed::emit;
use log::error;

#[derive(Parser)]
#[command(name = "gpxfeed-cli")]
#[command(about = "Analyze GPX track logs into log-analytics events", long_about = None)]
struct Cli {
    /// GPX files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failures = 0u32;

    for path in &cli.files {
        match analyzer::analyze_file(path) {
            Ok(analysis) => {
                if let Err(e) = write_events(&mut out, &analysis) {
                    error!("failed to write events for {}: {}", path.display(), e);
                    failures += 1;
                }
            }
            Err(e) => {
                error!("failed to analyze {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if let Err(e) = out.flush() {
        error!("failed to flush output: {}", e);
        failures += 1;
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Write one file's track events then its point stream.
fn write_events<W: Write>(out: &mut W, analysis: &FileAnalysis) -> io::Result<()> {
    for event in &analysis.tracks {
        emit::write_track_event(out, event)?;
    }
    emit::write_point_events(out, &analysis.points)
}
