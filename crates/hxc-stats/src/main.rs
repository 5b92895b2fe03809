mod bootstrap;

use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use hxc_core::settings::{OutputFormat, Section, Settings};
use hxc_data::reader::load_records;
use hxc_report::report::{write_json_report, write_text_report};

const USAGE: &str = "Must specify .csv file to generate queries from.";
const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let settings = Settings::load();

    if let Err(e) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to initialise logging: {e}");
    }

    tracing::info!("HXC Stats v{} starting", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    ExitCode::from(execute(&settings, &mut out))
}

/// Run one invocation against `out` and return the process exit status.
fn execute<W: Write>(settings: &Settings, out: &mut W) -> u8 {
    let Some(input) = settings.input.as_deref() else {
        if let Err(e) = writeln!(out, "{USAGE}").and_then(|()| out.flush()) {
            tracing::error!("Failed to print usage: {e}");
        }
        return EXIT_FAILURE;
    };

    let sections = settings.selected_sections();

    match run(out, input, settings.format, &sections) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            // Keep whatever was already rendered, then report the failure.
            if let Err(flush_err) = out.flush() {
                tracing::warn!("Failed to flush partial report: {flush_err}");
            }
            tracing::error!("Report failed: {e:#}");
            eprintln!("Error: {e:#}");
            EXIT_FAILURE
        }
    }
}

/// Load the roster at `input` and write the selected report sections to `out`.
fn run<W: Write>(
    out: &mut W,
    input: &Path,
    format: OutputFormat,
    sections: &[Section],
) -> Result<()> {
    let store = load_records(input)?;

    tracing::info!(
        "Loaded {} characters from {}; rendering {:?} as {:?}",
        store.len(),
        input.display(),
        sections,
        format
    );

    let written = match format {
        OutputFormat::Text => write_text_report(out, &store, sections),
        OutputFormat::Json => write_json_report(out, &store, sections),
    };
    written.context("Failed to write report")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
