use anyhow::{Context, Result};
use clap::Parser;
use ghdiff_config::{AppConfig, OutputFormat};
use ghdiff_core::{Hunk, parse_unified_diff};
use std::io::{self, Write};
use std::process::ExitCode;

mod cli;
mod logger;
mod render;
mod source;

use cli::Cli;
use render::TextRenderer;
use source::GitRepo;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    log::info!("Starting ghdiff");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load(),
    };
    let settings = cli.settings(&config);
    log::debug!("Output settings: {:?}", settings);

    let source = source::for_target(cli.diff_target(), GitRepo::new(&cli.repo), &config)?;
    log::info!("Reading diff from {}", source.describe());
    let text = source.diff_text()?;

    let diff = parse_unified_diff(&text).context("Failed to parse diff")?;
    log::info!("Parsed {} files", diff.files.len());
    for file in &diff.files {
        for hunk in &file.hunks {
            if let Some(mismatch) = count_mismatch(hunk) {
                log::warn!("Hunk {:?} in {}: {}", hunk.header, file.display_name(), mismatch);
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match settings.format {
        OutputFormat::Json => render::render_json(&diff, &mut out),
        OutputFormat::Text => {
            TextRenderer::new(settings.mode, settings.width).render(&diff, &mut out)
        }
    };
    ignore_broken_pipe(written.and_then(|()| out.flush())).context("Failed to write output")?;

    log::info!("Exiting ghdiff");
    Ok(())
}

/// Describe how a hunk body differs from its header counts, if it does.
fn count_mismatch(hunk: &Hunk) -> Option<String> {
    if hunk.is_well_formed() {
        return None;
    }
    let (old, new) = hunk.body_line_counts();
    Some(format!(
        "body has {} old and {} new lines, header announces {} and {}",
        old, new, hunk.old_lines, hunk.new_lines
    ))
}

/// A reader closing the pipe early (`ghdiff | head`) ends output normally.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Output closed early: {}", err);
            Ok(())
        }
        other => other,
    }
}
