//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel as channel;

use dirsig::core::config::Config;
use dirsig::core::errors::{DirsigError, Result};
use dirsig::engine::{EngineEvent, FingerprintEngine, RunReport};
use dirsig::progress::{ProgressBar, format_clock};

/// dirsig — fingerprint a directory tree.
#[derive(Debug, Parser)]
#[command(
    name = "dirsig",
    author,
    version,
    about = "Computes a 64-bit fingerprint over a directory tree's structure and contents",
    long_about = None
)]
pub struct Cli {
    /// Root directory to fingerprint.
    root: PathBuf,
    /// Worker threads for the hashing phase (default: one per core).
    #[arg(long, value_name = "N")]
    threads: Option<usize>,
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit the full run report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Suppress the live progress bar.
    #[arg(short, long)]
    quiet: bool,
}

/// Execute the CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(threads) = cli.threads {
        config.engine.workers = threads;
    }
    config.validate()?;

    let workers = config.effective_workers();
    let redraw = Duration::from_millis(config.progress.redraw_interval_ms);
    let engine = FingerprintEngine::new(config);

    if cli.json {
        let report = engine.run(&cli.root)?;
        print_json(&report)?;
        return Ok(());
    }

    println!("Number of threads: {workers}");
    let report = if cli.quiet {
        let report = engine.run(&cli.root)?;
        print_traversal_line(report.files_total, report.traversal_time);
        report
    } else {
        run_with_progress(engine, cli.root.clone(), redraw)?
    };

    let skipped = report.read_failures + report.traversal_skips;
    if skipped > 0 {
        eprintln!("[DIRSIG] {skipped} path(s) skipped; fingerprint covers the readable subset");
    }

    println!("Final directory hash: {}", report.fingerprint_hex().bold());
    println!("Total time taken: {}", format_clock(report.elapsed));
    Ok(())
}

/// Run the engine on a worker thread while this thread renders progress.
fn run_with_progress(
    engine: FingerprintEngine,
    root: PathBuf,
    redraw: Duration,
) -> Result<RunReport> {
    let (tx, rx) = channel::bounded(1024);
    let engine = engine.with_events(tx);
    let handle = thread::spawn(move || engine.run(&root));

    let mut bar: Option<ProgressBar> = None;
    let mut drew = false;
    // The iterator ends when the engine drops its sender, success or failure.
    for event in rx {
        match event {
            EngineEvent::TraversalComplete { files, duration } => {
                print_traversal_line(files, duration);
                bar = Some(ProgressBar::new(files, redraw));
            }
            EngineEvent::FileProcessed { completed, .. } => {
                if let Some(bar) = bar.as_mut()
                    && let Some(line) = bar.tick(completed)
                {
                    let mut out = io::stdout().lock();
                    let _ = out.write_all(line.as_bytes());
                    let _ = out.flush();
                    drew = true;
                }
            }
        }
    }
    if drew {
        println!();
    }

    handle.join().map_err(|_| DirsigError::Runtime {
        details: "engine thread panicked".to_string(),
    })?
}

fn print_traversal_line(files: u64, duration: Duration) {
    println!(
        "Directory traversal completed in {:.6} seconds ({files} files).",
        duration.as_secs_f64()
    );
}

fn print_json(report: &RunReport) -> Result<()> {
    let mut value = serde_json::to_value(report)?;
    value["fingerprint_hex"] = serde_json::Value::String(report.fingerprint_hex());
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn root_argument_is_required() {
        assert!(Cli::try_parse_from(["dirsig"]).is_err());
    }

    #[test]
    fn extra_positionals_are_rejected() {
        assert!(Cli::try_parse_from(["dirsig", "/a", "/b"]).is_err());
    }

    #[test]
    fn parses_root_and_flags() {
        let cli = Cli::try_parse_from(["dirsig", "--threads", "7", "--quiet", "/data"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("/data"));
        assert_eq!(cli.threads, Some(7));
        assert!(cli.quiet);
        assert!(!cli.json);
    }
}
