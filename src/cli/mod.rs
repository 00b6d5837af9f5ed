//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Copy a phone export into year-month folders
//! organize ~/phone-export ~/Pictures/by-month
//!
//! # Preview without copying
//! organize ~/phone-export ~/Pictures/by-month --dry-run
//!
//! # JSON summary for scripting
//! organize ~/phone-export ~/Pictures/by-month --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::metadata::ExifTool;
use photo_organizer::core::organize::{OrganizeResult, Organizer};
use photo_organizer::error::Result;
use photo_organizer::events::{Event, EventChannel, OrganizeEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Organizer - year-month folders from phone exports
#[derive(Parser, Debug)]
#[command(name = "organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the files to organize
    source: PathBuf,

    /// Directory the year-month folders are created under
    destination: PathBuf,

    /// Report intended actions without copying anything
    #[arg(long)]
    dry_run: bool,

    /// Path to the exiftool binary
    #[arg(long, default_value = "exiftool")]
    exiftool: PathBuf,

    /// Extensions to include, comma separated (default: common photo
    /// and video types)
    #[arg(short, long, value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Include hidden files
    #[arg(long)]
    include_hidden: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let term = Term::stderr();

    if cli.output == OutputFormat::Pretty {
        let mode = if cli.dry_run { " (dry-run)" } else { "" };
        term.write_line(&format!(
            "{}{} {}",
            style("Photo Organizer").bold().cyan(),
            style(mode).yellow(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let mut builder = Organizer::builder()
        .source(&cli.source)
        .destination(&cli.destination)
        .dry_run(cli.dry_run)
        .include_hidden(cli.include_hidden)
        .metadata(Box::new(ExifTool::with_binary(&cli.exiftool)));

    if let Some(extensions) = cli.extensions.clone() {
        builder = builder.extensions(extensions);
    }

    let organizer = builder.build();

    // Progress bar for pretty output
    let progress = if cli.output == OutputFormat::Pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let (sender, receiver) = EventChannel::new();
    let progress_clone = progress.clone();
    let announce = cli.dry_run || cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let say = |pb: &Option<ProgressBar>, line: String| match pb {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        };

        for event in receiver.iter() {
            match event {
                Event::Scan(ScanEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("scanning {}", p.current_path.display()));
                    }
                }
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_files as u64);
                        pb.set_message("");
                    }
                }
                Event::Organize(event) => {
                    if let Some(ref pb) = progress_clone {
                        match event {
                            OrganizeEvent::FallbackApplied { .. } => {}
                            _ => pb.inc(1),
                        }
                    }

                    if announce {
                        match &event {
                            OrganizeEvent::FileCopied { path, destination } => say(
                                &progress_clone,
                                format!(
                                    "copy   {} -> {}",
                                    display_path(path),
                                    display_path(destination)
                                ),
                            ),
                            OrganizeEvent::FileRenamed { path, destination } => say(
                                &progress_clone,
                                format!(
                                    "rename {} -> {}",
                                    display_path(path),
                                    display_path(destination)
                                ),
                            ),
                            OrganizeEvent::FileSkipped { path, .. } => say(
                                &progress_clone,
                                format!("skip   {} (already present)", display_path(path)),
                            ),
                            OrganizeEvent::FallbackApplied { path } => say(
                                &progress_clone,
                                format!(
                                    "note   {} has no capture date, using file time",
                                    display_path(path)
                                ),
                            ),
                            OrganizeEvent::FileFailed { .. } => {}
                        }
                    }

                    if let OrganizeEvent::FileFailed { path, message } = &event {
                        say(
                            &progress_clone,
                            format!(
                                "{} {}: {}",
                                style("error").red().bold(),
                                display_path(path),
                                message
                            ),
                        );
                    }
                }
                _ => {}
            }
        }
    });

    let result = organizer.run_with_events(&sender);

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_summary(&term, &result, cli.dry_run),
        OutputFormat::Json => print_json_summary(&result, cli.dry_run),
    }

    // Per-file failures are reported in the summary; only fatal
    // conditions produce a non-zero exit
    Ok(())
}

fn print_pretty_summary(term: &Term, result: &OrganizeResult, dry_run: bool) {
    let summary = &result.summary;

    term.write_line("").ok();
    term.write_line(&format!(
        "{} {}",
        style("✓").green().bold(),
        if dry_run {
            "Dry-run Complete"
        } else {
            "Organize Complete"
        }
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files processed in {:.1}s",
        style(summary.files_processed).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();

    let copy_label = if dry_run { "would be copied" } else { "copied" };
    term.write_line(&format!(
        "  {} {}, {} renamed on collision",
        style(summary.copied).cyan(),
        copy_label,
        style(summary.renamed).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} skipped (already present)",
        style(summary.skipped).cyan()
    ))
    .ok();

    if summary.failed > 0 {
        term.write_line(&format!("  {} failed", style(summary.failed).red())).ok();

        term.write_line("").ok();
        for error in &result.errors {
            term.write_line(&format!("    {} {}", style("•").red(), error)).ok();
        }
    }

    if dry_run {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style("No files were copied. Re-run without --dry-run to apply.").dim()
        ))
        .ok();
    }
}

fn print_json_summary(result: &OrganizeResult, dry_run: bool) {
    let output = serde_json::json!({
        "dry_run": dry_run,
        "files_processed": result.summary.files_processed,
        "copied": result.summary.copied,
        "renamed": result.summary.renamed,
        "skipped": result.summary.skipped,
        "failed": result.summary.failed,
        "duration_ms": result.summary.duration_ms,
        "errors": result.errors,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Shorten paths under the home directory to `~/...` for display
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
