//! Run orchestration: scan, resolve timestamps, plan, execute.

use super::executor::CopyExecutor;
use super::index::DestinationIndex;
use super::planner::CopyPlanner;
use super::types::PlanDecision;
use crate::core::metadata::{ExifTool, MetadataSource};
use crate::core::scanner::{MediaScanner, ScanConfig, WalkDirScanner};
use crate::error::OrganizerError;
use crate::events::{null_sender, Event, EventSender, OrganizeEvent, RunEvent, RunSummary};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Instant;

/// Result of one organizer run
#[derive(Debug)]
pub struct OrganizeResult {
    /// Accumulated counts
    pub summary: RunSummary,
    /// Per-file error messages (already counted in `summary.failed`)
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
struct OrganizeConfig {
    source: PathBuf,
    destination: PathBuf,
    dry_run: bool,
    scan: ScanConfig,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            dry_run: false,
            scan: ScanConfig::default(),
        }
    }
}

/// Builder for [`Organizer`]
pub struct OrganizerBuilder {
    config: OrganizeConfig,
    metadata: Option<Box<dyn MetadataSource>>,
}

impl OrganizerBuilder {
    pub fn new() -> Self {
        Self {
            config: OrganizeConfig::default(),
            metadata: None,
        }
    }

    /// Directory to organize
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.config.source = source.into();
        self
    }

    /// Directory the year-month folders are created under
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination = destination.into();
        self
    }

    /// Report actions without touching the filesystem
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, scan: ScanConfig) -> Self {
        self.config.scan = scan;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan.include_hidden = include;
        self
    }

    /// Override the extensions considered media
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.scan.extensions = Some(extensions);
        self
    }

    /// Set the metadata source (defaults to exiftool from PATH)
    pub fn metadata(mut self, metadata: Box<dyn MetadataSource>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn build(self) -> Organizer {
        Organizer {
            config: self.config,
            metadata: self.metadata.unwrap_or_else(|| Box::new(ExifTool::new())),
        }
    }
}

impl Default for OrganizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The organizer run driver.
///
/// Feeds every discovered file through metadata resolution, planning
/// and execution, sequentially. Per-file problems are counted and the
/// run continues; only a missing tool or an unreadable source root
/// aborts.
pub struct Organizer {
    config: OrganizeConfig,
    metadata: Box<dyn MetadataSource>,
}

impl Organizer {
    /// Create a new organizer builder
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new()
    }

    /// Run without events
    pub fn run(&self) -> Result<OrganizeResult, OrganizerError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events(
        &self,
        events: &EventSender,
    ) -> Result<OrganizeResult, OrganizerError> {
        let start = Instant::now();

        // A missing tool aborts before any file is touched
        if let Err(e) = self.metadata.check_available() {
            events.send(Event::Run(RunEvent::Error {
                message: e.to_string(),
            }));
            return Err(e.into());
        }

        events.send(Event::Run(RunEvent::Started {
            dry_run: self.config.dry_run,
        }));

        let scanner = WalkDirScanner::new(self.config.scan.clone());
        let scan = match scanner.scan_with_events(&self.config.source, events) {
            Ok(scan) => scan,
            Err(e) => {
                events.send(Event::Run(RunEvent::Error {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
        };

        let mut summary = RunSummary::default();
        let mut errors = Vec::new();

        // Unreadable entries were skipped by the walker; count them
        for error in &scan.errors {
            summary.failed += 1;
            errors.push(error.to_string());
        }

        let mut index = DestinationIndex::new();
        let planner = CopyPlanner::new(&self.config.destination);
        let executor = CopyExecutor::new(self.config.dry_run);

        for file in &scan.files {
            summary.files_processed += 1;

            let taken = match self.metadata.capture_date(&file.path) {
                Ok(taken) => taken,
                Err(e) if e.is_fatal() => {
                    events.send(Event::Run(RunEvent::Error {
                        message: e.to_string(),
                    }));
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::debug!(
                        path = %file.path.display(),
                        error = %e,
                        "falling back to modification time"
                    );
                    events.send(Event::Organize(OrganizeEvent::FallbackApplied {
                        path: file.path.clone(),
                    }));
                    DateTime::<Local>::from(file.modified).naive_local()
                }
            };

            let planned = match planner.plan(file, taken, &mut index) {
                Ok(planned) => planned,
                Err(e) => {
                    summary.failed += 1;
                    errors.push(e.to_string());
                    events.send(Event::Organize(OrganizeEvent::FileFailed {
                        path: file.path.clone(),
                        message: e.to_string(),
                    }));
                    continue;
                }
            };

            match planned.decision {
                PlanDecision::Skip => {
                    summary.skipped += 1;
                    events.send(Event::Organize(OrganizeEvent::FileSkipped {
                        path: file.path.clone(),
                        destination: planned.destination.clone(),
                    }));
                }
                PlanDecision::Copy | PlanDecision::CopyRenamed => {
                    match executor.execute(&planned) {
                        Ok(()) => {
                            // Later files in this run must see this copy,
                            // dry-run included, or they would claim the
                            // same target name
                            index.record(planned.folder(), &planned.target_name(), planned.size);

                            if planned.decision == PlanDecision::Copy {
                                summary.copied += 1;
                                events.send(Event::Organize(OrganizeEvent::FileCopied {
                                    path: file.path.clone(),
                                    destination: planned.destination.clone(),
                                }));
                            } else {
                                summary.renamed += 1;
                                events.send(Event::Organize(OrganizeEvent::FileRenamed {
                                    path: file.path.clone(),
                                    destination: planned.destination.clone(),
                                }));
                            }
                        }
                        Err(e) => {
                            summary.failed += 1;
                            errors.push(e.to_string());
                            events.send(Event::Organize(OrganizeEvent::FileFailed {
                                path: file.path.clone(),
                                message: e.to_string(),
                            }));
                        }
                    }
                }
            }
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Run(RunEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(OrganizeResult { summary, errors })
    }
}
