//! # Photo Organizer
//!
//! Sorts phone photo and video exports into year-month folders.
//!
//! ## Core Philosophy
//! - **Never destroy** - sources are copied, not moved; nothing at the
//!   destination is overwritten
//! - **Idempotent** - re-running over an organized destination skips
//!   everything already in place
//! - **Dry-run first** - every run can be previewed without touching
//!   the filesystem
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and
//! presentation layers:
//! - `core` - scanning, metadata resolution, planning, copying
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - the error taxonomy
//! - `cli` - command-line interface (in the binary)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
