//! # Events Module
//!
//! Event-driven progress reporting for the organizer.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Scan(ScanEvent::Progress(p)) => {
//!                 println!("Found {} files", p.files_found)
//!             }
//!             Event::Organize(OrganizeEvent::FileCopied { destination, .. }) => {
//!                 println!("-> {}", destination.display())
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the organizer with the sender
//! organizer.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
