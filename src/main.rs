//! # organize CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! organize ~/phone-export ~/Pictures/by-month --dry-run
//! organize ~/phone-export ~/Pictures/by-month --output json
//! ```

mod cli;

use photo_organizer::Result;

fn main() -> Result<()> {
    photo_organizer::init_tracing();
    cli::run()
}
