//! Directory scanning for convention files
//!
//! The scanner walks the application root once and turns every file whose
//! name carries a marker into a [`FileRecord`]:
//!
//! - `+route.<ext>` - route handlers for the directory's HTTP path
//! - `+mw.<ext>` - middleware applied to every route below the directory
//! - `+init.<ext>` - startup hook, run before routes are mounted
//!
//! Records are collected into a [`Manifest`] ordered by path depth, so
//! shallower files always come first.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use burrow::scan::Manifest;
//!
//! let manifest = Manifest::build("./app").await?;
//! for record in &manifest {
//!     println!("{} {}", record.file_type(), record.http_path());
//! }
//! ```

mod classify;
pub mod error;
mod manifest;
pub mod path;
pub mod walker;

pub use classify::FileType;
pub use error::ScanError;
pub use manifest::{FileRecord, Manifest};
pub use walker::{WalkEntry, walk};
