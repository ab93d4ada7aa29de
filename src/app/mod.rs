//! The application the engine mounts onto.
//!
//! [`Application`] is the seam; [`App`] is the axum-backed implementation
//! used by default.

mod file;
mod router;
mod traits;

pub use file::send_file;
pub use router::{App, axum_path};
pub use traits::Application;
