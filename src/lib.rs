pub mod app;
pub mod config;
pub mod engine;
pub mod modules;
pub mod observability;
pub mod scan;
pub mod server;

pub use app::{App, Application};
pub use engine::{Engine, EngineError, EngineOptions};
pub use modules::{Module, ModuleLoader, ModuleRegistry, handler, init, middleware};
pub use scan::{FileRecord, FileType, Manifest};
