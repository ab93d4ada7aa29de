use async_trait::async_trait;
use thiserror::Error;

use super::types::{BoxError, Module};
use crate::scan::FileRecord;

/// Module loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no module registered for {0}")]
    NotFound(String),
    #[error("module {path} does not export `{export}`")]
    MissingExport { path: String, export: &'static str },
    #[error("module {path} failed to load: {source}")]
    Failed {
        path: String,
        #[source]
        source: BoxError,
    },
}

/// Resolves a manifest record to the bindings its file exports.
///
/// The engine calls this once per record use: route files are loaded when
/// mounted, middleware files once for every route they apply to, init files
/// before any route is mounted. Implementations decide whether to cache.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, record: &FileRecord) -> Result<Module, LoadError>;
}
