use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;
use crate::modules::{BoxError, LoadError};
use crate::scan::ScanError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("init hook {} failed: {source}", .path.display())]
    Init {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
