use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Role of a convention file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Route,
    Middleware,
    Init,
}

/// Filename markers, tested in this order.
const MARKERS: [(&str, FileType); 3] = [
    ("+route.", FileType::Route),
    ("+mw.", FileType::Middleware),
    ("+init.", FileType::Init),
];

impl FileType {
    /// Classify a file by its name. Returns `None` for files outside the
    /// convention.
    pub fn classify(path: &Path) -> Option<FileType> {
        let name = path.file_name()?.to_str()?;
        MARKERS
            .iter()
            .find(|(marker, _)| name.contains(marker))
            .map(|(_, file_type)| *file_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Route => "route",
            FileType::Middleware => "middleware",
            FileType::Init => "init",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
