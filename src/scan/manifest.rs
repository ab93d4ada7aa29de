use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::classify::FileType;
use super::error::{Result, ScanError};
use super::path;
use super::walker::{self, WalkEntry};

/// One convention file found under the root.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    absolute_path: PathBuf,
    relative_path: String,
    #[serde(skip)]
    source_text: String,
    file_type: FileType,
    path_segments: Vec<String>,
    depth: usize,
    http_path: String,
}

impl FileRecord {
    /// Build a record for `absolute_path`.
    ///
    /// `absolute_path` must live under `root`; segments, depth and HTTP path
    /// are all derived from the part below it.
    pub fn new(
        root: &Path,
        absolute_path: PathBuf,
        source_text: String,
        file_type: FileType,
    ) -> Self {
        debug_assert!(
            absolute_path.starts_with(root),
            "{} is not under {}",
            absolute_path.display(),
            root.display()
        );
        let relative = absolute_path.strip_prefix(root).unwrap_or(&absolute_path);
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path_segments = path::segments(&root_name, relative);
        let relative_path = path_segments[1..].join("/");
        let http_path = path::http_path(&path_segments);

        Self {
            depth: path_segments.len(),
            absolute_path,
            relative_path,
            source_text,
            file_type,
            path_segments,
            http_path,
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Path relative to the root, `/` separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn http_path(&self) -> &str {
        &self.http_path
    }

    pub fn file_name(&self) -> &str {
        self.path_segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Text after the last `.` of the file name.
    pub fn extension(&self) -> &str {
        self.file_name().rsplit('.').next().unwrap_or_default()
    }
}

/// Convention files under a root, ordered by ascending depth.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    root: PathBuf,
    records: Vec<FileRecord>,
}

impl Manifest {
    /// Scan `root` and build the manifest.
    ///
    /// The root is canonicalized first. Every file whose name carries a
    /// convention marker is read and recorded; everything else is skipped.
    /// Any listing or read failure aborts the scan.
    pub async fn build(root: impl AsRef<Path>) -> Result<Self> {
        let requested = root.as_ref();
        let root = tokio::fs::canonicalize(requested)
            .await
            .map_err(|source| ScanError::ResolveRoot {
                path: requested.to_path_buf(),
                source,
            })?;

        let mut matched = Vec::new();
        walker::walk(&root, |entry: &WalkEntry| {
            if entry.is_dir {
                return;
            }
            if let Some(file_type) = FileType::classify(&entry.path) {
                matched.push((entry.path.clone(), file_type));
            }
        })
        .await?;

        let mut records = Vec::with_capacity(matched.len());
        for (path, file_type) in matched {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| ScanError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
            // Contents are opaque to the scanner; binaries must not fail it.
            let source_text = String::from_utf8_lossy(&bytes).into_owned();
            let record = FileRecord::new(&root, path, source_text, file_type);
            debug!(
                file = record.relative_path(),
                file_type = %record.file_type(),
                http_path = record.http_path(),
                depth = record.depth(),
                "Classified file"
            );
            records.push(record);
        }

        let manifest = Self::from_records(root, records);
        info!(
            root = %manifest.root.display(),
            files = manifest.len(),
            "Manifest built"
        );
        Ok(manifest)
    }

    /// Assemble a manifest from already-built records. Records are stably
    /// sorted by depth.
    pub fn from_records(root: PathBuf, mut records: Vec<FileRecord>) -> Self {
        records.sort_by_key(FileRecord::depth);
        Self { root, records }
    }

    /// The canonical root this manifest was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    /// Records of one type, in manifest order.
    pub fn of_type(&self, file_type: FileType) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(move |r| r.file_type == file_type)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
