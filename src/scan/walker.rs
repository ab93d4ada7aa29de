use std::path::{Path, PathBuf};
use tracing::trace;

use super::error::{Result, ScanError};
use crate::modules::BoxFuture;

/// One entry reported by [`walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Visit every entry below `root`, depth-first.
///
/// Each entry is reported before its children. Entries of one directory are
/// visited in file-name order. Symlinks are reported with their own file type
/// and never followed. The first directory that cannot be listed aborts the
/// walk.
pub async fn walk<F>(root: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&WalkEntry) + Send,
{
    walk_dir(root.to_path_buf(), &mut visit).await
}

fn walk_dir<'a, F>(dir: PathBuf, visit: &'a mut F) -> BoxFuture<'a, Result<()>>
where
    F: FnMut(&WalkEntry) + Send,
{
    Box::pin(async move {
        for entry in list_dir(&dir).await? {
            visit(&entry);
            if entry.is_dir {
                walk_dir(entry.path, visit).await?;
            }
        }
        Ok(())
    })
}

async fn list_dir(dir: &Path) -> Result<Vec<WalkEntry>> {
    let list_err = |source| ScanError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut reader = tokio::fs::read_dir(dir).await.map_err(list_err)?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(list_err)? {
        let file_type = entry.file_type().await.map_err(list_err)?;
        entries.push(WalkEntry {
            path: entry.path(),
            is_dir: file_type.is_dir(),
        });
    }
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    trace!(dir = %dir.display(), entries = entries.len(), "Listed directory");
    Ok(entries)
}
