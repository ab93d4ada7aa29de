use tracing::info;

use super::error::{EngineError, Result};
use crate::app::Application;
use crate::modules::{LoadError, ModuleLoader};
use crate::observability::MountStats;
use crate::scan::{FileType, Manifest};

/// Run every init hook in manifest order.
///
/// Hooks are awaited one at a time, so a deeper hook observes everything a
/// shallower one registered. The first failing hook aborts startup.
pub async fn run_init(
    app: &mut dyn Application,
    manifest: &Manifest,
    loader: &dyn ModuleLoader,
    stats: &MountStats,
) -> Result<()> {
    for record in manifest.of_type(FileType::Init) {
        let module = loader.load(record).await?;
        let hook = module.init_fn().ok_or_else(|| LoadError::MissingExport {
            path: record.relative_path().to_string(),
            export: "init",
        })?;

        hook(&mut *app).await.map_err(|source| EngineError::Init {
            path: record.absolute_path().to_path_buf(),
            source,
        })?;

        stats.init_hook_run();
        info!(file = record.relative_path(), "Init hook completed");
    }
    Ok(())
}
