use tracing::{debug, info};

use super::error::Result;
use super::middleware::{self, MatchMode};
use crate::app::Application;
use crate::modules::{ModuleLoader, ROUTE_METHODS};
use crate::observability::MountStats;
use crate::scan::{FileType, Manifest};

/// Mount every route file in manifest order.
///
/// Each exported method handler is registered on the record's HTTP path,
/// wrapped by the middleware that applies to that path. Returns the number
/// of registrations.
pub async fn mount_routes(
    app: &mut dyn Application,
    manifest: &Manifest,
    loader: &dyn ModuleLoader,
    mode: MatchMode,
    stats: &MountStats,
) -> Result<usize> {
    let mut mounted = 0;
    for record in manifest.of_type(FileType::Route) {
        let module = loader.load(record).await?;
        let chain = middleware::resolve(record.http_path(), manifest, loader, mode).await?;

        let mut exported = 0;
        for method in ROUTE_METHODS {
            let Some(handler) = module.handler_for(&method) else {
                continue;
            };
            info!(
                method = %method,
                path = record.http_path(),
                middleware = chain.len(),
                "Mounted route"
            );
            app.route(method, record.http_path(), handler.clone(), chain.clone());
            stats.route_mounted(chain.len());
            exported += 1;
        }

        if exported == 0 {
            debug!(file = record.relative_path(), "Route file exports no handlers");
        }
        mounted += exported;
    }
    Ok(mounted)
}
