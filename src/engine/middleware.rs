use serde::{Deserialize, Serialize};

use crate::modules::{LoadError, Middleware, ModuleLoader};
use crate::scan::{FileRecord, FileType, Manifest};

/// How a middleware file's HTTP path is compared with a route's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain string prefix. `/admin` also covers `/administer`.
    #[default]
    Prefix,
    /// Whole segments only. `/admin` covers `/admin` and `/admin/...`.
    Segment,
}

impl MatchMode {
    pub fn matches(self, middleware_path: &str, route_path: &str) -> bool {
        match self {
            MatchMode::Prefix => route_path.starts_with(middleware_path),
            MatchMode::Segment => {
                middleware_path == "/"
                    || route_path
                        .strip_prefix(middleware_path)
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            }
        }
    }
}

/// Middleware records that apply to `route_path`, in manifest order.
pub fn matching<'m>(
    route_path: &'m str,
    manifest: &'m Manifest,
    mode: MatchMode,
) -> impl Iterator<Item = &'m FileRecord> {
    manifest
        .of_type(FileType::Middleware)
        .filter(move |record| mode.matches(record.http_path(), route_path))
}

/// Load the middleware chain for a route.
///
/// Every matching file contributes all of its bindings, shallow files first.
/// Nothing is de-duplicated.
pub async fn resolve(
    route_path: &str,
    manifest: &Manifest,
    loader: &dyn ModuleLoader,
    mode: MatchMode,
) -> Result<Vec<Middleware>, LoadError> {
    let mut chain = Vec::new();
    for record in matching(route_path, manifest, mode) {
        let module = loader.load(record).await?;
        let bindings = module.middleware().ok_or_else(|| LoadError::MissingExport {
            path: record.relative_path().to_string(),
            export: "mw",
        })?;
        chain.extend(bindings.iter().cloned());
    }
    Ok(chain)
}
