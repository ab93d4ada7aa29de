use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::app::{Application, send_file};
use crate::modules::handler;

/// Wildcard route serving files from the root's `static` directory.
pub const STATIC_ROUTE: &str = "/static/*";

/// Register `GET /static/*` on `app`, serving files below `root/static`.
pub fn mount_static(app: &mut dyn Application, root: &Path) {
    let root = root.to_path_buf();
    app.route(
        Method::GET,
        STATIC_ROUTE,
        handler(move |req: Request| {
            let root = root.clone();
            async move { serve_static(&root, req).await }
        }),
        Vec::new(),
    );
    info!(route = STATIC_ROUTE, "Mounted static files");
}

async fn serve_static(root: &Path, req: Request) -> Response {
    match static_file(root, req.uri().path()) {
        Some(path) => send_file(path, req).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Map a request path onto the file it names below `root`. Paths that try
/// to leave the root yield `None`.
fn static_file(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut path = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}
