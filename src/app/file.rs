use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Respond with the contents of `path`.
///
/// Content type, conditional and range headers are handled by `ServeFile`;
/// a missing file is a `404`.
pub async fn send_file(path: PathBuf, req: Request) -> Response {
    match ServeFile::new(path).oneshot(req).await {
        Ok(res) => res.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
