use axum::Router;
use axum::extract::Request;
use axum::http::{Extensions, Method};
use axum::middleware::{self as axum_middleware, Next};
use axum::routing::{MethodFilter, MethodRouter, on};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use tracing::warn;

use super::traits::Application;
use crate::modules::{Handler, Middleware};

struct Endpoint {
    path: String,
    shape: String,
    method: Method,
    handler: Handler,
    middleware: Vec<Middleware>,
}

/// [`Application`] backed by an axum [`Router`].
///
/// Registering the same method on the same path shape twice keeps the last
/// registration. Paths that differ only in placeholder names (`/users/[id]`
/// and `/users/[slug]`) share a shape. Dynamic segments are translated when
/// the router is built:
/// `[name]` becomes `{name}`, `[...name]` becomes `{*name}` and a bare `*`
/// becomes `{*path}`.
#[derive(Default)]
pub struct App {
    endpoints: Vec<Endpoint>,
    extensions: Extensions,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered `(method, path)` pairs, in registration order.
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.endpoints
            .iter()
            .map(|e| (e.method.clone(), e.path.clone()))
            .collect()
    }

    /// Number of middleware bindings wrapping `method` on `path`.
    pub fn middleware_count(&self, method: &Method, path: &str) -> Option<usize> {
        self.endpoints
            .iter()
            .find(|e| &e.method == method && e.path == path)
            .map(|e| e.middleware.len())
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Build the axum router.
    pub fn into_router(self) -> Router {
        // axum rejects two routes of the same shape, so each shape is mounted
        // once under the path of its first registration.
        let mut shapes: BTreeMap<String, (String, MethodRouter)> = BTreeMap::new();
        for endpoint in self.endpoints {
            let path = axum_path(&endpoint.path);
            let shape = endpoint.shape.clone();
            let Some(method_router) = endpoint.into_method_router() else {
                continue;
            };
            let entry = match shapes.remove(&shape) {
                Some((mounted, existing)) => {
                    if mounted != path {
                        warn!(
                            path = %path,
                            mounted = %mounted,
                            "Placeholder names differ, mounting under the first path"
                        );
                    }
                    (mounted, existing.merge(method_router))
                }
                None => (path, method_router),
            };
            shapes.insert(shape, entry);
        }

        let router = shapes
            .into_values()
            .fold(Router::new(), |router, (path, method_router)| {
                router.route(&path, method_router)
            });

        let extensions = self.extensions;
        router.layer(axum_middleware::map_request(move |mut req: Request| {
            let extensions = extensions.clone();
            async move {
                req.extensions_mut().extend(extensions);
                req
            }
        }))
    }

    /// Serve on `address` until Ctrl-C or SIGTERM.
    pub async fn listen(self, address: SocketAddr) -> std::io::Result<()> {
        crate::server::serve(self.into_router(), address).await
    }
}

impl Application for App {
    fn route(&mut self, method: Method, path: &str, handler: Handler, middleware: Vec<Middleware>) {
        let endpoint = Endpoint {
            path: path.to_string(),
            shape: route_shape(path),
            method,
            handler,
            middleware,
        };

        match self
            .endpoints
            .iter_mut()
            .find(|e| e.method == endpoint.method && e.shape == endpoint.shape)
        {
            Some(existing) => {
                warn!(
                    method = %endpoint.method,
                    path = %endpoint.path,
                    replaced = %existing.path,
                    "Route registered twice, keeping the last registration"
                );
                *existing = endpoint;
            }
            None => self.endpoints.push(endpoint),
        }
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl Endpoint {
    fn into_method_router(self) -> Option<MethodRouter> {
        let filter = match MethodFilter::try_from(self.method.clone()) {
            Ok(filter) => filter,
            Err(_) => {
                warn!(method = %self.method, path = %self.path, "Unsupported method, route skipped");
                return None;
            }
        };

        let handler = self.handler;
        let mut method_router = on(filter, move |req: Request| {
            let handler = handler.clone();
            async move { handler(req).await }
        });

        // Layers wrap from the inside out, so the first binding goes on last.
        for mw in self.middleware.into_iter().rev() {
            method_router = method_router.layer(axum_middleware::from_fn(
                move |req: Request, next: Next| {
                    let mw = mw.clone();
                    async move { mw(req, next).await }
                },
            ));
        }

        Some(method_router)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
    CatchAll(&'a str),
}

fn parse_segment(segment: &str) -> Segment<'_> {
    if segment == "*" {
        Segment::CatchAll("path")
    } else if let Some(name) = segment
        .strip_prefix("[...")
        .and_then(|s| s.strip_suffix(']'))
    {
        Segment::CatchAll(name)
    } else if let Some(name) = segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Segment::Param(name)
    } else {
        Segment::Literal(segment)
    }
}

fn map_segments(path: &str, f: impl Fn(Segment<'_>) -> String) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| f(parse_segment(segment)))
        .collect::<Vec<_>>()
        .join("/")
}

/// Translate placeholder segments into axum's path syntax.
pub fn axum_path(path: &str) -> String {
    map_segments(path, |segment| match segment {
        Segment::Literal(s) => s.to_string(),
        Segment::Param(name) => format!("{{{name}}}"),
        Segment::CatchAll(name) => format!("{{*{name}}}"),
    })
}

/// `path` with placeholder names erased; two paths with the same shape match
/// the same requests.
fn route_shape(path: &str) -> String {
    map_segments(path, |segment| match segment {
        Segment::Literal(s) => s.to_string(),
        Segment::Param(_) => "{}".to_string(),
        Segment::CatchAll(_) => "{*}".to_string(),
    })
}
