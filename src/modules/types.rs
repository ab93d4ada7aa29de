use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::app::Application;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type-erased request handler exported by a route module.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Type-erased middleware binding exported by a middleware module.
pub type Middleware =
    Arc<dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync>;

/// Initialization entry point exported by an init module.
pub type InitFn = Arc<
    dyn for<'a> Fn(&'a mut dyn Application) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync,
>;

/// Methods a route module may export, in mount order.
pub const ROUTE_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PATCH,
    Method::PUT,
    Method::DELETE,
];

/// Wrap an async function as a [`Handler`].
pub fn handler<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req: Request| -> BoxFuture<'static, Response> {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// Wrap an async function as a [`Middleware`] binding.
///
/// The function receives the request and the rest of the chain; call
/// `next.run(req)` to continue.
pub fn middleware<F, Fut, R>(f: F) -> Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req: Request, next: Next| -> BoxFuture<'static, Response> {
        let fut = f(req, next);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// Wrap a closure as an [`InitFn`].
///
/// ```rust,ignore
/// let hook = init(|app| Box::pin(async move {
///     app.extensions_mut().insert(Greeting("hello"));
///     Ok(())
/// }));
/// ```
pub fn init<F>(f: F) -> InitFn
where
    F: for<'a> Fn(&'a mut dyn Application) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// The bindings a loaded module exports.
///
/// Route modules fill in any subset of the method handlers, middleware
/// modules fill in `mw`, init modules fill in `init`.
#[derive(Clone, Default)]
pub struct Module {
    get: Option<Handler>,
    post: Option<Handler>,
    patch: Option<Handler>,
    put: Option<Handler>,
    delete: Option<Handler>,
    mw: Option<Vec<Middleware>>,
    init: Option<InitFn>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(mut self, handler: Handler) -> Self {
        self.get = Some(handler);
        self
    }

    pub fn post(mut self, handler: Handler) -> Self {
        self.post = Some(handler);
        self
    }

    pub fn patch(mut self, handler: Handler) -> Self {
        self.patch = Some(handler);
        self
    }

    pub fn put(mut self, handler: Handler) -> Self {
        self.put = Some(handler);
        self
    }

    pub fn delete(mut self, handler: Handler) -> Self {
        self.delete = Some(handler);
        self
    }

    /// Set the middleware chain. Bindings run in the given order.
    pub fn mw(mut self, chain: impl IntoIterator<Item = Middleware>) -> Self {
        self.mw = Some(chain.into_iter().collect());
        self
    }

    pub fn init(mut self, hook: InitFn) -> Self {
        self.init = Some(hook);
        self
    }

    /// Handler exported for `method`, if any.
    pub fn handler_for(&self, method: &Method) -> Option<&Handler> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            _ => None,
        }
    }

    pub fn middleware(&self) -> Option<&[Middleware]> {
        self.mw.as_deref()
    }

    pub fn init_fn(&self) -> Option<&InitFn> {
        self.init.as_ref()
    }

    /// Methods with an exported handler, in mount order.
    pub fn methods(&self) -> Vec<Method> {
        ROUTE_METHODS
            .iter()
            .filter(|m| self.handler_for(m).is_some())
            .cloned()
            .collect()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("methods", &self.methods())
            .field("mw", &self.mw.as_ref().map(Vec::len))
            .field("init", &self.init.is_some())
            .finish()
    }
}
