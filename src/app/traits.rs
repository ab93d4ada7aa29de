use axum::http::{Extensions, Method};

use crate::modules::{Handler, Middleware};

/// Mount target for the engine.
///
/// The engine only ever registers endpoints and hands the application to
/// init hooks; serving, path matching and collision handling belong to the
/// implementation.
pub trait Application: Send {
    /// Register `handler` for `method` on `path`, wrapped by `middleware`.
    ///
    /// The first middleware in the chain sees the request first.
    fn route(&mut self, method: Method, path: &str, handler: Handler, middleware: Vec<Middleware>);

    /// Values stored here are attached to every request the application
    /// serves.
    fn extensions_mut(&mut self) -> &mut Extensions;
}
