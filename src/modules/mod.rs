//! Module system for convention files
//!
//! Every file the scanner picks up is backed by a [`Module`]: the set of
//! bindings the file exports. Route files export method handlers, middleware
//! files export a `mw` chain, init files export an `init` hook.
//!
//! ## Key Components
//!
//! - [`ModuleLoader`] - Seam that turns a manifest record into a [`Module`]
//! - [`ModuleRegistry`] - Loader backed by a path-keyed registry built at compile time
//! - [`handler`], [`middleware`], [`init`] - Constructors for the exported bindings
//!
//! ## Example
//!
//! ```rust,ignore
//! use burrow::modules::{handler, Module, ModuleRegistry};
//!
//! let registry = ModuleRegistry::new()
//!     .with("+route.rs", Module::new().get(handler(|_req| async { "home" })))
//!     .with("users/+route.rs", Module::new().post(handler(create_user)));
//! ```

mod registry;
mod traits;
pub(crate) mod types;

pub use registry::ModuleRegistry;
pub use traits::{LoadError, ModuleLoader};
pub use types::{
    BoxError, BoxFuture, Handler, InitFn, Middleware, Module, ROUTE_METHODS, handler, init,
    middleware,
};
