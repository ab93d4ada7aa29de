//! Startup engine
//!
//! Assembles an application from a directory tree in a fixed sequence:
//!
//! 1. Scan the root into a [`Manifest`]
//! 2. Mount `GET /static/*`
//! 3. Run init hooks, shallowest first
//! 4. Mount route handlers with their middleware chains
//!
//! Every step runs to completion before the next one starts. Any failure
//! aborts startup and drops the half-built application.
//!
//! # Usage
//!
//! ```no_run
//! use burrow::engine::Engine;
//! use burrow::modules::{handler, Module, ModuleRegistry};
//!
//! # async fn run() -> Result<(), burrow::engine::EngineError> {
//! let registry = ModuleRegistry::new()
//!     .with("+route.rs", Module::new().get(handler(|_req| async { "home" })));
//!
//! let engine = Engine::new("./app", &registry).await?;
//! engine.listen(8080).await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod init;
pub mod middleware;
pub mod routes;
pub mod statics;

pub use error::EngineError;
pub use middleware::MatchMode;

use axum::Router;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::{App, Application};
use crate::config::Config;
use crate::modules::ModuleLoader;
use crate::observability::{MountSnapshot, MountStats};
use crate::scan::{Manifest, ScanError};

/// Port used by [`Engine::listen`] callers that have no preference.
pub const DEFAULT_PORT: u16 = 8080;

/// Knobs for [`Engine`] assembly.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Directory a relative root is resolved against. Defaults to the
    /// process working directory.
    pub cwd: Option<PathBuf>,
    pub middleware_match: MatchMode,
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            cwd: config.app.cwd.clone(),
            middleware_match: config.routing.middleware_match,
        }
    }
}

/// An application assembled from a directory tree.
pub struct Engine<A: Application = App> {
    app: A,
    manifest: Manifest,
    stats: MountSnapshot,
}

impl Engine<App> {
    /// Assemble a fresh [`App`] from `root` with default options.
    pub async fn new(root: impl AsRef<Path>, loader: &dyn ModuleLoader) -> Result<Self, EngineError> {
        Self::with_options(root, loader, EngineOptions::default()).await
    }

    pub async fn with_options(
        root: impl AsRef<Path>,
        loader: &dyn ModuleLoader,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        Self::with_app(root, loader, options, App::new()).await
    }

    /// Assemble from `[app]` and `[routing]` of `config`.
    pub async fn from_config(config: &Config, loader: &dyn ModuleLoader) -> Result<Self, EngineError> {
        Self::with_options(&config.app.root, loader, EngineOptions::from(config)).await
    }

    /// Assemble from `config` and serve on `server.host:server.port`.
    ///
    /// The address is checked before the tree is scanned.
    pub async fn run(config: &Config, loader: &dyn ModuleLoader) -> Result<(), EngineError> {
        let address = config.server.bind_addr()?;
        Self::from_config(config, loader).await?.serve(address).await
    }

    /// Serve on `0.0.0.0:port` until shutdown.
    pub async fn listen(self, port: u16) -> Result<(), EngineError> {
        self.serve(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
    }

    /// Serve on `address` until shutdown.
    pub async fn serve(self, address: SocketAddr) -> Result<(), EngineError> {
        self.app.listen(address).await?;
        Ok(())
    }

    pub fn into_router(self) -> Router {
        self.app.into_router()
    }
}

impl<A: Application> Engine<A> {
    /// Assemble `app` from `root`.
    pub async fn with_app(
        root: impl AsRef<Path>,
        loader: &dyn ModuleLoader,
        options: EngineOptions,
        mut app: A,
    ) -> Result<Self, EngineError> {
        let root = resolve_root(root.as_ref(), options.cwd.as_deref())?;
        let manifest = Manifest::build(&root).await?;
        let stats = MountStats::new();

        statics::mount_static(&mut app, manifest.root());
        init::run_init(&mut app, &manifest, loader, &stats).await?;
        routes::mount_routes(&mut app, &manifest, loader, options.middleware_match, &stats)
            .await?;

        let stats = stats.snapshot();
        info!(
            root = %manifest.root().display(),
            files = manifest.len(),
            routes = stats.routes_mounted,
            middleware = stats.middleware_applied,
            init_hooks = stats.init_hooks_run,
            "Application assembled"
        );

        Ok(Self {
            app,
            manifest,
            stats,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn stats(&self) -> MountSnapshot {
        self.stats
    }

    pub fn into_parts(self) -> (A, Manifest) {
        (self.app, self.manifest)
    }
}

/// Resolve a relative `root` against `cwd`, or the process working directory.
pub fn resolve_root(root: &Path, cwd: Option<&Path>) -> Result<PathBuf, ScanError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let base = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => std::env::current_dir().map_err(|source| ScanError::ResolveRoot {
            path: root.to_path_buf(),
            source,
        })?,
    };
    Ok(base.join(root))
}
