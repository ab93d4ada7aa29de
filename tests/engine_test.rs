use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use burrow::engine::{Engine, EngineError, EngineOptions, MatchMode};
use burrow::modules::{
    BoxError, LoadError, Middleware, Module, ModuleRegistry, handler, init, middleware,
};

#[derive(Clone)]
struct Greeting(&'static str);

/// Lays out `files` under `<tempdir>/app` and returns the temp dir.
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (rel, contents) in files {
        let path = temp_dir.path().join("app").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    temp_dir
}

fn options(temp_dir: &TempDir) -> EngineOptions {
    EngineOptions {
        cwd: Some(temp_dir.path().to_path_buf()),
        ..Default::default()
    }
}

fn tag(name: &'static str) -> Middleware {
    middleware(move |req: Request, next: Next| async move {
        let mut res = next.run(req).await;
        res.headers_mut()
            .append("x-mw", HeaderValue::from_static(name));
        res
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let tags = response
        .headers()
        .get_all("x-mw")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, tags, String::from_utf8(body.to_vec()).unwrap())
}

fn site_registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .with(
            "+init.rs",
            Module::new().init(init(|app| {
                Box::pin(async move {
                    app.extensions_mut().insert(Greeting("hello"));
                    Ok(())
                })
            })),
        )
        .with(
            "+route.rs",
            Module::new().get(handler(|req: Request| async move {
                req.extensions()
                    .get::<Greeting>()
                    .map(|g| g.0)
                    .unwrap_or("missing")
            })),
        )
        .with("+mw.rs", Module::new().mw([tag("root")]))
        .with("admin/+mw.rs", Module::new().mw([tag("admin")]))
        .with(
            "admin/users/+route.rs",
            Module::new().get(handler(|_req| async { "admin users" })),
        )
        .with(
            "other/+route.rs",
            Module::new().get(handler(|_req| async { "other" })),
        )
        .with(
            "users/[id]/+route.rs",
            Module::new().get(handler(|req: Request| async move {
                req.uri().path().to_string()
            })),
        )
}

fn site() -> TempDir {
    fixture(&[
        ("+init.rs", ""),
        ("+route.rs", ""),
        ("+mw.rs", ""),
        ("admin/+mw.rs", ""),
        ("admin/users/+route.rs", ""),
        ("other/+route.rs", ""),
        ("users/[id]/+route.rs", ""),
        ("static/site.css", "body { margin: 0 }"),
        ("notes.txt", "not a convention file"),
    ])
}

#[tokio::test]
async fn test_root_route_sees_init_state() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();

    let (status, tags, body) = get(engine.into_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");
    assert_eq!(tags, vec!["root"]);
}

#[tokio::test]
async fn test_middleware_applies_to_its_subtree_only() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();
    let router = engine.into_router();

    let (status, tags, body) = get(router.clone(), "/admin/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "admin users");
    // Inner middleware finishes first, so its header lands first.
    assert_eq!(tags, vec!["admin", "root"]);

    let (status, tags, _) = get(router, "/other").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tags, vec!["root"]);
}

#[tokio::test]
async fn test_dynamic_segment_route() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();

    let (status, _, body) = get(engine.into_router(), "/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "/users/42");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();
    let router = engine.into_router();

    let (status, _, body) = get(router.clone(), "/static/site.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { margin: 0 }");

    let (status, _, _) = get(router.clone(), "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = get(router, "/static/../notes.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();

    let (status, _, _) = get(engine.into_router(), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manifest_and_stats() {
    let temp_dir = site();
    let engine = Engine::with_options("./app", &site_registry(), options(&temp_dir))
        .await
        .unwrap();

    assert_eq!(engine.manifest().len(), 7);
    let depths: Vec<usize> = engine.manifest().iter().map(|r| r.depth()).collect();
    let mut sorted = depths.clone();
    sorted.sort();
    assert_eq!(depths, sorted);

    let stats = engine.stats();
    assert_eq!(stats.init_hooks_run, 1);
    assert_eq!(stats.routes_mounted, 4);
    // root on 4 routes, admin on 1
    assert_eq!(stats.middleware_applied, 5);
}

#[tokio::test]
async fn test_init_hooks_run_shallowest_first() {
    let temp_dir = fixture(&[("admin/+init.rs", ""), ("+init.rs", "")]);
    let order = Arc::new(Mutex::new(Vec::new()));

    let root_order = order.clone();
    let admin_order = order.clone();
    let registry = ModuleRegistry::new()
        .with(
            "+init.rs",
            Module::new().init(init(move |app| {
                let order = root_order.clone();
                Box::pin(async move {
                    app.extensions_mut().insert(Greeting("root"));
                    order.lock().unwrap().push("root");
                    Ok(())
                })
            })),
        )
        .with(
            "admin/+init.rs",
            Module::new().init(init(move |app| {
                let order = admin_order.clone();
                Box::pin(async move {
                    let seen = app.extensions_mut().get::<Greeting>().map(|g| g.0);
                    assert_eq!(seen, Some("root"));
                    order.lock().unwrap().push("admin");
                    Ok(())
                })
            })),
        );

    Engine::with_options("./app", &registry, options(&temp_dir))
        .await
        .unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["root", "admin"]);
}

#[tokio::test]
async fn test_failing_init_hook_aborts_startup() {
    let temp_dir = fixture(&[("+init.rs", ""), ("+route.rs", "")]);
    let registry = ModuleRegistry::new()
        .with(
            "+init.rs",
            Module::new().init(init(|_app| {
                Box::pin(async { Err::<(), BoxError>("database unreachable".into()) })
            })),
        )
        .with("+route.rs", Module::new().get(handler(|_req| async { "ok" })));

    let result = Engine::with_options("./app", &registry, options(&temp_dir)).await;
    match result {
        Err(EngineError::Init { path, source }) => {
            assert!(path.ends_with(Path::new("app/+init.rs")));
            assert_eq!(source.to_string(), "database unreachable");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("startup should fail"),
    }
}

#[tokio::test]
async fn test_init_file_without_hook_is_rejected() {
    let temp_dir = fixture(&[("+init.rs", "")]);
    let registry = ModuleRegistry::new().with("+init.rs", Module::new());

    let result = Engine::with_options("./app", &registry, options(&temp_dir)).await;
    assert!(matches!(
        result,
        Err(EngineError::Load(LoadError::MissingExport { export: "init", .. }))
    ));
}

#[tokio::test]
async fn test_segment_mode_skips_sibling_prefixes() {
    let files = [("admin/+mw.rs", ""), ("administer/+route.rs", "")];
    let registry = ModuleRegistry::new()
        .with("admin/+mw.rs", Module::new().mw([tag("admin")]))
        .with(
            "administer/+route.rs",
            Module::new().get(handler(|_req| async { "administer" })),
        );

    let temp_dir = fixture(&files);
    let engine = Engine::with_options("./app", &registry, options(&temp_dir))
        .await
        .unwrap();
    let (_, tags, _) = get(engine.into_router(), "/administer").await;
    assert_eq!(tags, vec!["admin"]);

    let temp_dir = fixture(&files);
    let engine = Engine::with_options(
        "./app",
        &registry,
        EngineOptions {
            middleware_match: MatchMode::Segment,
            ..options(&temp_dir)
        },
    )
    .await
    .unwrap();
    let (status, tags, body) = get(engine.into_router(), "/administer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "administer");
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_sibling_placeholder_directories_share_a_route() {
    let temp_dir = fixture(&[("users/[id]/+route.rs", ""), ("users/[slug]/+route.rs", "")]);
    let registry = ModuleRegistry::new()
        .with(
            "users/[id]/+route.rs",
            Module::new().get(handler(|_req| async { "by id" })),
        )
        .with(
            "users/[slug]/+route.rs",
            Module::new().post(handler(|_req| async { "by slug" })),
        );

    let engine = Engine::with_options("./app", &registry, options(&temp_dir))
        .await
        .unwrap();
    let router = engine.into_router();

    let (status, _, body) = get(router.clone(), "/users/ada").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "by id");

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/ada")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"by slug");
}

#[tokio::test]
async fn test_binary_route_file_does_not_abort_startup() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("app");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("+route.so"), b"\x7fELF\x02\x01\x01\x00\xff\xfe").unwrap();

    let registry = ModuleRegistry::new().with(
        "+route.so",
        Module::new().get(handler(|_req| async { "native" })),
    );
    let engine = Engine::with_options("./app", &registry, options(&temp_dir))
        .await
        .unwrap();

    assert_eq!(engine.manifest().len(), 1);
    let (status, _, body) = get(engine.into_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "native");
}
