//! HTTP-level tests for the Swagger UI router.
//!
//! Requests go through the real Axum router in-process via `oneshot`; no
//! socket is opened.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use swui_core::config::{DocExpansion, Layout, SpecUrl};
use swui_core::options::UiOption;
use swui_server::SwaggerUi;

struct Reply {
    status: StatusCode,
    content_type: String,
    nosniff: bool,
    body: String,
}

async fn get(router: &Router, path: &str) -> Reply {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned())
            .unwrap_or_default(),
        nosniff: headers
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .is_some_and(|v| v == "nosniff"),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn router(options: Vec<UiOption>) -> Router {
    SwaggerUi::new(options).unwrap().router()
}

fn write_spec(path: &Path, title: &str) {
    fs::write(
        path,
        format!("openapi: 3.0.0\ninfo:\n  title: {title}\n  version: '1'\npaths: {{}}\n"),
    )
    .unwrap();
}

// ── Routing ──────────────────────────────────────────────────────────

#[tokio::test]
async fn root_serves_rendered_index() {
    let app = router(vec![UiOption::HtmlTitle("Petstore API".to_owned())]);
    let reply = get(&app, "/").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/html"));
    assert!(reply.body.contains("<title>Petstore API</title>"));
    assert!(reply.body.contains("swagger-initializer.js"));
    assert!(!reply.body.contains("{{"));
}

#[tokio::test]
async fn unknown_path_serves_index() {
    let app = router(vec![UiOption::HtmlTitle("Petstore API".to_owned())]);
    let root = get(&app, "/").await;
    let unknown = get(&app, "/does-not-exist").await;
    let explicit = get(&app, "/index.html").await;

    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(unknown.body, root.body);
    assert_eq!(explicit.body, root.body);
}

async fn assert_serves_under_docs(app: &Router) {
    for path in ["/docs", "/docs/", "/docs/anything", "/docs/index.html"] {
        let reply = get(app, path).await;
        assert_eq!(reply.status, StatusCode::OK, "GET {path}");
        assert!(reply.content_type.starts_with("text/html"), "GET {path}");
        assert!(reply.body.contains("<title>Swagger UI</title>"), "GET {path}");
    }

    let css = get(app, "/docs/index.css").await;
    assert_eq!(css.status, StatusCode::OK);
    assert!(css.content_type.starts_with("text/css"));

    let script = get(app, "/docs/swagger-initializer.js").await;
    assert!(script.content_type.contains("javascript"));
    assert!(script.body.contains("SwaggerUIBundle"));
}

#[tokio::test]
async fn mount_serves_prefix_with_and_without_trailing_slash() {
    let ui = SwaggerUi::new(Vec::<UiOption>::new()).unwrap();
    let app = Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .merge(ui.mount("/docs"));

    assert_serves_under_docs(&app).await;
    assert_eq!(get(&app, "/health").await.body, "ok");
}

#[tokio::test]
async fn mount_normalises_prefix() {
    let ui = SwaggerUi::new(Vec::<UiOption>::new()).unwrap();
    assert_serves_under_docs(&ui.mount("docs/")).await;
}

#[tokio::test]
async fn mount_at_root_is_the_plain_router() {
    let ui = SwaggerUi::new(Vec::<UiOption>::new()).unwrap();
    for prefix in ["", "/"] {
        let app = ui.mount(prefix);
        assert!(get(&app, "/").await.body.contains("<title>Swagger UI</title>"));
        assert!(get(&app, "/index.css").await.content_type.starts_with("text/css"));
    }
}

#[tokio::test]
async fn nest_service_serves_prefix_with_trailing_slash() {
    let app = Router::new().nest_service("/docs", router(vec![]));
    assert_serves_under_docs(&app).await;
}

#[tokio::test]
async fn base_path_prefixes_asset_links() {
    let app = router(vec![UiOption::BasePath("/swagger".to_owned())]);
    let reply = get(&app, "/").await;
    assert!(reply.body.contains(r#"href="/swagger/swagger-ui.css""#));
    assert!(reply.body.contains(r#"src="/swagger/swagger-initializer.js""#));
}

#[tokio::test]
async fn without_base_path_asset_links_are_relative() {
    let reply = get(&router(vec![]), "/").await;
    assert!(reply.body.contains(r#"href="swagger-ui.css""#));
}

#[tokio::test]
async fn html_title_is_escaped() {
    let app = router(vec![UiOption::HtmlTitle("<script>alert(1)</script>".to_owned())]);
    let reply = get(&app, "/").await;
    assert!(reply.body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!reply.body.contains("<script>alert(1)"));
}

// ── Content types ────────────────────────────────────────────────────

#[tokio::test]
async fn static_asset_content_types() {
    let app = router(vec![]);

    let css = get(&app, "/index.css").await;
    assert!(css.content_type.starts_with("text/css"));

    let png = get(&app, "/favicon-32x32.png").await;
    assert_eq!(png.content_type, "image/png");

    let js = get(&app, "/swagger-ui-bundle.js").await;
    assert!(js.content_type.contains("javascript"));
}

#[tokio::test]
async fn percent_encoded_asset_names_are_decoded() {
    let reply = get(&router(vec![]), "/swagger%2Dui.css").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/css"));
    assert!(!reply.body.contains("<title>"));
}

#[tokio::test]
async fn extensionless_text_asset_is_plain_text() {
    let reply = get(&router(vec![]), "/NOTICE").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/plain"));
    assert!(reply.body.contains("swagger-ui"));
}

// ── Bootstrap script ─────────────────────────────────────────────────

#[tokio::test]
async fn unset_options_render_empty() {
    let reply = get(&router(vec![]), "/swagger-initializer.js").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.contains("javascript"));
    assert!(reply.body.contains("maxDisplayedTags: numberOrUndefined(''),"));
    assert!(reply.body.contains("defaultModelsExpandDepth: numberOrUndefined(''),"));
    assert!(reply.body.contains("deepLinking: boolOrUndefined(''),"));
    assert!(reply.body.contains("spec: jsonOrUndefined(''),"));
    assert!(reply.body.contains("urls: jsonOrUndefined(''),"));
    assert!(!reply.body.contains("{{"));
}

#[tokio::test]
async fn set_options_render_canonically() {
    let app = router(vec![
        UiOption::SpecUrl("https://petstore.swagger.io/v2/swagger.json".to_owned()),
        UiOption::DocExpansion(DocExpansion::Full),
        UiOption::DefaultModelsExpandDepth(-1),
        UiOption::DeepLinking(true),
        UiOption::PersistAuthorization(false),
        UiOption::Layout(Layout::StandaloneLayout),
        UiOption::SupportedSubmitMethods(vec!["get".to_owned(), "post".to_owned()]),
    ]);
    let body = get(&app, "/swagger-initializer.js").await.body;

    assert!(body.contains("url: stringOrUndefined('https://petstore.swagger.io/v2/swagger.json'),"));
    assert!(body.contains("docExpansion: stringOrUndefined('full'),"));
    assert!(body.contains("defaultModelsExpandDepth: numberOrUndefined('-1'),"));
    assert!(body.contains("deepLinking: boolOrUndefined('true'),"));
    assert!(body.contains("persistAuthorization: boolOrUndefined('false'),"));
    assert!(body.contains("layout: stringOrUndefined('StandaloneLayout')"));
    assert!(body.contains("listOrUndefined('get,post')"));
}

#[tokio::test]
async fn spec_urls_render_as_json_with_primary() {
    let app = router(vec![UiOption::SpecUrls {
        primary: "v2".to_owned(),
        urls: vec![SpecUrl::new("v1", "/v1.json"), SpecUrl::new("v2", "/v2.json")],
    }]);
    let body = get(&app, "/swagger-initializer.js").await.body;

    assert!(body.contains(
        r#"urls: jsonOrUndefined('[{\"name\":\"v1\",\"url\":\"/v1.json\"},{\"name\":\"v2\",\"url\":\"/v2.json\"}]'),"#
    ));
    assert!(body.contains(r#""urls.primaryName": stringOrUndefined('v2'),"#));
}

#[tokio::test]
async fn inline_spec_is_escaped() {
    let app = router(vec![UiOption::Spec(
        b"{\n  \"openapi\": \"3.0.0\",\n  \"info\": {\"title\": \"it's\"}\n}".to_vec(),
    )]);
    let body = get(&app, "/swagger-initializer.js").await.body;

    assert!(body.contains(
        r#"spec: jsonOrUndefined('{\n  \"openapi\": \"3.0.0\",\n  \"info\": {\"title\": \"it\'s\"}\n}'),"#
    ));
}

#[tokio::test]
async fn disabled_validator_renders_empty_url() {
    let app = router(vec![UiOption::ValidatorUrl {
        enabled: false,
        url: "https://validator.swagger.io/validator".to_owned(),
    }]);
    let body = get(&app, "/swagger-initializer.js").await.body;
    assert!(body.contains("validatorUrl: stringOrUndefined(''),"));
    assert!(!body.contains("validator.swagger.io"));
}

#[tokio::test]
async fn filter_rendering() {
    let body = get(
        &router(vec![UiOption::Filter {
            enabled: true,
            expression: String::new(),
        }]),
        "/swagger-initializer.js",
    )
    .await
    .body;
    assert!(body.contains("filter: stringOrUndefined('') || boolOrUndefined('true'),"));

    let body = get(
        &router(vec![UiOption::Filter {
            enabled: true,
            expression: "auth".to_owned(),
        }]),
        "/swagger-initializer.js",
    )
    .await
    .body;
    assert!(body.contains("filter: stringOrUndefined('auth') || boolOrUndefined('true'),"));
}

// ── Spec file reload ─────────────────────────────────────────────────

#[tokio::test]
async fn spec_file_is_reloaded_on_every_index_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    write_spec(&path, "First");

    let app = router(vec![UiOption::SpecFilePath(path.clone())]);

    assert_eq!(get(&app, "/").await.status, StatusCode::OK);
    let first = get(&app, "/swagger-initializer.js").await.body;
    assert!(first.contains(r#"\"title\":\"First\""#));

    write_spec(&path, "Second");

    assert_eq!(get(&app, "/").await.status, StatusCode::OK);
    let second = get(&app, "/swagger-initializer.js").await.body;
    assert!(second.contains(r#"\"title\":\"Second\""#));
    assert!(!second.contains("First"));
}

#[tokio::test]
async fn spec_file_supersedes_inline_spec_and_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    write_spec(&path, "FromFile");

    let app = router(vec![
        UiOption::Spec(b"{\"info\":{\"title\":\"Inline\"}}".to_vec()),
        UiOption::SpecUrl("https://example.com/openapi.json".to_owned()),
        UiOption::SpecFilePath(path),
    ]);

    get(&app, "/").await;
    let body = get(&app, "/swagger-initializer.js").await.body;
    assert!(body.contains("FromFile"));
    assert!(!body.contains("Inline"));
    assert!(body.contains("url: stringOrUndefined(''),"));
}

#[tokio::test]
async fn bootstrap_script_reads_the_file_when_nothing_is_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.json");
    fs::write(&path, r#"{"openapi":"3.1.0","info":{"title":"Direct"}}"#).unwrap();

    let app = router(vec![UiOption::SpecFilePath(path)]);
    let body = get(&app, "/swagger-initializer.js").await.body;
    assert!(body.contains(r#"\"title\":\"Direct\""#));
}

#[tokio::test]
async fn without_spec_file_inline_spec_ignores_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    write_spec(&path, "OnDisk");

    let app = router(vec![UiOption::Spec(b"{\"info\":{\"title\":\"Inline\"}}".to_vec())]);

    get(&app, "/").await;
    let before = get(&app, "/swagger-initializer.js").await.body;
    write_spec(&path, "ChangedOnDisk");
    get(&app, "/").await;
    let after = get(&app, "/swagger-initializer.js").await.body;

    assert_eq!(before, after);
    assert!(after.contains("Inline"));
    assert!(!after.contains("OnDisk"));
}

#[tokio::test]
async fn missing_spec_file_is_404_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(vec![UiOption::SpecFilePath(dir.path().join("absent.yaml"))]);

    let reply = get(&app, "/").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.content_type, "text/plain; charset=utf-8");
    assert!(reply.nosniff);
    assert!(!reply.body.contains("<html"));
    assert!(!reply.body.contains("absent.yaml"));
}

#[tokio::test]
async fn malformed_spec_file_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "{ openapi: [unterminated").unwrap();

    let reply = get(&router(vec![UiOption::SpecFilePath(path)]), "/").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.nosniff);
    assert!(reply.content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn failed_reload_keeps_last_good_spec() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    write_spec(&path, "Good");

    let app = router(vec![UiOption::SpecFilePath(path.clone())]);
    assert_eq!(get(&app, "/").await.status, StatusCode::OK);

    fs::remove_file(&path).unwrap();
    assert_eq!(get(&app, "/").await.status, StatusCode::NOT_FOUND);

    let body = get(&app, "/swagger-initializer.js").await.body;
    assert!(body.contains(r#"\"title\":\"Good\""#));
}

#[tokio::test]
async fn static_assets_do_not_touch_the_spec_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(vec![UiOption::SpecFilePath(dir.path().join("absent.yaml"))]);

    let css = get(&app, "/index.css").await;
    assert_eq!(css.status, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_requests_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    write_spec(&path, "Shared");
    let app = router(vec![UiOption::SpecFilePath(path)]);

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let path = if i % 2 == 0 { "/" } else { "/swagger-initializer.js" };
            get(&app, path).await.status
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }
}
