//! Request handling for the embedded Swagger UI.
//!
//! Every request is reduced to a single file name: the last path segment,
//! or the index document when that segment is empty or not part of the
//! bundle. Unknown names fall back to the index so the handler works when
//! mounted on a path without a trailing slash (`/docs` instead of `/docs/`).
//!
//! The index page and the bootstrap script are rendered from the handler's
//! [`UiConfig`]; all other names are served straight from the bundle.

use std::borrow::Cow;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use swui_core::config::UiConfig;
use swui_core::options::UiOption;
use swui_core::spec;
use swui_core::template::{RenderContext, Template, TemplateKind};

use crate::assets::{self, AssetIndex, INDEX_HTML, INITIALIZER_JS};
use crate::content_type;
use crate::error::{StartupError, UiError};

const INDEX_TEMPLATE: &str = include_str!("../swagger-ui/templates/index.html");
const INITIALIZER_TEMPLATE: &str = include_str!("../swagger-ui/templates/swagger-initializer.js");

/// A configured Swagger UI handler.
///
/// Cheap to clone; clones share the same configuration and spec cache.
#[derive(Clone)]
pub struct SwaggerUi {
    inner: Arc<Inner>,
}

struct Inner {
    config: UiConfig,
    assets: AssetIndex,
    index: Template,
    initializer: Template,
    /// Last spec read from `config.spec_file_path`. Written by index
    /// requests and read by bootstrap-script requests; the configuration
    /// itself is never touched.
    reloaded_spec: RwLock<Option<Arc<str>>>,
}

impl std::fmt::Debug for SwaggerUi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwaggerUi")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// A successful response: body plus inferred content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiResponse {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl IntoResponse for UiResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

impl SwaggerUi {
    /// Build a handler from options applied in order.
    pub fn new<I>(options: I) -> Result<Self, StartupError>
    where
        I: IntoIterator<Item = UiOption>,
    {
        Self::from_config(UiConfig::from_options(options))
    }

    /// Build a handler from a finished configuration.
    ///
    /// Indexes the embedded bundle and parses both templates. Failure here
    /// means the binary itself is broken.
    pub fn from_config(config: UiConfig) -> Result<Self, StartupError> {
        let assets = AssetIndex::build()?;
        let index = Template::parse(INDEX_HTML, TemplateKind::Html, INDEX_TEMPLATE)?;
        let initializer =
            Template::parse(INITIALIZER_JS, TemplateKind::Script, INITIALIZER_TEMPLATE)?;

        info!(
            assets = assets.len(),
            spec_file = ?config.spec_file_path,
            "Swagger UI handler ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                assets,
                index,
                initializer,
                reloaded_spec: RwLock::new(None),
            }),
        })
    }

    pub fn config(&self) -> &UiConfig {
        &self.inner.config
    }

    /// Axum router serving the UI at `/` and every path below it.
    ///
    /// Use it directly or through `Router::merge` at the root. Under a
    /// prefix use [`SwaggerUi::mount`]; `Router::nest` never routes
    /// `<prefix>/` to a nested router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(serve))
            .route("/{*file}", get(serve))
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Router serving the UI under `prefix`, including `prefix` itself and
    /// `prefix/`.
    ///
    /// Merge the result into the application router. An empty prefix or `/`
    /// is the same as [`SwaggerUi::router`].
    pub fn mount(&self, prefix: &str) -> Router {
        let prefix = prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            return self.router();
        }

        let prefix = if prefix.starts_with('/') {
            prefix.to_owned()
        } else {
            format!("/{prefix}")
        };
        Router::new().nest_service(&prefix, self.router())
    }

    /// Map a request path to the bundle file that answers it.
    ///
    /// The path is percent-decoded before its last segment is taken; a path
    /// that does not decode to UTF-8 is used as is.
    pub fn resolve(&self, request_path: &str) -> &str {
        let decoded = urlencoding::decode(request_path).unwrap_or(Cow::Borrowed(request_path));
        let name = decoded
            .trim()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .trim();

        if name.is_empty() {
            return INDEX_HTML;
        }
        self.inner.assets.get(name).unwrap_or(INDEX_HTML)
    }

    /// Produce the response for `request_path`.
    pub async fn respond(&self, request_path: &str) -> Result<UiResponse, UiError> {
        let name = self.resolve(request_path);

        let body = match name {
            INDEX_HTML => {
                let spec = self.current_spec(true).await?;
                self.render(&self.inner.index, spec.as_deref())?
            }
            INITIALIZER_JS => {
                let spec = self.current_spec(false).await?;
                self.render(&self.inner.initializer, spec.as_deref())?
            }
            _ => assets::read(name)
                .ok_or_else(|| UiError::NotFound(format!("'{name}' is indexed but not embedded")))?
                .into_owned(),
        };

        Ok(UiResponse {
            content_type: content_type::detect(name, &body),
            body,
        })
    }

    fn render(&self, template: &Template, spec: Option<&str>) -> Result<Vec<u8>, UiError> {
        let ctx = RenderContext::new(&self.inner.config).with_reloaded_spec(spec);
        let text = template.render(&ctx)?;
        debug!(template = template.name(), bytes = text.len(), "template rendered");
        Ok(text.into_bytes())
    }

    /// Spec text read from the configured spec file, if there is one.
    ///
    /// `reload` forces a fresh read. Otherwise the last successful read is
    /// reused, and the file is read only when nothing has been cached yet.
    /// A failed read leaves the cache as it was.
    async fn current_spec(&self, reload: bool) -> Result<Option<Arc<str>>, UiError> {
        let Some(path) = &self.inner.config.spec_file_path else {
            return Ok(None);
        };

        if !reload {
            if let Some(cached) = self.inner.reloaded_spec.read().await.clone() {
                return Ok(Some(cached));
            }
        }

        let fresh: Arc<str> = spec::load_file(path).await?.into();
        *self.inner.reloaded_spec.write().await = Some(Arc::clone(&fresh));
        Ok(Some(fresh))
    }
}

async fn serve(State(ui): State<SwaggerUi>, uri: Uri) -> Response {
    match ui.respond(uri.path()).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            match &err {
                UiError::NotFound(_) => {
                    warn!(path = %uri.path(), error = %err, "Swagger UI resource not found");
                }
                UiError::Internal(_) => {
                    error!(path = %uri.path(), error = %err, "Swagger UI request failed");
                }
            }
            err.into_response()
        }
    }
}
