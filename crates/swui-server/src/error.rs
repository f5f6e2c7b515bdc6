//! HTTP error types for the `swui` handler.
//!
//! Per-request failures collapse into two statuses: 404 when something does
//! not exist, 500 for everything else. Error bodies are short fixed
//! plain-text messages; the cause is logged by the handler, never sent.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use swui_core::error::{RenderError, SpecError, TemplateError};

/// Failures that prevent a handler from being built at all.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// An embedded template could not be parsed.
    #[error("invalid embedded template: {0}")]
    Template(#[from] TemplateError),

    /// The embedded asset bundle has no files.
    #[error("embedded Swagger UI bundle is empty")]
    EmptyBundle,
}

/// Error returned from request handling.
#[derive(Debug)]
pub enum UiError {
    /// Requested asset or spec file does not exist.
    NotFound(String),
    /// Rendering, parsing, or I/O failed.
    Internal(String),
}

impl UiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Detailed cause, for logs only.
    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.detail())
    }
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound(_) => "404 not found\n",
            Self::Internal(_) => "500 internal server error\n",
        };

        (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            body,
        )
            .into_response()
    }
}

impl From<SpecError> for UiError {
    fn from(err: SpecError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<RenderError> for UiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Marshal { .. } => Self::Internal(err.to_string()),
        }
    }
}
