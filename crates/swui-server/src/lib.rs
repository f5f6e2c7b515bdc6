//! `swui` HTTP server layer.
//!
//! Serves the embedded Swagger UI bundle through an Axum router. Two files
//! of the bundle, the index page and the bootstrap script, are rendered from
//! the handler's configuration; everything else is served as-is.

pub mod assets;
pub mod content_type;
pub mod error;
pub mod handler;

pub use handler::{SwaggerUi, UiResponse};
