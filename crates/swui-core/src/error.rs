//! Error types for `swui-core`.
//!
//! Startup errors (template parsing) are programming errors in the embedded
//! templates and abort handler construction. Render and spec errors happen
//! per request and are mapped to HTTP statuses by `swui-server`.

use std::path::PathBuf;

/// Errors from parsing an embedded template at startup.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A `{{` was opened but never closed.
    #[error("template '{template}': unterminated slot starting at byte {offset}")]
    Unterminated { template: String, offset: usize },

    /// A slot names something outside the fixed slot set.
    #[error("template '{template}': unknown slot '{name}'")]
    UnknownSlot { template: String, name: String },
}

/// Errors from rendering a template against a configuration.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A structured value could not be serialized for embedding.
    #[error("cannot marshal {slot}: {source}")]
    Marshal {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from reading or normalising a specification document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The spec file could not be opened or read.
    #[error("cannot read spec file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload parsed as neither YAML nor JSON.
    #[error("cannot parse spec as YAML or JSON: {reason}")]
    Parse { reason: String },

    /// The parsed document could not be written back out as JSON.
    #[error("cannot convert spec to JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SpecError {
    /// Whether the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
