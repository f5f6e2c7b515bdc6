//! Embedded Swagger UI bundle.
//!
//! The `swagger-ui/dist` directory is compiled into the binary. At startup
//! its file list is collected into an [`AssetIndex`], which request routing
//! uses to decide whether a requested name is a real asset.

use std::borrow::Cow;
use std::collections::HashSet;

use rust_embed::Embed;

use crate::error::StartupError;

/// Name of the index document.
pub const INDEX_HTML: &str = "index.html";

/// Name of the bootstrap script that configures the UI.
pub const INITIALIZER_JS: &str = "swagger-initializer.js";

/// Bundle entries that are never served.
const EXCLUDED: &[&str] = &[".swagger-ui-version"];

#[derive(Embed)]
#[folder = "swagger-ui/dist/"]
struct Dist;

/// Set of servable file names.
#[derive(Debug, Clone)]
pub struct AssetIndex {
    files: HashSet<String>,
}

impl AssetIndex {
    /// Index the embedded bundle.
    pub fn build() -> Result<Self, StartupError> {
        Self::from_paths(Dist::iter())
    }

    /// Index an arbitrary list of bundle-relative paths.
    ///
    /// The two template names are always members, whether or not the bundle
    /// ships a static copy of them.
    pub fn from_paths<I, S>(paths: I) -> Result<Self, StartupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut files: HashSet<String> = paths
            .into_iter()
            .map(|p| p.as_ref().trim_start_matches('/').to_owned())
            .filter(|p| !p.is_empty() && !EXCLUDED.contains(&p.as_str()))
            .collect();

        if files.is_empty() {
            return Err(StartupError::EmptyBundle);
        }

        files.insert(INDEX_HTML.to_owned());
        files.insert(INITIALIZER_JS.to_owned());

        tracing::debug!(files = files.len(), "asset index built");
        Ok(Self { files })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// The indexed name equal to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Raw bytes of an embedded bundle file.
pub fn read(name: &str) -> Option<Cow<'static, [u8]>> {
    Dist::get(name).map(|file| file.data)
}
