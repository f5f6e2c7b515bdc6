//! Swagger UI configuration model.
//!
//! Every display option is wrapped in a [`ConfigValue`] so that "never
//! configured" stays distinguishable from "explicitly set to `false`, `0` or
//! an empty string". Unset values render as empty slots and the bootstrap
//! script leaves the corresponding Swagger UI setting at its own default.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Title used for the index page when none is configured.
pub const DEFAULT_HTML_TITLE: &str = "Swagger UI";

/// An optionally-set configuration value.
///
/// No validation happens here: whatever the caller sets is carried through
/// to rendering verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue<T>(Option<T>);

impl<T> ConfigValue<T> {
    /// A value that was never configured.
    pub const fn unset() -> Self {
        Self(None)
    }

    /// A value that was explicitly configured.
    pub const fn set(value: T) -> Self {
        Self(Some(value))
    }

    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T> Default for ConfigValue<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T: SlotText> ConfigValue<T> {
    /// Canonical textual form, or an empty string when unset.
    pub fn slot_text(&self) -> String {
        self.0.as_ref().map(SlotText::slot_text).unwrap_or_default()
    }
}

/// Canonical textual form of a value substituted into a template slot.
pub trait SlotText {
    fn slot_text(&self) -> String;
}

impl SlotText for String {
    fn slot_text(&self) -> String {
        self.clone()
    }
}

impl SlotText for bool {
    fn slot_text(&self) -> String {
        if *self { "true" } else { "false" }.to_owned()
    }
}

impl SlotText for i64 {
    fn slot_text(&self) -> String {
        self.to_string()
    }
}

/// Default expansion of operations and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocExpansion {
    /// Expand only the tags.
    List,
    /// Expand tags and operations.
    Full,
    /// Expand nothing.
    None,
}

impl DocExpansion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Full => "full",
            Self::None => "none",
        }
    }
}

/// How a model is first shown in the model-example section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRendering {
    Example,
    Model,
}

impl ModelRendering {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Example => "example",
            Self::Model => "model",
        }
    }
}

/// Top-level layout component, looked up through the Swagger UI plugin system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    BaseLayout,
    StandaloneLayout,
    /// Any other layout component registered by a plugin.
    Custom(String),
}

impl Layout {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BaseLayout => "BaseLayout",
            Self::StandaloneLayout => "StandaloneLayout",
            Self::Custom(name) => name,
        }
    }
}

/// A named Swagger UI preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `SwaggerUIBundle.presets.apis`
    ApiPreset,
    /// `SwaggerUIStandalonePreset`
    StandalonePreset,
}

impl Preset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiPreset => "ApiPreset",
            Self::StandalonePreset => "StandalonePreset",
        }
    }
}

macro_rules! slot_text_via_as_str {
    ($($ty:ty),*) => {
        $(
            impl SlotText for $ty {
                fn slot_text(&self) -> String {
                    self.as_str().to_owned()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

slot_text_via_as_str!(DocExpansion, ModelRendering, Layout, Preset);

/// One entry of the spec selector shown in the top bar.
///
/// Names must be unique across the list; that is the caller's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecUrl {
    pub name: String,
    pub url: String,
}

impl SpecUrl {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The configuration aggregate for one UI handler.
///
/// Built once from a list of [`crate::options::UiOption`]s and never mutated
/// afterwards. Spec sources are not mutually exclusive here; which one wins
/// is decided per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Title of the index page.
    pub html_title: String,
    /// Inline specification document.
    pub spec: Vec<u8>,
    /// Spec file re-read on every index request (local tooling only).
    pub spec_file_path: Option<PathBuf>,
    /// Mount prefix for the index page's asset links, as given by the caller.
    pub base_path: String,
    pub config_url: ConfigValue<String>,
    pub url: ConfigValue<String>,
    pub urls: Vec<SpecUrl>,
    pub urls_primary_name: ConfigValue<String>,
    pub layout: ConfigValue<Layout>,
    pub presets: Vec<Preset>,
    pub doc_expansion: ConfigValue<DocExpansion>,
    pub default_model_expand_depth: ConfigValue<i64>,
    pub default_models_expand_depth: ConfigValue<i64>,
    pub default_model_rendering: ConfigValue<ModelRendering>,
    pub query_config_enabled: ConfigValue<bool>,
    pub supported_submit_methods: Vec<String>,
    pub show_mutated_request: ConfigValue<bool>,
    pub deep_linking: ConfigValue<bool>,
    pub show_extensions: ConfigValue<bool>,
    pub show_common_extensions: ConfigValue<bool>,
    pub filter: ConfigValue<bool>,
    pub filter_string: ConfigValue<String>,
    pub display_operation_id: ConfigValue<bool>,
    pub try_it_out_enabled: ConfigValue<bool>,
    pub display_request_duration: ConfigValue<bool>,
    pub persist_authorization: ConfigValue<bool>,
    pub with_credentials: ConfigValue<bool>,
    pub oauth2_redirect_url: ConfigValue<String>,
    pub max_displayed_tags: ConfigValue<i64>,
    pub validator_url: ConfigValue<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            html_title: DEFAULT_HTML_TITLE.to_owned(),
            spec: Vec::new(),
            spec_file_path: None,
            base_path: String::new(),
            config_url: ConfigValue::unset(),
            url: ConfigValue::unset(),
            urls: Vec::new(),
            urls_primary_name: ConfigValue::unset(),
            layout: ConfigValue::unset(),
            presets: Vec::new(),
            doc_expansion: ConfigValue::unset(),
            default_model_expand_depth: ConfigValue::unset(),
            default_models_expand_depth: ConfigValue::unset(),
            default_model_rendering: ConfigValue::unset(),
            query_config_enabled: ConfigValue::unset(),
            supported_submit_methods: Vec::new(),
            show_mutated_request: ConfigValue::unset(),
            deep_linking: ConfigValue::unset(),
            show_extensions: ConfigValue::unset(),
            show_common_extensions: ConfigValue::unset(),
            filter: ConfigValue::unset(),
            filter_string: ConfigValue::unset(),
            display_operation_id: ConfigValue::unset(),
            try_it_out_enabled: ConfigValue::unset(),
            display_request_duration: ConfigValue::unset(),
            persist_authorization: ConfigValue::unset(),
            with_credentials: ConfigValue::unset(),
            oauth2_redirect_url: ConfigValue::unset(),
            max_displayed_tags: ConfigValue::unset(),
            validator_url: ConfigValue::unset(),
        }
    }
}

impl UiConfig {
    /// Asset mount prefix derived from the base path.
    ///
    /// Empty when no base path is set, so the index page links its assets
    /// relatively. Otherwise exactly one leading and one trailing slash.
    pub fn asset_prefix(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            if self.base_path.trim().starts_with('/') {
                return "/".to_owned();
            }
            return String::new();
        }
        format!("/{trimmed}/")
    }
}
