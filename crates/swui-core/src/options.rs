//! Option builders for [`UiConfig`].
//!
//! Each [`UiOption`] is one mutation of the configuration aggregate. Options
//! are applied in order, so when two options touch the same field the later
//! one wins. Options touching different fields commute.

use std::path::PathBuf;

use crate::config::{
    ConfigValue, DocExpansion, Layout, ModelRendering, Preset, SpecUrl, UiConfig,
};

/// A single configuration option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiOption {
    /// Inline spec document as JSON text. Takes precedence over the spec URL
    /// in the UI. YAML documents go through [`crate::spec::normalize`] first.
    Spec(Vec<u8>),
    /// URL of the spec document (normally `swagger.json` or `swagger.yaml`).
    SpecUrl(String),
    /// Multiple spec URLs for the top-bar selector. A non-empty `primary`
    /// selects the entry shown first; an empty one leaves the selection unset.
    SpecUrls { primary: String, urls: Vec<SpecUrl> },
    /// Spec file re-read from disk on every index request. Meant for local
    /// tooling; it supersedes `Spec` and `SpecUrl` for each render.
    SpecFilePath(PathBuf),
    DocExpansion(DocExpansion),
    DefaultModelExpandDepth(i64),
    /// `-1` hides the models section entirely.
    DefaultModelsExpandDepth(i64),
    DefaultModelRendering(ModelRendering),
    QueryConfigEnabled(bool),
    /// HTTP methods with "Try it out" enabled. Appends to earlier calls.
    SupportedSubmitMethods(Vec<String>),
    DeepLinking(bool),
    ShowExtensions(bool),
    ShowCommonExtensions(bool),
    /// Enables the filter bar; a non-empty expression also pre-fills it.
    Filter { enabled: bool, expression: String },
    DisplayOperationId(bool),
    TryItOutEnabled(bool),
    DisplayRequestDuration(bool),
    PersistAuthorization(bool),
    WithCredentials(bool),
    Oauth2RedirectUrl(String),
    HtmlTitle(String),
    Layout(Layout),
    Presets(Vec<Preset>),
    MaxDisplayedTags(i64),
    /// Validator endpoint. When disabled the URL is dropped regardless of
    /// the argument.
    ValidatorUrl { enabled: bool, url: String },
    ShowMutatedRequest(bool),
    /// URL of an external configuration document.
    ConfigUrl(String),
    /// Path the handler is mounted under, used for asset links.
    BasePath(String),
}

impl UiConfig {
    /// Build a configuration by applying `options` in order to the defaults.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = UiOption>,
    {
        let mut cfg = Self::default();
        for option in options {
            cfg.apply(option);
        }
        cfg
    }

    /// Apply a single option.
    pub fn apply(&mut self, option: UiOption) {
        match option {
            UiOption::Spec(bytes) => self.spec = bytes,
            UiOption::SpecUrl(url) => self.url = ConfigValue::set(url),
            UiOption::SpecUrls { primary, urls } => {
                self.urls = urls;
                if !primary.is_empty() {
                    self.urls_primary_name = ConfigValue::set(primary);
                }
            }
            UiOption::SpecFilePath(path) => self.spec_file_path = Some(path),
            UiOption::DocExpansion(v) => self.doc_expansion = ConfigValue::set(v),
            UiOption::DefaultModelExpandDepth(v) => {
                self.default_model_expand_depth = ConfigValue::set(v);
            }
            UiOption::DefaultModelsExpandDepth(v) => {
                self.default_models_expand_depth = ConfigValue::set(v);
            }
            UiOption::DefaultModelRendering(v) => {
                self.default_model_rendering = ConfigValue::set(v);
            }
            UiOption::QueryConfigEnabled(v) => self.query_config_enabled = ConfigValue::set(v),
            UiOption::SupportedSubmitMethods(methods) => {
                self.supported_submit_methods.extend(methods);
            }
            UiOption::DeepLinking(v) => self.deep_linking = ConfigValue::set(v),
            UiOption::ShowExtensions(v) => self.show_extensions = ConfigValue::set(v),
            UiOption::ShowCommonExtensions(v) => self.show_common_extensions = ConfigValue::set(v),
            UiOption::Filter {
                enabled,
                expression,
            } => {
                self.filter = ConfigValue::set(enabled);
                if enabled && !expression.is_empty() {
                    self.filter_string = ConfigValue::set(expression);
                }
            }
            UiOption::DisplayOperationId(v) => self.display_operation_id = ConfigValue::set(v),
            UiOption::TryItOutEnabled(v) => self.try_it_out_enabled = ConfigValue::set(v),
            UiOption::DisplayRequestDuration(v) => {
                self.display_request_duration = ConfigValue::set(v);
            }
            UiOption::PersistAuthorization(v) => self.persist_authorization = ConfigValue::set(v),
            UiOption::WithCredentials(v) => self.with_credentials = ConfigValue::set(v),
            UiOption::Oauth2RedirectUrl(v) => self.oauth2_redirect_url = ConfigValue::set(v),
            UiOption::HtmlTitle(title) => self.html_title = title,
            UiOption::Layout(v) => self.layout = ConfigValue::set(v),
            UiOption::Presets(presets) => self.presets = presets,
            UiOption::MaxDisplayedTags(v) => self.max_displayed_tags = ConfigValue::set(v),
            UiOption::ValidatorUrl { enabled, url } => {
                self.validator_url = if enabled {
                    ConfigValue::set(url)
                } else {
                    ConfigValue::unset()
                };
            }
            UiOption::ShowMutatedRequest(v) => self.show_mutated_request = ConfigValue::set(v),
            UiOption::ConfigUrl(v) => self.config_url = ConfigValue::set(v),
            UiOption::BasePath(v) => self.base_path = v,
        }
    }
}
