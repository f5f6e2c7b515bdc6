//! Fixed-slot template rendering.
//!
//! The UI bundle has exactly two dynamic files: the index page and the
//! bootstrap script. Both are parsed once at startup into literal text and
//! named slots (`{{ SlotName }}`), and every slot is filled from the
//! configuration through a single escaper chosen by the template kind.
//! Slot names outside [`Slot`] are rejected at parse time.

use crate::config::UiConfig;
use crate::error::{RenderError, TemplateError};

/// Where the rendered text ends up, which decides how slots are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// HTML text and attribute values.
    Html,
    /// The inside of a quoted JavaScript string literal.
    Script,
}

/// The fixed set of template slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    HtmlTitle,
    BasePath,
    ConfigUrl,
    Spec,
    Url,
    Urls,
    PrimaryUrl,
    DocExpansion,
    DefaultModelExpandDepth,
    DefaultModelsExpandDepth,
    DefaultModelRendering,
    QueryConfigEnabled,
    SupportedSubmitMethods,
    DeepLinking,
    ShowMutatedRequest,
    ShowExtensions,
    ShowCommonExtensions,
    Filter,
    FilterString,
    DisplayOperationId,
    TryItOutEnabled,
    DisplayRequestDuration,
    PersistAuthorization,
    WithCredentials,
    OAuth2RedirectUrl,
    Layout,
    Presets,
    ValidatorUrl,
    MaxDisplayedTags,
}

impl Slot {
    pub const ALL: [Self; 29] = [
        Self::HtmlTitle,
        Self::BasePath,
        Self::ConfigUrl,
        Self::Spec,
        Self::Url,
        Self::Urls,
        Self::PrimaryUrl,
        Self::DocExpansion,
        Self::DefaultModelExpandDepth,
        Self::DefaultModelsExpandDepth,
        Self::DefaultModelRendering,
        Self::QueryConfigEnabled,
        Self::SupportedSubmitMethods,
        Self::DeepLinking,
        Self::ShowMutatedRequest,
        Self::ShowExtensions,
        Self::ShowCommonExtensions,
        Self::Filter,
        Self::FilterString,
        Self::DisplayOperationId,
        Self::TryItOutEnabled,
        Self::DisplayRequestDuration,
        Self::PersistAuthorization,
        Self::WithCredentials,
        Self::OAuth2RedirectUrl,
        Self::Layout,
        Self::Presets,
        Self::ValidatorUrl,
        Self::MaxDisplayedTags,
    ];

    /// Name used inside `{{ }}`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HtmlTitle => "HtmlTitle",
            Self::BasePath => "BasePath",
            Self::ConfigUrl => "ConfigUrl",
            Self::Spec => "Spec",
            Self::Url => "Url",
            Self::Urls => "Urls",
            Self::PrimaryUrl => "PrimaryUrl",
            Self::DocExpansion => "DocExpansion",
            Self::DefaultModelExpandDepth => "DefaultModelExpandDepth",
            Self::DefaultModelsExpandDepth => "DefaultModelsExpandDepth",
            Self::DefaultModelRendering => "DefaultModelRendering",
            Self::QueryConfigEnabled => "QueryConfigEnabled",
            Self::SupportedSubmitMethods => "SupportedSubmitMethods",
            Self::DeepLinking => "DeepLinking",
            Self::ShowMutatedRequest => "ShowMutatedRequest",
            Self::ShowExtensions => "ShowExtensions",
            Self::ShowCommonExtensions => "ShowCommonExtensions",
            Self::Filter => "Filter",
            Self::FilterString => "FilterString",
            Self::DisplayOperationId => "DisplayOperationId",
            Self::TryItOutEnabled => "TryItOutEnabled",
            Self::DisplayRequestDuration => "DisplayRequestDuration",
            Self::PersistAuthorization => "PersistAuthorization",
            Self::WithCredentials => "WithCredentials",
            Self::OAuth2RedirectUrl => "OAuth2RedirectUrl",
            Self::Layout => "Layout",
            Self::Presets => "Presets",
            Self::ValidatorUrl => "ValidatorUrl",
            Self::MaxDisplayedTags => "MaxDisplayedTags",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// Values a single render draws from.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a UiConfig,
    /// Spec freshly read from the configured spec file, if any. When present
    /// it replaces both the inline spec and the spec URL for this render.
    pub reloaded_spec: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub const fn new(config: &'a UiConfig) -> Self {
        Self {
            config,
            reloaded_spec: None,
        }
    }

    #[must_use]
    pub const fn with_reloaded_spec(mut self, spec: Option<&'a str>) -> Self {
        self.reloaded_spec = spec;
        self
    }

    /// Unescaped text for `slot`.
    fn raw_value(&self, slot: Slot) -> Result<String, RenderError> {
        let cfg = self.config;
        let value = match slot {
            Slot::HtmlTitle => cfg.html_title.clone(),
            Slot::BasePath => cfg.asset_prefix(),
            Slot::ConfigUrl => cfg.config_url.slot_text(),
            Slot::Spec => match self.reloaded_spec {
                Some(spec) => spec.trim().to_owned(),
                None => String::from_utf8_lossy(&cfg.spec).trim().to_owned(),
            },
            Slot::Url => {
                if self.reloaded_spec.is_some() {
                    String::new()
                } else {
                    cfg.url.slot_text()
                }
            }
            Slot::Urls => {
                if cfg.urls.is_empty() {
                    String::new()
                } else {
                    serde_json::to_string(&cfg.urls).map_err(|source| RenderError::Marshal {
                        slot: slot.name(),
                        source,
                    })?
                }
            }
            Slot::PrimaryUrl => cfg.urls_primary_name.slot_text(),
            Slot::DocExpansion => cfg.doc_expansion.slot_text(),
            Slot::DefaultModelExpandDepth => cfg.default_model_expand_depth.slot_text(),
            Slot::DefaultModelsExpandDepth => cfg.default_models_expand_depth.slot_text(),
            Slot::DefaultModelRendering => cfg.default_model_rendering.slot_text(),
            Slot::QueryConfigEnabled => cfg.query_config_enabled.slot_text(),
            Slot::SupportedSubmitMethods => {
                cfg.supported_submit_methods.join(",").trim().to_owned()
            }
            Slot::DeepLinking => cfg.deep_linking.slot_text(),
            Slot::ShowMutatedRequest => cfg.show_mutated_request.slot_text(),
            Slot::ShowExtensions => cfg.show_extensions.slot_text(),
            Slot::ShowCommonExtensions => cfg.show_common_extensions.slot_text(),
            Slot::Filter => cfg.filter.slot_text(),
            Slot::FilterString => cfg.filter_string.slot_text(),
            Slot::DisplayOperationId => cfg.display_operation_id.slot_text(),
            Slot::TryItOutEnabled => cfg.try_it_out_enabled.slot_text(),
            Slot::DisplayRequestDuration => cfg.display_request_duration.slot_text(),
            Slot::PersistAuthorization => cfg.persist_authorization.slot_text(),
            Slot::WithCredentials => cfg.with_credentials.slot_text(),
            Slot::OAuth2RedirectUrl => cfg.oauth2_redirect_url.slot_text(),
            Slot::Layout => cfg.layout.slot_text(),
            Slot::Presets => cfg
                .presets
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(","),
            Slot::ValidatorUrl => cfg.validator_url.slot_text(),
            Slot::MaxDisplayedTags => cfg.max_displayed_tags.slot_text(),
        };
        Ok(value)
    }
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    kind: TemplateKind,
    segments: Vec<Segment>,
}

impl Template {
    /// Split `source` into literals and slots.
    pub fn parse(name: &str, kind: TemplateKind, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(TemplateError::Unterminated {
                    template: name.to_owned(),
                    offset: offset + open,
                });
            };

            let slot_name = after_open[..close].trim();
            let slot = Slot::from_name(slot_name).ok_or_else(|| TemplateError::UnknownSlot {
                template: name.to_owned(),
                name: slot_name.to_owned(),
            })?;
            segments.push(Segment::Slot(slot));

            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self {
            name: name.to_owned(),
            kind,
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Slots referenced by this template, in order of appearance.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    /// Fill every slot and return the finished text.
    ///
    /// Either the whole template renders or an error is returned; there is
    /// no partial output.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.literal_len() + ctx.config.spec.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let raw = ctx.raw_value(*slot)?;
                    match self.kind {
                        TemplateKind::Html => escape_html_into(&mut out, &raw),
                        TemplateKind::Script => escape_script_into(&mut out, &raw),
                    }
                }
            }
        }
        Ok(out)
    }

    fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Slot(_) => 0,
            })
            .sum()
    }
}

/// Escape `raw` for the inside of a quoted JavaScript string literal.
///
/// Works for single- and double-quoted literals alike. Newlines become the
/// two characters `\n` and quotes are backslash-escaped; `<` is written as
/// `\x3C` so the text can never close a surrounding `<script>` element.
pub fn escape_script(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    escape_script_into(&mut out, raw);
    out
}

fn escape_script_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
}

/// Escape `raw` for HTML text or a quoted attribute value.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    escape_html_into(&mut out, raw);
    out
}

fn escape_html_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
