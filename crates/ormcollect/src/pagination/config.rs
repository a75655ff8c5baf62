//! Pagination rendering configuration.
//!
//! Settings can be built in code, read from `ORMCOLLECT_PAGINATION_*`
//! environment variables, and overridden per render call with
//! [`RenderOptions`].

use std::fmt;
use std::str::FromStr;

use ormcollect_core::{Error, Result};

/// Environment variable prefix read by [`PaginationConfig::from_env`].
pub const ENV_PREFIX: &str = "ORMCOLLECT_PAGINATION_";

/// Markup style for navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// First/prev, numbered pages, next/last
    #[default]
    Bootstrap,
    /// Prev/next only
    Simple,
}

impl View {
    pub const fn as_str(self) -> &'static str {
        match self {
            View::Bootstrap => "bootstrap",
            View::Simple => "simple",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bootstrap" | "default" => Ok(View::Bootstrap),
            "simple" => Ok(View::Simple),
            other => Err(Error::config(
                format!("{ENV_PREFIX}VIEW"),
                format!("unknown view '{}'", other),
            )),
        }
    }
}

/// Pagination rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Whether this configuration applies everywhere, overriding local ones
    pub allow: bool,
    /// Markup style
    pub view: View,
    /// CSS class of the link list
    pub class: String,
    /// Page numbers shown on each side of the current page
    pub span: usize,
    pub first: String,
    pub last: String,
    pub next: String,
    pub prev: String,
    /// Words of the "Showing 1-10 of 57 results" summary
    pub showing: String,
    pub of: String,
    pub results: String,
    /// Query parameter carrying the page number
    pub page_param: String,
    /// URL page links are built on (empty: relative `?page=N`)
    pub base_url: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            allow: false,
            view: View::default(),
            class: "pagination".to_string(),
            span: 2,
            first: "First".to_string(),
            last: "Last".to_string(),
            next: "Next".to_string(),
            prev: "Prev".to_string(),
            showing: "Showing".to_string(),
            of: "of".to_string(),
            results: "results".to_string(),
            page_param: "page".to_string(),
            base_url: String::new(),
        }
    }
}

impl PaginationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `ORMCOLLECT_PAGINATION_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which is handed full variable
    /// names such as `ORMCOLLECT_PAGINATION_SPAN`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Self::default();

        if let Some(raw) = get("ALLOW") {
            config.allow = parse_bool(&format!("{ENV_PREFIX}ALLOW"), &raw)?;
        }
        if let Some(raw) = get("VIEW") {
            config.view = raw.parse()?;
        }
        if let Some(raw) = get("SPAN") {
            config.span = raw.trim().parse().map_err(|e| {
                Error::config(
                    format!("{ENV_PREFIX}SPAN"),
                    format!("not a page count: '{}' ({})", raw, e),
                )
            })?;
        }

        let text_fields: [(&str, &mut String); 10] = [
            ("CLASS", &mut config.class),
            ("FIRST", &mut config.first),
            ("LAST", &mut config.last),
            ("NEXT", &mut config.next),
            ("PREV", &mut config.prev),
            ("SHOWING", &mut config.showing),
            ("OF", &mut config.of),
            ("RESULTS", &mut config.results),
            ("PARAM", &mut config.page_param),
            ("URL", &mut config.base_url),
        ];
        for (name, field) in text_fields {
            if let Some(raw) = get(name) {
                *field = raw;
            }
        }

        if config.page_param.is_empty() {
            return Err(Error::config(
                format!("{ENV_PREFIX}PARAM"),
                "page parameter must not be empty",
            ));
        }

        tracing::debug!(view = %config.view, span = config.span, allow = config.allow, "Loaded pagination config");
        Ok(config)
    }

    /// Pick the configuration in effect: `global` when it allows global use,
    /// `local` otherwise.
    pub fn resolve(global: Option<&PaginationConfig>, local: PaginationConfig) -> PaginationConfig {
        match global {
            Some(global) if global.allow => global.clone(),
            _ => local,
        }
    }

    pub fn allow(mut self, allow: bool) -> Self {
        self.allow = allow;
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Set the first/last/prev/next labels.
    pub fn labels(
        mut self,
        first: impl Into<String>,
        prev: impl Into<String>,
        next: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        self.first = first.into();
        self.prev = prev.into();
        self.next = next.into();
        self.last = last.into();
        self
    }

    /// Set the words of the summary line.
    pub fn words(
        mut self,
        showing: impl Into<String>,
        of: impl Into<String>,
        results: impl Into<String>,
    ) -> Self {
        self.showing = showing.into();
        self.of = of.into();
        self.results = results.into();
        self
    }

    pub fn page_param(mut self, param: impl Into<String>) -> Self {
        self.page_param = param.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Apply per-call overrides.
    pub fn merged(&self, options: &RenderOptions) -> PaginationConfig {
        let mut merged = self.clone();
        if let Some(view) = options.view {
            merged.view = view;
        }
        if let Some(span) = options.span {
            merged.span = span;
        }
        let overrides = [
            (&options.class, &mut merged.class),
            (&options.first, &mut merged.first),
            (&options.last, &mut merged.last),
            (&options.next, &mut merged.next),
            (&options.prev, &mut merged.prev),
            (&options.showing, &mut merged.showing),
            (&options.of, &mut merged.of),
            (&options.results, &mut merged.results),
            (&options.base_url, &mut merged.base_url),
        ];
        for (option, field) in overrides {
            if let Some(value) = option {
                field.clone_from(value);
            }
        }
        merged
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::config(key, format!("not a boolean: '{}'", raw))),
    }
}

/// Per-call overrides for `links` and `showing`. Unset fields fall back to
/// the envelope's [`PaginationConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub view: Option<View>,
    pub span: Option<usize>,
    pub class: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
    pub next: Option<String>,
    pub prev: Option<String>,
    pub showing: Option<String>,
    pub of: Option<String>,
    pub results: Option<String>,
    pub base_url: Option<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }

    pub fn span(mut self, span: usize) -> Self {
        self.span = Some(span);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn first(mut self, label: impl Into<String>) -> Self {
        self.first = Some(label.into());
        self
    }

    pub fn last(mut self, label: impl Into<String>) -> Self {
        self.last = Some(label.into());
        self
    }

    pub fn next(mut self, label: impl Into<String>) -> Self {
        self.next = Some(label.into());
        self
    }

    pub fn prev(mut self, label: impl Into<String>) -> Self {
        self.prev = Some(label.into());
        self
    }

    pub fn showing(mut self, word: impl Into<String>) -> Self {
        self.showing = Some(word.into());
        self
    }

    pub fn of(mut self, word: impl Into<String>) -> Self {
        self.of = Some(word.into());
        self
    }

    pub fn results(mut self, word: impl Into<String>) -> Self {
        self.results = Some(word.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = PaginationConfig::new();
        assert!(!config.allow);
        assert_eq!(config.view, View::Bootstrap);
        assert_eq!(config.span, 2);
        assert_eq!(config.page_param, "page");
        assert!(config.base_url.is_empty());
    }

    #[test]
    fn from_lookup_reads_every_setting() {
        let config = PaginationConfig::from_lookup(lookup(&[
            ("ALLOW", "true"),
            ("VIEW", "Simple"),
            ("SPAN", " 4 "),
            ("CLASS", "pager"),
            ("NEXT", "Older"),
            ("PARAM", "p"),
            ("URL", "/posts"),
        ]))
        .unwrap();

        assert!(config.allow);
        assert_eq!(config.view, View::Simple);
        assert_eq!(config.span, 4);
        assert_eq!(config.class, "pager");
        assert_eq!(config.next, "Older");
        assert_eq!(config.prev, "Prev");
        assert_eq!(config.page_param, "p");
        assert_eq!(config.base_url, "/posts");
    }

    #[test]
    fn from_lookup_rejects_bad_values() {
        let err = PaginationConfig::from_lookup(lookup(&[("SPAN", "wide")])).unwrap_err();
        assert!(err.to_string().contains("ORMCOLLECT_PAGINATION_SPAN"));

        assert!(PaginationConfig::from_lookup(lookup(&[("ALLOW", "maybe")])).is_err());
        assert!(PaginationConfig::from_lookup(lookup(&[("VIEW", "cursor")])).is_err());
        assert!(PaginationConfig::from_lookup(lookup(&[("PARAM", "")])).is_err());
    }

    #[test]
    fn resolve_prefers_allowed_global() {
        let global = PaginationConfig::new().allow(true).span(5);
        let local = PaginationConfig::new().span(1);
        assert_eq!(PaginationConfig::resolve(Some(&global), local.clone()).span, 5);

        let disallowed = PaginationConfig::new().span(5);
        assert_eq!(PaginationConfig::resolve(Some(&disallowed), local.clone()).span, 1);
        assert_eq!(PaginationConfig::resolve(None, local).span, 1);
    }

    #[test]
    fn merged_applies_only_set_overrides() {
        let base = PaginationConfig::new().labels("<<", "<", ">", ">>");
        let merged = base.merged(&RenderOptions::new().span(1).next("Forward").view(View::Simple));
        assert_eq!(merged.span, 1);
        assert_eq!(merged.view, View::Simple);
        assert_eq!(merged.next, "Forward");
        assert_eq!(merged.prev, "<");
        assert_eq!(merged.first, "<<");
    }
}
