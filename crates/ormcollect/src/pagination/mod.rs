//! Pagination metadata and rendering for paged result sets.

mod config;
mod render;

pub use config::{ENV_PREFIX, PaginationConfig, RenderOptions, View};

use ormcollect_core::{Error, PayloadErrorKind, Result};
use serde::{Deserialize, Serialize};

/// Raw pagination metadata as delivered alongside a page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Zero-based position of the first row of this page
    #[serde(default)]
    pub offset: u64,
    /// Total number of matching rows
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "per_page", alias = "limit")]
    pub per_page: u64,
    /// Explicit 1-based page number, when the producer tracked one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// URL page links are built on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PaginationMeta {
    pub fn new(offset: u64, total: u64, per_page: u64) -> Self {
        Self {
            offset,
            total,
            per_page,
            page: None,
            url: None,
        }
    }

    /// Metadata for 1-based `page` of `per_page` rows.
    pub fn for_page(page: u64, per_page: u64, total: u64) -> Self {
        let page = page.max(1);
        Self {
            offset: (page - 1).saturating_mul(per_page),
            total,
            per_page,
            page: Some(page),
            url: None,
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        serde_json::from_value(json).map_err(|e| {
            Error::payload(
                PayloadErrorKind::InvalidPagination,
                format!("could not decode pagination metadata: {}", e),
            )
        })
    }
}

/// Pagination state owned by a paginated collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationEnvelope {
    meta: PaginationMeta,
    config: PaginationConfig,
}

impl PaginationEnvelope {
    pub fn new(meta: PaginationMeta, config: PaginationConfig) -> Self {
        Self { meta, config }
    }

    pub fn meta(&self) -> &PaginationMeta {
        &self.meta
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn offset(&self) -> u64 {
        self.meta.offset
    }

    pub fn total(&self) -> u64 {
        self.meta.total
    }

    pub fn per_page(&self) -> u64 {
        self.meta.per_page
    }

    /// Number of pages; at least 1. A zero page size puts everything on
    /// one page.
    pub fn last_page(&self) -> u64 {
        if self.meta.per_page == 0 || self.meta.total == 0 {
            1
        } else {
            self.meta.total.div_ceil(self.meta.per_page)
        }
    }

    /// 1-based current page, clamped to `1..=last_page()`.
    pub fn current_page(&self) -> u64 {
        let derived = match self.meta.page {
            Some(page) if page > 0 => page,
            _ if self.meta.per_page == 0 => 1,
            _ => (self.meta.offset / self.meta.per_page).saturating_add(1),
        };
        derived.clamp(1, self.last_page())
    }

    pub fn has_pages(&self) -> bool {
        self.last_page() > 1
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page() == 1
    }

    pub fn on_last_page(&self) -> bool {
        self.current_page() == self.last_page()
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn from(&self) -> u64 {
        if self.meta.total == 0 {
            0
        } else {
            self.meta.offset.saturating_add(1).min(self.meta.total)
        }
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn to(&self) -> u64 {
        if self.meta.total == 0 {
            0
        } else if self.meta.per_page == 0 {
            self.meta.total
        } else {
            self.meta
                .offset
                .saturating_add(self.meta.per_page)
                .min(self.meta.total)
        }
    }

    /// Absolute 1-based row number of the row at zero-based `index` on this
    /// page.
    pub fn row_number(&self, index: u64) -> u64 {
        self.meta.offset.saturating_add(index).saturating_add(1)
    }

    /// URL of 1-based `page` under the effective configuration.
    pub fn page_url(&self, page: u64, options: &RenderOptions) -> String {
        let config = self.config.merged(options);
        render::page_url(self.base_url(&config), &config.page_param, page)
    }

    /// Navigation links, or an empty string when everything fits on one
    /// page.
    pub fn links(&self, options: &RenderOptions) -> String {
        let config = self.config.merged(options);
        if !self.has_pages() {
            return String::new();
        }
        render::links(self, self.base_url(&config), &config)
    }

    /// Summary line such as "Showing 11-20 of 57 results".
    pub fn showing(&self, options: &RenderOptions) -> String {
        let config = self.config.merged(options);
        render::showing(self, &config)
    }

    fn base_url<'a>(&'a self, config: &'a PaginationConfig) -> &'a str {
        if config.base_url.is_empty() {
            self.meta.url.as_deref().unwrap_or("")
        } else {
            &config.base_url
        }
    }
}
