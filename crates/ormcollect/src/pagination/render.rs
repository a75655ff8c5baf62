//! Markup for pagination links and the summary line.

use std::fmt::Write as _;

use regex::{Captures, Regex};

use super::{PaginationConfig, PaginationEnvelope, View};

/// Builds page URLs against one base URL; the parameter pattern is
/// compiled once.
pub(super) struct PageUrl<'a> {
    base: &'a str,
    param: &'a str,
    existing: Option<Regex>,
}

impl<'a> PageUrl<'a> {
    pub(super) fn new(base: &'a str, param: &'a str) -> Self {
        let existing = Regex::new(&format!(r"([?&]){}=[^&#]*", regex::escape(param)))
            .ok()
            .filter(|re| re.is_match(base));
        Self {
            base,
            param,
            existing,
        }
    }

    /// Set `param=page` on the base URL, replacing an existing `param`.
    pub(super) fn url(&self, page: u64) -> String {
        let (base, param) = (self.base, self.param);
        if let Some(re) = &self.existing {
            return re
                .replace(base, |caps: &Captures<'_>| format!("{}{}={}", &caps[1], param, page))
                .into_owned();
        }

        let (path, fragment) = match base.find('#') {
            Some(pos) => base.split_at(pos),
            None => (base, ""),
        };
        let separator = if path.ends_with('?') || path.ends_with('&') {
            ""
        } else if path.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{path}{separator}{param}={page}{fragment}")
    }
}

pub(super) fn page_url(base: &str, param: &str, page: u64) -> String {
    PageUrl::new(base, param).url(page)
}

pub(super) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

struct LinkWriter<'a> {
    out: String,
    urls: PageUrl<'a>,
}

impl LinkWriter<'_> {
    fn link(&mut self, page: u64, label: &str) {
        let href = escape_html(&self.urls.url(page));
        let _ = write!(
            self.out,
            r#"<li class="page-item"><a class="page-link" href="{}">{}</a></li>"#,
            href,
            escape_html(label)
        );
    }

    fn disabled(&mut self, label: &str) {
        let _ = write!(
            self.out,
            r#"<li class="page-item disabled"><span class="page-link">{}</span></li>"#,
            escape_html(label)
        );
    }

    fn active(&mut self, page: u64) {
        let _ = write!(
            self.out,
            r#"<li class="page-item active" aria-current="page"><span class="page-link">{}</span></li>"#,
            page
        );
    }

    fn edge(&mut self, enabled: bool, page: u64, label: &str) {
        if enabled {
            self.link(page, label);
        } else {
            self.disabled(label);
        }
    }
}

pub(super) fn links(envelope: &PaginationEnvelope, base: &str, config: &PaginationConfig) -> String {
    let current = envelope.current_page();
    let last = envelope.last_page();
    let mut writer = LinkWriter {
        out: String::new(),
        urls: PageUrl::new(base, &config.page_param),
    };

    let _ = write!(
        writer.out,
        r#"<nav aria-label="pagination"><ul class="{}">"#,
        escape_html(&config.class)
    );

    match config.view {
        View::Simple => {
            writer.edge(current > 1, current.saturating_sub(1), &config.prev);
            writer.edge(current < last, current + 1, &config.next);
        }
        View::Bootstrap => {
            writer.edge(current > 1, 1, &config.first);
            writer.edge(current > 1, current.saturating_sub(1), &config.prev);

            let span = u64::try_from(config.span).unwrap_or(u64::MAX);
            let start = current.saturating_sub(span).max(1);
            let end = current.saturating_add(span).min(last);
            for page in start..=end {
                if page == current {
                    writer.active(page);
                } else {
                    writer.link(page, &page.to_string());
                }
            }

            writer.edge(current < last, current + 1, &config.next);
            writer.edge(current < last, last, &config.last);
        }
    }

    writer.out.push_str("</ul></nav>");
    writer.out
}

pub(super) fn showing(envelope: &PaginationEnvelope, config: &PaginationConfig) -> String {
    let range = format!("{}-{}", envelope.from(), envelope.to());
    let total = envelope.total().to_string();
    [
        config.showing.as_str(),
        range.as_str(),
        config.of.as_str(),
        total.as_str(),
        config.results.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PaginationMeta, RenderOptions};

    fn envelope(offset: u64, total: u64, per_page: u64) -> PaginationEnvelope {
        PaginationEnvelope::new(
            PaginationMeta::new(offset, total, per_page),
            PaginationConfig::default(),
        )
    }

    #[test]
    fn page_url_variants() {
        assert_eq!(page_url("", "page", 2), "?page=2");
        assert_eq!(page_url("/users", "page", 2), "/users?page=2");
        assert_eq!(page_url("/users?q=a", "page", 2), "/users?q=a&page=2");
        assert_eq!(page_url("/users?page=1&q=a", "page", 3), "/users?page=3&q=a");
        assert_eq!(page_url("/users?q=a&page=9", "page", 3), "/users?q=a&page=3");
        assert_eq!(page_url("/users#top", "page", 2), "/users?page=2#top");
        assert_eq!(page_url("/users?", "page", 2), "/users?page=2");
        // "subpage" must not be mistaken for "page"
        assert_eq!(page_url("/x?subpage=1", "page", 2), "/x?subpage=1&page=2");
    }

    #[test]
    fn page_url_builder_is_reusable() {
        let urls = PageUrl::new("/users?page=1&q=a", "page");
        assert_eq!(urls.url(2), "/users?page=2&q=a");
        assert_eq!(urls.url(7), "/users?page=7&q=a");

        let urls = PageUrl::new("/users#top", "page");
        assert_eq!(urls.url(1), "/users?page=1#top");
        assert_eq!(urls.url(3), "/users?page=3#top");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn bootstrap_links_window() {
        let html = envelope(40, 100, 10).links(&RenderOptions::new());
        // page 5 of 10, span 2: pages 3..=7
        assert!(html.starts_with(r#"<nav aria-label="pagination"><ul class="pagination">"#));
        assert!(html.contains(r#"href="?page=1">First</a>"#));
        assert!(html.contains(r#"href="?page=4">Prev</a>"#));
        assert!(html.contains(r#"href="?page=3">3</a>"#));
        assert!(!html.contains(r#"href="?page=2">2</a>"#));
        assert!(html.contains(r#"<li class="page-item active" aria-current="page"><span class="page-link">5</span></li>"#));
        assert!(html.contains(r#"href="?page=7">7</a>"#));
        assert!(!html.contains(r#"href="?page=8">8</a>"#));
        assert!(html.contains(r#"href="?page=6">Next</a>"#));
        assert!(html.contains(r#"href="?page=10">Last</a>"#));
        assert!(html.ends_with("</ul></nav>"));
    }

    #[test]
    fn first_page_disables_backward_links() {
        let html = envelope(0, 30, 10).links(&RenderOptions::new());
        assert!(html.contains(r#"<li class="page-item disabled"><span class="page-link">First</span></li>"#));
        assert!(html.contains(r#"<li class="page-item disabled"><span class="page-link">Prev</span></li>"#));
        assert!(html.contains(r#"href="?page=2">Next</a>"#));
    }

    #[test]
    fn simple_view_renders_prev_next_only() {
        let html = envelope(10, 30, 10).links(&RenderOptions::new().view(View::Simple).class("pager"));
        assert!(html.contains(r#"<ul class="pager">"#));
        assert!(html.contains(r#"href="?page=1">Prev</a>"#));
        assert!(html.contains(r#"href="?page=3">Next</a>"#));
        assert!(!html.contains("First"));
        assert!(!html.contains("active"));
    }

    #[test]
    fn single_page_renders_nothing() {
        assert_eq!(envelope(0, 5, 10).links(&RenderOptions::new()), "");
    }

    #[test]
    fn showing_summary() {
        assert_eq!(
            envelope(10, 57, 10).showing(&RenderOptions::new()),
            "Showing 11-20 of 57 results"
        );
        assert_eq!(
            envelope(0, 0, 10).showing(&RenderOptions::new()),
            "Showing 0-0 of 0 results"
        );
        assert_eq!(
            envelope(0, 3, 10).showing(&RenderOptions::new().showing("Rows").of("/").results("")),
            "Rows 1-3 / 3"
        );
    }
}
