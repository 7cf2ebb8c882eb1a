//! Catalog link discovery on a chain's price-list page.

use std::collections::BTreeSet;

use scraper::{Html, Selector};

/// Returns every distinct anchor `href` ending with `extension`, trimmed and
/// sorted.
///
/// The HTML parser is tolerant, so broken markup still yields whatever links
/// can be recovered. Extension matching ignores ASCII case. Relative links are
/// returned as written; the caller resolves them against the page URL.
#[must_use]
pub fn extract_catalog_urls(markup: &str, extension: &str) -> Vec<String> {
    if markup.trim().is_empty() {
        tracing::warn!("index page is empty");
        return Vec::new();
    }

    let document = Html::parse_document(markup);
    let selector = Selector::parse("a[href]").expect("valid selector");
    let extension = extension.to_ascii_lowercase();

    let urls: BTreeSet<String> = document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| href.to_ascii_lowercase().ends_with(&extension))
        .map(str::to_owned)
        .collect();

    urls.into_iter().collect()
}
