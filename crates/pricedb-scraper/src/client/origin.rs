//! URL helpers: host extraction, link resolution, and catalog filenames.

use percent_encoding::percent_decode_str;
use reqwest::Url;

use crate::error::ScraperError;

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// Resolves an index link against the page it was found on.
///
/// Absolute links come back unchanged (normalized); relative ones are joined
/// onto `base`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base` is not an absolute URL or
/// the joined result cannot be parsed.
pub fn resolve_href(base: &str, href: &str) -> Result<String, ScraperError> {
    let base_url = Url::parse(base).map_err(|e| ScraperError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    base_url
        .join(href)
        .map(String::from)
        .map_err(|e| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

/// The percent-decoded last path segment of a catalog URL.
///
/// Query strings and fragments are ignored. Malformed UTF-8 escapes decode
/// lossily so the filename can still be reported in diagnostics.
#[must_use]
pub fn catalog_filename(url: &str) -> String {
    let path = Url::parse(url).map_or_else(
        |_| {
            url.split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_owned()
        },
        |u| u.path().to_owned(),
    );
    let segment = path.rsplit('/').next().unwrap_or_default();
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
