//! Store identity from Žabac catalog filenames.
//!
//! Žabac has used two naming conventions for its price-list uploads. Both are
//! tried in [`FilenameFormat::PRIORITY`] order against the whole filename and
//! the first match wins.

use std::sync::LazyLock;

use pricedb_core::{SourceConfig, StoreIdentity};
use regex::{Captures, Regex};

use crate::client::catalog_filename;
use crate::error::ScraperError;

/// `Cjenik-Zabac-Food-Outlet-PJ-11-Savska-Cesta-206.csv`, optionally with
/// `_<n>` upload-duplicate suffixes before the extension.
static OUTLET_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*PJ-(?P<unit>\d+)-(?P<address>.+?)(?:_\d+)*\.csv$").expect("valid regex")
});

/// `SupermarketDubrava-256L-Zagreb-10000-16.1.2026-7.00h-C164.csv`
static SUPERMARKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Supermarket(?P<street>.+)-(?P<number>[^-]+)-(?P<city>[^-]+)-(?P<zip>\d+)-.+-(?P<code>[^-]+)\.csv$",
    )
    .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameFormat {
    /// Legacy per-outlet files keyed by a `PJ-<n>` unit number.
    OutletUnit,
    /// Current supermarket files carrying street, city, zip and a store code.
    Supermarket,
}

impl FilenameFormat {
    /// Resolution order. A name matching both formats resolves as `OutletUnit`.
    pub const PRIORITY: [FilenameFormat; 2] =
        [FilenameFormat::OutletUnit, FilenameFormat::Supermarket];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FilenameFormat::OutletUnit => "outlet_unit",
            FilenameFormat::Supermarket => "supermarket",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            FilenameFormat::OutletUnit => &OUTLET_UNIT_RE,
            FilenameFormat::Supermarket => &SUPERMARKET_RE,
        }
    }

    /// Builds an identity from `filename`, or `None` if it does not follow
    /// this convention.
    #[must_use]
    pub fn extract(self, filename: &str, source: &SourceConfig) -> Option<StoreIdentity> {
        let caps = self.pattern().captures(filename)?;
        match self {
            FilenameFormat::OutletUnit => outlet_unit_identity(&caps, source),
            FilenameFormat::Supermarket => supermarket_identity(&caps, source),
        }
    }
}

fn outlet_unit_identity(caps: &Captures<'_>, source: &SourceConfig) -> Option<StoreIdentity> {
    let unit = token(caps, "unit")?;
    let address = token(caps, "address")?;
    let store_id = format!("PJ-{unit}");

    Some(StoreIdentity {
        chain: source.chain.clone(),
        store_type: String::new(),
        display_name: format!("{} {store_id}", source.label),
        store_id,
        street_address: address,
        zipcode: String::new(),
        city: String::new(),
    })
}

fn supermarket_identity(caps: &Captures<'_>, source: &SourceConfig) -> Option<StoreIdentity> {
    let street = token(caps, "street")?;
    let number = token(caps, "number")?;
    let city = token(caps, "city")?;
    let zipcode = token(caps, "zip")?;
    let code = token(caps, "code")?;

    Some(StoreIdentity {
        chain: source.chain.clone(),
        store_type: "supermarket".to_string(),
        store_id: format!("SM-{code}"),
        display_name: format!("{} {city} {street}", source.label),
        street_address: format!("{street} {number}"),
        zipcode,
        city,
    })
}

/// A captured token with `-` separators turned into spaces. Blank tokens are
/// treated as a non-match.
fn token(caps: &Captures<'_>, name: &str) -> Option<String> {
    let cleaned = caps.name(name)?.as_str().replace('-', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Matches `filename` against each format in priority order.
#[must_use]
pub fn match_filename(
    filename: &str,
    source: &SourceConfig,
) -> Option<(FilenameFormat, StoreIdentity)> {
    FilenameFormat::PRIORITY
        .into_iter()
        .find_map(|format| format.extract(filename, source).map(|id| (format, id)))
}

/// Resolves the store behind a catalog file URL.
///
/// # Errors
///
/// Returns [`ScraperError::UnrecognizedFormat`] with the decoded filename
/// when no known convention matches.
pub fn resolve_store_identity(
    url: &str,
    source: &SourceConfig,
) -> Result<StoreIdentity, ScraperError> {
    let filename = catalog_filename(url);
    match match_filename(&filename, source) {
        Some((format, identity)) => {
            tracing::debug!(
                %filename,
                format = format.name(),
                store_id = %identity.store_id,
                "resolved store identity"
            );
            Ok(identity)
        }
        None => Err(ScraperError::UnrecognizedFormat { filename }),
    }
}

#[cfg(test)]
#[path = "filename_test.rs"]
mod tests;
