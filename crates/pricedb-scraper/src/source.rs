//! Chain-specific behavior expressed as data plus two plain functions.

use pricedb_core::{Product, SourceConfig, StoreIdentity};

use crate::error::ScraperError;

/// Derives a store's identity from a catalog file URL.
pub type IdentityResolver = fn(&str, &SourceConfig) -> Result<StoreIdentity, ScraperError>;

/// Source-specific fixup run on a mapped product before the shared cleanup.
pub type RowFixup = fn(&mut Product, &SourceConfig);

/// Everything the crawl pipeline needs to know about one chain.
#[derive(Debug, Clone)]
pub struct Source {
    pub config: SourceConfig,
    pub resolve_identity: IdentityResolver,
    pub fixup: RowFixup,
}

impl Source {
    /// Points the index fetch somewhere else, e.g. a mirror or test server.
    #[must_use]
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.config.index_url = index_url.into();
        self
    }

    #[must_use]
    pub fn chain(&self) -> &str {
        &self.config.chain
    }
}
