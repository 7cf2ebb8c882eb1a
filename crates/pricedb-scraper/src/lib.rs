pub mod client;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod index;
pub mod normalize;
pub mod pipeline;
mod rate_limit;
pub mod rows;
pub mod source;
pub mod zabac;

pub use client::PriceListClient;
pub use decode::{decode_with_fallback, DecodeAttempt, DecodedText};
pub use error::ScraperError;
pub use index::extract_catalog_urls;
pub use normalize::normalize_row;
pub use pipeline::{process_catalog, CrawlOptions, CrawlReport, Crawler, SkippedCatalog};
pub use rows::{parse_rows, CatalogRow};
pub use source::Source;
