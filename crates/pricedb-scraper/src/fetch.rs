//! Catalog file download and decoding.

use crate::client::PriceListClient;
use crate::decode::{decode_with_fallback, DecodedText};
use crate::error::ScraperError;

/// Downloads `url` and decodes it with the first candidate encoding that
/// yields valid text.
///
/// # Errors
///
/// Transport failures propagate unchanged. [`ScraperError::Decode`] lists
/// every attempted label when none of them fit.
pub async fn fetch_catalog(
    client: &PriceListClient,
    url: &str,
    encodings: &[String],
) -> Result<DecodedText, ScraperError> {
    let bytes = client.fetch_bytes(url).await?;
    let decoded =
        decode_with_fallback(&bytes, encodings).map_err(|attempts| ScraperError::Decode {
            url: url.to_owned(),
            attempts,
        })?;
    tracing::debug!(
        url,
        bytes = bytes.len(),
        encoding = decoded.encoding,
        "decoded catalog file"
    );
    Ok(decoded)
}
