//! Ordered-fallback text decoding for catalog files.
//!
//! Chains publish their files in whatever encoding the exporting tool used,
//! often without declaring it. Each candidate is tried strictly: a candidate
//! that would need a replacement character counts as a failure and the next
//! one is tried. Labels are WHATWG encoding labels (`utf-8`, `windows-1250`).
//!
//! Order matters for single-byte encodings. `windows-1250` maps every byte to
//! some character and never fails, so it belongs after `utf-8` in the list.

use std::fmt;

use encoding_rs::Encoding;
use serde::Serialize;

/// One failed decoding attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeAttempt {
    pub label: String,
    pub reason: String,
}

impl fmt::Display for DecodeAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.reason)
    }
}

/// Text produced by the first candidate encoding that decoded cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Canonical name of the encoding that succeeded, e.g. `"windows-1250"`.
    pub encoding: &'static str,
}

/// Decodes `bytes` with the first candidate in `encodings` that succeeds.
///
/// A leading byte-order mark is stripped when it belongs to the candidate
/// being tried.
///
/// # Errors
///
/// Returns every failed attempt, in order, when no candidate succeeds. An
/// empty candidate list yields an empty attempt list.
pub fn decode_with_fallback(
    bytes: &[u8],
    encodings: &[String],
) -> Result<DecodedText, Vec<DecodeAttempt>> {
    let mut attempts = Vec::with_capacity(encodings.len());

    for label in encodings {
        let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
            attempts.push(DecodeAttempt {
                label: label.clone(),
                reason: "unknown encoding label".to_string(),
            });
            continue;
        };

        let body = strip_bom(bytes, encoding);
        match encoding.decode_without_bom_handling_and_without_replacement(body) {
            Some(text) => {
                return Ok(DecodedText {
                    text: text.into_owned(),
                    encoding: encoding.name(),
                });
            }
            None => attempts.push(DecodeAttempt {
                label: label.clone(),
                reason: format!("bytes are not valid {}", encoding.name()),
            }),
        }
    }

    Err(attempts)
}

fn strip_bom<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> &'a [u8] {
    match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    }
}
