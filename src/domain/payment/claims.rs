//! Checkout token claims.
//!
//! The provider redirects the buyer back with a `checkoutToken` shaped like a
//! signed JWT (`header.payload.signature`). Only the payload is read. The
//! signature is NOT verified: the claims are a lookup hint, and the
//! auth/capture round-trip with the provider is what proves the charge.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::TransactionReference;

/// Claim carrying the order reference.
pub const ORDER_REFERENCE_CLAIM: &str = "order_id";

/// Why a token could not be decoded.
///
/// Callers outside the decoder only ever see an empty claims map; this type
/// exists so logs can tell a corrupted token from a token without an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenDecodeError {
    #[error("expected 3 dot-separated segments, found {found}")]
    SegmentCount { found: usize },

    #[error("payload segment is not valid base64: {0}")]
    Base64(String),

    #[error("payload segment is not valid UTF-8")]
    Utf8,

    #[error("payload segment is not valid JSON: {0}")]
    Json(String),

    #[error("payload segment is not a JSON object")]
    NotAnObject,
}

/// Unauthenticated key/value data carried by a checkout token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutClaims(Map<String, Value>);

impl CheckoutClaims {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The order reference, if present and usable.
    ///
    /// Strings and numbers are accepted; anything blank is treated as absent.
    pub fn order_reference(&self) -> Option<TransactionReference> {
        match self.0.get(ORDER_REFERENCE_CLAIM)? {
            Value::String(s) => TransactionReference::new(s.clone()).ok(),
            Value::Number(n) => TransactionReference::new(n.to_string()).ok(),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for CheckoutClaims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decodes the token payload, reporting why decoding failed.
pub fn try_decode_claims(token: &str) -> Result<CheckoutClaims, TokenDecodeError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::SegmentCount {
            found: segments.len(),
        });
    }

    let bytes = decode_segment(segments[1])?;
    let text = String::from_utf8(bytes).map_err(|_| TokenDecodeError::Utf8)?;
    let value: Value =
        serde_json::from_str(&text).map_err(|e| TokenDecodeError::Json(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(CheckoutClaims(map)),
        _ => Err(TokenDecodeError::NotAnObject),
    }
}

/// Best-effort decode: any fault yields an empty claims map.
pub fn decode_claims(token: &str) -> CheckoutClaims {
    try_decode_claims(token).unwrap_or_default()
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenDecodeError> {
    let mut padded = segment.to_string();
    let missing = (4 - padded.len() % 4) % 4;
    padded.extend(std::iter::repeat('=').take(missing));

    URL_SAFE
        .decode(&padded)
        .or_else(|_| STANDARD.decode(&padded))
        .map_err(|e| TokenDecodeError::Base64(e.to_string()))
}
