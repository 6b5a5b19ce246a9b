use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value as JsonValue;

use crate::error::Error;

/// base64url decoder that accepts both padded and unpadded segments.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Unverified claims read from an access token payload.
///
/// The signature is never checked; these claims are only good for
/// client-side decisions such as "is this token worth sending".
#[derive(Debug, Clone)]
pub struct UnverifiedClaims {
    inner: JsonValue,
}

impl UnverifiedClaims {
    /// Gets a claim value by key.
    #[must_use]
    pub fn get_claim(&self, key: &str) -> Option<&JsonValue> {
        self.inner.get(key)
    }

    /// Expiry in seconds since the epoch, if `exp` is present and numeric.
    #[must_use]
    pub fn exp(&self) -> Option<i64> {
        let exp = self.inner.get("exp")?;
        exp.as_i64().or_else(|| exp.as_f64().map(|f| f.floor() as i64))
    }

    /// Gets the inner JSON value.
    #[must_use]
    pub fn as_json(&self) -> &JsonValue {
        &self.inner
    }
}

/// Decodes the payload segment of a `header.payload.signature` token.
///
/// # Errors
///
/// Returns `Error::Token` if the token has fewer than two segments, the
/// payload is not base64url, or it does not decode to a JSON object.
pub fn decode_unverified(token: &str) -> Result<UnverifiedClaims, Error> {
    let payload_b64 = token
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Token("invalid token format".into()))?;

    let payload = SEGMENT_ENGINE
        .decode(payload_b64)
        .map_err(|e| Error::Token(format!("invalid token payload: {e}")))?;

    let inner: JsonValue = serde_json::from_slice(&payload)
        .map_err(|e| Error::Token(format!("invalid token payload: {e}")))?;
    if !inner.is_object() {
        return Err(Error::Token("token payload is not an object".into()));
    }

    Ok(UnverifiedClaims { inner })
}

/// Whether `token` should be treated as expired at `now` (seconds since epoch).
///
/// Fails open: an absent token, an undecodable payload or a missing/non-numeric
/// `exp` all count as expired. No leeway is applied.
#[must_use]
pub fn is_expired_at(token: Option<&str>, now: i64) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return true;
    };

    match decode_unverified(token) {
        Ok(claims) => match claims.exp() {
            Some(exp) => exp < now,
            None => {
                tracing::debug!("Access token has no numeric exp claim");
                true
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Error checking token expiration");
            true
        }
    }
}

/// [`is_expired_at`] against the current wall clock.
#[must_use]
pub fn is_expired(token: Option<&str>) -> bool {
    is_expired_at(token, unix_now())
}

pub(crate) fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
