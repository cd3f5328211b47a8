use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;

/// A compact bearer token, kept verbatim.
///
/// Signature verification is assumed to have happened upstream; this
/// type only decodes the payload segment to get at the claims.
#[derive(Debug, Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(raw_token: impl Into<String>) -> Self {
        BearerToken {
            token: raw_token.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Decodes the payload segment of a compact JWS into its claims.
    ///
    /// Returns `None` when the token has no payload segment, the
    /// segment is not base64url or the decoded bytes are not JSON.
    pub fn claims(&self) -> Option<Value> {
        let claims_b64 = self.token.split('.').nth(1)?;
        let claims_bytes = URL_SAFE_NO_PAD.decode(claims_b64).ok()?;
        serde_json::from_slice(&claims_bytes).ok()
    }
}
