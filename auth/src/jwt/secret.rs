use std::fmt;
use std::sync::Arc;

use super::errors::TokenError;

/// Shared HMAC secret used to sign and verify session tokens.
///
/// Built once at startup and handed to the issuer and validator; it is never
/// mutated afterwards. Rotating the secret invalidates every outstanding token.
#[derive(Clone)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    /// Minimum secret length for HS256 (256 bits).
    pub const RECOMMENDED_LENGTH: usize = 32;

    /// Wrap a raw secret.
    ///
    /// Short secrets are accepted but logged.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or whitespace only
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let bytes = secret.as_ref();

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(TokenError::MissingSecret);
        }

        if bytes.len() < Self::RECOMMENDED_LENGTH {
            tracing::warn!(
                length = bytes.len(),
                recommended = Self::RECOMMENDED_LENGTH,
                "Signing secret is shorter than recommended"
            );
        }

        Ok(Self(Arc::from(bytes)))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
