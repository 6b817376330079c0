use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde_json::Value;

use super::claims::SessionClaims;
use super::errors::TokenError;
use super::secret::SigningSecret;
use super::ALGORITHM;
use super::ALGORITHM_NAME;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Verifies presented session tokens and extracts their claims.
///
/// The accepted algorithm is fixed to HS256 here; whatever the token header
/// asks for is only compared against it, never used to pick a key or a
/// verifier.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    /// Create a validator reading time from the system clock.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &SigningSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the injected clock below, with no leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Validate a token and return its claims.
    ///
    /// Checks run in order: structure, header algorithm, signature, claim
    /// shape, expiry.
    ///
    /// # Errors
    /// * `MalformedToken` - Not a three-part token or unreadable header
    /// * `AlgorithmMismatch` - Header `alg` is anything but HS256
    /// * `BadSignature` - Signature does not verify under the secret
    /// * `MalformedClaims` - A required claim is missing or mistyped
    /// * `Expired` - `exp` is not strictly in the future
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let header = decode_header_object(token)?;

        match header.get("alg").and_then(Value::as_str) {
            Some(alg) if alg == ALGORITHM_NAME => {}
            Some(alg) => return Err(TokenError::AlgorithmMismatch(alg.to_string())),
            None => return Err(TokenError::AlgorithmMismatch("<missing>".to_string())),
        }

        serde_json::from_value::<Header>(Value::Object(header))
            .map_err(|e| TokenError::MalformedToken(format!("header: {}", e)))?;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;
        let claims = token_data.claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn decode_header_object(token: &str) -> Result<serde_json::Map<String, Value>, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    if header.is_empty() || payload.is_empty() {
        return Err(TokenError::MalformedToken("empty segment".to_string()));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| TokenError::MalformedToken(format!("header encoding: {}", e)))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(TokenError::MalformedToken(
            "header is not a JSON object".to_string(),
        )),
        Err(e) => Err(TokenError::MalformedToken(format!("header: {}", e))),
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmMismatch(kind_name(kind))
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::Json(e) => TokenError::MalformedClaims(e.to_string()),
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MalformedClaims(claim.clone()),
        _ => TokenError::MalformedToken(kind_name(kind)),
    }
}

fn kind_name(kind: &ErrorKind) -> String {
    format!("{:?}", kind)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::encode;
    use jsonwebtoken::Algorithm;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;
    use serde::Serialize;

    use super::*;
    use crate::clock::FixedClock;
    use crate::jwt::claims::SessionIdentity;
    use crate::jwt::issuer::TokenIssuer;

    const SECRET: &str = "my_secret_key_at_least_32_bytes_long!";
    const ISSUED_AT: i64 = 1_700_000_000;

    fn secret() -> SigningSecret {
        SigningSecret::new(SECRET).unwrap()
    }

    fn identity() -> SessionIdentity {
        SessionIdentity {
            subject_id: "user123".to_string(),
            email: "a@x.com".to_string(),
            display_name: "A".to_string(),
            is_admin: false,
        }
    }

    fn validator_at(timestamp: i64) -> TokenValidator {
        TokenValidator::with_clock(&secret(), Arc::new(FixedClock::at_timestamp(timestamp)))
    }

    fn issue(ttl: Duration) -> String {
        TokenIssuer::with_clock(&secret(), Arc::new(FixedClock::at_timestamp(ISSUED_AT)))
            .issue(&identity(), ttl)
            .expect("Failed to issue token")
            .access_token
    }

    fn encode_segment(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn valid_payload() -> serde_json::Value {
        serde_json::json!({
            "sub": "user123",
            "email": "a@x.com",
            "name": "A",
            "is_admin": false,
            "iat": ISSUED_AT,
            "exp": ISSUED_AT + 3600,
        })
    }

    #[test]
    fn test_issue_and_validate() {
        let token = issue(Duration::hours(24));

        let claims = validator_at(ISSUED_AT + 60)
            .validate(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name, "A");
        assert!(!claims.is_admin);
        assert_eq!(claims.exp, ISSUED_AT + 24 * 60 * 60);
    }

    #[test]
    fn test_expiry_boundary() {
        let ttl = 24 * 60 * 60;
        let token = issue(Duration::seconds(ttl));

        assert!(validator_at(ISSUED_AT + ttl - 1).validate(&token).is_ok());
        assert_eq!(
            validator_at(ISSUED_AT + ttl).validate(&token).unwrap_err(),
            TokenError::Expired
        );
        assert_eq!(
            validator_at(ISSUED_AT + ttl + 1).validate(&token).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = issue(Duration::hours(1));
        let other = SigningSecret::new("another_secret_at_least_32_bytes_long").unwrap();
        let validator =
            TokenValidator::with_clock(&other, Arc::new(FixedClock::at_timestamp(ISSUED_AT)));

        assert_eq!(
            validator.validate(&token).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_tampered_payload_fails_signature() {
        let token = issue(Duration::hours(1));
        let parts: Vec<&str> = token.split('.').collect();

        let mut payload = valid_payload();
        payload["is_admin"] = serde_json::json!(true);
        let forged = format!("{}.{}.{}", parts[0], encode_segment(&payload), parts[2]);

        assert_eq!(
            validator_at(ISSUED_AT).validate(&forged).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        // Correctly signed with the same secret, but not with HS256.
        let claims = SessionClaims::new(
            &identity(),
            FixedClock::at_timestamp(ISSUED_AT).0,
            Duration::hours(1),
        )
        .unwrap();
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            validator_at(ISSUED_AT).validate(&token).unwrap_err(),
            TokenError::AlgorithmMismatch("HS384".to_string())
        );
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let header = encode_segment(&serde_json::json!({ "alg": "none", "typ": "JWT" }));
        let token = format!("{}.{}.", header, encode_segment(&valid_payload()));

        assert_eq!(
            validator_at(ISSUED_AT).validate(&token).unwrap_err(),
            TokenError::AlgorithmMismatch("none".to_string())
        );
    }

    #[test]
    fn test_header_alg_case_must_match_exactly() {
        let token = issue(Duration::hours(1));
        let parts: Vec<&str> = token.split('.').collect();
        let header = encode_segment(&serde_json::json!({ "alg": "hs256", "typ": "JWT" }));
        let forged = format!("{}.{}.{}", header, parts[1], parts[2]);

        assert!(matches!(
            validator_at(ISSUED_AT).validate(&forged),
            Err(TokenError::AlgorithmMismatch(_))
        ));
    }

    #[test]
    fn test_missing_algorithm_rejected() {
        let header = encode_segment(&serde_json::json!({ "typ": "JWT" }));
        let token = format!("{}.{}.sig", header, encode_segment(&valid_payload()));

        assert!(matches!(
            validator_at(ISSUED_AT).validate(&token),
            Err(TokenError::AlgorithmMismatch(_))
        ));
    }

    #[test]
    fn test_mistyped_header_field_is_malformed_token() {
        let token = issue(Duration::hours(1));
        let parts: Vec<&str> = token.split('.').collect();
        let header = encode_segment(&serde_json::json!({ "alg": "HS256", "typ": 5 }));
        let forged = format!("{}.{}.{}", header, parts[1], parts[2]);

        assert!(matches!(
            validator_at(ISSUED_AT).validate(&forged),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let validator = validator_at(ISSUED_AT);

        for token in [
            "",
            "invalid",
            "invalid.token",
            "a.b.c.d",
            ".payload.sig",
            "!!!.payload.sig",
        ] {
            assert!(
                matches!(validator.validate(token), Err(TokenError::MalformedToken(_))),
                "token {:?} should be malformed",
                token
            );
        }

        let not_object = format!("{}.payload.sig", encode_segment(&serde_json::json!([1, 2])));
        assert!(matches!(
            validator.validate(&not_object),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[derive(Serialize)]
    struct PartialClaims {
        sub: String,
        exp: i64,
    }

    #[test]
    fn test_missing_claims_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &PartialClaims {
                sub: "user123".to_string(),
                exp: ISSUED_AT + 3600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validator_at(ISSUED_AT).validate(&token),
            Err(TokenError::MalformedClaims(_))
        ));
    }

    #[test]
    fn test_mistyped_claims_rejected() {
        let mut payload = valid_payload();
        payload["is_admin"] = serde_json::json!("yes");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validator_at(ISSUED_AT).validate(&token),
            Err(TokenError::MalformedClaims(_))
        ));
    }
}
