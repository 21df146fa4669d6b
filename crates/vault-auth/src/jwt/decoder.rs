//! JWT validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use vault_core::config::AuthConfig;
use vault_core::error::AppError;

use super::claims::Claims;

/// Validates access token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use uuid::Uuid;
    use vault_core::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let config = config();
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&config)
            .generate_token(user_id, "ansel")
            .unwrap();

        let claims = JwtDecoder::new(&config).decode_token(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "ansel");
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issued = JwtEncoder::new(&config())
            .generate_token(Uuid::new_v4(), "ansel")
            .unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        let err = JwtDecoder::new(&other).decode_token(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn rejects_garbage_tokens() {
        let err = JwtDecoder::new(&config())
            .decode_token("not.a.token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
