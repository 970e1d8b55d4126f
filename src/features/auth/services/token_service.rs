use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{User, UserRole};

/// Claims embedded in every issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Service for issuing and verifying signed access tokens (HS256)
pub struct TokenService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a time-limited access token for the given user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: now.timestamp() + self.config.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))
    }

    /// Verify and decode an access token.
    ///
    /// Expiry is a distinct failure from signature or format invalidity so
    /// clients can render specific messaging.
    pub fn decode(&self, token: &str) -> Result<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::user_fixture;

    fn service_with_ttl(ttl_secs: i64) -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: ttl_secs,
        })
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let service = service_with_ttl(3600);
        let user = user_fixture(UserRole::Officer, Some("Water Department"));

        let token = service.issue(&user).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Officer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_distinct_failure() {
        // Issue a token that expired well past the default leeway
        let service = service_with_ttl(-3600);
        let user = user_fixture(UserRole::Citizen, None);

        let token = service.issue(&user).unwrap();
        let err = service.decode(&token).unwrap_err();

        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = service_with_ttl(3600);
        let user = user_fixture(UserRole::Citizen, None);

        let mut token = service.issue(&user).unwrap();
        token.push('x');

        let err = service.decode(&token).unwrap_err();
        assert!(matches!(err, AppError::TokenInvalid));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = service_with_ttl(3600);

        let err = service.decode("not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::TokenInvalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuing = service_with_ttl(3600);
        let verifying = TokenService::new(AuthConfig {
            jwt_secret: "other-secret".to_string(),
            token_ttl_secs: 3600,
        });
        let user = user_fixture(UserRole::Citizen, None);

        let token = issuing.issue(&user).unwrap();
        let err = verifying.decode(&token).unwrap_err();
        assert!(matches!(err, AppError::TokenInvalid));
    }
}
