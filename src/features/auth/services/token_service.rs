use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::TokenClaims;
use crate::shared::region::Region;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

/// Issues HMAC-signed bearer tokens carrying the caller's region
pub struct TokenService {
    config: AuthConfig,
    encoding_key: EncodingKey,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_key.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.token_lifetime.as_secs() as i64
    }

    /// Sign a token for `subject` valid for the configured lifetime
    pub fn issue(&self, subject: &str, region: Region) -> Result<String> {
        let issued_at = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: subject.to_string(),
            region: Some(region.to_string()),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: issued_at,
            exp: issued_at + self.expires_in(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign token: {}", e);
                AppError::Internal(format!("Failed to sign token: {}", e))
            })?;

        tracing::debug!(subject = %subject, region = %region, "Issued access token");

        Ok(token)
    }
}
