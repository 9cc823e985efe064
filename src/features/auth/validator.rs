use super::model::{AuthenticatedUser, TokenClaims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

/// Verifies bearer tokens signed with the shared HMAC key
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_key.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        Ok(AuthenticatedUser {
            username: claims.sub,
            region: claims.region,
        })
    }
}
