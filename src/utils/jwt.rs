use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    error::{AppError, Result},
    models::UserRole,
};

/// Token lifetime. Expiry is enforced by `jsonwebtoken`'s validation on
/// every protected request; there is no server-side revocation list.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    pub exp: usize,
}

pub fn generate_token(user_id: i32, username: &str, role: UserRole) -> Result<String> {
    let jwt_secret = env::var("JWT_SECRET")
        .map_err(|_| AppError::ConfigError("JWT_SECRET not set".to_string()))?;

    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
}

/// A token that is present but fails signature or expiry validation is a
/// Forbidden, not an Unauthorized; missing credentials are handled by the
/// middleware before this is called.
pub fn verify_token(token: &str) -> Result<Claims> {
    let jwt_secret = env::var("JWT_SECRET")
        .map_err(|_| AppError::ConfigError("JWT_SECRET not set".to_string()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Forbidden("Invalid or expired token".to_string()))
}

pub fn user_id_from_claims(claims: &Claims) -> Result<i32> {
    claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
}
