use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Outcome of verifying a session token. `Expired` only means a valid
/// signature whose `exp` lies in the past; everything else is `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid { username: String },
    Expired,
    Invalid,
}

/// Sign a session token for `username` expiring `ttl_secs` from now.
pub fn issue(username: &str, secret: &str, ttl_secs: i64) -> Result<String, AuthError> {
    let exp = (Utc::now() + Duration::seconds(ttl_secs)).timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Check signature and expiry; there is no server-side session state and no
/// revocation before natural expiry.
pub fn verify(token: &str, secret: &str) -> TokenStatus {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => TokenStatus::Valid {
            username: data.claims.sub,
        },
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => TokenStatus::Expired,
        Err(_) => TokenStatus::Invalid,
    }
}
