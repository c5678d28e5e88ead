use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::bootstrap::config::Config;
use crate::domain::users::user::User;

pub const TOKEN_TYPE: &str = "bearer";

/// Claims carried by an access token. `sub` is the user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtPayload {
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub sub: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub audience: String,
    pub issuer: String,
    pub expires_minutes: i64,
}

impl TokenSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            audience: cfg.jwt_audience.clone(),
            issuer: cfg.jwt_issuer.clone(),
            expires_minutes: cfg.access_token_expire_minutes,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("failed to sign access token")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("token lifetime of {0} minutes is out of range")]
    Lifetime(i64),
    #[error("Could not validate token credentials.")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

pub fn create_access_token_for_user(
    user: &User,
    settings: &TokenSettings,
) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();
    let exp = settings
        .expires_minutes
        .checked_mul(60)
        .and_then(|secs| now.checked_add(secs))
        .filter(|exp| *exp > now)
        .ok_or(TokenError::Lifetime(settings.expires_minutes))?;
    let payload = JwtPayload {
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        iat: now,
        exp,
        sub: user.email.clone(),
        username: user.username.clone(),
    };
    encode_payload(&payload, &settings.secret)
}

fn encode_payload(payload: &JwtPayload, secret: &str) -> Result<String, TokenError> {
    jsonwebtoken::encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Encode)
}

pub fn decode_token(token: &str, settings: &TokenSettings) -> Result<JwtPayload, TokenError> {
    let mut validation = Validation::default();
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "aud", "sub"]);
    let data = jsonwebtoken::decode::<JwtPayload>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map_err(TokenError::Invalid)?;
    Ok(data.claims)
}

pub fn get_username_from_token(token: &str, settings: &TokenSettings) -> Result<String, TokenError> {
    decode_token(token, settings).map(|payload| payload.username)
}
