//! Compact HS256 JSON web tokens.

use crate::auth::AuthError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    let header = URL_SAFE_NO_PAD.encode(HEADER_JSON);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).map_err(internal)?);
    let signing_input = format!("{header}.{payload}");

    let signature = mac(secret)?
        .chain_update(signing_input.as_bytes())
        .finalize()
        .into_bytes();
    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

/// Checks the signature and expiry. `now` is seconds since the unix epoch.
pub fn verify(token: &str, secret: &[u8], now: i64) -> Result<Claims, AuthError> {
    let mut parts = token.trim().split('.');
    let (Some(header_segment), Some(payload_segment), Some(signature_segment), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::InvalidToken);
    };

    let header: Header = decode_segment(header_segment)?;
    if header.alg != "HS256" {
        return Err(AuthError::InvalidToken);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_segment)
        .map_err(|_| AuthError::InvalidToken)?;
    mac(secret)?
        .chain_update(format!("{header_segment}.{payload_segment}").as_bytes())
        .verify_slice(&signature)
        .map_err(|_| AuthError::InvalidToken)?;

    let claims: Claims = decode_segment(payload_segment)?;
    if now >= claims.exp {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}

fn mac(secret: &[u8]) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret).map_err(internal)
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::InvalidToken)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::InvalidToken)
}

fn internal(err: impl std::fmt::Display) -> AuthError {
    AuthError::Internal(err.to_string())
}
