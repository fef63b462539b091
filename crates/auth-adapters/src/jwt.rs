//! HS256 implementation of the `TokenIssuer` port.
//!
//! The token carries the user id as `sub` plus the username, and expires
//! after the configured TTL. Verification rejects bad signatures and
//! expired tokens alike; callers only ever see verified claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{AppError, AuthClaims, Result, TokenIssuer};

/// Wire shape of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::hours(ttl_hours),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AppError::Internal(format!("token signing failed: {err}")))
    }

    fn verify(&self, token: &str) -> Result<AuthClaims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;
        let sub = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("malformed token subject".to_string()))?;
        Ok(AuthClaims {
            sub,
            username: data.claims.username,
            iat: data.claims.iat,
            exp: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer_with_ttl(hours: i64) -> JwtTokenIssuer {
        JwtTokenIssuer::new(&SecretString::from("test-secret".to_string()), hours)
    }

    #[test]
    fn round_trip() {
        let issuer = issuer_with_ttl(1);
        let id = Uuid::now_v7();
        let token = issuer.issue(id, "hazel").unwrap();
        assert_eq!(token.matches('.').count(), 2);

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "hazel");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_rejected() {
        let issuer = issuer_with_ttl(1);
        let token = issuer.issue(Uuid::now_v7(), "hazel").unwrap();
        let tampered = format!("{}x", token);
        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Issue two hours in the past to clear the default validation leeway.
        let issuer = issuer_with_ttl(-2);
        let token = issuer.issue(Uuid::now_v7(), "hazel").unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn foreign_secret_rejected() {
        let ours = issuer_with_ttl(1);
        let theirs = JwtTokenIssuer::new(&SecretString::from("other-secret".to_string()), 1);
        let token = theirs.issue(Uuid::now_v7(), "hazel").unwrap();
        assert!(ours.verify(&token).is_err());
    }
}
