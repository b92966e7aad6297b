//! Bearer-token identity for API callers.
//!
//! Tokens are issued elsewhere; this service only verifies HS256 JWTs and
//! turns their claims into an [`Identity`].

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{MatchError, PolicyViolation};

/// Errors that can occur while authenticating a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("Authorization header must be 'Bearer <token>'")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token verification is not configured")]
    NotConfigured,
}

impl From<AuthError> for MatchError {
    fn from(err: AuthError) -> Self {
        MatchError::Unauthorized(err.to_string())
    }
}

/// JWT claims understood by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    #[serde(default)]
    pub staff: bool,
}

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub staff: bool,
}

impl Identity {
    pub fn require_staff(&self) -> Result<(), PolicyViolation> {
        if self.staff {
            Ok(())
        } else {
            Err(PolicyViolation::StaffOnly)
        }
    }
}

/// Verifies bearer tokens with a shared secret
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(Identity {
            user_id: data.claims.sub,
            staff: data.claims.staff,
        })
    }
}

fn identify(req: &HttpRequest) -> Result<Identity, MatchError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or(AuthError::NotConfigured)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    let identity = verifier.verify(token.trim()).map_err(|e| {
        tracing::debug!("Rejected bearer token on {}: {}", req.path(), e);
        e
    })?;

    Ok(identity)
}

impl FromRequest for Identity {
    type Error = MatchError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: Uuid, staff: bool, exp_offset: i64) -> String {
        let claims = Claims {
            sub,
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            staff,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_round_trip() {
        let verifier = TokenVerifier::new("secret", 0);
        let user = Uuid::new_v4();

        let identity = verifier.verify(&token("secret", user, true, 3600)).unwrap();
        assert_eq!(identity.user_id, user);
        assert!(identity.staff);
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new("secret", 0);
        assert!(verifier.verify(&token("other", Uuid::new_v4(), false, 3600)).is_err());
        assert!(verifier.verify(&token("secret", Uuid::new_v4(), false, -3600)).is_err());
    }

    #[test]
    fn test_require_staff() {
        let identity = Identity {
            user_id: Uuid::new_v4(),
            staff: false,
        };
        assert_eq!(identity.require_staff(), Err(PolicyViolation::StaffOnly));
    }
}
