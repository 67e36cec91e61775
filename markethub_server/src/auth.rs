//! Bearer-credential handling: HS256 token issue/verify, argon2 password hashing, and the
//! [`Identity`] extractor that handlers use as the single authorization gate.

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use markethub_engine::db_types::Role;
use rand::{thread_rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// Access tokens live for an hour, matching the observed system. There is no refresh flow.
const ACCESS_TOKEN_TTL_HOURS: i64 = 1;
/// Email verification links expire after an hour.
const EMAIL_TOKEN_TTL_HOURS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The account id.
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

/// Claims carried by an email-verification link. Deliberately distinct from [`JwtClaims`] so a
/// verification token cannot be replayed as an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailClaims {
    pub email: String,
    pub exp: usize,
}

//-------------------------------------------------  TokenIssuer  ------------------------------------------------------
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        Self { encoding_key: EncodingKey::from_secret(secret), decoding_key: DecodingKey::from_secret(secret) }
    }

    pub fn issue_access_token(&self, user_id: i64, role: Role) -> Result<String, AuthError> {
        let exp = expiry(ACCESS_TOKEN_TTL_HOURS);
        let claims = JwtClaims { sub: user_id, role, exp };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::CouldNotSerializeToken(e.to_string()))
    }

    pub fn issue_email_token(&self, email: &str) -> Result<String, AuthError> {
        let claims = EmailClaims { email: email.to_string(), exp: expiry(EMAIL_TOKEN_TTL_HOURS) };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::CouldNotSerializeToken(e.to_string()))
    }

    pub fn decode_access_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }

    pub fn decode_email_token(&self, token: &str) -> Result<EmailClaims, AuthError> {
        decode::<EmailClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}

fn expiry(hours: i64) -> usize {
    (Utc::now() + Duration::hours(hours)).timestamp() as usize
}

//-------------------------------------------------  Passwords  --------------------------------------------------------
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = generate_random_salt();
    argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default())
        .map_err(|e| AuthError::HashingError(e.to_string()))
}

fn generate_random_salt() -> Vec<u8> {
    let mut salt = vec![0u8; 16];
    thread_rng().fill_bytes(&mut salt);
    salt
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    argon2::verify_encoded(hash, password.as_bytes()).unwrap_or(false)
}

//-------------------------------------------------  Identity  ---------------------------------------------------------
/// The resolved `{identity, role}` of the current request. The JWT gate middleware validates the
/// bearer token and parks the claims in the request extensions; extracting `Identity` in a
/// handler is what makes a route "authenticated".
#[derive(Debug, Clone)]
pub struct Identity(pub JwtClaims);

impl Identity {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn require_role(&self, role: Role) -> Result<(), ServerError> {
        if self.0.role == role {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions(format!("{} role required", role)).into())
        }
    }

    pub fn require_admin(&self) -> Result<(), ServerError> {
        self.require_role(Role::Admin)
    }

    /// Own-resource gate: the caller must either be `user_id` or an admin.
    pub fn require_self_or_admin(&self, user_id: i64) -> Result<(), ServerError> {
        if self.0.sub == user_id || self.0.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions("You can only access your own data".to_string()).into())
        }
    }
}

impl FromRequest for Identity {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned();
        ready(claims.map(Identity).ok_or(ServerError::AuthenticationError(AuthError::MissingToken)))
    }
}
