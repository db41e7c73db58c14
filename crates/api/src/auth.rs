// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Authentication is stateless: login mints an HS256 JWT carrying the
//! caller's identity and tenant, every subsequent request presents it
//! as a bearer token, and verification needs nothing but the signing
//! secret. There is no refresh flow; expiry forces a full re-login.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use taskcrew_domain::Role;
use taskcrew_persistence::UserData;

use crate::error::AuthError;

/// Minimum accepted signing-secret length in bytes.
const MIN_SECRET_LENGTH: usize = 32;

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 86_400;

/// An authenticated caller, as derived from a verified token.
///
/// Every tenant-scoped operation starts from this context: the
/// `company_id` picks the persistence scope and the `role` feeds the
/// per-route allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The caller's user id.
    pub user_id: i64,
    /// The caller's company (tenant) id.
    pub company_id: i64,
    /// The caller's role.
    pub role: Role,
}

/// JWT payload minted at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user id.
    pub id: i64,
    /// The user's email.
    pub email: String,
    /// The user's username.
    pub username: String,
    /// The user's role (`admin` / `user`).
    pub role: String,
    /// The user's company id.
    pub company_id: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Mints and verifies bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl TokenService {
    /// Creates a token service from a shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HS256 signing secret (at least 32 bytes)
    /// * `expiry_secs` - Token lifetime in seconds
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` for a too-short secret or a
    /// non-positive expiry.
    pub fn from_secret(secret: &str, expiry_secs: i64) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration {
                reason: format!("JWT secret must be at least {MIN_SECRET_LENGTH} characters"),
            });
        }
        if expiry_secs <= 0 {
            return Err(AuthError::Configuration {
                reason: String::from("JWT expiry must be positive"),
            });
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        })
    }

    /// Mints a token for a stored user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if encoding fails.
    pub fn mint(&self, user: &UserData) -> Result<String, AuthError> {
        let now: i64 = OffsetDateTime::now_utc().unix_timestamp();
        let claims: Claims = Claims {
            id: user.user_id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
            company_id: user.company_id,
            iat: now,
            exp: now + self.expiry_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Configuration {
                reason: format!("Failed to encode token: {e}"),
            }
        })
    }

    /// Verifies a token and returns its full payload.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` on any signature, expiry or
    /// format failure.
    pub fn verify_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let validation: Validation = Validation::new(Algorithm::HS256);

        let token_data: TokenData<Claims> = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken {
                reason: e.to_string(),
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a token and derives the authenticated caller context.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` on any verification failure,
    /// including an unknown role string in the payload.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims: Claims = self.verify_claims(token)?;
        let role: Role = Role::parse(&claims.role).map_err(|e| AuthError::InvalidToken {
            reason: e.to_string(),
        })?;

        debug!(user_id = claims.id, company_id = claims.company_id, "Token verified");

        Ok(AuthenticatedUser {
            user_id: claims.id,
            company_id: claims.company_id,
            role,
        })
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with either capitalization of the scheme.
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the caller holds the admin role.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated caller
    /// * `action` - The action name, used in the rejection message
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin callers.
    pub fn require_admin(user: &AuthenticatedUser, action: &str) -> Result<(), AuthError> {
        match user.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Forbidden {
                action: action.to_string(),
                required_role: String::from("admin"),
            }),
        }
    }
}
