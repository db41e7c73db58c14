// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token extraction for the server.
//!
//! The extractor runs before any handler: a missing or malformed
//! `Authorization` header is rejected with 401, a present but
//! unverifiable token with 403. Handlers receive the decoded
//! [`AuthenticatedUser`] and never see the raw token.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use taskcrew_api::{AuthenticatedUser, extract_bearer_token};

use crate::AppState;

/// Extractor for authenticated callers.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Verify the JWT signature, expiry and payload shape
/// 3. Yield `{user_id, company_id, role}` to the handler
pub struct BearerUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for BearerUser {
    type Rejection = BearerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                BearerError::MissingToken
            })?
            .to_str()
            .map_err(|_| {
                debug!("Invalid Authorization header encoding");
                BearerError::MissingToken
            })?;

        let token = extract_bearer_token(auth_header).ok_or_else(|| {
            debug!("Authorization header does not carry a bearer token");
            BearerError::MissingToken
        })?;

        let user: AuthenticatedUser = state.tokens.verify(token).map_err(|e| {
            warn!(error = %e, "Token verification failed");
            BearerError::InvalidToken(e.to_string())
        })?;

        debug!(
            user_id = user.user_id,
            company_id = user.company_id,
            "Bearer token verified"
        );

        Ok(Self(user))
    }
}

/// Bearer extraction errors.
#[derive(Debug)]
pub enum BearerError {
    /// No usable `Authorization: Bearer` header was present (401).
    MissingToken,
    /// A token was present but failed verification (403).
    InvalidToken(String),
}

impl IntoResponse for BearerError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing bearer token. Expected: 'Authorization: Bearer <token>'",
            )
                .into_response(),
            Self::InvalidToken(reason) => (
                StatusCode::FORBIDDEN,
                format!("Invalid token: {reason}"),
            )
                .into_response(),
        }
    }
}
