//! Principal extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use blog_core::domain::Principal;
use blog_core::ports::AuthError;

use crate::state::AppState;

/// Cookie carrying the access token for browser form posts.
pub const TOKEN_COOKIE: &str = "access_token";

/// Authenticated user identity extractor.
///
/// The token is taken from `Authorization: Bearer <token>`, falling back to
/// the `access_token` cookie.
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

impl Identity {
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    fn authenticate(req: &HttpRequest) -> Result<Self, AuthError> {
        let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
            tracing::error!("AppState not found in app data");
            AuthError::InvalidToken("Server configuration error".to_string())
        })?;

        let token = bearer_token(req)?
            .or_else(|| req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string()))
            .ok_or(AuthError::MissingAuth)?;

        let claims = state.tokens.validate_token(&token)?;
        Ok(Identity(claims.into()))
    }
}

/// `Ok(None)` when there is no Authorization header or it uses another scheme,
/// so the cookie still gets a chance.
fn bearer_token(req: &HttpRequest) -> Result<Option<String>, AuthError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    Ok(auth_str.strip_prefix("Bearer ").map(str::to_string))
}

/// Optional identity extractor - never fails.
///
/// Rejected tokens are logged and treated as anonymous; the handler decides
/// whether a principal is required.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref().map(Identity::principal)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match Identity::authenticate(req) {
            Ok(identity) => ready(Ok(OptionalIdentity(Some(identity)))),
            Err(AuthError::MissingAuth) => ready(Ok(OptionalIdentity(None))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable credentials");
                ready(Ok(OptionalIdentity(None)))
            }
        }
    }
}
