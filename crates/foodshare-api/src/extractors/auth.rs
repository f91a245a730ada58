//! Authentication extractors: pull the bearer token from the Authorization
//! header, resolve it to a user, and inject a `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use foodshare_core::error::AppError;
use foodshare_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn resolve(token: &str, state: &AppState) -> Result<AuthUser, ApiError> {
    let user = state.identity.resolve(token).await?;
    Ok(AuthUser(RequestContext::from_user(&user)))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthenticated("Missing or malformed bearer token"))?;

        resolve(bearer.token(), state).await
    }
}

/// Optional authentication: `None` when no Authorization header is sent.
///
/// A header that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    /// Returns the context, if any.
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(Self(None));
        }
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(Self(Some(user.0)))
    }
}
