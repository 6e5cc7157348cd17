//! Admin authentication extractors.
//!
//! Provides extractors for requiring an admin sign-in in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AdminSession, session_keys};

/// Extractor that requires an admin session.
///
/// If no admin is signed in, returns a redirect to the admin login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Welcome back, {}", admin.email)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

/// Error returned when an admin session is required but missing.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let admin: AdminSession = session
            .get(session_keys::ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(admin))
    }
}

/// Extractor that optionally gets the signed-in admin.
///
/// Unlike `RequireAdmin`, this does not reject the request when nobody is
/// signed in.
pub struct OptionalAdmin(pub Option<AdminSession>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<AdminSession>(session_keys::ADMIN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Store the signed-in admin in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::ADMIN, admin).await
}

/// Remove the admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<AdminSession>(session_keys::ADMIN)
        .await?;
    Ok(())
}
