//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hafiz_sajid_core::cart::CartError;
use thiserror::Error;

use crate::services::{AuthError, SubmitError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A cart operation was refused.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The contact submission service failed.
    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    /// A submission for the same form and email is still being processed.
    #[error("A submission is already in progress")]
    SubmissionPending,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cart(err) => match err {
                CartError::OutOfStock(_) => StatusCode::CONFLICT,
                CartError::UnknownItem(_) => StatusCode::NOT_FOUND,
                CartError::EmptyCart
                | CartError::EmptyCouponCode
                | CartError::InvalidCoupon(_)
                | CartError::ConfirmationRequired => StatusCode::BAD_REQUEST,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Unavailable(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Submit(_) => StatusCode::BAD_GATEWAY,
            Self::SubmissionPending => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Message safe to show to the visitor.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Cart(err) => match err {
                CartError::EmptyCart => "Your cart is empty!".to_string(),
                CartError::EmptyCouponCode => "Please enter a coupon code".to_string(),
                CartError::InvalidCoupon(_) => "Invalid coupon code".to_string(),
                CartError::ConfirmationRequired => {
                    "Are you sure you want to clear your cart?".to_string()
                }
                CartError::OutOfStock(_) => "This product is out of stock".to_string(),
                CartError::UnknownItem(_) => "That item is not in your cart".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::Unavailable(_) | AuthError::PasswordHash => {
                    "An error occurred. Please try again.".to_string()
                }
            },
            Self::Submit(_) => {
                "Something went wrong. Please try again or call us directly.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        (status, self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the signed-in admin.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(email.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use hafiz_sajid_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 99".to_string());
        assert_eq!(err.to_string(), "Not found: product 99");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::RateLimited),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            get_status(AppError::SubmissionPending),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Submit(SubmitError::Unavailable("down".to_string()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_cart_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::from(CartError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(CartError::OutOfStock(ProductId::new(6))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(CartError::UnknownItem(ProductId::new(9))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(CartError::InvalidCoupon("FREE".to_string())).public_message(),
            "Invalid coupon code"
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Internal("template exploded at line 3".to_string());
        assert_eq!(err.public_message(), "Internal server error");
    }
}
