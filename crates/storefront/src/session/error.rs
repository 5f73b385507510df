//! Authentication and account-validation error types.

use thiserror::Error;

use monsoon_core::EmailError;

use crate::api::ApiError;

/// Errors from session and account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Password does not meet the strength policy.
    #[error("password validation failed: {0}")]
    WeakPassword(&'static str),

    /// The two password fields do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The operation needs a logged-in session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The bearer token expired, was revoked, or could not be decoded. The
    /// session has already been cleared when this is returned.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// The remote service failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
