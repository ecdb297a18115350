//! Operation errors surfaced to the rendering layer, one enum per account
//! operation, each carrying the documented user-visible message. All of
//! them are recoverable: the caller redisplays the form with the pinpointed
//! field or message. Storage corruption is deliberately absent here: it
//! degrades to an empty collection inside `store`/`session` and is only
//! logged.

use thiserror::Error;

use crate::validate::FieldError;

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum SignupError {
    /// Field-level validation failures; the form stays editable.
    #[error("{}", join_fields(.0))]
    Invalid(Vec<FieldError>),
    #[error("Registration limit reached. Maximum of 5 users allowed.")]
    CapacityExceeded,
    #[error("This email is already registered. Please use a different one.")]
    DuplicateEmail,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum LoginError {
    // The two failures stay distinct on purpose; that is the documented
    // behavior of this storefront.
    #[error("Email not found")]
    EmailNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("No user is signed in")]
    NotAuthenticated,
    #[error("{}", join_fields(.0))]
    Invalid(Vec<FieldError>),
    #[error("The email address is already in use!")]
    EmailInUse,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("No user is signed in")]
    NotAuthenticated,
    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,
    #[error("New passwords do not match")]
    Mismatch,
    /// The replacement password failed the strength rule.
    #[error("{}", .0.message)]
    Invalid(FieldError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
