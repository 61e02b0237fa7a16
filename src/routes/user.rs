//! This file defines the route handlers for registering a user, viewing the
//! signed-in account and changing its password.

use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::Claims,
    models::{PasswordHash, UserID, ValidatedPassword},
    state::AppState,
    stores::UserStore,
};

/// The request body for registering a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// The email address to register with.
    pub email: String,
    /// The password in plain text.
    pub password: String,
}

/// A user as presented to clients.
///
/// Deliberately omits the password hash.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    /// The ID of the user.
    pub id: UserID,
    /// The email address the user registered with.
    pub email: String,
}

/// Handles requests to register a new user.
///
/// # Errors
///
/// This function will return a:
/// - [Error::InvalidEmail] if the email does not parse,
/// - [Error::TooWeak] if the password is too easy to guess,
/// - [Error::DuplicateEmail] if the email is already registered.
pub async fn create_user<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), Error>
where
    U: UserStore,
{
    let email = EmailAddress::from_str(&request.email)
        .map_err(|error| Error::InvalidEmail(error.to_string()))?;
    let password_hash = PasswordHash::from_raw_password(&request.password, state.hash_cost)?;

    let user = state.user_store.create(email, password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id(),
            email: user.email().to_string(),
        }),
    ))
}

/// Handles requests for the signed-in user's own account details.
pub async fn get_me<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
) -> Result<Json<UserResponse>, Error>
where
    C: Clone,
    L: Clone,
    U: UserStore + Clone,
{
    let user = state.user_store.get(claims.user_id())?;

    Ok(Json(UserResponse {
        id: user.id(),
        email: user.email().to_string(),
    }))
}

/// The request body for changing the signed-in user's password.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// The new password in plain text.
    pub new_password: String,
    /// The new password again, to catch typos.
    pub confirm_new_password: String,
}

/// Handles requests to change the signed-in user's password.
///
/// # Errors
///
/// This function will return a:
/// - [Error::PasswordMismatch] if the confirmation does not match,
/// - [Error::TooWeak] if the new password is too easy to guess.
pub async fn change_password<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, Error>
where
    C: Clone,
    L: Clone,
    U: UserStore + Clone,
{
    if request.new_password != request.confirm_new_password {
        return Err(Error::PasswordMismatch);
    }

    let validated_password = ValidatedPassword::new(&request.new_password)?;
    let password_hash = PasswordHash::new(validated_password, state.hash_cost)?;

    state
        .user_store
        .update_password(claims.user_id(), password_hash)?;

    Ok(StatusCode::NO_CONTENT)
}
