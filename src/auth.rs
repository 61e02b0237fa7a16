//! This file defines the JWT auth scheme: the token claims, the extractor
//! that guards protected routes and the sign-in route handler.

use axum::{
    Json, RequestPartsExt,
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use email_address::EmailAddress;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    models::UserID,
    state::{AppState, AuthState},
    stores::UserStore,
};

/// How long a token stays valid after it is issued.
pub const TOKEN_DURATION: Duration = Duration::minutes(15);

/// The payload of an auth token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user.
    pub sub: i64,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
}

impl Claims {
    /// The ID of the authenticated user.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let auth_state = AuthState::from_ref(state);

        decode_jwt(bearer.token(), &auth_state.decoding_key)
    }
}

/// Create a signed token for `user_id` that expires in [TOKEN_DURATION].
///
/// # Errors
///
/// This function will return an [Error::TokenCreation] if the token could not
/// be signed.
pub fn encode_jwt(user_id: UserID, key: &EncodingKey) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64(),
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, key).map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify a presented token and return its claims.
///
/// # Errors
///
/// This function will return an [Error::InvalidToken] if the token is
/// malformed, expired or signed with the wrong key.
pub fn decode_jwt(token: &str, key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::InvalidToken)
}

/// The request body for signing in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The email address the user registered with.
    pub email: EmailAddress,
    /// The user's password in plain text.
    pub password: String,
}

/// Handles sign-in requests, returning a fresh token on success.
///
/// # Errors
///
/// This function will return an [Error::InvalidCredentials] if the email is
/// not registered or the password does not match. Both cases produce the same
/// response so registered emails cannot be probed.
pub async fn sign_in<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<String>, Error>
where
    U: UserStore,
{
    let user = state
        .user_store
        .get_by_email(&credentials.email)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    if !user.password_hash().verify(&credentials.password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_jwt(user.id(), &state.jwt_keys.encoding)?;

    Ok(Json(token))
}
