//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination did not match a registered user.
    ///
    /// An unknown email and a wrong password produce the same error so that
    /// the client cannot probe which emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The bearer token was missing, malformed, expired or signed with the
    /// wrong key.
    #[error("invalid or missing bearer token")]
    InvalidToken,

    /// An unexpected error occurred while signing a new token.
    #[error("could not create auth token: {0}")]
    TokenCreation(String),

    /// The string provided during registration is not a valid email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The new password and its confirmation did not match.
    #[error("the new password and confirmation do not match")]
    PasswordMismatch,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never shown to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The owner already has a category of this kind with the same name.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// The email used to register is already in use.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// The amount used to create a ledger entry is negative or has more than
    /// two fractional digits.
    #[error("{0}")]
    InvalidAmount(String),

    /// The requested summary period failed validation.
    ///
    /// The message states which check failed: the year range, the month range
    /// or the combined year-month constructibility.
    #[error("{0}")]
    InvalidPeriod(String),

    /// The requested resource was not found.
    ///
    /// Rows owned by another user are reported as not found too, so that the
    /// existence of another user's data cannot be probed.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed. The only
            // foreign keys reachable from client input are owner scoped, so
            // the row the client referenced does not exist as far as they
            // are concerned.
            rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                Error::NotFound
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::InvalidEmail(_)
            | Error::TooWeak(_)
            | Error::PasswordMismatch
            | Error::EmptyCategoryName
            | Error::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::DuplicateCategory(_) | Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::TokenCreation(_) | Error::HashingError(_) | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The details of server faults are not intended for the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use rusqlite::Connection;

    use super::Error;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_period_maps_to_400() {
        let error = Error::InvalidPeriod("month out of range".to_string());

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "month out of range");
    }

    #[test]
    fn query_returned_no_rows_becomes_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn foreign_key_failure_becomes_not_found() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "PRAGMA foreign_keys = ON;
                CREATE TABLE parent (id INTEGER PRIMARY KEY);
                CREATE TABLE child (
                    id INTEGER PRIMARY KEY,
                    parent_id INTEGER NOT NULL REFERENCES parent(id)
                );",
            )
            .unwrap();

        let result = connection.execute("INSERT INTO child (parent_id) VALUES (42)", ());

        let error: Error = result.unwrap_err().into();
        assert_eq!(error, Error::NotFound);
    }
}
