//! Defines the trait for creating and retrieving users.

use email_address::EmailAddress;

use crate::{
    Error,
    models::{PasswordHash, User, UserID},
};

/// Manages the registered users of the application.
pub trait UserStore: Send + Sync {
    /// Create a user in the store.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::DuplicateEmail] if the email is already registered,
    /// - [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, email: EmailAddress, password_hash: PasswordHash) -> Result<User, Error>;

    /// Retrieve a user by their ID.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::NotFound] if there is no user with
    /// the given ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Retrieve a user by their email address.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::NotFound] if there is no user with
    /// the given email.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::NotFound] if there is no user with
    /// the given ID.
    fn update_password(&self, id: UserID, password_hash: PasswordHash) -> Result<(), Error>;
}
