//! Defines the trait for creating, retrieving and deleting categories.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, Kind, UserID},
};

/// Manages the categories that group a user's ledger entries.
///
/// Every operation takes the owner's `user_id`, so an implementation can never
/// return or touch another user's rows.
pub trait CategoryStore: Send + Sync {
    /// Create a category in the store.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::DuplicateCategory] if the user already has a category of this
    ///   `kind` with the same name,
    /// - [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, name: CategoryName, kind: Kind, user_id: UserID) -> Result<Category, Error>;

    /// Retrieve all of a user's categories of one kind.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::SqlError] if there is an unexpected
    /// SQL error.
    fn get_by_user(&self, kind: Kind, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Delete a category and, through the schema, its ledger entries.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::NotFound] if the category does not
    /// exist or belongs to another user or kind.
    fn delete(&self, category_id: DatabaseID, kind: Kind, user_id: UserID) -> Result<(), Error>;
}
