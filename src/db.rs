/*! This module defines traits for interacting with the application's database
and the function that sets up the schema. */

use rusqlite::{Connection, Error, Row};

use crate::stores::sqlite::{SQLiteCategoryStore, SQLiteLedgerStore, SQLiteUserStore};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type to map the row to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// # Errors
    /// Returns an error if a value could not be retrieved from the row or
    /// converted to the target type.
    fn map_row(row: &Row) -> Result<Self::ReturnType, Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, starting from the column at
    /// `offset`. Useful when the row holds the columns of a join.
    ///
    /// # Errors
    /// Returns an error if a value could not be retrieved from the row or
    /// converted to the target type.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, Error>;
}

/// Create the tables for the application's domain models.
///
/// # Errors
/// Returns an error if a table could not be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), crate::Error> {
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .map_err(crate::Error::from)?;

    SQLiteUserStore::create_table(connection)?;
    SQLiteCategoryStore::create_table(connection)?;
    SQLiteLedgerStore::create_table(connection)?;

    Ok(())
}
