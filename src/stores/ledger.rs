//! Defines the trait for creating, querying and deleting ledger entries.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseID, Kind, LedgerEntry, NewEntry, UserID},
};

/// The filters for querying ledger entries.
///
/// The owner and kind are always present. Results are ordered by date,
/// newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerQuery {
    /// The owner whose entries to return.
    pub user_id: UserID,
    /// Whether to return incomes or expenses.
    pub kind: Kind,
    /// An optional inclusive date range, e.g., one calendar month.
    pub date_range: Option<RangeInclusive<Date>>,
}

/// Manages the dated income and expense rows of the ledger.
pub trait LedgerStore: Send + Sync {
    /// Create a ledger entry in the store.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::NotFound] if the referenced category does not exist or
    ///   belongs to another user or kind,
    /// - [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, entry: NewEntry) -> Result<LedgerEntry, Error>;

    /// Retrieve the entries matching `query`, ordered by date descending.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::SqlError] if there is an unexpected
    /// SQL error.
    fn get_query(&self, query: LedgerQuery) -> Result<Vec<LedgerEntry>, Error>;

    /// Delete a ledger entry.
    ///
    /// # Errors
    ///
    /// This function will return a [Error::NotFound] if the entry does not
    /// exist or belongs to another user or kind.
    fn delete(&self, entry_id: DatabaseID, kind: Kind, user_id: UserID) -> Result<(), Error>;
}
