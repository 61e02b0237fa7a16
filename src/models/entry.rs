//! This file defines the `LedgerEntry` type, a single dated income or expense
//! row, and the `NewEntry` type used to create one.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{Amount, DatabaseID, Kind, UserID};

/// A single dated income or expense belonging to one user and one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The id of the entry.
    pub id: DatabaseID,
    /// The id of the user that owns the entry.
    pub user_id: UserID,
    /// Whether the entry is an income or an expense.
    pub kind: Kind,
    /// The id of the category the entry belongs to.
    pub category_id: DatabaseID,
    /// The name of the category, denormalized for display.
    pub category_name: String,
    /// The monetary value of the entry.
    pub amount: Amount,
    /// An optional free-form note. Absent notes are `None`, never an empty
    /// string.
    pub description: Option<String>,
    /// The calendar date the entry applies to.
    pub date: Date,
}

/// The fields needed to create a ledger entry.
///
/// The id and the denormalized category name are filled in by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// The id of the user that will own the entry.
    pub user_id: UserID,
    /// Whether the entry is an income or an expense.
    pub kind: Kind,
    /// The id of the category the entry belongs to. It must belong to the same
    /// user and kind.
    pub category_id: DatabaseID,
    /// The monetary value of the entry.
    pub amount: Amount,
    /// An optional free-form note.
    pub description: Option<String>,
    /// The calendar date the entry applies to.
    pub date: Date,
}

/// Map an optional description so that empty strings become absent.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod description_tests {
    use super::normalize_description;

    #[test]
    fn empty_string_becomes_none() {
        assert_eq!(normalize_description(Some(String::new())), None);
    }

    #[test]
    fn missing_description_stays_none() {
        assert_eq!(normalize_description(None), None);
    }

    #[test]
    fn non_empty_description_is_kept() {
        assert_eq!(
            normalize_description(Some("August paycheck".to_string())),
            Some("August paycheck".to_string())
        );
    }
}
