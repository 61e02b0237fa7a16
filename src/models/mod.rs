//! Defines the domain models of the application and their validation rules.

mod amount;
mod category;
mod entry;
mod password;
mod period;
mod summary;
mod user;

pub use amount::Amount;
pub use category::{Category, CategoryName, Kind};
pub use entry::{LedgerEntry, NewEntry};
pub(crate) use entry::normalize_description;
pub use password::{PasswordHash, ValidatedPassword};
pub use period::Period;
pub use summary::{CategoryTotals, MonthlySummary};
pub use user::{User, UserID};

/// Alias for the integer type used for database primary keys.
pub type DatabaseID = i64;
