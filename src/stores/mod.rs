//! Defines the traits for storing and retrieving the application's domain
//! models, and their SQLite implementations.

mod category;
mod ledger;
pub mod sqlite;
mod user;

pub use category::CategoryStore;
pub use ledger::{LedgerQuery, LedgerStore};
pub use user::UserStore;
