//! Implements the store traits on top of a shared SQLite connection.

mod category;
mod ledger;
mod user;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub use category::SQLiteCategoryStore;
pub use ledger::SQLiteLedgerStore;
pub use user::SQLiteUserStore;

use crate::{Error, db::initialize, state::AppState};

/// The application state for the SQLite backed stores.
pub type SqlAppState = AppState<SQLiteCategoryStore, SQLiteLedgerStore, SQLiteUserStore>;

/// Set up the database schema and create the application state with SQLite
/// backed stores sharing `db_connection`.
///
/// # Errors
///
/// This function will return an error if the database schema could not be
/// created.
pub fn create_app_state(
    db_connection: Connection,
    jwt_secret: &str,
    hash_cost: u32,
) -> Result<SqlAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        jwt_secret,
        hash_cost,
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteLedgerStore::new(connection.clone()),
        SQLiteUserStore::new(connection),
    ))
}
