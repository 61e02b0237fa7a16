//! Implements a SQLite backed ledger entry store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Amount, DatabaseID, Kind, LedgerEntry, NewEntry, UserID},
    stores::{LedgerQuery, LedgerStore},
};

/// Stores ledger entries in a SQLite database.
///
/// Note that because an entry depends on the [User](crate::models::User) and
/// [Category](crate::models::Category) models, these models must be set up in
/// the database first.
///
/// Amounts are stored as decimal strings, not SQLite REALs, so that sums over
/// the ledger stay exact.
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl LedgerStore for SQLiteLedgerStore {
    fn create(&self, entry: NewEntry) -> Result<LedgerEntry, Error> {
        let connection = self.connection.lock().unwrap();

        // The category is looked up under the owner's scope, so referencing
        // another user's category reports not found rather than a conflict.
        let category_name: String = connection
            .prepare("SELECT name FROM category WHERE id = ?1 AND kind = ?2 AND user_id = ?3")?
            .query_row(
                (entry.category_id, entry.kind, entry.user_id.as_i64()),
                |row| row.get(0),
            )
            .map_err(Error::from)?;

        connection.execute(
            "INSERT INTO entry (user_id, kind, category_id, amount, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                entry.user_id.as_i64(),
                entry.kind,
                entry.category_id,
                entry.amount.to_string(),
                &entry.description,
                entry.date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(LedgerEntry {
            id,
            user_id: entry.user_id,
            kind: entry.kind,
            category_id: entry.category_id,
            category_name,
            amount: entry.amount,
            description: entry.description,
            date: entry.date,
        })
    }

    fn get_query(&self, query: LedgerQuery) -> Result<Vec<LedgerEntry>, Error> {
        let mut where_clause_parts = vec![
            "e.user_id = ?1".to_string(),
            "e.kind = ?2".to_string(),
        ];
        let mut query_parameters = vec![
            Value::Integer(query.user_id.as_i64()),
            Value::Text(query.kind.as_str().to_string()),
        ];

        if let Some(date_range) = query.date_range {
            // Dates are stored as ISO-8601 text, so lexical BETWEEN matches
            // chronological order.
            where_clause_parts.push(format!(
                "e.date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        let query_string = format!(
            "SELECT e.id, e.user_id, e.kind, e.category_id, c.name, e.amount, e.description, e.date
             FROM entry e JOIN category c ON e.category_id = c.id
             WHERE {}
             ORDER BY e.date DESC, e.id ASC",
            where_clause_parts.join(" AND ")
        );
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, entry_id: DatabaseID, kind: Kind, user_id: UserID) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "DELETE FROM entry WHERE id = ?1 AND kind = ?2 AND user_id = ?3",
            (entry_id, kind, user_id.as_i64()),
        )?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteLedgerStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS entry (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
                kind TEXT NOT NULL,
                category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE CASCADE,
                amount TEXT NOT NULL,
                description TEXT,
                date TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteLedgerStore {
    type ReturnType = LedgerEntry;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let user_id = UserID::new(row.get(offset + 1)?);
        let kind = row.get(offset + 2)?;
        let category_id = row.get(offset + 3)?;
        let category_name = row.get(offset + 4)?;

        let raw_amount: String = row.get(offset + 5)?;
        let amount = Decimal::from_str(&raw_amount)
            .map(Amount::new_unchecked)
            .map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(
                    offset + 5,
                    rusqlite::types::Type::Text,
                    Box::new(error),
                )
            })?;

        let description = row.get(offset + 6)?;
        let date = row.get(offset + 7)?;

        Ok(Self::ReturnType {
            id,
            user_id,
            kind,
            category_id,
            category_name,
            amount,
            description,
            date,
        })
    }
}
