//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, Kind, UserID},
    stores::CategoryStore,
};

/// Creates and retrieves ledger categories to/from a SQLite database.
///
/// Note that because a category belongs to a [User](crate::models::User), the
/// user model must be set up in the database first.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn create(&self, name: CategoryName, kind: Kind, user_id: UserID) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        connection
            .execute(
                "INSERT INTO category (user_id, kind, name) VALUES (?1, ?2, ?3)",
                (user_id.as_i64(), kind, name.as_ref()),
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                // The user already has a category of this kind with this name.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 2067 =>
                {
                    Error::DuplicateCategory(name.to_string())
                }
                error => error.into(),
            })?;

        let id = connection.last_insert_rowid();

        Ok(Category {
            id,
            user_id,
            kind,
            name,
        })
    }

    fn get_by_user(&self, kind: Kind, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, kind, name FROM category
                 WHERE kind = ?1 AND user_id = ?2
                 ORDER BY id",
            )?
            .query_map((kind, user_id.as_i64()), Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, category_id: DatabaseID, kind: Kind, user_id: UserID) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = ?1 AND kind = ?2 AND user_id = ?3",
            (category_id, kind, user_id.as_i64()),
        )?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
                kind TEXT NOT NULL,
                name TEXT NOT NULL,
                UNIQUE(user_id, kind, name)
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let user_id = UserID::new(row.get(offset + 1)?);
        let kind = row.get(offset + 2)?;

        let raw_name: String = row.get(offset + 3)?;
        let name = CategoryName::new_unchecked(&raw_name);

        Ok(Self::ReturnType {
            id,
            user_id,
            kind,
            name,
        })
    }
}

#[cfg(test)]
mod category_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryName, Kind, PasswordHash, UserID},
        stores::{CategoryStore, UserStore, sqlite::SQLiteUserStore},
    };

    use super::SQLiteCategoryStore;

    fn get_test_store() -> (SQLiteCategoryStore, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let user = SQLiteUserStore::new(connection.clone())
            .create(
                EmailAddress::from_str("test@test.com").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        (SQLiteCategoryStore::new(connection), user.id())
    }

    #[test]
    fn create_category_succeeds() {
        let (store, user_id) = get_test_store();
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = store.create(name.clone(), Kind::Expense, user_id).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.kind, Kind::Expense);
        assert_eq!(category.user_id, user_id);
    }

    #[test]
    fn create_duplicate_category_fails() {
        let (store, user_id) = get_test_store();
        let name = CategoryName::new_unchecked("Groceries");

        store.create(name.clone(), Kind::Expense, user_id).unwrap();
        let result = store.create(name.clone(), Kind::Expense, user_id);

        assert_eq!(result, Err(Error::DuplicateCategory(name.to_string())));
    }

    #[test]
    fn same_name_is_allowed_across_kinds() {
        let (store, user_id) = get_test_store();
        let name = CategoryName::new_unchecked("Other");

        store.create(name.clone(), Kind::Expense, user_id).unwrap();
        let result = store.create(name, Kind::Income, user_id);

        assert!(result.is_ok());
    }

    #[test]
    fn get_by_user_returns_only_matching_kind() {
        let (store, user_id) = get_test_store();
        let rent = store
            .create(CategoryName::new_unchecked("Rent"), Kind::Expense, user_id)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Wages"), Kind::Income, user_id)
            .unwrap();

        let categories = store.get_by_user(Kind::Expense, user_id).unwrap();

        assert_eq!(categories, vec![rent]);
    }

    #[test]
    fn delete_category_succeeds() {
        let (store, user_id) = get_test_store();
        let category = store
            .create(CategoryName::new_unchecked("Foo"), Kind::Expense, user_id)
            .unwrap();

        store.delete(category.id, Kind::Expense, user_id).unwrap();

        assert!(store.get_by_user(Kind::Expense, user_id).unwrap().is_empty());
    }

    #[test]
    fn delete_category_of_wrong_kind_returns_not_found() {
        let (store, user_id) = get_test_store();
        let category = store
            .create(CategoryName::new_unchecked("Foo"), Kind::Expense, user_id)
            .unwrap();

        let result = store.delete(category.id, Kind::Income, user_id);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_of_other_user_returns_not_found() {
        let (store, user_id) = get_test_store();
        let category = store
            .create(CategoryName::new_unchecked("Foo"), Kind::Expense, user_id)
            .unwrap();

        let result = store.delete(category.id, Kind::Expense, UserID::new(user_id.as_i64() + 1));

        assert_eq!(result, Err(Error::NotFound));
    }
}
