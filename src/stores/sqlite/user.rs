//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{PasswordHash, User, UserID},
    stores::UserStore,
};

/// Creates and retrieves users to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    fn create(&self, email: EmailAddress, password_hash: PasswordHash) -> Result<User, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO user (email, password) VALUES (?1, ?2)",
            (email.to_string(), password_hash.to_string()),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(id, email, password_hash))
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, email, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|error| error.into())
    }

    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, email, password FROM user WHERE email = :email")?
            .query_row(&[(":email", &email.to_string())], Self::map_row)
            .map_err(|error| error.into())
    }

    fn update_password(&self, id: UserID, password_hash: PasswordHash) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "UPDATE user SET password = ?1 WHERE id = ?2",
            (password_hash.to_string(), id.as_i64()),
        )?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let raw_email: String = row.get(offset + 1)?;
        let raw_password_hash: String = row.get(offset + 2)?;

        Ok(User::new(
            UserID::new(raw_id),
            EmailAddress::new_unchecked(raw_email),
            PasswordHash::new_unchecked(&raw_password_hash),
        ))
    }
}

#[cfg(test)]
mod user_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{PasswordHash, UserID},
        stores::UserStore,
    };

    use super::SQLiteUserStore;

    fn get_test_store() -> SQLiteUserStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_user_succeeds() {
        let store = get_test_store();
        let email = EmailAddress::from_str("hello@world.com").unwrap();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let user = store.create(email.clone(), password_hash.clone()).unwrap();

        assert!(user.id().as_i64() > 0);
        assert_eq!(user.email(), &email);
        assert_eq!(user.password_hash(), &password_hash);
    }

    #[test]
    fn create_user_fails_on_duplicate_email() {
        let store = get_test_store();
        let email = EmailAddress::from_str("hello@world.com").unwrap();

        store
            .create(email.clone(), PasswordHash::new_unchecked("hunter2"))
            .unwrap();
        let result = store.create(email, PasswordHash::new_unchecked("hunter3"));

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn duplicate_password_hash_is_allowed() {
        let store = get_test_store();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        store
            .create(
                EmailAddress::from_str("hello@world.com").unwrap(),
                password_hash.clone(),
            )
            .unwrap();
        let result = store.create(
            EmailAddress::from_str("bye@world.com").unwrap(),
            password_hash,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn get_user_by_email_succeeds() {
        let store = get_test_store();
        let inserted_user = store
            .create(
                EmailAddress::from_str("foo@bar.baz").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        let retrieved_user = store.get_by_email(inserted_user.email()).unwrap();

        assert_eq!(retrieved_user, inserted_user);
    }

    #[test]
    fn get_user_fails_with_non_existent_email() {
        let store = get_test_store();

        let email = EmailAddress::from_str("notavalidemail@foo.bar").unwrap();

        assert_eq!(store.get_by_email(&email), Err(Error::NotFound));
    }

    #[test]
    fn update_password_replaces_hash() {
        let store = get_test_store();
        let user = store
            .create(
                EmailAddress::from_str("foo@bar.baz").unwrap(),
                PasswordHash::new_unchecked("oldhash"),
            )
            .unwrap();

        store
            .update_password(user.id(), PasswordHash::new_unchecked("newhash"))
            .unwrap();

        let retrieved_user = store.get(user.id()).unwrap();
        assert_eq!(
            retrieved_user.password_hash(),
            &PasswordHash::new_unchecked("newhash")
        );
    }

    #[test]
    fn update_password_fails_for_unknown_user() {
        let store = get_test_store();

        let result = store.update_password(UserID::new(999), PasswordHash::new_unchecked("hash"));

        assert_eq!(result, Err(Error::NotFound));
    }
}
