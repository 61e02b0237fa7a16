//! This file defines the top-level application state shared between route
//! handlers, and the substates extractors pull out of it.

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};

/// The keys for signing and verifying auth tokens.
#[derive(Clone)]
pub struct JwtKeys {
    /// The key for signing new tokens.
    pub encoding: EncodingKey,
    /// The key for verifying presented tokens.
    pub decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive the signing and verification keys from a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// The state of the application, to be shared between route handlers.
///
/// Generic over the store types so that route handlers can be tested against
/// lightweight fakes instead of a real database.
#[derive(Clone)]
pub struct AppState<C, L, U> {
    /// The keys for signing and verifying auth tokens.
    pub jwt_keys: JwtKeys,
    /// The bcrypt cost used when hashing new passwords. Tests use a low cost
    /// to keep hashing fast.
    pub hash_cost: u32,
    /// The store for categories.
    pub category_store: C,
    /// The store for ledger entries.
    pub ledger_store: L,
    /// The store for users.
    pub user_store: U,
}

impl<C, L, U> AppState<C, L, U> {
    /// Create the application state.
    pub fn new(
        jwt_secret: &str,
        hash_cost: u32,
        category_store: C,
        ledger_store: L,
        user_store: U,
    ) -> Self {
        Self {
            jwt_keys: JwtKeys::from_secret(jwt_secret),
            hash_cost,
            category_store,
            ledger_store,
            user_store,
        }
    }
}

/// The state needed to verify auth tokens.
///
/// The claims extractor pulls this out of the full application state, so it
/// does not need to know the concrete store types.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying presented tokens.
    pub decoding_key: DecodingKey,
}

impl<C: Clone, L: Clone, U: Clone> FromRef<AppState<C, L, U>> for AuthState {
    fn from_ref(state: &AppState<C, L, U>) -> Self {
        Self {
            decoding_key: state.jwt_keys.decoding.clone(),
        }
    }
}
