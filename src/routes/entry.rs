//! This file defines the route handlers for listing, creating and deleting
//! ledger entries.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    auth::Claims,
    models::{Amount, DatabaseID, Kind, LedgerEntry, NewEntry, normalize_description},
    state::AppState,
    stores::{LedgerQuery, LedgerStore},
};

/// The request body for creating a ledger entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// The ID of the category the entry belongs to.
    pub category_id: DatabaseID,
    /// The monetary value of the entry.
    pub amount: Decimal,
    /// An optional free-form note. An empty string counts as absent.
    #[serde(default)]
    pub description: Option<String>,
    /// The calendar date the entry applies to.
    pub date: Date,
}

/// Handles requests to list the signed-in user's entries of one kind, newest
/// first.
pub async fn get_entries<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path(kind): Path<Kind>,
) -> Result<Json<Vec<LedgerEntry>>, Error>
where
    C: Clone,
    L: LedgerStore + Clone,
    U: Clone,
{
    state
        .ledger_store
        .get_query(LedgerQuery {
            user_id: claims.user_id(),
            kind,
            date_range: None,
        })
        .map(Json)
}

/// Handles requests to create a ledger entry.
///
/// # Errors
///
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or has more than two
///   decimal places,
/// - [Error::NotFound] if the category does not exist under the signed-in
///   user and kind.
pub async fn create_entry<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path(kind): Path<Kind>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<LedgerEntry>), Error>
where
    C: Clone,
    L: LedgerStore + Clone,
    U: Clone,
{
    let amount = Amount::new(request.amount)?;

    let entry = state.ledger_store.create(NewEntry {
        user_id: claims.user_id(),
        kind,
        category_id: request.category_id,
        amount,
        description: normalize_description(request.description),
        date: request.date,
    })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handles requests to delete a ledger entry.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if the entry does not exist
/// or belongs to another user.
pub async fn delete_entry<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path((kind, entry_id)): Path<(Kind, DatabaseID)>,
) -> Result<StatusCode, Error>
where
    C: Clone,
    L: LedgerStore + Clone,
    U: Clone,
{
    state
        .ledger_store
        .delete(entry_id, kind, claims.user_id())?;

    Ok(StatusCode::NO_CONTENT)
}
