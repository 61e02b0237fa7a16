//! This file defines the route handler for the monthly summary.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    aggregation::compute_monthly_summary,
    auth::Claims,
    models::{MonthlySummary, Period},
    state::AppState,
    stores::LedgerStore,
};

/// Handles requests for the signed-in user's monthly summary.
///
/// # Errors
///
/// This function will return an [Error::InvalidPeriod] if the year or month
/// fall outside the supported ranges.
pub async fn get_summary<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Json<MonthlySummary>, Error>
where
    C: Clone,
    L: LedgerStore + Clone,
    U: Clone,
{
    let period = Period::new(year, month)?;

    compute_monthly_summary(&state.ledger_store, claims.user_id(), period).map(Json)
}
