//! This file defines the route handlers for listing, creating and deleting
//! categories.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    Error,
    auth::Claims,
    models::{Category, CategoryName, DatabaseID, Kind},
    state::AppState,
    stores::CategoryStore,
};

/// The request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// The name of the new category.
    pub name: String,
}

/// Handles requests to list the signed-in user's categories of one kind.
pub async fn get_categories<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path(kind): Path<Kind>,
) -> Result<Json<Vec<Category>>, Error>
where
    C: CategoryStore + Clone,
    L: Clone,
    U: Clone,
{
    state
        .category_store
        .get_by_user(kind, claims.user_id())
        .map(Json)
}

/// Handles requests to create a category.
///
/// # Errors
///
/// This function will return a:
/// - [Error::EmptyCategoryName] if the name is an empty string,
/// - [Error::DuplicateCategory] if the user already has a category of this
///   kind with the same name.
pub async fn create_category<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path(kind): Path<Kind>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore + Clone,
    L: Clone,
    U: Clone,
{
    let name = CategoryName::new(&request.name)?;

    let category = state.category_store.create(name, kind, claims.user_id())?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Handles requests to delete a category and its entries.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if the category does not
/// exist or belongs to another user.
pub async fn delete_category<C, L, U>(
    State(state): State<AppState<C, L, U>>,
    claims: Claims,
    Path((kind, category_id)): Path<(Kind, DatabaseID)>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore + Clone,
    L: Clone,
    U: Clone,
{
    state
        .category_store
        .delete(category_id, kind, claims.user_id())?;

    Ok(StatusCode::NO_CONTENT)
}
