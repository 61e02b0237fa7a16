//! This file defines the routing of the application's endpoints.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{
    Error, auth, endpoints,
    routes::{
        change_password, create_category, create_entry, create_user, delete_category,
        delete_entry, get_categories, get_coffee, get_entries, get_me, get_summary,
    },
    state::AppState,
    stores::{CategoryStore, LedgerStore, UserStore},
};

/// Return a router with all the app's routes.
pub fn build_router<C, L, U>(state: AppState<C, L, U>) -> Router
where
    C: CategoryStore + Clone + 'static,
    L: LedgerStore + Clone + 'static,
    U: UserStore + Clone + 'static,
{
    Router::new()
        .route(endpoints::USERS, post(create_user))
        .route(endpoints::SIGN_IN, post(auth::sign_in))
        .route(endpoints::ME, get(get_me))
        .route(endpoints::CHANGE_PASSWORD, put(change_password))
        .route(
            endpoints::CATEGORIES,
            get(get_categories).post(create_category),
        )
        .route(endpoints::CATEGORY, delete(delete_category))
        .route(endpoints::ENTRIES, get(get_entries).post(create_entry))
        .route(endpoints::ENTRY, delete(delete_entry))
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::COFFEE, get(get_coffee))
        .fallback(not_found)
        .with_state(state)
}

/// Unknown paths produce the same JSON error shape as the API routes.
async fn not_found() -> Error {
    Error::NotFound
}
