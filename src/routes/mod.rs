//! Defines the JSON route handlers of the application.

mod category;
mod entry;
mod summary;
mod user;

use axum::http::StatusCode;

pub use category::{create_category, delete_category, get_categories};
pub use entry::{create_entry, delete_entry, get_entries};
pub use summary::get_summary;
pub use user::{UserResponse, change_password, create_user, get_me};

/// Attempt to get a cup of coffee from the server.
pub async fn get_coffee() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}
