//! Defines the endpoints (path constants) for the application.
//!
//! Paths with `{...}` are parameterized, see the axum docs on path extractors
//! for details.

/// Register a new user.
pub const USERS: &str = "/api/users";

/// Exchange credentials for an auth token.
pub const SIGN_IN: &str = "/api/sign_in";

/// The authenticated user's own account details.
pub const ME: &str = "/api/users/me";

/// Change the authenticated user's password.
pub const CHANGE_PASSWORD: &str = "/api/users/me/password";

/// List or create categories of one kind ("income" or "expense").
pub const CATEGORIES: &str = "/api/{kind}/categories";

/// Delete a single category.
pub const CATEGORY: &str = "/api/{kind}/categories/{category_id}";

/// List or create ledger entries of one kind.
pub const ENTRIES: &str = "/api/{kind}/entries";

/// Delete a single ledger entry.
pub const ENTRY: &str = "/api/{kind}/entries/{entry_id}";

/// The monthly summary of the authenticated user's ledger.
pub const SUMMARY: &str = "/api/summary/{year}/{month}";

/// For those with particular tastes in tea.
pub const COFFEE: &str = "/api/coffee";
