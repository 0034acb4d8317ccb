//! Environment and configuration utilities.

use std::env;

/// Environment variable holding a pre-resolved bearer token.
pub const BEARER_TOKEN_ENV: &str = "X_BEARER_TOKEN";

/// Secret reference handed to the secret provider when no bearer token
/// is present in the environment.
pub const DEFAULT_SECRET_REFERENCE: &str = "op://Private/X API/bearer_token";

/// The recent-search endpoint. Only covers the last 7 days.
pub const SEARCH_ENDPOINT: &str = "https://api.x.com/2/tweets/search/recent";

/// Host used when building canonical links to posts.
pub const SITE: &str = "x.com";

/// Returns the bearer token stored in `$X_BEARER_TOKEN`, if any.
///
/// A variable that is unset, blank, or not valid Unicode is treated as
/// absent. Surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use xrecent::conf::bearer_token_from_env;
/// # use temp_env::with_var;
/// # with_var("X_BEARER_TOKEN", Some("  AAAA  "), || {
/// assert_eq!(bearer_token_from_env(), Some("AAAA".to_string()));
/// # });
/// ```
///
/// ```
/// use xrecent::conf::bearer_token_from_env;
/// # use temp_env::with_var;
/// # with_var("X_BEARER_TOKEN", Some("   "), || {
/// assert_eq!(bearer_token_from_env(), None);
/// # });
/// ```
pub fn bearer_token_from_env() -> Option<String> {
    env::var(BEARER_TOKEN_ENV)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
