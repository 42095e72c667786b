use regex::Regex;
use std::sync::OnceLock;

static USER_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Checks that `user_id` looks like a catalog user id: between 1 and 50
/// characters, made of ASCII alphanumerics, `.`, `_` and `-`.
#[must_use]
pub fn validate_user_id(user_id: &str) -> bool {
    USER_ID_PATTERN
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]{1,50}$").expect("valid user id pattern"))
        .is_match(user_id)
}
