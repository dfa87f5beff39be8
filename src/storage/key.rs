/// Prefix for the persisted search/filter selections
pub const FILTERS_PREFIX: &str = "cineflix_filters_";

/// Prefix for the persisted chat transcript
pub const CHAT_PREFIX: &str = "cineflix_chat_";

/// Scope used when nobody is logged in
pub const GUEST: &str = "guest";

/// Derives the storage key for `prefix` scoped to `identity`
///
/// A missing or empty identity maps to the guest scope, so `None` and
/// `Some("")` share one key.
pub fn derive_key(prefix: &str, identity: Option<&str>) -> String {
    let scope = match identity {
        Some(name) if !name.is_empty() => name,
        _ => GUEST,
    };
    format!("{}{}", prefix, scope)
}
