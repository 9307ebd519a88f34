//! Default variable names derived from field identifiers.

/// Split an identifier into segments at each uppercase character past the
/// first position.
///
/// `SubStrField` becomes `["Sub", "Str", "Field"]`; identifiers without an
/// inner uppercase character (including snake_case ones) stay whole.
pub fn camel_to_segments(identifier: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (end, c) in identifier.char_indices() {
        if end != 0 && c.is_uppercase() {
            segments.push(&identifier[start..end]);
            start = end;
        }
    }

    if start != identifier.len() {
        segments.push(&identifier[start..]);
    }

    segments
}

/// Derive the environment variable key for a field without an explicit tag.
///
/// ```
/// assert_eq!(envbind::name::derive_key("SubStrField"), "SUB_STR_FIELD");
/// assert_eq!(envbind::name::derive_key("max_connections"), "MAX_CONNECTIONS");
/// ```
pub fn derive_key(identifier: &str) -> String {
    let identifier = identifier.strip_prefix("r#").unwrap_or(identifier);
    camel_to_segments(identifier).join("_").to_uppercase()
}
