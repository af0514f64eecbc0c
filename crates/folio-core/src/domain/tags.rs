//! Tag list normalization for the comma-separated form field.

/// Split a comma-separated tag string, trimming each entry and dropping
/// blanks. Order and duplicates are preserved.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into the form representation.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
