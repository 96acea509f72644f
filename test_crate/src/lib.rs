//! Helpers shared by the integration tests.

/// Owned `(key, value)` pairs, the shape `parse_str_to_vec` returns.
pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The pairs of a store in its iteration order.
pub fn items(props: &jproperties::Properties) -> Vec<(String, String)> {
    props
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
