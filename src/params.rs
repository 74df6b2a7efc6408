// Pure helpers for reading init-time parameters from the page URL.

/// Look up `key` in a `location.search` string such as `"?target=2027-01-01T00:00:00&x=1"`.
///
/// `%3A` and `+` are decoded since ISO timestamps typically arrive with them.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.replace("%3A", ":").replace("%3a", ":").replace('+', " "))
        .filter(|v| !v.is_empty())
}
