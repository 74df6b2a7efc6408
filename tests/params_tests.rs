// Host-side tests for URL parameter parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

mod params {
    include!("../src/params.rs");
}

use params::query_param;

#[test]
fn finds_key_with_or_without_leading_question_mark() {
    assert_eq!(
        query_param("?target=2027-01-01", "target").as_deref(),
        Some("2027-01-01")
    );
    assert_eq!(
        query_param("a=1&target=2027-01-01", "target").as_deref(),
        Some("2027-01-01")
    );
}

#[test]
fn decodes_encoded_iso_timestamps() {
    let v = query_param("?x=1&target=2027-01-01T00%3A00%3A00", "target");
    assert_eq!(v.as_deref(), Some("2027-01-01T00:00:00"));
    let v = query_param("?target=Jan+1+2027", "target");
    assert_eq!(v.as_deref(), Some("Jan 1 2027"));
}

#[test]
fn missing_or_empty_values_are_none() {
    assert_eq!(query_param("", "target"), None);
    assert_eq!(query_param("?", "target"), None);
    assert_eq!(query_param("?target=", "target"), None);
    assert_eq!(query_param("?targets=2027", "target"), None);
    assert_eq!(query_param("?target", "target"), None);
}

#[test]
fn first_occurrence_wins() {
    let v = query_param("?target=a&target=b", "target");
    assert_eq!(v.as_deref(), Some("a"));
}
