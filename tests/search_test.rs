use metanav::config::MetanavConfig;
use metanav::resolution::PathResolver;
use metanav::types::*;

fn fixture() -> Metadata {
    Metadata::from_json(include_str!("fixtures/metadata.json")).expect("fixture should parse")
}

fn names(results: &[EntityType]) -> Vec<&str> {
    results.iter().map(|e| e.full_name.as_str()).collect()
}

#[test]
fn test_empty_query_returns_all_non_system_entities() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    let expected = vec![
        "Contact",
        "lineItem",
        "Order",
        "Collection(Contact)",
        "Collection(LineItem)",
    ];
    assert_eq!(names(&resolver.search_entities(None)), expected);
    assert_eq!(names(&resolver.search_entities(Some(""))), expected);
}

#[test]
fn test_query_is_case_insensitive_substring() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert_eq!(
        names(&resolver.search_entities(Some("LINE"))),
        vec!["lineItem", "Collection(LineItem)"]
    );
    assert_eq!(
        names(&resolver.search_entities(Some("contact"))),
        vec!["Contact", "Collection(Contact)"]
    );
    assert!(resolver.search_entities(Some("zzz")).is_empty());
}

#[test]
fn test_system_entities_are_hidden() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert!(resolver.search_entities(Some("SP.Data")).is_empty());
    assert!(resolver
        .search_entities(None)
        .iter()
        .all(|e| !e.full_name.contains("SP.Data.")));
}

#[test]
fn test_collections_follow_plain_entities() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    let results = resolver.search_entities(None);
    let first_collection = results
        .iter()
        .position(|e| e.full_name.starts_with("Collection("))
        .expect("fixture has collections");
    assert!(results[first_collection..]
        .iter()
        .all(|e| e.full_name.starts_with("Collection(")));
}

#[test]
fn test_custom_markers() {
    let metadata = fixture();
    let config = MetanavConfig {
        hidden_markers: Vec::new(),
        ..MetanavConfig::default()
    };
    let resolver = PathResolver::with_config(&metadata, config).unwrap();

    assert_eq!(
        names(&resolver.search_entities(Some("sp.data"))),
        vec!["SP.Data.ContactsListItem"]
    );
}

#[test]
fn test_results_are_independent_copies() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    let mut results = resolver.search_entities(Some("Order"));
    results[0].full_name = "Changed".to_string();
    results[0].properties.clear();

    assert_eq!(metadata.entities["Order"].properties.len(), 1);
    assert_eq!(names(&resolver.search_entities(Some("Order"))), vec!["Order"]);
}

#[test]
fn test_search_orders_punctuation_before_digits() {
    let json = r#"{
        "entities": {
            "SP1": { "fullName": "SP1" },
            "SP_X": { "fullName": "SP_X" },
            "SP.X": { "fullName": "SP.X" },
            "SP(X": { "fullName": "SP(X" },
            "SP-X": { "fullName": "SP-X" },
            "SP.x": { "fullName": "SP.x" }
        }
    }"#;
    let metadata = Metadata::from_json(json).unwrap();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert_eq!(
        names(&resolver.search_entities(None)),
        vec!["SP_X", "SP-X", "SP.x", "SP.X", "SP(X", "SP1"]
    );
}
