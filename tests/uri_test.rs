use metanav::config::MetanavConfig;
use metanav::errors::MetanavError;
use metanav::resolution::PathResolver;
use metanav::types::*;

fn fixture() -> Metadata {
    Metadata::from_json(include_str!("fixtures/metadata.json")).expect("fixture should parse")
}

#[test]
fn test_root_without_parameters() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert_eq!(
        resolver.build_uri_template("Contacts").unwrap().as_deref(),
        Some("Contacts/")
    );
}

#[test]
fn test_root_with_parameters() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert_eq!(
        resolver.build_uri_template("ContactById").unwrap().as_deref(),
        Some("ContactById(...)/")
    );
    assert_eq!(
        resolver
            .build_uri_template("ContactById/Orders")
            .unwrap()
            .as_deref(),
        Some("ContactById(...)/Orders/")
    );
}

#[test]
fn test_navigation_and_bound_function_segments() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert_eq!(
        resolver
            .build_uri_template("Contacts/Orders/Total")
            .unwrap()
            .as_deref(),
        Some("Contacts/Orders/Total/")
    );
}

#[test]
fn test_binding_parameter_is_not_rendered() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    // `GetActiveOrders` only has the `this` parameter.
    assert_eq!(
        resolver
            .build_uri_template("Contacts/GetActiveOrders/LineItems")
            .unwrap()
            .as_deref(),
        Some("Contacts/GetActiveOrders/LineItems/")
    );
    // `OrdersSince` has `this` plus a real argument.
    assert_eq!(
        resolver
            .build_uri_template("Contacts/OrdersSince/LineItems")
            .unwrap()
            .as_deref(),
        Some("Contacts/OrdersSince(...)/LineItems/")
    );
}

#[test]
fn test_unknown_root_returns_none() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    assert!(resolver.build_uri_template("Nope").unwrap().is_none());
    assert!(resolver.build_uri_template("Nope/Orders").unwrap().is_none());
}

#[test]
fn test_unknown_segment_propagates_error() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    match resolver.build_uri_template("Contacts/Orders/Unknown").unwrap_err() {
        MetanavError::PropertyNotFound { name } => assert_eq!(name, "Unknown"),
        other => panic!("expected PropertyNotFound, got {other:?}"),
    }
}

#[test]
fn test_uri_template_agrees_with_resolve_on_roots() {
    let metadata = fixture();
    let resolver = PathResolver::new(&metadata).unwrap();

    let paths = [
        "Contacts",
        "ContactById/Orders",
        "Contacts/Orders/LineItems",
        "Nope",
        "Nope/Orders",
        "Total",
        "",
    ];
    for path in paths {
        let resolved = resolver.resolve(path).unwrap();
        let template = resolver.build_uri_template(path).unwrap();
        assert_eq!(
            resolved.is_none(),
            template.is_none(),
            "resolve and build_uri_template disagree on '{path}'"
        );
    }
}

#[test]
fn test_custom_binding_parameter_name() {
    let metadata = fixture();
    let config = MetanavConfig {
        bound_parameter: "self".to_string(),
        ..MetanavConfig::default()
    };
    let resolver = PathResolver::with_config(&metadata, config).unwrap();

    // With a different binding name, `this` counts as a real argument.
    assert_eq!(
        resolver
            .build_uri_template("Contacts/GetActiveOrders")
            .unwrap()
            .as_deref(),
        Some("Contacts/GetActiveOrders(...)/")
    );
}
