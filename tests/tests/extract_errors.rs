//! Fatal failures abort the run before any output is written.

use etl_core::{is_valid_data, Error};
use integration_tests::{fixtures, setup::TestContext};
use pipeline::extract;

#[test]
fn test_missing_source_file_fails() {
    let err = extract("invalid_path.json", fixtures::schema_path()).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert_eq!(err.error_code(), "ETL_004");
}

#[test]
fn test_missing_source_file_writes_nothing() {
    let mut ctx = TestContext::with_events(&[fixtures::article_event("1", 1, "page_view")]);
    ctx.config.source_path = ctx.path("missing.json");

    let err = pipeline::run(&ctx.config).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert!(!ctx.outputs_exist());
}

#[test]
fn test_missing_schema_file_fails() {
    let mut ctx = TestContext::with_events(&[fixtures::article_event("1", 1, "page_view")]);
    ctx.config.schema_path = ctx.path("missing_schema.json");

    let err = pipeline::run(&ctx.config).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert!(!ctx.outputs_exist());
}

#[test]
fn test_invalid_schema_aborts_run() {
    let mut ctx = TestContext::with_events(&[fixtures::article_event("1", 1, "page_view")]);
    ctx.config.schema_path = fixtures::invalid_schema_path();

    let err = pipeline::run(&ctx.config).unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));
    assert!(err.is_fatal());
    assert!(!ctx.outputs_exist());
}

#[test]
fn test_validator_tri_state() {
    let schema: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixtures::schema_path()).unwrap()).unwrap();
    let invalid_schema: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixtures::invalid_schema_path()).unwrap())
            .unwrap();

    let doc = fixtures::article_event("1", 1, "claim");
    assert!(is_valid_data(&doc, &schema).unwrap());

    let mut bad_doc = doc.clone();
    bad_doc["user"].as_object_mut().unwrap().remove("session_id");
    assert!(!is_valid_data(&bad_doc, &schema).unwrap());

    assert!(matches!(
        is_valid_data(&doc, &invalid_schema),
        Err(Error::InvalidSchema(_))
    ));
}

#[test]
fn test_unparseable_timestamp_aborts_run() {
    let ctx = TestContext::with_events(&[
        fixtures::article_event("1", 1, "page_view"),
        fixtures::raw_event("2", 2, "page_view", "https://www.hipages.com.au/articles", "soon"),
    ]);

    let err = pipeline::run(&ctx.config).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp(_)));
    assert!(!ctx.outputs_exist());
}
