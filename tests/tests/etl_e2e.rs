//! End-to-end runs of the pipeline over temporary files.

use etl_core::RawUser;
use integration_tests::{fixtures, setup::TestContext};
use pipeline::extract;

const ACTIVITIES_HEADER: &str = "user_id,time_stamp,url_level1,url_level2,url_level3,activity";
const AGG_HEADER: &str = "time_bucket,url_level1,url_level2,activity,activity_count,user_count";

/// Reading the single-event fixture yields that event unchanged.
#[test]
fn test_reads_fixture_file() {
    let extraction = extract(
        fixtures::data_file("test_source_event_data.json"),
        fixtures::schema_path(),
    )
    .expect("extraction failed");

    assert_eq!(extraction.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.event_id, "556768754511595");
    assert_eq!(
        record.user,
        RawUser {
            session_id: "580633".into(),
            id: 66374,
            ip: "111.222.33.5".into(),
        }
    );
    assert_eq!(record.action, "page_view");
    assert_eq!(record.url.as_deref(), Some("https://www.hipages.com.au/articles"));
    assert_eq!(record.timestamp, "02/02/2017 20:26:00");
}

/// A truncated JSON line is skipped and the rest of the file is still read.
#[test]
fn test_ignores_invalid_json_line() {
    let extraction = extract(
        fixtures::data_file("test_invalid_json_source_event_data.json"),
        fixtures::schema_path(),
    )
    .expect("extraction failed");

    assert_eq!(extraction.len(), 1);
    assert_eq!(extraction.malformed, 1);
    assert_eq!(extraction.records[0].event_id, "556768754511595");
}

/// Five events on one page in one hour aggregate into two groups.
#[test]
fn test_full_run_aggregates_activities_and_users() {
    let ctx = TestContext::with_events(&[
        fixtures::article_event("1", 66374, "page_view"),
        fixtures::article_event("2", 66374, "page_view"),
        fixtures::article_event("3", 66374, "button_click"),
        fixtures::article_event("4", 66375, "page_view"),
        fixtures::article_event("5", 66375, "button_click"),
    ]);

    let summary = pipeline::run(&ctx.config).expect("run failed");
    assert_eq!(summary.events, 5);
    assert_eq!(summary.activity_rows, 5);
    assert_eq!(summary.agg_rows, 2);

    let expected_agg = format!(
        "{AGG_HEADER}\n\
         2017020220,www.hipages.com.au,articles,button_click,2,2\n\
         2017020220,www.hipages.com.au,articles,page_view,3,2\n"
    );
    assert_eq!(ctx.agg_events(), expected_agg);

    let activities = ctx.user_activities();
    let lines: Vec<_> = activities.lines().collect();
    assert_eq!(lines[0], ACTIVITIES_HEADER);
    assert_eq!(
        lines[1],
        "66374,2017-02-02 20:26:00,www.hipages.com.au,articles,,page_view"
    );
    assert_eq!(
        lines[5],
        "66375,2017-02-02 20:26:00,www.hipages.com.au,articles,,button_click"
    );
}

/// Activity rows keep input order and include events that form no aggregate group.
#[test]
fn test_activities_keep_order_and_shallow_urls() {
    let ctx = TestContext::with_events(&[
        fixtures::raw_event("1", 7, "page_view", "https://www.hipages.com.au/", "2017-02-02 09:00:00"),
        fixtures::raw_event("2", 8, "claim", "www.hipages.com.au/find/electricians", "2017-02-02 10:15:00"),
        fixtures::raw_event("3", 9, "page_view", "", "2017-02-02 11:30:00"),
    ]);

    let summary = pipeline::run(&ctx.config).expect("run failed");
    assert_eq!(summary.activity_rows, 3);
    assert_eq!(summary.agg_rows, 1);

    let expected_activities = format!(
        "{ACTIVITIES_HEADER}\n\
         7,2017-02-02 09:00:00,www.hipages.com.au,,,page_view\n\
         8,2017-02-02 10:15:00,www.hipages.com.au,find,electricians,claim\n\
         9,2017-02-02 11:30:00,,,,page_view\n"
    );
    assert_eq!(ctx.user_activities(), expected_activities);

    let expected_agg = format!("{AGG_HEADER}\n2017020210,www.hipages.com.au,find,claim,1,1\n");
    assert_eq!(ctx.agg_events(), expected_agg);
}

/// Malformed and schema-invalid lines never reach the outputs.
#[test]
fn test_invalid_records_are_dropped() {
    let mut missing_session = fixtures::article_event("2", 2, "page_view");
    missing_session["user"]
        .as_object_mut()
        .unwrap()
        .remove("session_id");

    let source = [
        fixtures::article_event("1", 1, "page_view").to_string(),
        "not json at all".to_string(),
        missing_session.to_string(),
        fixtures::article_event("3", 3, "page_view").to_string(),
    ]
    .join("\n");
    let ctx = TestContext::with_source(&source);

    let summary = pipeline::run(&ctx.config).expect("run failed");
    assert_eq!(summary.lines_read, 4);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.events, 2);
    assert!(summary.events <= summary.lines_read);

    assert_eq!(ctx.user_activities().lines().count(), 3);
    assert_eq!(
        ctx.agg_events(),
        format!("{AGG_HEADER}\n2017020220,www.hipages.com.au,articles,page_view,2,2\n")
    );
}

/// An empty feed still produces both tables with headers.
#[test]
fn test_empty_source_writes_headers_only() {
    let ctx = TestContext::with_source("");

    let summary = pipeline::run(&ctx.config).expect("run failed");
    assert_eq!(summary.events, 0);

    assert_eq!(ctx.user_activities(), format!("{ACTIVITIES_HEADER}\n"));
    assert_eq!(ctx.agg_events(), format!("{AGG_HEADER}\n"));
}
