use spotdash::source::{HttpPriceSource, PriceSource, StaticPriceSource, parse_price_response};
use spotdash::{DashError, RawPriceRecord, SourceConfig};

const BODY: &str = r#"{
    "prices": [
        { "price": 12.5, "startDate": "2024-01-01T01:00:00.000Z", "endDate": "2024-01-01T02:00:00.000Z" },
        { "price": 3.75, "startDate": "2024-01-01T00:00:00.000Z", "endDate": "2024-01-01T01:00:00.000Z" }
    ]
}"#;

#[test]
fn response_body_decodes_in_feed_order() {
    let records = parse_price_response(BODY).expect("records");

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        RawPriceRecord::new(12.5, "2024-01-01T01:00:00.000Z", "2024-01-01T02:00:00.000Z")
    );
    assert_eq!(records[1].price, Some(3.75));
}

#[test]
fn invalid_json_is_malformed_payload() {
    let err = parse_price_response("<html>busy</html>").expect_err("not json");
    assert!(matches!(err, DashError::MalformedPayload(_)));
    assert!(err.is_upstream());
}

#[test]
fn missing_or_empty_prices_mean_no_data() {
    for body in [r#"{}"#, r#"{"prices": null}"#, r#"{"prices": {}}"#, r#"{"prices": []}"#] {
        let err = parse_price_response(body).expect_err("no data");
        assert!(matches!(err, DashError::NoPriceData), "body {body}");
    }
}

#[test]
fn malformed_entries_are_kept_for_normalization() {
    let records = parse_price_response(r#"{"prices": [42, {"price": "n/a"}]}"#).expect("records");

    assert_eq!(records, vec![RawPriceRecord::default(), RawPriceRecord::default()]);
}

#[test]
fn static_source_variants_map_to_errors() {
    assert_eq!(
        StaticPriceSource::body(BODY).fetch_latest().expect("body").len(),
        2
    );

    let status = StaticPriceSource::Status(503)
        .fetch_latest()
        .expect_err("status");
    assert!(matches!(status, DashError::FetchStatus { status: 503 }));
    assert_eq!(status.to_string(), "Failed to fetch electricity prices: 503");

    let transport = StaticPriceSource::Transport("connection reset".to_owned())
        .fetch_latest()
        .expect_err("transport");
    assert!(matches!(transport, DashError::Transport(_)));
    assert!(transport.is_upstream());

    let empty = StaticPriceSource::records(Vec::new())
        .fetch_latest()
        .expect_err("empty");
    assert!(matches!(empty, DashError::NoPriceData));
}

fn fetch_via<S: PriceSource>(source: S) -> Vec<RawPriceRecord> {
    source.fetch_latest().expect("records")
}

#[test]
fn boxed_and_borrowed_sources_delegate() {
    let records = vec![RawPriceRecord::new(1.0, "a", "b")];
    let boxed: Box<dyn PriceSource> = Box::new(StaticPriceSource::records(records.clone()));

    assert_eq!(fetch_via(&boxed), records);
    assert_eq!(fetch_via(boxed), records);
}

#[test]
fn http_source_keeps_configured_url() {
    let config = SourceConfig {
        url: "http://127.0.0.1:9/latest-prices.json".to_owned(),
        timeout_secs: Some(2),
    };
    let source = HttpPriceSource::new(&config).expect("client");

    assert_eq!(source.url(), "http://127.0.0.1:9/latest-prices.json");
}
