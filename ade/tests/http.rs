// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Fetcher integration tests with wiremock.

use edtcal_ade::{Fetch, FeedConfig, FeedError, FeedId, HttpFetcher, Kind, QueryDescriptor, parse};
use jiff::civil::date;
use jiff::tz::TimeZone;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query() -> QueryDescriptor {
    QueryDescriptor::new(
        FeedId {
            project: 2024,
            resource: 1234,
        },
        Kind::Room,
        date(2025, 10, 25),
        None,
        None,
    )
    .expect("empty window is valid")
}

fn fetcher(server: &MockServer) -> HttpFetcher {
    let config = FeedConfig {
        base_url: format!("{}/update/index.php", server.uri()),
        ..Default::default()
    };
    HttpFetcher::new(config).expect("Failed to create fetcher")
}

#[tokio::test]
async fn fetcher_sends_feed_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/update/index.php"))
        .and(query_param("adeBase", "2024"))
        .and(query_param("adeRessources", "1234"))
        .and(query_param("lastUpdate", "0"))
        .and(query_param("date", "2025-10-25"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = fetcher(&server)
        .fetch(&query())
        .await
        .expect("Failed to fetch");

    assert_eq!(payload.content_type.as_deref(), Some("application/json"));
    assert_eq!(payload.body, b"[]");
}

#[tokio::test]
async fn fetcher_surfaces_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/update/index.php"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = fetcher(&server).fetch(&query()).await.unwrap_err();
    match err {
        FeedError::Http(msg) => assert!(msg.contains("502"), "unexpected message: {msg}"),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetched_payload_parses_end_to_end() {
    let body = r#"{
        "2025-10-25": {
            "lastUpdate": 0,
            "content": [
                {"DTSTART": "20251025T080000", "DTEND": "20251025T100000", "SUMMARY": "Analyse"}
            ]
        }
    }"#;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/update/index.php"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let payload = fetcher(&server)
        .fetch(&query())
        .await
        .expect("Failed to fetch");
    let (events, _) = parse(&payload.body, payload.content_type.as_deref(), &TimeZone::UTC)
        .expect("Failed to parse");

    assert_eq!(events.len(), 1);
    assert_eq!(events.first().unwrap().summary, "Analyse");
}
