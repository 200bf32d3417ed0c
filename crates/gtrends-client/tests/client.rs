//! Integration tests for `TrendsClient` using wiremock HTTP mocks.
//!
//! Every test stands up a local server and points both the widget API base
//! and the batch-execute URL at it, so no real network traffic is made.

use gtrends_client::{
    ComparisonItem, ExploreRequest, RankedTerm, TrendsClient, TrendsConfig, TrendsError,
    WidgetKind,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TrendsClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("gtrends_client=debug")
        .with_test_writer()
        .try_init();

    let config = TrendsConfig {
        api_base_url: format!("{base_url}/trends/api"),
        batch_execute_url: format!("{base_url}/_/TrendsUi/data/batchexecute"),
        request_timeout_secs: Some(5),
        debug: true,
        ..TrendsConfig::default()
    };
    TrendsClient::from_config(&config).expect("client construction should not fail")
}

fn guarded(guard: &str, value: &serde_json::Value) -> String {
    format!("{guard}\n{value}")
}

fn explore_body() -> serde_json::Value {
    json!({
        "widgets": [
            {
                "token": "APP6_ts",
                "type": "fe_line_chart",
                "title": "Interest over time",
                "id": "TIMESERIES",
                "request": {
                    "time": "2024-01-01 2024-12-31",
                    "resolution": "WEEK",
                    "locale": "en-US",
                    "comparisonItem": [{
                        "geo": {},
                        "complexKeywordsRestriction": {
                            "keyword": [{"type": "BROAD", "value": "golang"}]
                        }
                    }],
                    "requestOptions": {"property": "", "backend": "IZG", "category": 0}
                }
            },
            {
                "token": "APP6_rq",
                "type": "fe_related_searches",
                "title": "Related queries",
                "id": "RELATED_QUERIES",
                "request": {
                    "restriction": {
                        "geo": {},
                        "time": "2024-01-01 2024-12-31",
                        "complexKeywordsRestriction": {
                            "keyword": [{"type": "BROAD", "value": "golang"}]
                        }
                    },
                    "keywordType": "QUERY",
                    "metric": ["TOP", "RISING"],
                    "trendinessSettings": {"compareTime": "2023-01-01 2023-12-31"},
                    "requestOptions": {"property": "", "backend": "IZG", "category": 0},
                    "language": "en"
                }
            }
        ]
    })
}

#[tokio::test]
async fn explore_then_timeline_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .and(query_param("hl", "EN"))
        .and(query_param("tz", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(")]}'", &explore_body())))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .and(query_param("token", "APP6_ts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(
            ")]}',",
            &json!({"default": {"timelineData": [
                {"time": "1704067200", "formattedTime": "Jan 1, 2024",
                 "formattedAxisTime": "Jan 1", "value": [73],
                 "hasData": [true], "formattedValue": ["73"]}
            ]}}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = ExploreRequest::new(ComparisonItem::new("golang", "today 12-m"));
    let widgets = client.explore(&request, "EN").await.expect("explore should succeed");

    let timeseries = widgets
        .first_of(WidgetKind::TimeSeries)
        .expect("timeseries widget present");
    let timeline = client
        .interest_over_time(timeseries, "EN")
        .await
        .expect("timeline should succeed");

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].value, vec![73]);
}

#[tokio::test]
async fn related_request_sends_empty_keyed_geo() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(")]}'", &explore_body())))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/relatedsearches"))
        .and(query_param("token", "APP6_rq"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(
            ")]}',",
            &json!({"default": {"rankedList": [
                {"rankedKeyword": [{"query": "golang tutorial", "value": 100,
                    "formattedValue": "100", "hasData": true, "link": "/trends/explore?q=golang+tutorial"}]},
                {"rankedKeyword": []}
            ]}}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = ExploreRequest::new(ComparisonItem::new("golang", "today 12-m"));
    let widgets = client.explore(&request, "EN").await.unwrap();
    let related_widget = &widgets.by_kind(WidgetKind::RelatedQueries)[0];

    let keywords = client.related(related_widget, "EN").await.unwrap();
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].term, RankedTerm::Query("golang tutorial".to_owned()));

    let received = server.received_requests().await.expect("recording enabled");
    let related_call = received
        .iter()
        .find(|r| r.url.path() == "/trends/api/widgetdata/relatedsearches")
        .expect("related request was sent");
    let req = related_call
        .url
        .query_pairs()
        .find(|(k, _)| k == "req")
        .map(|(_, v)| v.into_owned())
        .expect("req param present");
    let req: serde_json::Value = serde_json::from_str(&req).unwrap();
    assert_eq!(req["restriction"]["geo"], json!({"": ""}));
    assert_eq!(req["trendinessSettings"]["compareTime"], "2023-01-01 2023-12-31");
}

#[tokio::test]
async fn rate_limited_request_is_retried_with_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/autocomplete/golang"))
        .and(header("cookie", "NID=511"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(
            ")]}',",
            &json!({"default": {"topics": [
                {"mid": "/m/09gbxjr", "title": "Go", "type": "Programming language"}
            ]}}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/autocomplete/golang"))
        .respond_with(
            ResponseTemplate::new(429).insert_header("set-cookie", "NID=511; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let topics = client
        .search_suggestions("golang", "EN")
        .await
        .expect("retry with cookie should succeed");

    assert_eq!(topics[0].title, "Go");
    assert_eq!(client.session_cookie().as_deref(), Some("NID=511"));
}

#[tokio::test]
async fn rate_limited_request_without_cookie_is_resent_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore/pickers/geo"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore/pickers/geo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#")]}'{"name":"World","id":"","children":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tree = client.locations().await.expect("resend should succeed");

    assert_eq!(tree.name, "World");
    assert!(client.session_cookie().is_none());
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore/pickers/category"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.categories().await.unwrap_err();

    assert!(
        matches!(err, TrendsError::RequestFailed { status: 500, .. }),
        "expected RequestFailed(500), got: {err:?}"
    );
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn categories_hit_network_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore/pickers/category"))
        .and(query_param("hl", "EN"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#")]}'{"name":"All categories","id":0,"children":[{"name":"Computers & Electronics","id":5,"children":[]}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let first = client.categories().await.unwrap();
    let second = client.categories().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.children[0].id, 5);
}

#[tokio::test]
async fn daily_trends_posts_batch_payload() {
    let server = MockServer::start().await;

    let inner = json!([null, [["golang", null, "US", [1_700_000_000]], ["rust", null, "US"]]]);
    let envelope = json!([
        ["wrb.fr", "i0OFE", inner.to_string(), null, null, null, "generic"],
        ["di", 84],
        ["af.httprm", 84, "-1", 12]
    ]);
    let body = format!(")]}}'\n\n{}\n{envelope}\n25\n[[\"e\",4,null,null,321]]\n", envelope.to_string().len());

    Mock::given(method("POST"))
        .and(path("/_/TrendsUi/data/batchexecute"))
        .and(query_param("hl", "EN"))
        .and(header("content-type", "application/x-www-form-urlencoded;charset=UTF-8"))
        .and(body_string_contains(r#"\"US\""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let trends = client.daily_trends("EN", "US").await.unwrap();

    let queries: Vec<&str> = trends.iter().map(|t| t.title.query.as_str()).collect();
    assert_eq!(queries, vec!["golang", "rust"]);
}

#[tokio::test]
async fn daily_trends_without_payload_is_an_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_/TrendsUi/data/batchexecute"))
        .respond_with(ResponseTemplate::new(200).set_body_string(")]}'\n\n25\n[[\"di\",12]]\n"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.daily_trends("EN", "GB").await.unwrap_err();
    assert!(matches!(err, TrendsError::NoValidJson), "got: {err:?}");
}

#[tokio::test]
async fn malformed_widget_data_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = ExploreRequest::new(ComparisonItem::new("golang", "today 12-m"));
    let err = client.explore(&request, "EN").await.unwrap_err();
    assert!(
        matches!(err, TrendsError::Deserialize { ref context, .. } if context == "explore"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn slow_upstream_surfaces_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore/pickers/geo"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(10)))
        .mount(&server)
        .await;

    let config = TrendsConfig {
        api_base_url: format!("{}/trends/api", server.uri()),
        request_timeout_secs: Some(1),
        ..TrendsConfig::default()
    };
    let client = TrendsClient::from_config(&config).unwrap();
    let err = client.locations().await.unwrap_err();
    assert!(matches!(err, TrendsError::Timeout(_)), "got: {err:?}");
}
