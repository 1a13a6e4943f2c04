mod common;

use common::{TOKEN, endpoint, mount_page, page};
use qrcg_stats::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stats_service(server: &MockServer) -> StatsService<ReqwestTransport> {
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    StatsService::new(InventoryService::new(Arc::new(transport), endpoint(server)))
}

#[tokio::test]
async fn test_stops_after_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page(0, 20), 1).await;
    mount_page(&server, 2, page(20, 20), 1).await;
    mount_page(&server, 3, page(40, 15), 1).await;
    mount_page(&server, 4, page(55, 20), 0).await;

    let report = stats_service(&server).collect(TOKEN, None).await;

    assert_eq!(report.fetched, 55);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.termination, Termination::Completed);
    assert_eq!(report.aggregate.dynamic_count, 28);
    assert_eq!(report.aggregate.static_count, 27);
    assert_eq!(report.aggregate.total_scans_all_time, 56);
}

#[tokio::test]
async fn test_window_filters_records() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({
            "data": [
                { "id": 1, "created": "2023-08-11T13:13:29.123456Z", "short_url": "abc", "total_scans": 10 },
                { "id": 2, "created": "2023-09-02 10:00:00", "short_url": "def", "total_scans": 99 },
                { "id": 3, "created": "not-a-date", "short_url": "", "total_scans": 5 }
            ]
        }),
        1,
    )
    .await;

    let window = DateWindow::parse("2023-08-01", "2023-08-31").unwrap();
    let report = stats_service(&server).collect(TOKEN, window.as_ref()).await;

    assert_eq!(report.fetched, 3);
    assert_eq!(report.excluded(), 1);
    assert_eq!(report.aggregate.dynamic_count, 1);
    assert_eq!(report.aggregate.static_count, 1);
    assert_eq!(report.aggregate.total_scans_all_time, 10);

    let ids: Vec<&str> = report.aggregate.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_empty_inventory() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([]), 1).await;
    mount_page(&server, 2, json!([]), 0).await;

    let report = stats_service(&server).collect(TOKEN, None).await;

    assert_eq!(report.termination, Termination::Empty);
    assert!(report.aggregate.is_empty());
    assert_eq!(report.aggregate.total_scans_all_time, 0);
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page(0, 20), 1).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 3, page(40, 20), 0).await;

    let report = stats_service(&server).collect(TOKEN, None).await;

    assert!(report.is_partial());
    assert_eq!(report.fetched, 20);
    assert_eq!(
        report.termination,
        Termination::Failed(FetchError::Status {
            page: 2,
            status: 429,
            body: "rate limited".to_string(),
        })
    );
}

#[tokio::test]
async fn test_invalid_token_on_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid token" })))
        .expect(1)
        .mount(&server)
        .await;

    let report = stats_service(&server).collect("wrong", None).await;

    assert_eq!(report.fetched, 0);
    assert!(matches!(
        report.termination.error(),
        Some(FetchError::Status { page: 1, status: 401, .. })
    ));
}
