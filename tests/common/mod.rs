#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CODES_PATH: &str = "/v1/codes";
pub const TOKEN: &str = "test-token";

pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), CODES_PATH)
}

/// A page of `count` records; every other record is dynamic with 2 scans.
pub fn page(start_id: usize, count: usize) -> Value {
    let items: Vec<Value> = (start_id..start_id + count)
        .map(|id| {
            if id % 2 == 0 {
                json!({
                    "id": id,
                    "created": "2023-08-11T13:13:29.123456Z",
                    "title": format!("Code {}", id),
                    "short_url": format!("https://qr.codes/{}", id),
                    "target_url": "https://example.com",
                    "type_name": "URL",
                    "total_scans": 2,
                    "unique_scans": 1
                })
            } else {
                json!({
                    "id": id,
                    "created": "2023-08-12 08:00:00",
                    "short_url": "",
                    "type_name": "QR Code",
                    "total_scans": 0,
                    "unique_scans": 0
                })
            }
        })
        .collect();
    Value::Array(items)
}

/// Mounts a page response expected exactly `times` times.
pub async fn mount_page(server: &MockServer, number: u32, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(CODES_PATH))
        .and(query_param("access-token", TOKEN))
        .and(query_param("page", number.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}
