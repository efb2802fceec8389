//! Replay the JSON cases in `test-vectors/` through a recording transport.
//!
//! Each case gives a URL and configuration, the request the transport must
//! see, a simulated response or failure, and the expected result in its JSON
//! contract form. Comparing parsed JSON avoids false negatives from field
//! ordering.

use std::cell::RefCell;

use fetch_core::{
    ApiResponse, FetchClient, FetchConfig, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError,
};
use serde_json::Value;

/// Hands back one scripted reply and keeps the request it was given.
struct ScriptedTransport {
    reply: Value,
    seen: RefCell<Option<HttpRequest>>,
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.seen.borrow_mut() = Some(request.clone());
        if let Some(message) = self.reply.get("simulated_failure") {
            return Err(TransportError::Other(message.as_str().unwrap().to_string()));
        }
        let sim = &self.reply["simulated_response"];
        Ok(HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            status_text: sim["status_text"].as_str().unwrap().to_string(),
            body: sim["body"].as_str().unwrap().to_string(),
        })
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn expected_headers(raw: &Value) -> Vec<(String, String)> {
    raw.as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

#[test]
fn fetch_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let config: FetchConfig = serde_json::from_value(case["config"].clone()).unwrap();

        let transport = ScriptedTransport {
            reply: case.clone(),
            seen: RefCell::new(None),
        };
        let client = FetchClient::with_transport(&transport);
        let result: ApiResponse<Value> = client.fetch_data(url, &config);

        let sent = transport.seen.borrow().clone().expect("transport was not called");
        let expected_req = &case["expected_request"];
        assert_eq!(sent.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(sent.url, expected_req["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(sent.headers, expected_headers(&expected_req["headers"]), "{name}: headers");

        assert_eq!(serde_json::to_value(&result).unwrap(), case["expected_result"], "{name}: result");
    }
}

#[test]
fn build_request_matches_vectors() {
    let raw = include_str!("../../test-vectors/fetch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let client = FetchClient::new();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config: FetchConfig = serde_json::from_value(case["config"].clone()).unwrap();

        let req = client.build_request(case["url"].as_str().unwrap(), &config).unwrap();

        assert_eq!(req.url, case["expected_request"]["url"].as_str().unwrap(), "{name}: url");
    }
}
