//! Verify request planning against JSON vectors stored in `test-vectors/`.
//!
//! Each vector names an operation, an argument bag, and either the expected
//! request shape or the expected error kind. Bodies are compared as parsed
//! JSON so field ordering never causes false negatives.

use serde_json::{Map, Value};
use timetrack_core::{ApiClient, Config, Dispatcher, HttpMethod};

fn dispatcher() -> Dispatcher {
    Dispatcher::new(ApiClient::new(Config::new("test-token", "http://localhost:3000")).unwrap())
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

#[test]
fn request_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let d = dispatcher();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let args: Map<String, Value> = case["args"].as_object().cloned().unwrap();

        if let Some(expected_kind) = case.get("expected_error") {
            let err = d
                .plan_request(operation, &args)
                .expect_err(&format!("{name}: expected an error"));
            assert_eq!(
                &serde_json::to_value(err.kind()).unwrap(),
                expected_kind,
                "{name}: error kind"
            );
            continue;
        }

        let expected = &case["expected_request"];
        let request = d
            .plan_request(operation, &args)
            .unwrap_or_else(|e| panic!("{name}: planning failed: {e}"));

        assert_eq!(
            request.method,
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(request.path, expected["path"].as_str().unwrap(), "{name}: path");

        let expected_query: Vec<(String, String)> = expected["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let pair = pair.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(request.query, expected_query, "{name}: query");

        match (&request.body, &expected["body"]) {
            (None, Value::Null) => {}
            (Some(body), expected_body) => assert_eq!(body, expected_body, "{name}: body"),
            (None, expected_body) => panic!("{name}: expected body {expected_body}, got none"),
        }
    }
}
