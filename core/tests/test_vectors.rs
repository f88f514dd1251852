//! Verify request building and response classification against the JSON
//! vectors in `test-vectors/send.json`.
//!
//! Each case describes a `RequestSpec`, the request the client must build,
//! a simulated response, and either the parsed result or the failure.
//! Bodies are compared as parsed JSON so field order does not matter.

use std::convert::Infallible;

use course_client::{
    ClientConfig, FailureKind, HttpMethod, HttpRequest, HttpResponse, RequestClient, RequestSpec,
    Transport,
};
use serde_json::Value;

/// Replays one simulated response.
struct Replay(HttpResponse);

impl Transport for Replay {
    type Error = Infallible;

    fn execute(&self, _: &HttpRequest) -> Result<HttpResponse, Infallible> {
        Ok(self.0.clone())
    }
}

fn parse_kind(s: &str) -> FailureKind {
    match s {
        "Transport" => FailureKind::Transport,
        "HttpStatus" => FailureKind::HttpStatus,
        "Decode" => FailureKind::Decode,
        other => panic!("unknown failure kind: {other}"),
    }
}

#[test]
fn send_test_vectors() {
    let raw = include_str!("../../test-vectors/send.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let base_url = vectors["base_url"].as_str().unwrap();
    let config = ClientConfig::new(base_url).session_token(vectors["session_token"].as_str().unwrap());
    let c = RequestClient::new(config);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let method: HttpMethod = input["method"].as_str().unwrap_or("GET").parse().unwrap();
        let mut spec = RequestSpec::new(input["path"].as_str().unwrap(), method);
        if let Some(body) = input.get("body") {
            spec = spec.with_body(body.clone());
        }

        // Verify build
        let expected_req = &case["expected_request"];
        let req = c.build_request(&spec);
        assert_eq!(req.method.as_str(), expected_req["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(req.url, format!("{base_url}{}", expected_req["url"].as_str().unwrap()), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match &expected_req["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            expected => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, expected, "{name}: body");
            }
        }

        // Verify send
        let sim = &case["simulated_response"];
        let transport = Replay(HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        ));
        let result = c.send(&transport, &spec);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            let kind = parse_kind(expected_error["kind"].as_str().unwrap());
            assert_eq!(err.kind(), kind, "{name}: failure kind");
            if let Some(status) = expected_error.get("status") {
                assert_eq!(err.status(), status.as_u64().map(|s| s as u16), "{name}: status");
            }
        } else {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result");
        }
    }
}
