// HTTP response builder for the hello handler
//
// Fixed greeting plus the invocation timestamp, shaped as an API
// Gateway v2 (HTTP API) response.

use aws_lambda_events::{
    apigw::ApiGatewayV2httpResponse,
    encodings::Body,
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

pub const GREETING_MESSAGE: &str = "Hello from Lambda!";

pub type GreetingResponse = ApiGatewayV2httpResponse;

/// Build the greeting response for a given clock reading. Pure, so
/// tests can pin the timestamp.
pub fn greeting_response(now: DateTime<Utc>) -> GreetingResponse {
    let body = json!({
        "message": GREETING_MESSAGE,
        "timestamp": now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    ApiGatewayV2httpResponse {
        status_code: 200,
        headers,
        multi_value_headers: HeaderMap::new(),
        body: Some(Body::Text(body)),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn body_json(response: &GreetingResponse) -> serde_json::Value {
        match response.body.as_ref().unwrap() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn responds_200_with_json_and_cors_headers() {
        let response = greeting_response(Utc::now());
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert!(!response.is_base64_encoded);
    }

    #[test]
    fn body_carries_message_and_parseable_timestamp() {
        let response = greeting_response(Utc::now());
        let body = body_json(&response);

        let message = body["message"].as_str().unwrap();
        assert!(!message.is_empty());
        assert_eq!(message, GREETING_MESSAGE);

        let timestamp = body["timestamp"].as_str().unwrap();
        DateTime::parse_from_rfc3339(timestamp).unwrap();
    }

    #[test]
    fn message_is_fixed_while_timestamp_tracks_the_clock() {
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap();

        let a = body_json(&greeting_response(first));
        let b = body_json(&greeting_response(second));

        assert_eq!(a["message"], b["message"]);
        assert_ne!(a["timestamp"], b["timestamp"]);
    }
}
