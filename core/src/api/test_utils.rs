use http::StatusCode;
use reqwest::Response;

pub(super) fn create_ok_response_with_payload(payload: Vec<u8>) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(StatusCode::OK)
            .body(payload)
            .unwrap()
    )
}

pub(super) fn create_json_response(json: serde_json::Value) -> Response {
    create_ok_response_with_payload(serde_json::to_vec(&json).unwrap())
}

// Helper function to create an error response
pub(super) fn create_error_response(status: StatusCode, body: &str) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(status)
            .body(body.as_bytes().to_vec())
            .unwrap()
    )
}

// A request that can never be built stands in for a network failure
pub(super) fn create_transport_error() -> reqwest::Error {
    reqwest::Client::new()
        .get("http://[not-a-host")
        .build()
        .unwrap_err()
}
