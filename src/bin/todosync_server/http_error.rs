use super::*;

fn error(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({"error": msg}))).into_response()
}

pub(super) fn bad_request(msg: &str) -> Response {
    error(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "not found")
}

pub(super) fn injected_failure() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, "injected failure")
}
