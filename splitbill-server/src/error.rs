use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use splitbill_application::SettlementError;

pub fn settlement_error_response(err: &SettlementError) -> Response {
    json_error(StatusCode::BAD_REQUEST, err.kind(), err.to_string())
}

pub fn json_error(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": message.into(),
            "kind": kind,
        })),
    )
        .into_response()
}
