use crate::error::settlement_error_response;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use splitbill_application::{ExpenseProcessor, SettleRequest, SettleResponse, SettlementError};
use tower_http::cors::CorsLayer;

pub fn router(processor: ExpenseProcessor, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/calculate", post(calculate))
        .with_state(processor)
        .layer(cors)
}

async fn health() -> &'static str {
    "Server is running!"
}

async fn calculate(
    State(processor): State<ExpenseProcessor>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = SettlementError::MalformedRequest(rejection.body_text());
            tracing::warn!(kind = err.kind(), error = %err, "Request body rejected");
            return settlement_error_response(&err);
        }
    };

    match processor.process(&request) {
        Ok(report) => Json(SettleResponse::from(&report)).into_response(),
        Err(err) => settlement_error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cors::cors_layer;
    use axum::{
        body::{Body, to_bytes},
        http::{HeaderValue, Method, Request, StatusCode, header},
    };
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router(ExpenseProcessor::default(), cors_layer(None))
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        (status, body.to_vec())
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::post("/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("valid request")
    }

    async fn post_value(value: Value) -> (StatusCode, Value) {
        let (status, body) = send(post_json(value.to_string())).await;
        let body = serde_json::from_slice(&body).expect("json body");
        (status, body)
    }

    #[tokio::test]
    async fn health_check_responds() {
        let request = Request::get("/").body(Body::empty()).expect("valid request");

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Server is running!");
    }

    #[tokio::test]
    async fn calculate_returns_balances_and_transactions() {
        let (status, body) = post_value(json!({
            "people": ["Alice", "Bob", "Carol"],
            "expenses": [
                {"description": "hotel", "amount": 30, "paidBy": "Alice", "participants": ["Alice", "Bob", "Carol"]}
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "balances": [
                    {"person": "Alice", "amount": 20.0},
                    {"person": "Bob", "amount": -10.0},
                    {"person": "Carol", "amount": -10.0}
                ],
                "transactions": [
                    {"from": "Bob", "to": "Alice", "amount": 10.0},
                    {"from": "Carol", "to": "Alice", "amount": 10.0}
                ]
            })
        );
    }

    #[rstest]
    #[case::unknown_payer(
        json!({"people": ["A"], "expenses": [{"amount": 5, "paidBy": "Z", "participants": ["A"]}]}),
        "unknown_payer"
    )]
    #[case::unknown_participant(
        json!({"people": ["A"], "expenses": [{"amount": 5, "paidBy": "A", "participants": ["A", "Z"]}]}),
        "unknown_participant"
    )]
    #[case::empty_roster(json!({"people": [], "expenses": []}), "empty_roster")]
    #[case::non_positive(
        json!({"people": ["A"], "expenses": [{"amount": -1, "paidBy": "A", "participants": ["A"]}]}),
        "non_positive_amount"
    )]
    #[case::wrong_shape(json!({"people": "A", "expenses": []}), "malformed_request")]
    #[tokio::test]
    async fn calculate_rejects_invalid_requests(#[case] request: Value, #[case] kind: &str) {
        let (status, body) = post_value(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], kind);
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn unknown_member_error_names_the_member() {
        let (_, body) = post_value(json!({
            "people": ["A"],
            "expenses": [{"description": "taxi", "amount": 10, "paidBy": "A", "participants": ["A", "Zed"]}]
        }))
        .await;

        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("Zed")));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed_request() {
        let (status, body) = send(post_json("{not json")).await;
        let body: Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "malformed_request");
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/calculate")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .expect("valid request")
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_by_default() {
        let response = router(ExpenseProcessor::default(), cors_layer(None))
            .oneshot(preflight("http://localhost:5173"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .expect("ascii header");
        assert!(methods.contains("POST"));
        let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .expect("ascii header");
        assert!(allowed_headers.contains("content-type"));
    }

    #[rstest]
    #[case::listed("https://splitbill.example", Some("https://splitbill.example"))]
    #[case::unlisted("https://elsewhere.example", None)]
    #[tokio::test]
    async fn preflight_respects_configured_origins(
        #[case] origin: &str,
        #[case] expected: Option<&str>,
    ) {
        let allowed = [HeaderValue::from_static("https://splitbill.example")];
        let cors = cors_layer(Some(allowed.as_slice()));
        let response = router(ExpenseProcessor::default(), cors)
            .oneshot(preflight(origin))
            .await
            .expect("router is infallible");

        let allow_origin = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok());
        assert_eq!(allow_origin, expected);
    }

    #[tokio::test]
    async fn calculate_response_carries_cors_header() {
        let request = Request::post("/calculate")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"people": ["A"], "expenses": []}).to_string()))
            .expect("valid request");

        let response = router(ExpenseProcessor::default(), cors_layer(None))
            .oneshot(request)
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
