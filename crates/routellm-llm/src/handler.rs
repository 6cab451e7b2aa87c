//! Axum route handlers for the public gateway API

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use routellm_core::{ErrorBody, HttpError};

use crate::error::GatewayError;
use crate::orchestrator::RouteState;
use crate::types::{RouteRequest, SignupRequest};

/// Build the gateway router with all endpoints
pub fn route_router(state: RouteState) -> Router {
    Router::new()
        .route("/", routing::get(index))
        .route("/route", routing::post(route_prompt))
        .route("/subscription/{key}", routing::get(subscription_status))
        .route("/subscriptions", routing::get(list_subscriptions))
        .route("/stats/{key}", routing::get(usage_stats))
        .route("/signup", routing::post(signup))
        .with_state(state)
}

/// Handle `GET /`
async fn index() -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "message": "RouteLLM API is running",
        "endpoints": {
            "POST /route": "Send a prompt to AI",
            "GET /subscription/{key}": "Check subscription usage",
            "GET /subscriptions": "List subscriptions",
            "GET /stats/{key}": "Usage statistics for a subscription",
            "POST /signup": "Create a free subscription",
        }
    }))
    .into_response()
}

/// Handle `POST /route`
async fn route_prompt(State(state): State<RouteState>, body: Result<Json<RouteRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(&GatewayError::InvalidBody(rejection.body_text())),
    };

    match state.route(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `GET /subscription/{key}`
async fn subscription_status(State(state): State<RouteState>, Path(key): Path<String>) -> Response {
    match state.account_status(&key).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `GET /subscriptions`
async fn list_subscriptions(State(state): State<RouteState>) -> Response {
    match state.list_accounts().await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `GET /stats/{key}`
async fn usage_stats(State(state): State<RouteState>, Path(key): Path<String>) -> Response {
    match state.stats(&key).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `POST /signup`
async fn signup(State(state): State<RouteState>, body: Result<Json<SignupRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(&GatewayError::InvalidBody(rejection.body_text())),
    };

    match state.signup(&request).await {
        Ok(created) => Json(created).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Convert a gateway error to the uniform JSON error response
pub fn error_response(error: &impl HttpError) -> Response {
    (error.status_code(), Json(ErrorBody::from_error(error))).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use routellm_config::{SeedAccount, SignupConfig};
    use routellm_ledger::MemoryLedger;
    use routellm_routing::{ComplexityRouter, CostEstimator};
    use tower::ServiceExt;

    use super::*;
    use crate::provider::{Backend, BackendError, Completion};

    struct EchoBackend;

    #[async_trait]
    impl Backend for EchoBackend {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, BackendError> {
            Ok(Completion {
                text: format!("{model}: {prompt}"),
                prompt_tokens: 4,
                completion_tokens: 6,
                total_tokens: 10,
            })
        }
    }

    fn app() -> Router {
        let ledger = MemoryLedger::from_seeds(&[
            SeedAccount {
                key: "sub-pro-001".to_owned(),
                plan: "pro".to_owned(),
                usage_limit: 1000,
                usage_used: 0,
            },
            SeedAccount {
                key: "sub-basic-001".to_owned(),
                plan: "basic".to_owned(),
                usage_limit: 100,
                usage_used: 100,
            },
        ]);

        route_router(RouteState::new(
            Arc::new(ledger),
            Arc::new(EchoBackend),
            ComplexityRouter::default(),
            CostEstimator::default(),
            SignupConfig::default(),
        ))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn route_returns_completion() {
        let (status, body) = send(
            app(),
            post_json(
                "/route",
                &serde_json::json!({ "prompt": "hi", "subscription_key": "sub-pro-001" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_used"], "google/gemma-3-4b-it:free");
        assert_eq!(body["response"], "google/gemma-3-4b-it:free: hi");
        assert_eq!(body["tokens_used"], 10);
        assert_eq!(body["requests_remaining"], 990);
    }

    #[tokio::test]
    async fn quota_error_has_uniform_body() {
        let (status, body) = send(
            app(),
            post_json(
                "/route",
                &serde_json::json!({ "prompt": "hi", "account_key": "sub-basic-001" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["kind"], "QuotaExceeded");
        assert_eq!(body["error"]["type"], "rate_limit_error");
        assert_eq!(body["error"]["message"], "usage limit reached: used 100/100 tokens");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let request = Request::post("/route")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["kind"], "InvalidRequest");
    }

    #[tokio::test]
    async fn unknown_subscription_is_not_found() {
        let request = Request::get("/subscription/nope").body(Body::empty()).unwrap();

        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["kind"], "AccountNotFound");
    }

    #[tokio::test]
    async fn subscription_status_fields() {
        let request = Request::get("/subscription/sub-basic-001").body(Body::empty()).unwrap();

        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "account_key": "sub-basic-001",
                "plan": "basic",
                "usage_limit": 100,
                "usage_used": 100,
                "usage_remaining": 0
            })
        );
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let request = Request::get("/").body(Body::empty()).unwrap();

        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["endpoints"]["POST /route"].is_string());
    }
}
