use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{health::livez, query::submit_query},
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Browser clients submit statements from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/submit-query", post(submit_query))
        .route("/livez", get(livez))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use async_trait::async_trait;
    use dynoql_core::attribute::{AttributeValue, RawItem};
    use dynoql_core::relay::{
        ExecuteError, ExecuteStatementInput, StatementExecutor, StatementPage,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{config::Config, storage::inmemory::InMemoryExecutor};

    fn order(id: &str, total: &str) -> RawItem {
        RawItem::from([
            ("id".to_string(), AttributeValue::S(id.to_string())),
            ("total".to_string(), AttributeValue::N(total.to_string())),
        ])
    }

    /// Two pages: three orders with a continuation token, then two more.
    fn orders_executor() -> InMemoryExecutor {
        InMemoryExecutor::new(vec![
            StatementPage {
                items: vec![order("o-1", "10"), order("o-2", "20"), order("o-3", "30")],
                next_token: None,
            },
            StatementPage {
                items: vec![order("o-4", "40"), order("o-5", "50")],
                next_token: None,
            },
        ])
    }

    fn app_with(executor: InMemoryExecutor) -> Router {
        create_app(AppState::new(Arc::new(executor), Config::default()))
    }

    fn submit(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit-query")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn ids(records: &Value) -> Vec<&str> {
        records
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_submit_query_returns_all_pages() {
        let executor = orders_executor();
        let app = app_with(executor.clone());

        let response = app
            .oneshot(submit(
                json!({ "query": "SELECT * FROM Orders", "maxPageSize": 10 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let records = body_json(response).await;
        assert_eq!(ids(&records), vec!["o-1", "o-2", "o-3", "o-4", "o-5"]);
        assert_eq!(records[0], json!({ "id": "o-1", "total": "10" }));

        let requests = executor.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].statement, "SELECT * FROM Orders");
        assert_eq!(requests[0].next_token, None);
        assert_eq!(requests[1].next_token.as_deref(), Some("page-1"));
        assert_eq!(requests[0].limit, Some(1000));
    }

    #[tokio::test]
    async fn test_submit_query_zero_bound_fetches_one_page() {
        let executor = orders_executor();
        let app = app_with(executor.clone());

        let response = app
            .oneshot(submit(
                json!({ "query": "SELECT * FROM Orders", "maxPageSize": 0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            ids(&body_json(response).await),
            vec!["o-1", "o-2", "o-3"]
        );
        assert_eq!(executor.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_query_accepts_string_bound() {
        let executor = orders_executor();
        let app = app_with(executor.clone());

        let response = app
            .oneshot(submit(
                json!({ "query": "SELECT * FROM Orders", "maxPageSize": "5" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_query_without_bound() {
        let app = app_with(orders_executor());

        let response = app
            .oneshot(submit(json!({ "query": "SELECT * FROM Orders" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_query_empty_result() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(submit(json!({ "query": "SELECT * FROM Empty" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_submit_query_failure_returns_advice() {
        let executor = orders_executor().failing_at(
            1,
            ExecuteError::service("ProvisionedThroughputExceededException", "Rate exceeded"),
        );
        let app = app_with(executor);

        let response = app
            .oneshot(submit(
                json!({ "query": "SELECT * FROM Orders", "maxPageSize": 10 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Request rate is too high."));
        assert!(message.ends_with("Error: Rate exceeded"));
    }

    #[tokio::test]
    async fn test_submit_query_rejects_malformed_json() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit-query")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_submit_query_rejects_wrong_method() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/submit-query")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    /// Never answers within any reasonable request timeout.
    struct StalledExecutor;

    #[async_trait]
    impl StatementExecutor for StalledExecutor {
        async fn execute_statement(
            &self,
            _input: ExecuteStatementInput,
        ) -> Result<StatementPage, ExecuteError> {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Ok(StatementPage::default())
        }
    }

    #[tokio::test]
    async fn test_slow_query_times_out_with_408() {
        let config = Config {
            request_timeout_seconds: 0,
            ..Config::default()
        };
        let app = create_app(AppState::new(Arc::new(StalledExecutor), config));

        let response = app
            .oneshot(submit(json!({ "query": "SELECT * FROM Orders" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/livez")
                    .header("Origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
