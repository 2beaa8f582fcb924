use crate::{error, handlers, state::AppState};
use axum::{response::Response, routing::get, Router};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Builds the full application. Wrong methods on known paths fall through
/// to the same 404 as unknown paths.
pub fn router(state: AppState) -> Router {
    let diagnostics = state.diagnostics();

    let routes = Router::new()
        .route("/", get(handlers::root).fallback(handlers::not_found))
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .route(
            "/api/users",
            get(handlers::list_users)
                .post(handlers::create_user)
                .fallback(handlers::not_found),
        )
        .fallback(handlers::not_found);

    with_middleware(routes, diagnostics).with_state(state)
}

/// Panics become the 500 envelope; every request is traced.
fn with_middleware<S>(routes: Router<S>, diagnostics: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| -> Response {
                error::panic_response(err, diagnostics)
            },
        ))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use async_trait::async_trait;
    use mockall::mock;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use userapi_core::{CoreError, DynUserStore, InMemoryUserStore, NewUser, User, UserStore};

    mock! {
        pub Store {}

        #[async_trait]
        impl UserStore for Store {
            async fn list(&self) -> userapi_core::Result<Vec<User>>;
            async fn create(&self, new_user: NewUser) -> userapi_core::Result<User>;
            async fn count(&self) -> userapi_core::Result<usize>;
        }
    }

    fn app_with(store: DynUserStore, config: ServiceConfig) -> Router {
        router(AppState::new(config, store))
    }

    fn app() -> Router {
        app_with(InMemoryUserStore::seeded().into_dyn(), ServiceConfig::new(0, "test"))
    }

    fn config_from_env(pairs: &[(&str, &str)]) -> ServiceConfig {
        ServiceConfig::from_lookup(|key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    async fn explode() -> &'static str {
        panic!("secret internal detail")
    }

    fn panicking_app(config: &ServiceConfig) -> Router {
        with_middleware(Router::new().route("/explode", get(explode)), config.diagnostics)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_info() {
        let (status, body) = send(app(), get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to the CI/CD Demo API");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["environment"], "test");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
        assert!(body["memory"].is_object());
    }

    #[tokio::test]
    async fn test_list_seeded_users() {
        let (status, body) = send(app(), get_request("/api/users")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        let users = body["data"].as_array().unwrap();
        assert_eq!(users[0]["id"], 1);
        assert_eq!(users[0]["name"], "John Doe");
        assert_eq!(users[0]["email"], "john@example.com");
        assert_eq!(users[1]["id"], 2);
        assert_eq!(users[1]["name"], "Jane Smith");
        assert_eq!(users[1]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let app = app();
        let (_, first) = send(app.clone(), get_request("/api/users")).await;
        let (_, second) = send(app, get_request("/api/users")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_create_user_persists() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            post_json(
                "/api/users",
                json!({ "name": "Test User", "email": "test@example.com" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["name"], "Test User");
        assert_eq!(body["data"]["email"], "test@example.com");
        assert!(body["data"]["id"].as_u64().unwrap() > 2);
        assert!(body["data"]["createdAt"].is_string());

        let (_, listed) = send(app, get_request("/api/users")).await;
        assert_eq!(listed["count"], 3);
        assert_eq!(listed["data"][2], body["data"]);
    }

    #[tokio::test]
    async fn test_create_user_requires_email() {
        let (status, body) =
            send(app(), post_json("/api/users", json!({ "name": "Test User" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Name and email are required");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_create_user_with_malformed_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and email are required");
    }

    #[tokio::test]
    async fn test_failed_validation_does_not_mutate() {
        let app = app();
        send(app.clone(), post_json("/api/users", json!({ "email": "x@example.com" }))).await;
        let (_, listed) = send(app, get_request("/api/users")).await;
        assert_eq!(listed["count"], 2);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(app(), get_request("/nonexistent?x=1")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Route not found");
        assert_eq!(body["path"], "/nonexistent?x=1");
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_found() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/api/users");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .returning(|| Err(CoreError::Storage("connection lost".to_string())));

        let (status, body) = send(
            app_with(
                std::sync::Arc::new(store),
                config_from_env(&[("APP_ENV", "production")]),
            ),
            get_request("/api/users"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "Something went wrong");
    }

    #[tokio::test]
    async fn test_store_failure_detail_in_development() {
        let mut store = MockStore::new();
        store
            .expect_create()
            .returning(|_| Err(CoreError::Storage("disk full".to_string())));

        let (status, body) = send(
            app_with(
                std::sync::Arc::new(store),
                config_from_env(&[("APP_ENV", "development")]),
            ),
            post_json("/api/users", json!({ "name": "A", "email": "a@example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Storage error: disk full");
    }

    #[tokio::test]
    async fn test_panic_hides_detail_without_app_env() {
        let app = panicking_app(&config_from_env(&[]));
        let response = app.oneshot(get_request("/explode")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "Something went wrong");
    }

    #[tokio::test]
    async fn test_panic_detail_with_explicit_development() {
        let app = panicking_app(&config_from_env(&[("APP_ENV", "development")]));
        let (status, body) = send(app, get_request("/explode")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "secret internal detail");
    }
}
