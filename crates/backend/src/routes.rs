use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::shared::state::AppState;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    // Данные анализов закрыты входом, если задан пароль
    let analysis = Router::new()
        .route("/api/analysis", get(handlers::a001_competitive_analysis::list_all))
        .route(
            "/api/analysis/:id",
            get(handlers::a001_competitive_analysis::get_by_id),
        )
        .route(
            "/api/analysis/:id/dataset",
            get(handlers::a001_competitive_analysis::dataset),
        )
        .route(
            "/api/analysis/:id/product/:index",
            get(handlers::a001_competitive_analysis::product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/status",
            get(system::handlers::auth::status),
        )
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .merge(analysis)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_competitive_analysis::repository::tests::memory_db;
    use crate::system::auth::jwt::AuthKeys;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use contracts::system::auth::LoginResponse;
    use tower::ServiceExt;

    async fn app(password: Option<&str>) -> (Router, AppState) {
        let auth = AuthKeys::new(password, "test-secret", Duration::hours(1)).unwrap();
        let state = AppState::new(memory_db().await, auth);
        (configure_routes(state.clone()), state)
    }

    fn get_list(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/analysis");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn login(password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/system/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"password":"{password}"}}"#)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_analysis_routes_reject_missing_or_bad_token() {
        let (router, _) = app(Some("letmein")).await;

        let response = router.clone().oneshot(get_list(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router.oneshot(get_list(Some("not.a.jwt"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_analysis_routes_accept_valid_token() {
        let (router, state) = app(Some("letmein")).await;
        let token = state.auth.issue(Utc::now()).unwrap().access_token;

        let response = router.oneshot(get_list(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_no_password_leaves_routes_open() {
        let (router, _) = app(None).await;

        let response = router.clone().oneshot(get_list(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(login("anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let (router, _) = app(Some("letmein")).await;

        let response = router.clone().oneshot(login("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router.clone().oneshot(login("letmein")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let issued: LoginResponse = serde_json::from_slice(&body).unwrap();

        let response = router
            .oneshot(get_list(Some(&issued.access_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
