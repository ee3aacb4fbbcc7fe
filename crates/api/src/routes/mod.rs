//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod additional_items;
pub mod auth;
pub mod budgets;
pub mod customers;
pub mod health;
pub mod products;
pub mod salesmen;

/// Creates the API router: public routes plus everything behind `auth_middleware`.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(customers::routes())
        .merge(salesmen::routes())
        .merge(products::routes())
        .merge(additional_items::routes())
        .merge(budgets::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::AUTHORIZATION},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{create_router, test_support};

    async fn send(
        state: crate::AppState,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        create_router(state)
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let dir = tempfile::tempdir().unwrap();
        let response = send(test_support::state(dir.path()), "GET", "/api/v1/health", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["database"], "down");
        assert_eq!(body["storage"], "local");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("/api/v1/customers/{}", Uuid::new_v4());
        let response = send(test_support::state(dir.path()), "GET", &uri, None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(response).await["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let response = send(
            test_support::state(dir.path()),
            "GET",
            "/api/v1/budgets",
            Some("not-a-jwt"),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path());
        let token = test_support::token(&state, false);

        for resource in ["customers", "salesmen", "products", "additional-items", "budgets"] {
            let uri = format!("/api/v1/{resource}/{}", Uuid::new_v4());
            let response = send(state.clone(), "DELETE", &uri, Some(&token), None).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{resource}");
        }
    }

    #[tokio::test]
    async fn test_admin_passes_the_guard() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path());
        let token = test_support::token(&state, true);

        let uri = format!("/api/v1/budgets/{}", Uuid::new_v4());
        let response = send(state, "DELETE", &uri, Some(&token), None).await;

        // No database behind the test state, so the handler itself fails.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_non_admin_can_read() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path());
        let token = test_support::token(&state, false);

        let response = send(state, "GET", "/api/v1/budgets", Some(&token), None).await;

        assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_budget_with_blank_code_is_rejected_before_storage() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path());
        let token = test_support::token(&state, false);

        let response = send(
            state,
            "POST",
            "/api/v1/budgets",
            Some(&token),
            Some(serde_json::json!({ "code": "", "products": [] })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let dir = tempfile::tempdir().unwrap();
        let response = send(
            test_support::state(dir.path()),
            "POST",
            "/api/v1/users",
            None,
            Some(serde_json::json!({
                "name": "Ana",
                "email": "ana-at-example",
                "password": "secret123"
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["message"], "Email is invalid!");
    }
}
