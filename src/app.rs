use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{dashboard, exercises, identity, products, recipes, workouts};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(identity::router())
        .merge(dashboard::router())
        .merge(recipes::router())
        .merge(workouts::router())
        .merge(products::router())
        .merge(exercises::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtKeys;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> (Router, JwtKeys) {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        (build_app(state), keys)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn health_is_open() {
        let (app, _) = app();
        let res = app.oneshot(request("GET", "/health", None, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_requires_token() {
        let (app, _) = app();
        let res = app
            .oneshot(request("GET", "/Identity/GetDashboardInformationForUser", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_access_token() {
        let (app, keys) = app();
        let refresh = keys.sign_refresh(Uuid::new_v4(), "ann", &[]).unwrap();
        let res = app
            .oneshot(request("GET", "/Identity/GetUsersRecipes", Some(&refresh), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn catalog_mutation_needs_admin() {
        let (app, keys) = app();
        let token = keys.sign_access(Uuid::new_v4(), "ann", &[]).unwrap();
        let body = r#"{"name":"Rice","carbs":28,"fats":0.3,"protein":2.7}"#;

        let res = app
            .clone()
            .oneshot(request("POST", "/Products/Create", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = app
            .oneshot(request("POST", "/Products/Create", Some(&token), Some(body)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn log_delete_rejects_bad_timestamp_before_touching_db() {
        let (app, keys) = app();
        let token = keys.sign_access(Uuid::new_v4(), "ann", &[]).unwrap();
        let body = r#"{"recipeId":1,"dateLogged":"yesterday"}"#;
        let res = app
            .oneshot(request("PUT", "/Recipes/DeleteRecipeLog", Some(&token), Some(body)))
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }
}
