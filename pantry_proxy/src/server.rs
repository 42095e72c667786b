//! The playlist function served over HTTP.
//!
//! `POST` with a `{"userId": "..."}` body returns `{"playlists": [...]}`,
//! `OPTIONS` answers CORS preflight requests. Every response carries the CORS
//! headers, including error responses.

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{validate_user_id, Catalog, PlaylistsResponse, ProxyError};

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(Clone)]
/// Shared state of the function's handlers
pub struct AppState {
    catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(catalog: impl Catalog + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.log();
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorBody {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

/// Builds the function's router.
///
/// The function is served at both `/` and `/spotify-playlists`
/// so it can be mounted standalone or behind a functions gateway.
pub fn router(state: AppState) -> Router {
    let function = post(list_playlists).options(preflight);

    Router::new()
        .route("/", function.clone())
        .route("/spotify-playlists", function)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}

async fn preflight() -> &'static str {
    "ok"
}

async fn list_playlists(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlaylistsResponse>, ProxyError> {
    let body = serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|err| ProxyError::Internal(format!("failed to parse the request body: {err}")))?;

    let user_id = match body.get("userId") {
        Some(serde_json::Value::String(id)) if validate_user_id(id) => id.as_str(),
        other => {
            return Err(ProxyError::InvalidUserId(
                other.map(ToString::to_string).unwrap_or_default(),
            ))
        }
    };

    let playlists = state.catalog.fetch_public_playlists(user_id).await?;
    Ok(Json(PlaylistsResponse { playlists }))
}

/// Serves the function on `addr` until Ctrl-C is received
pub async fn serve(addr: impl tokio::net::ToSocketAddrs, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind the function's listener")?;
    tracing::info!("Serving the playlist function at {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for the shutdown signal: {err:#}");
            }
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogClient, CatalogConfig, Playlist};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    struct FakeCatalog;

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn fetch_public_playlists(
            &self,
            user_id: &str,
        ) -> Result<Vec<Playlist>, ProxyError> {
            match user_id {
                "ghost" => Err(ProxyError::UserNotFound(user_id.to_string())),
                "flaky" => Err(ProxyError::Upstream(503)),
                _ => Ok(vec![Playlist {
                    id: "p1".to_string(),
                    name: "Glazed Donut Grooves".to_string(),
                    cover: "https://img/p1".to_string(),
                    spotify_url: "https://open.spotify.com/playlist/p1".to_string(),
                    embed_id: "p1".to_string(),
                    description: "Curated playlist".to_string(),
                    track_count: 12,
                }]),
            }
        }
    }

    fn app() -> Router {
        router(AppState::new(FakeCatalog))
    }

    fn post_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors_headers(response: &Response) {
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            HeaderValue::from_static(ALLOWED_HEADERS)
        );
    }

    #[tokio::test]
    async fn answers_preflight_requests() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/spotify-playlists")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn returns_playlists() {
        let response = app()
            .oneshot(post_request("/", r#"{"userId": "pantry.chef"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        let body = json_body(response).await;
        assert_eq!(body["playlists"][0]["name"], "Glazed Donut Grooves");
        assert_eq!(body["playlists"][0]["embedId"], "p1");
        assert_eq!(body["playlists"][0]["trackCount"], 12);
    }

    #[tokio::test]
    async fn rejects_invalid_user_ids() {
        for body in [
            r#"{"userId": "has space"}"#,
            r#"{"userId": ""}"#,
            r#"{"userId": 42}"#,
            r"{}",
        ] {
            let response = app()
                .oneshot(post_request("/spotify-playlists", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_cors_headers(&response);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"error": "Invalid user ID format"})
            );
        }
    }

    #[tokio::test]
    async fn shapes_unparsable_bodies_as_internal_errors() {
        let response = app().oneshot(post_request("/", "not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn maps_catalog_errors() {
        let response = app()
            .oneshot(post_request("/", r#"{"userId": "ghost"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors_headers(&response);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "User not found"})
        );

        let response = app()
            .oneshot(post_request("/", r#"{"userId": "flaky"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Failed to fetch playlists"})
        );
    }

    #[tokio::test]
    async fn reports_missing_credentials_as_unavailable() {
        let app = router(AppState::new(CatalogClient::new(
            CatalogConfig::default(),
            None,
        )));
        let response = app
            .oneshot(post_request("/", r#"{"userId": "someone"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Service temporarily unavailable"})
        );
    }
}
