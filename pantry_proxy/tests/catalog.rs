use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use pantry_proxy::{Catalog, CatalogClient, CatalogConfig, Credentials, ProxyError};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

// base64("client:secret")
const EXPECTED_BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";
const TOKEN: &str = "test-token";

#[derive(Clone)]
struct MockCatalog {
    base_url: Arc<std::sync::OnceLock<String>>,
    page_requests: Arc<AtomicUsize>,
    n_pages: usize,
    endless: bool,
}

#[derive(Deserialize)]
struct TokenForm {
    grant_type: String,
}

#[derive(Deserialize)]
struct PageQuery {
    offset: Option<usize>,
    limit: usize,
}

async fn token(headers: HeaderMap, Form(form): Form<TokenForm>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .is_some_and(|v| v == EXPECTED_BASIC_AUTH);
    if !authorized || form.grant_type != "client_credentials" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"})));
    }
    (
        StatusCode::OK,
        Json(json!({"access_token": TOKEN, "token_type": "Bearer", "expires_in": 3600})),
    )
}

async fn playlists(
    State(mock): State<MockCatalog>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    mock.page_requests.fetch_add(1, Ordering::SeqCst);

    let bearer = format!("Bearer {TOKEN}");
    if !headers
        .get("authorization")
        .is_some_and(|v| v == bearer.as_str())
    {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    match user_id.as_str() {
        "ghost" => return (StatusCode::NOT_FOUND, Json(json!({}))),
        "broken" => return (StatusCode::BAD_GATEWAY, Json(json!({}))),
        _ => {}
    }

    let offset = query.offset.unwrap_or(0);
    let page = offset / query.limit;
    let next = if mock.endless || page + 1 < mock.n_pages {
        json!(format!(
            "{}/users/{user_id}/playlists?offset={}&limit={}",
            mock.base_url.get().unwrap(),
            offset + query.limit,
            query.limit
        ))
    } else {
        json!(null)
    };

    let items = vec![
        json!({
            "id": format!("public-{page}"),
            "name": format!("Pineapple Party {page}"),
            "public": true,
            "images": [{"url": format!("https://img/{page}")}],
            "external_urls": {"spotify": format!("https://open.spotify.com/playlist/public-{page}")},
            "tracks": {"total": 10 + page},
        }),
        json!({
            "id": format!("private-{page}"),
            "name": "Secret Stash",
            "public": false,
            "images": [{"url": "https://img/private"}],
        }),
        json!(null),
    ];

    (StatusCode::OK, Json(json!({"items": items, "next": next})))
}

async fn start_mock(n_pages: usize, endless: bool) -> (CatalogConfig, MockCatalog) {
    let mock = MockCatalog {
        base_url: Arc::new(std::sync::OnceLock::new()),
        page_requests: Arc::new(AtomicUsize::new(0)),
        n_pages,
        endless,
    };
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/users/:user_id/playlists", get(playlists))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = format!("http://{addr}/v1");
    mock.base_url.set(base_url.clone()).unwrap();
    let config = CatalogConfig {
        token_url: format!("http://{addr}/api/token"),
        api_base_url: base_url,
        ..Default::default()
    };
    (config, mock)
}

fn credentials(secret: &str) -> Credentials {
    Credentials {
        client_id: "client".to_string(),
        client_secret: secret.to_string(),
    }
}

#[tokio::test]
async fn follows_pagination_and_keeps_public_playlists() {
    let (config, mock) = start_mock(3, false).await;
    let client = CatalogClient::new(config, Some(credentials("secret")));

    let playlists = client.fetch_public_playlists("pantry.chef").await.unwrap();

    assert_eq!(mock.page_requests.load(Ordering::SeqCst), 3);
    let names = playlists.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["Pineapple Party 0", "Pineapple Party 1", "Pineapple Party 2"]
    );
    assert_eq!(playlists[2].track_count, 12);
    assert_eq!(playlists[0].cover, "https://img/0");
}

#[tokio::test]
async fn caps_the_number_of_page_requests() {
    let (config, mock) = start_mock(0, true).await;
    let client = CatalogClient::new(config, Some(credentials("secret")));

    let playlists = client.fetch_public_playlists("hoarder").await.unwrap();

    assert_eq!(mock.page_requests.load(Ordering::SeqCst), 10);
    assert_eq!(playlists.len(), 10);
}

#[tokio::test]
async fn reports_missing_users() {
    let (config, _mock) = start_mock(1, false).await;
    let client = CatalogClient::new(config, Some(credentials("secret")));

    let err = client.fetch_public_playlists("ghost").await.unwrap_err();
    assert!(matches!(err, ProxyError::UserNotFound(ref id) if id == "ghost"));
    assert_eq!(err.status(), 404);
}

#[tokio::test]
async fn reports_upstream_failures() {
    let (config, _mock) = start_mock(1, false).await;
    let client = CatalogClient::new(config, Some(credentials("secret")));

    let err = client.fetch_public_playlists("broken").await.unwrap_err();
    assert!(matches!(err, ProxyError::Upstream(502)));
    assert_eq!(err.public_message(), "Failed to fetch playlists");
}

#[tokio::test]
async fn reports_rejected_credentials() {
    let (config, mock) = start_mock(1, false).await;
    let client = CatalogClient::new(config, Some(credentials("wrong")));

    let err = client.fetch_public_playlists("pantry.chef").await.unwrap_err();
    assert!(matches!(err, ProxyError::Auth(401)));
    assert_eq!(mock.page_requests.load(Ordering::SeqCst), 0);
}
