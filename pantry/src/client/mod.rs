use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use pantry_proxy::PlaylistsResponse;
use reqwest::StatusCode;
use serde_json::json;
use ttl_cache::TtlCache;

use crate::{
    config,
    state::{Playlist, SharedState},
    taxonomy,
};

mod handlers;
mod request;

pub use handlers::start_client_handler;
pub use request::ClientRequest;

const CACHE_CAPACITY: usize = 16;

#[derive(Debug, thiserror::Error)]
/// An error when fetching playlists from the playlist function
pub enum FetchError {
    #[error("Invalid user ID provided")]
    InvalidUserId,
    #[error("User not found")]
    UserNotFound,
    #[error("Failed to fetch playlists (status: {0})")]
    Function(u16),
    #[error("Invalid response format")]
    InvalidResponse,
    #[error("Failed to fetch playlists: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidUserId | Self::UserNotFound)
    }
}

#[derive(Debug, Clone, Copy)]
/// When and how long to wait before retrying a failed fetch
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    /// whether to retry after `failure_count` earlier failures and the latest `err`
    pub fn should_retry(&self, failure_count: usize, err: &FetchError) -> bool {
        err.is_retryable() && failure_count < self.max_retries
    }

    /// the delay before retry `attempt` (0-based), doubling up to `max_delay`
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}

/// The playlist function's client
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    function_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
    stale_time: Duration,
    cache: Arc<Mutex<TtlCache<String, Vec<Playlist>>>>,
}

impl Client {
    pub fn new(
        function_url: String,
        api_key: Option<String>,
        retry: RetryPolicy,
        stale_time: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            function_url,
            api_key,
            retry,
            stale_time,
            cache: Arc::new(Mutex::new(TtlCache::new(CACHE_CAPACITY))),
        }
    }

    pub fn from_config(config: &config::AppConfig) -> Self {
        Self::new(
            config.function_url.clone(),
            config.function_api_key.clone(),
            RetryPolicy {
                max_retries: config.max_retries,
                ..Default::default()
            },
            config.stale_time(),
        )
    }

    /// handles a client request, storing its result in the application's state
    pub async fn handle_request(&self, state: &SharedState, request: ClientRequest) {
        match request {
            ClientRequest::GetPlaylists { user_id, force } => {
                let fetch = state.data.write().begin_fetch();
                let result = match self.fetch_playlists(&user_id, force).await {
                    Ok(playlists) => {
                        let playlists = taxonomy::categorize_playlists(playlists);
                        tracing::info!("Loaded {} playlists of user {user_id}", playlists.len());
                        Ok(playlists)
                    }
                    Err(err) => {
                        tracing::error!("Failed to get playlists of user {user_id}: {err:#}");
                        Err(err.to_string())
                    }
                };
                if !state.data.write().finish_fetch(fetch, result) {
                    tracing::debug!("Dropped the result of fetch {fetch}, a newer fetch is running");
                }
            }
        }
    }

    /// gets the public playlists of a user.
    ///
    /// Results are cached for the stale time, `force` bypasses the cache.
    /// Failed requests are retried according to the client's retry policy.
    pub async fn fetch_playlists(
        &self,
        user_id: &str,
        force: bool,
    ) -> Result<Vec<Playlist>, FetchError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(FetchError::InvalidUserId);
        }

        if !force {
            if let Some(playlists) = self.cache.lock().get(user_id) {
                tracing::debug!("Using cached playlists of user {user_id}");
                return Ok(playlists.clone());
            }
        }

        let mut failure_count = 0;
        let playlists = loop {
            match self.request_playlists(user_id).await {
                Ok(playlists) => break playlists,
                Err(err) if self.retry.should_retry(failure_count, &err) => {
                    let delay = self.retry.delay(failure_count as u32);
                    tracing::warn!(
                        "Failed to fetch playlists of user {user_id}: {err:#}, retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    failure_count += 1;
                }
                Err(err) => return Err(err),
            }
        };

        self.cache
            .lock()
            .insert(user_id.to_string(), playlists.clone(), self.stale_time);
        Ok(playlists)
    }

    async fn request_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, FetchError> {
        let mut request = self
            .http
            .post(&self.function_url)
            .json(&json!({ "userId": user_id }));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key).header("apikey", api_key);
        }

        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST => return Err(FetchError::InvalidUserId),
            StatusCode::NOT_FOUND => return Err(FetchError::UserNotFound),
            status => return Err(FetchError::Function(status.as_u16())),
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<PlaylistsResponse>(&body)
            .map(|response| response.playlists)
            .map_err(|err| {
                tracing::debug!("Unexpected playlist function response: {err:#}");
                FetchError::InvalidResponse
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{extract::State, http::HeaderMap, response::IntoResponse, routing::post, Json, Router};
    use pretty_assertions::assert_eq;

    #[derive(Clone, Copy)]
    enum Behavior {
        Serve,
        Missing,
        Broken,
        /// fails the first request, then serves
        Flaky,
        /// serves the first request, then fails
        Fading,
        Malformed,
    }

    #[derive(Clone)]
    struct MockFunction {
        behavior: Behavior,
        requests: Arc<AtomicUsize>,
    }

    async fn function(
        State(mock): State<MockFunction>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> impl IntoResponse {
        let n = mock.requests.fetch_add(1, Ordering::SeqCst);
        assert_eq!(headers["apikey"], "anon-key");
        assert_eq!(headers["authorization"], "Bearer anon-key");

        let playlists = json!({"playlists": [{
            "id": "p1",
            "name": "Sourdough Sundays",
            "cover": "https://img/p1",
            "spotifyUrl": "https://open.spotify.com/playlist/p1",
            "embedId": "p1",
            "description": "Curated playlist",
            "trackCount": 21,
            "owner": body["userId"],
        }]});
        match mock.behavior {
            Behavior::Serve => (StatusCode::OK, Json(playlists)),
            Behavior::Flaky if n > 0 => (StatusCode::OK, Json(playlists)),
            Behavior::Fading if n == 0 => (StatusCode::OK, Json(playlists)),
            Behavior::Missing => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "User not found"})),
            ),
            Behavior::Broken | Behavior::Flaky | Behavior::Fading => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch playlists"})),
            ),
            Behavior::Malformed => (StatusCode::OK, Json(json!({"items": []}))),
        }
    }

    async fn start_mock(behavior: Behavior) -> (Client, Arc<AtomicUsize>) {
        let requests = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/spotify-playlists", post(function))
            .with_state(MockFunction {
                behavior,
                requests: requests.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::new(
            format!("http://{addr}/spotify-playlists"),
            Some("anon-key".to_string()),
            RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(5),
            },
            Duration::from_secs(300),
        );
        (client, requests)
    }

    #[test]
    fn doubles_retry_delays_up_to_a_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_millis(1000));
        assert_eq!(policy.delay(1), Duration::from_millis(2000));
        assert_eq!(policy.delay(4), Duration::from_millis(16_000));
        assert_eq!(policy.delay(5), Duration::from_millis(30_000));
        assert_eq!(policy.delay(40), Duration::from_millis(30_000));
    }

    #[test]
    fn does_not_retry_permanent_failures() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(0, &FetchError::UserNotFound));
        assert!(!policy.should_retry(0, &FetchError::InvalidUserId));
        assert!(policy.should_retry(1, &FetchError::Function(500)));
        assert!(!policy.should_retry(2, &FetchError::Function(500)));
    }

    #[tokio::test]
    async fn fetches_playlists() {
        let (client, requests) = start_mock(Behavior::Serve).await;
        let playlists = client.fetch_playlists("  pantry.chef ", false).await.unwrap();

        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Sourdough Sundays");
        assert_eq!(playlists[0].track_count, 21);
    }

    #[tokio::test]
    async fn rejects_blank_user_ids_without_requesting() {
        let (client, requests) = start_mock(Behavior::Serve).await;
        let err = client.fetch_playlists("   ", false).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidUserId));
        assert_eq!(err.to_string(), "Invalid user ID provided");
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gives_up_on_missing_users_immediately() {
        let (client, requests) = start_mock(Behavior::Missing).await;
        let err = client.fetch_playlists("ghost", false).await.unwrap_err();

        assert!(matches!(err, FetchError::UserNotFound));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_function_failures_twice() {
        let (client, requests) = start_mock(Behavior::Broken).await;
        let err = client.fetch_playlists("pantry.chef", false).await.unwrap_err();

        assert!(matches!(err, FetchError::Function(500)));
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn recovers_after_a_retry() {
        let (client, requests) = start_mock(Behavior::Flaky).await;
        let playlists = client.fetch_playlists("pantry.chef", false).await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejects_bodies_without_playlists() {
        let (client, _requests) = start_mock(Behavior::Malformed).await;
        let err = client.fetch_playlists("pantry.chef", false).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidResponse));
        assert_eq!(err.to_string(), "Invalid response format");
    }

    #[tokio::test]
    async fn caches_playlists_until_forced() {
        let (client, requests) = start_mock(Behavior::Serve).await;
        client.fetch_playlists("pantry.chef", false).await.unwrap();
        client.fetch_playlists("pantry.chef ", false).await.unwrap();
        assert_eq!(requests.load(Ordering::SeqCst), 1);

        client.fetch_playlists("pantry.chef", true).await.unwrap();
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    fn new_state() -> SharedState {
        Arc::new(crate::state::State::new(&config::AppConfig::default()))
    }

    fn get_playlists(force: bool) -> ClientRequest {
        ClientRequest::GetPlaylists {
            user_id: "pantry.chef".to_string(),
            force,
        }
    }

    #[tokio::test]
    async fn stores_categorized_playlists() {
        let (client, _requests) = start_mock(Behavior::Serve).await;
        let state = new_state();
        client.handle_request(&state, get_playlists(false)).await;

        let data = state.data.read();
        assert_eq!(data.status, crate::state::FetchStatus::Loaded);
        assert!(data.last_updated.is_some());
        assert_eq!(data.playlists.len(), 1);
        assert_eq!(data.playlists[0].name(), "Sourdough Sundays");
        assert_eq!(data.playlists[0].category, "Breads & Baked Goods");
        assert_eq!(data.playlists[0].category_emoji, "🍞");
    }

    #[tokio::test]
    async fn stores_the_failure_message() {
        let (client, _requests) = start_mock(Behavior::Missing).await;
        let state = new_state();
        client.handle_request(&state, get_playlists(false)).await;

        let data = state.data.read();
        assert_eq!(
            data.status,
            crate::state::FetchStatus::Failed("User not found".to_string())
        );
        assert!(data.playlists.is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_loaded_playlists() {
        let (client, requests) = start_mock(Behavior::Fading).await;
        let state = new_state();
        client.handle_request(&state, get_playlists(false)).await;
        client.handle_request(&state, get_playlists(true)).await;

        assert_eq!(requests.load(Ordering::SeqCst), 4);
        let data = state.data.read();
        assert_eq!(
            data.status,
            crate::state::FetchStatus::Failed(
                "Failed to fetch playlists (status: 500)".to_string()
            )
        );
        assert_eq!(data.playlists.len(), 1);
        assert_eq!(data.playlists[0].id(), "p1");
    }
}
