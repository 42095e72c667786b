use std::fmt;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::{
    error::ProxyError,
    model::{transform_playlists, Playlist, RawPlaylist, RawPlaylistPage, TokenResponse},
};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";
const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

#[derive(Clone)]
/// Client credentials of the catalog application
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// reads the credentials from `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`,
    /// returns `None` if either is unset or empty
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var(CLIENT_ID_ENV).ok()?;
        let client_secret = std::env::var(CLIENT_SECRET_ENV).ok()?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
/// Catalog endpoints and pagination limits
pub struct CatalogConfig {
    pub token_url: String,
    pub api_base_url: String,
    /// number of playlists requested per page
    pub page_limit: u32,
    /// maximum number of page requests made for a single user
    pub max_requests: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
            page_limit: 50,
            max_requests: 10,
        }
    }
}

/// A source of a catalog user's public playlists
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_public_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, ProxyError>;
}

/// The catalog API client
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
    credentials: Option<Credentials>,
}

impl CatalogClient {
    #[must_use]
    pub fn new(config: CatalogConfig, credentials: Option<Credentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials,
        }
    }

    /// exchanges the client credentials for an access token
    pub async fn request_token(&self, credentials: &Credentials) -> Result<String, ProxyError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProxyError::Auth(response.status().as_u16()));
        }

        Ok(response.json::<TokenResponse>().await?.access_token)
    }

    fn first_page_url(&self, user_id: &str) -> Result<Url, ProxyError> {
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|err| ProxyError::Internal(format!("invalid catalog base url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| ProxyError::Internal("catalog base url cannot be a base".to_string()))?
            .pop_if_empty()
            .push("users")
            .push(user_id)
            .push("playlists");
        url.query_pairs_mut()
            .append_pair("limit", &self.config.page_limit.to_string());
        Ok(url)
    }

    /// gets all playlists of a user by following the listing's `next` links.
    ///
    /// At most `max_requests` pages are requested; pages past the cap are dropped.
    pub async fn user_playlists(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<RawPlaylist>, ProxyError> {
        let mut playlists = Vec::new();
        let mut next_url = Some(self.first_page_url(user_id)?.to_string());
        let mut n_requests = 0;

        while let Some(url) = next_url.take() {
            if n_requests >= self.config.max_requests {
                tracing::warn!(
                    "Reached the limit of {} page requests for user {user_id}, dropping the remaining pages",
                    self.config.max_requests
                );
                break;
            }
            n_requests += 1;

            let response = self.http.get(&url).bearer_auth(access_token).send().await?;
            match response.status() {
                status if status.is_success() => {}
                StatusCode::NOT_FOUND => return Err(ProxyError::UserNotFound(user_id.to_string())),
                status => return Err(ProxyError::Upstream(status.as_u16())),
            }

            let page = response.json::<RawPlaylistPage>().await?;
            playlists.extend(page.items.unwrap_or_default().into_iter().flatten());
            next_url = page.next;
        }

        Ok(playlists)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn fetch_public_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, ProxyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProxyError::MissingCredentials)?;

        let access_token = self.request_token(credentials).await?;
        let playlists = self.user_playlists(user_id, &access_token).await?;
        tracing::info!(
            "Successfully fetched {} playlists for user {user_id}",
            playlists.len()
        );

        let playlists = transform_playlists(playlists);
        tracing::info!("Returning {} valid playlists", playlists.len());
        Ok(playlists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_first_page_url() {
        let client = CatalogClient::new(CatalogConfig::default(), None);
        let url = client.first_page_url("first.last").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.spotify.com/v1/users/first.last/playlists?limit=50"
        );
    }

    #[test]
    fn tolerates_trailing_slash_in_base_url() {
        let config = CatalogConfig {
            api_base_url: "http://127.0.0.1:9/v1/".to_string(),
            ..Default::default()
        };
        let client = CatalogClient::new(config, None);
        let url = client.first_page_url("someone").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/v1/users/someone/playlists?limit=50"
        );
    }

    #[test]
    fn hides_client_secret_in_debug_output() {
        let creds = Credentials {
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn fails_without_credentials() {
        let client = CatalogClient::new(CatalogConfig::default(), None);
        let err = client.fetch_public_playlists("someone").await.unwrap_err();
        assert!(matches!(err, ProxyError::MissingCredentials));
    }
}
