use serde::{Deserialize, Serialize};

const UNTITLED_PLAYLIST: &str = "Untitled Playlist";
const DEFAULT_DESCRIPTION: &str = "Curated playlist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A playlist as served to the gallery
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub cover: String,
    pub spotify_url: String,
    pub embed_id: String,
    pub description: String,
    pub track_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Body of a successful proxy response
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
}

// Catalog API types. Everything except pagination is optional because the
// catalog sometimes omits fields or returns `null` entries.

#[derive(Debug, Default, Deserialize)]
/// A page of the catalog's user playlist listing
pub struct RawPlaylistPage {
    pub items: Option<Vec<Option<RawPlaylist>>>,
    pub next: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
/// A playlist as returned by the catalog
pub struct RawPlaylist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub images: Option<Vec<RawImage>>,
    pub external_urls: Option<ExternalUrls>,
    pub tracks: Option<TracksRef>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawImage {
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TracksRef {
    /// kept as a raw number, a total that isn't a `u32` counts as no total
    pub total: Option<serde_json::Number>,
}

impl TracksRef {
    fn count(&self) -> Option<u32> {
        self.total
            .as_ref()
            .and_then(serde_json::Number::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

impl RawPlaylist {
    /// whether the playlist can be shown in the gallery:
    /// it must have an id, be public and have cover art
    fn is_displayable(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_empty())
            && self.public == Some(true)
            && self.images.as_ref().is_some_and(|i| !i.is_empty())
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

impl From<RawPlaylist> for Playlist {
    fn from(raw: RawPlaylist) -> Self {
        let cover = raw
            .images
            .and_then(|images| images.into_iter().next())
            .and_then(|image| image.url)
            .unwrap_or_default();

        let id = raw.id.unwrap_or_default();
        Self {
            embed_id: id.clone(),
            id,
            name: non_empty_or(raw.name, UNTITLED_PLAYLIST),
            cover,
            spotify_url: raw
                .external_urls
                .and_then(|urls| urls.spotify)
                .unwrap_or_default(),
            description: non_empty_or(raw.description, DEFAULT_DESCRIPTION),
            track_count: raw.tracks.and_then(|t| t.count()).unwrap_or(0),
        }
    }
}

/// Keeps the displayable playlists and converts them into the gallery format,
/// preserving the catalog's order.
#[must_use]
pub fn transform_playlists(raw: Vec<RawPlaylist>) -> Vec<Playlist> {
    raw.into_iter()
        .filter(RawPlaylist::is_displayable)
        .map(Playlist::from)
        .collect()
}
