use serde::Serialize;

pub use pantry_proxy::Playlist;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A playlist annotated with the food category its name matches
pub struct CategorizedPlaylist {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub category: &'static str,
    pub category_emoji: &'static str,
}

impl std::fmt::Display for CategorizedPlaylist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.playlist.name)
    }
}

impl CategorizedPlaylist {
    pub fn id(&self) -> &str {
        &self.playlist.id
    }

    pub fn name(&self) -> &str {
        &self.playlist.name
    }

    /// `<description> • <N> tracks`
    pub fn summary(&self) -> String {
        format!(
            "{} • {} tracks",
            self.playlist.description, self.playlist.track_count
        )
    }
}
