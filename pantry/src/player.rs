use anyhow::{Context as _, Result};

use crate::{config, state::CategorizedPlaylist};

const EMBED_BASE_URL: &str = "https://open.spotify.com/embed/playlist";

/// URL of a playlist's embedded player, themed for the dark or the light mode
pub fn embed_url(embed_id: &str, dark_mode: bool) -> String {
    format!(
        "{EMBED_BASE_URL}/{embed_id}?utm_source=generator&theme={}",
        u8::from(dark_mode)
    )
}

/// the playlist to play after choosing `chosen` while `selected` is playing:
/// choosing the playing playlist again stops it
pub fn toggle_selection(selected: Option<&str>, chosen: &str) -> Option<String> {
    if selected == Some(chosen) {
        None
    } else {
        Some(chosen.to_string())
    }
}

/// opens a playlist's embedded player with the configured opener command
pub fn open_player(playlist: &CategorizedPlaylist, dark_mode: bool) -> Result<()> {
    let url = embed_url(&playlist.playlist.embed_id, dark_mode);
    let opener = config::get_config().app_config.opener()?;
    tracing::info!("Opening {url} with {}", opener.command);
    opener
        .open(&url)
        .with_context(|| format!("failed to open the player of {}", playlist.name()))
}
