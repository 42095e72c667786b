use chrono::{DateTime, Local};

use super::model::CategorizedPlaylist;
use crate::taxonomy;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// Progress of the latest playlist fetch
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Default, Debug)]
/// the application's data
pub struct AppData {
    pub status: FetchStatus,
    /// categorized playlists, in the order the function returned them
    pub playlists: Vec<CategorizedPlaylist>,
    pub last_updated: Option<DateTime<Local>>,
    /// id of the latest started fetch, results of older fetches are dropped
    latest_fetch: u64,
}

impl AppData {
    pub fn set_playlists(&mut self, playlists: Vec<CategorizedPlaylist>) {
        self.playlists = playlists;
        self.status = FetchStatus::Loaded;
        self.last_updated = Some(Local::now());
    }

    /// marks a new fetch as loading and returns its id
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch += 1;
        self.status = FetchStatus::Loading;
        self.latest_fetch
    }

    /// stores the result of fetch `fetch` unless a newer fetch has started since.
    /// A failure keeps the loaded playlists.
    pub fn finish_fetch(
        &mut self,
        fetch: u64,
        result: Result<Vec<CategorizedPlaylist>, String>,
    ) -> bool {
        if fetch != self.latest_fetch {
            return false;
        }
        match result {
            Ok(playlists) => self.set_playlists(playlists),
            Err(err) => self.status = FetchStatus::Failed(err),
        }
        true
    }

    /// playlists of the filtered category, or all playlists without a filter
    pub fn visible_playlists(&self, filter: Option<&str>) -> Vec<&CategorizedPlaylist> {
        taxonomy::filter_by_category(&self.playlists, filter)
    }

    pub fn find_playlist(&self, id: &str) -> Option<&CategorizedPlaylist> {
        self.playlists.iter().find(|p| p.id() == id)
    }
}
