use std::collections::HashSet;

use ratatui::widgets::ListState;

use super::{data::AppData, model::CategorizedPlaylist};
use crate::{
    carousel,
    config::{self, Theme},
    key::KeySequence,
    player, taxonomy, utils,
    view::{self, GroupedRow, SortMode},
};

pub type UIStateGuard<'a> = parking_lot::MutexGuard<'a, UIState>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    CommandHelp { scroll_offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The item the user is acting on in the current view
pub enum Focus {
    Playlist { id: String, category: &'static str },
    Category(&'static str),
}

/// Application's UI state
#[derive(Debug)]
pub struct UIState {
    pub is_running: bool,
    pub mode: SortMode,
    pub dark_mode: bool,
    pub input_key_sequence: KeySequence,
    pub popup: Option<PopupState>,

    /// index of the focused playlist in the carousel
    pub carousel_index: usize,
    /// selected row of the grouped and the alphabetical views
    pub list_state: ListState,

    /// id of the playlist playing in the player
    pub selected_playlist: Option<String>,
    pub collapsed_categories: HashSet<&'static str>,
    pub category_filter: Option<&'static str>,
}

impl UIState {
    pub fn new(mode: SortMode, dark_mode: bool) -> Self {
        Self {
            is_running: true,
            mode,
            dark_mode,
            input_key_sequence: KeySequence::default(),
            popup: None,
            carousel_index: 0,
            list_state: utils::new_list_state(Some(0)),
            selected_playlist: None,
            collapsed_categories: HashSet::new(),
            category_filter: None,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        config::get_config().theme_config.theme(self.dark_mode)
    }

    pub fn set_mode(&mut self, mode: SortMode) {
        if self.mode != mode {
            self.mode = mode;
            self.list_state.select(Some(0));
        }
    }

    pub fn reset_positions(&mut self) {
        self.carousel_index = 0;
        self.list_state.select(Some(0));
    }

    /// playlists passing the category filter, in the order of the current view
    pub fn visible_playlists<'a>(&self, data: &'a AppData) -> Vec<&'a CategorizedPlaylist> {
        let playlists = data.visible_playlists(self.category_filter);
        match self.mode {
            SortMode::Alphabetical => view::sort_alphabetically(playlists),
            SortMode::Carousel | SortMode::Category => playlists,
        }
    }

    /// the focused item of the current view
    pub fn focused(&self, data: &AppData) -> Option<Focus> {
        let playlist_focus = |p: &CategorizedPlaylist| Focus::Playlist {
            id: p.id().to_string(),
            category: p.category,
        };

        let playlists = self.visible_playlists(data);
        match self.mode {
            SortMode::Carousel => {
                if playlists.is_empty() {
                    return None;
                }
                Some(playlist_focus(
                    playlists[self.carousel_index % playlists.len()],
                ))
            }
            SortMode::Alphabetical => playlists
                .get(self.list_state.selected()?)
                .copied()
                .map(playlist_focus),
            SortMode::Category => {
                let groups = taxonomy::group_playlists_by_category(playlists);
                let rows = view::grouped_rows(&groups, &self.collapsed_categories);
                rows.get(self.list_state.selected()?).map(|row| match *row {
                    GroupedRow::Category { name, .. } => Focus::Category(name),
                    GroupedRow::Playlist(p) => playlist_focus(p),
                })
            }
        }
    }

    /// number of selectable items in the current view
    pub fn n_items(&self, data: &AppData) -> usize {
        let playlists = self.visible_playlists(data);
        match self.mode {
            SortMode::Carousel | SortMode::Alphabetical => playlists.len(),
            SortMode::Category => {
                let groups = taxonomy::group_playlists_by_category(playlists);
                view::grouped_rows(&groups, &self.collapsed_categories).len()
            }
        }
    }

    pub fn next_playlist(&mut self, n_items: usize) {
        self.carousel_index = carousel::next_index(self.carousel_index, n_items);
    }

    pub fn previous_playlist(&mut self, n_items: usize) {
        self.carousel_index = carousel::prev_index(self.carousel_index, n_items);
    }

    pub fn select_next(&mut self, n_items: usize) {
        if n_items == 0 {
            return;
        }
        let id = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((id + 1).min(n_items - 1)));
    }

    pub fn select_previous(&mut self, n_items: usize) {
        let id = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(id.saturating_sub(1)));
    }

    /// acts on the focused item: plays or stops a playlist, collapses or expands a category
    pub fn choose_focused(&mut self, data: &AppData) {
        match self.focused(data) {
            Some(Focus::Playlist { id, .. }) => {
                self.selected_playlist =
                    player::toggle_selection(self.selected_playlist.as_deref(), &id);
            }
            Some(Focus::Category(name)) => self.toggle_category(data, name),
            None => {}
        }
    }

    /// collapses or expands the category of the focused item
    pub fn toggle_focused_category(&mut self, data: &AppData) {
        match self.focused(data) {
            Some(Focus::Playlist { category, .. } | Focus::Category(category)) => {
                self.toggle_category(data, category);
            }
            None => {}
        }
    }

    /// collapses or expands a category of the grouped view, then selects its header
    pub fn toggle_category(&mut self, data: &AppData, name: &'static str) {
        if !self.collapsed_categories.remove(name) {
            self.collapsed_categories.insert(name);
        }

        let groups =
            taxonomy::group_playlists_by_category(data.visible_playlists(self.category_filter));
        let header = view::grouped_rows(&groups, &self.collapsed_categories)
            .iter()
            .position(|row| matches!(row, GroupedRow::Category { name: n, .. } if *n == name));
        if let Some(id) = header {
            self.list_state.select(Some(id));
        }
    }

    /// moves the category filter to the next (or the previous) filter chip, wrapping around
    pub fn cycle_category_filter(&mut self, data: &AppData, forward: bool) {
        let chips = taxonomy::category_counts(&data.playlists);
        let n = chips.len();
        let current = chips
            .iter()
            .position(|chip| chip.filter() == self.category_filter)
            .unwrap_or(0);
        let next = if forward {
            carousel::next_index(current, n)
        } else {
            carousel::prev_index(current, n)
        };
        self.set_category_filter(chips.get(next).and_then(taxonomy::CategoryCount::filter));
    }

    pub fn set_category_filter(&mut self, filter: Option<&'static str>) {
        if self.category_filter != filter {
            self.category_filter = filter;
            self.reset_positions();
        }
    }

    /// the playing playlist, if it is still loaded
    pub fn selected_playlist<'a>(&self, data: &'a AppData) -> Option<&'a CategorizedPlaylist> {
        data.find_playlist(self.selected_playlist.as_deref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Playlist;
    use pretty_assertions::assert_eq;

    fn data(names: &[&str]) -> AppData {
        let mut data = AppData::default();
        data.set_playlists(taxonomy::categorize_playlists(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Playlist {
                    id: format!("p{i}"),
                    name: (*name).to_string(),
                    cover: String::new(),
                    spotify_url: String::new(),
                    embed_id: format!("p{i}"),
                    description: "Curated playlist".to_string(),
                    track_count: 3,
                })
                .collect(),
        ));
        data
    }

    fn focused_id(ui: &UIState, data: &AppData) -> Option<String> {
        match ui.focused(data)? {
            Focus::Playlist { id, .. } => Some(id),
            Focus::Category(_) => None,
        }
    }

    #[test]
    fn rotates_the_carousel() {
        let data = data(&["Cocoa", "Beets", "Toffee"]);
        let mut ui = UIState::new(SortMode::Carousel, true);
        let n = ui.n_items(&data);

        ui.previous_playlist(n);
        assert_eq!(focused_id(&ui, &data).as_deref(), Some("p2"));
        ui.next_playlist(n);
        ui.next_playlist(n);
        assert_eq!(focused_id(&ui, &data).as_deref(), Some("p1"));
    }

    #[test]
    fn choosing_twice_closes_the_player() {
        let data = data(&["Cocoa", "Beets"]);
        let mut ui = UIState::new(SortMode::Alphabetical, true);
        ui.select_next(ui.n_items(&data));

        ui.choose_focused(&data);
        assert_eq!(ui.selected_playlist.as_deref(), Some("p0"));
        assert_eq!(ui.selected_playlist(&data).unwrap().name(), "Cocoa");
        ui.choose_focused(&data);
        assert_eq!(ui.selected_playlist, None);
    }

    #[test]
    fn collapses_categories_from_the_grouped_view() {
        let data = data(&["Cocoa", "Lemonade", "Beets"]);
        let mut ui = UIState::new(SortMode::Category, true);
        // Beverages header, Cocoa, Lemonade, Vegetables header, Beets
        assert_eq!(ui.n_items(&data), 5);

        ui.select_next(5);
        ui.toggle_focused_category(&data);
        assert!(ui.collapsed_categories.contains("Beverages"));
        assert_eq!(ui.n_items(&data), 3);
        assert_eq!(ui.focused(&data), Some(Focus::Category("Beverages")));

        ui.choose_focused(&data);
        assert!(ui.collapsed_categories.is_empty());
        assert_eq!(ui.n_items(&data), 5);
    }

    #[test]
    fn cycles_category_filters() {
        let data = data(&["Cocoa", "Beets", "Road Trip"]);
        let mut ui = UIState::new(SortMode::Carousel, true);
        ui.next_playlist(3);

        // All, Vegetables, Beverages, Other
        ui.cycle_category_filter(&data, true);
        assert_eq!(ui.category_filter, Some("Vegetables"));
        assert_eq!(ui.carousel_index, 0);
        assert_eq!(ui.n_items(&data), 1);

        ui.cycle_category_filter(&data, false);
        ui.cycle_category_filter(&data, false);
        assert_eq!(ui.category_filter, Some("Other"));
        ui.cycle_category_filter(&data, true);
        assert_eq!(ui.category_filter, None);
    }

    #[test]
    fn has_nothing_to_focus_without_playlists() {
        let data = AppData::default();
        for mode in SortMode::ALL {
            let mut ui = UIState::new(mode, false);
            ui.next_playlist(ui.n_items(&data));
            ui.select_next(ui.n_items(&data));
            assert_eq!(ui.focused(&data), None);
            ui.choose_focused(&data);
            assert_eq!(ui.selected_playlist, None);
        }
    }
}
