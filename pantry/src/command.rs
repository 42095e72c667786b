use serde::Deserialize;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
/// Application's command
pub enum Command {
    Quit,
    OpenCommandHelp,
    ClosePopup,

    NextPlaylist,
    PreviousPlaylist,

    SelectNext,
    SelectPrevious,
    ChooseSelected,

    ToggleCategory,

    NextCategoryFilter,
    PreviousCategoryFilter,
    ClearCategoryFilter,

    CycleSortMode,
    CarouselView,
    CategoryView,
    AlphabeticalView,

    ToggleTheme,
    Refresh,

    OpenPlayer,
    ClosePlayer,
}

impl Command {
    pub fn desc(self) -> &'static str {
        match self {
            Self::Quit => "quit the application",
            Self::OpenCommandHelp => "open a command help popup",
            Self::ClosePopup => "close a popup",
            Self::NextPlaylist => "rotate the carousel to the next playlist",
            Self::PreviousPlaylist => "rotate the carousel to the previous playlist",
            Self::SelectNext => "select the next item in the list",
            Self::SelectPrevious => "select the previous item in the list",
            Self::ChooseSelected => {
                "play the selected playlist, or collapse/expand the selected category"
            }
            Self::ToggleCategory => "collapse/expand the category of the selected item",
            Self::NextCategoryFilter => "filter playlists by the next category",
            Self::PreviousCategoryFilter => "filter playlists by the previous category",
            Self::ClearCategoryFilter => "show playlists of all categories",
            Self::CycleSortMode => "cycle through the display modes",
            Self::CarouselView => "display playlists in a carousel",
            Self::CategoryView => "display playlists grouped by food type",
            Self::AlphabeticalView => "display playlists in alphabetical order",
            Self::ToggleTheme => "switch between the dark and the light theme",
            Self::Refresh => "refetch the playlists",
            Self::OpenPlayer => "open the playing playlist's embedded player in the browser",
            Self::ClosePlayer => "close the player",
        }
    }
}
