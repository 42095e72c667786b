use crate::{command::Command, state::SharedState, view::SortMode};

/// handles a command acting on the current view, returns false if the view has no use for it
pub fn handle_command_for_page(command: Command, state: &SharedState) -> bool {
    let mut ui = state.ui.lock();
    let data = state.data.read();
    let n_items = ui.n_items(&data);

    match (ui.mode, command) {
        (SortMode::Carousel, Command::NextPlaylist | Command::SelectNext) => {
            ui.next_playlist(n_items);
        }
        (SortMode::Carousel, Command::PreviousPlaylist | Command::SelectPrevious) => {
            ui.previous_playlist(n_items);
        }
        (SortMode::Category | SortMode::Alphabetical, Command::SelectNext) => {
            ui.select_next(n_items);
        }
        (SortMode::Category | SortMode::Alphabetical, Command::SelectPrevious) => {
            ui.select_previous(n_items);
        }
        (_, Command::ChooseSelected) => ui.choose_focused(&data),
        (SortMode::Category, Command::ToggleCategory) => ui.toggle_focused_category(&data),
        _ => return false,
    }
    true
}
