use crate::{
    command::Command,
    state::{PopupState, SharedState},
};

/// handles a command for the opened popup, returns false if the popup has no use for it
pub fn handle_command_for_popup(command: Command, state: &SharedState) -> bool {
    let mut ui = state.ui.lock();

    match command {
        Command::ClosePopup => {
            ui.popup = None;
        }
        Command::SelectNext | Command::SelectPrevious => {
            let Some(PopupState::CommandHelp { scroll_offset }) = ui.popup.as_mut() else {
                return false;
            };
            *scroll_offset = if command == Command::SelectNext {
                scroll_offset.saturating_add(1)
            } else {
                scroll_offset.saturating_sub(1)
            };
        }
        _ => return false,
    }
    true
}
