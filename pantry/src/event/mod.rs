use crate::{
    client::ClientRequest,
    command::Command,
    config,
    key::{Key, KeySequence},
    player,
    state::{PopupState, SharedState},
    view::SortMode,
};
use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};

mod page;
mod popup;

/// starts a terminal event handler (key pressed, resized, etc)
pub fn start_event_handler(state: SharedState, client_pub: flume::Sender<ClientRequest>) {
    while let Ok(event) = crossterm::event::read() {
        tracing::debug!("Got a terminal event: {event:?}");

        if let crossterm::event::Event::Key(event) = event {
            if let Err(err) = handle_key_event(event, &client_pub, &state) {
                tracing::error!("Failed to handle key event: {err:#}");
            }
        }
    }
}

/// handles a terminal key pressed event
fn handle_key_event(
    event: KeyEvent,
    client_pub: &flume::Sender<ClientRequest>,
    state: &SharedState,
) -> Result<()> {
    if event.kind != KeyEventKind::Press {
        return Ok(());
    }
    let key: Key = event.into();
    let keymap_config = &config::get_config().keymap_config;

    // parse the key sequence from user's previous inputs
    let mut key_sequence = state.ui.lock().input_key_sequence.clone();
    key_sequence.keys.push(key);
    if keymap_config
        .find_matched_prefix_keymaps(&key_sequence)
        .is_empty()
    {
        key_sequence = KeySequence { keys: vec![key] };
    }

    let command = keymap_config.find_command_from_key_sequence(&key_sequence);
    let handled = match command {
        None => false,
        Some(command) => {
            let has_popup = state.ui.lock().popup.is_some();
            let handled = if has_popup {
                popup::handle_command_for_popup(command, state)
            } else {
                page::handle_command_for_page(command, state)
            };
            handled || handle_global_command(command, client_pub, state)?
        }
    };

    // a handled key sequence is cleared, an unhandled one is probably
    // a prefix of some command's key sequence
    let mut ui = state.ui.lock();
    if handled {
        ui.input_key_sequence.keys.clear();
    } else {
        ui.input_key_sequence = key_sequence;
    }
    Ok(())
}

/// handles a command available everywhere in the application
fn handle_global_command(
    command: Command,
    client_pub: &flume::Sender<ClientRequest>,
    state: &SharedState,
) -> Result<bool> {
    let mut ui = state.ui.lock();

    match command {
        Command::Quit => {
            ui.is_running = false;
        }
        Command::OpenCommandHelp => {
            ui.popup = Some(PopupState::CommandHelp { scroll_offset: 0 });
        }
        Command::ClosePopup => {
            ui.popup = None;
        }
        Command::NextCategoryFilter | Command::PreviousCategoryFilter => {
            let data = state.data.read();
            ui.cycle_category_filter(&data, command == Command::NextCategoryFilter);
        }
        Command::ClearCategoryFilter => {
            ui.set_category_filter(None);
        }
        Command::CycleSortMode => {
            let mode = ui.mode.next();
            ui.set_mode(mode);
        }
        Command::CarouselView => ui.set_mode(SortMode::Carousel),
        Command::CategoryView => ui.set_mode(SortMode::Category),
        Command::AlphabeticalView => ui.set_mode(SortMode::Alphabetical),
        Command::ToggleTheme => {
            ui.dark_mode = !ui.dark_mode;
        }
        Command::Refresh => {
            client_pub.send(ClientRequest::GetPlaylists {
                user_id: config::get_config().app_config.user_id.clone(),
                force: true,
            })?;
        }
        Command::OpenPlayer => {
            let playlist = ui.selected_playlist(&state.data.read()).cloned();
            let dark_mode = ui.dark_mode;
            drop(ui);
            match playlist {
                Some(playlist) => player::open_player(&playlist, dark_mode)?,
                None => tracing::warn!("No playlist is playing, nothing to open"),
            }
        }
        Command::ClosePlayer => {
            ui.selected_playlist = None;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
