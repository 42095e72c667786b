use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{self, Block, Borders},
};

use crate::{
    command::Command,
    config::{self, BorderType, Theme},
};

/// constructs a bordered block titled with `title`,
/// its border highlighted if `is_active` is set
pub fn construct_block<'a>(title: String, theme: &Theme, is_active: bool) -> Block<'a> {
    let (borders, border_type) = match config::get_config().app_config.border_type {
        BorderType::Hidden => (Borders::NONE, widgets::BorderType::Plain),
        BorderType::Plain => (Borders::ALL, widgets::BorderType::Plain),
        BorderType::Rounded => (Borders::ALL, widgets::BorderType::Rounded),
        BorderType::Double => (Borders::ALL, widgets::BorderType::Double),
        BorderType::Thick => (Borders::ALL, widgets::BorderType::Thick),
    };

    let block = Block::default()
        .title(theme.block_title_with_style(title))
        .borders(borders)
        .border_type(border_type);
    if is_active {
        block.border_style(theme.current_active_style())
    } else {
        block.border_style(theme.comment_style())
    }
}

/// the key sequences mapped to a command, joined with `/`
pub fn key_hint(command: Command) -> String {
    config::get_config()
        .keymap_config
        .keymaps
        .iter()
        .filter(|keymap| keymap.command == command)
        .map(|keymap| keymap.key_sequence.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// a rectangle of the given size centered in `rect`
pub fn centered_rect(width: u16, height: u16, rect: Rect) -> Rect {
    let [_, rect, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(rect.height)),
        Constraint::Fill(1),
    ])
    .areas(rect);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(rect.width)),
        Constraint::Fill(1),
    ])
    .areas(rect);
    rect
}
