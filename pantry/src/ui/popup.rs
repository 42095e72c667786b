use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Clear, Row, Table},
    Frame,
};

use super::utils::{centered_rect, construct_block};
use crate::{
    command::Command,
    config,
    state::{PopupState, UIStateGuard},
};

/// renders the opened popup on top of the application
pub fn render_popup(frame: &mut Frame, ui: &UIStateGuard, rect: Rect) {
    match ui.popup {
        Some(PopupState::CommandHelp { scroll_offset }) => {
            render_commands_help_popup(frame, ui, scroll_offset, rect);
        }
        None => {}
    }
}

/// renders a table of commands and the key sequences mapped to them
fn render_commands_help_popup(
    frame: &mut Frame,
    ui: &UIStateGuard,
    scroll_offset: usize,
    rect: Rect,
) {
    let theme = ui.theme();

    let mut commands = BTreeMap::<Command, Vec<String>>::new();
    for keymap in &config::get_config().keymap_config.keymaps {
        commands
            .entry(keymap.command)
            .or_default()
            .push(format!("\"{}\"", keymap.key_sequence));
    }

    let n_rows = commands.len();
    let rows = commands
        .into_iter()
        .skip(scroll_offset.min(n_rows.saturating_sub(1)))
        .map(|(command, keys)| {
            Row::new(vec![
                Span::styled(format!("{command:?}"), theme.accent_style()),
                Span::raw(keys.join(", ")),
                Span::styled(command.desc(), theme.comment_style()),
            ])
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(16),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec![
        Span::styled("Command", theme.title_style()),
        Span::styled("Keys", theme.title_style()),
        Span::styled("Description", theme.title_style()),
    ]))
    .style(theme.app_style())
    .block(construct_block("Commands".to_string(), theme, true));

    let rect = centered_rect(rect.width.saturating_sub(8), rect.height.saturating_sub(4), rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(table, rect);
}
