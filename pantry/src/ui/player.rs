use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::utils::{construct_block, key_hint};
use crate::{
    command::Command,
    player,
    state::{AppData, UIStateGuard},
};

/// renders the player panel of the playing playlist, if any
pub fn render_player(frame: &mut Frame, ui: &UIStateGuard, data: &AppData, rect: Rect) {
    let Some(playlist) = ui.selected_playlist(data) else {
        return;
    };
    let theme = ui.theme();

    let lines = vec![
        Line::styled(playlist.name().to_string(), theme.title_style()),
        Line::from(playlist.summary()),
        Line::styled(
            player::embed_url(&playlist.playlist.embed_id, ui.dark_mode),
            theme.accent_style(),
        ),
        Line::from(vec![
            Span::styled(
                format!("open: {}", key_hint(Command::OpenPlayer)),
                theme.comment_style(),
            ),
            Span::styled(
                format!(" • close: {}", key_hint(Command::ClosePlayer)),
                theme.comment_style(),
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(construct_block(
                format!("{} Now Playing", playlist.category_emoji),
                theme,
                true,
            ))
            .wrap(Wrap { trim: true }),
        rect,
    );
}
